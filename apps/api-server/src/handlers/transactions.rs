//! Transaction handlers: CRUD, the monthly summary, and the trailing
//! history totals.

use actix_web::{HttpResponse, web};
use chrono::Datelike;
use serde::Deserialize;
use uuid::Uuid;

use fintrack_core::domain::{
    Category, Period, Transaction, TransactionType, monthly_totals, summarize,
};
use fintrack_core::ports::TransactionFilter;
use fintrack_shared::ApiResponse;
use fintrack_shared::dto::{
    CategorySummaryResponse, CreateTransactionRequest, MonthlyItemResponse, SummaryResponse,
    TransactionResponse, UpdateTransactionRequest,
};

use super::current_user;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Widest history window a single request may ask for.
const MAX_HISTORY_MONTHS: u32 = 24;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    month: Option<u32>,
    year: Option<i32>,
    #[serde(rename = "categoryId")]
    category_id: Option<Uuid>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    month: Option<u32>,
    year: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    month: Option<u32>,
    year: Option<i32>,
    months: Option<u32>,
}

/// GET /transactions
pub async fn list(
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let user = current_user(&state, &identity).await?;
    let query = query.into_inner();

    let filter = TransactionFilter {
        period: parse_period(query.month, query.year)?,
        category_id: query.category_id,
        kind: parse_kind(query.kind.as_deref())?,
    };

    let transactions = state.transactions.list(user.id, filter).await?;
    let response: Vec<TransactionResponse> =
        transactions.into_iter().map(to_response).collect();

    Ok(HttpResponse::Ok().json(response))
}

/// POST /transactions
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateTransactionRequest>,
) -> AppResult<HttpResponse> {
    let user = current_user(&state, &identity).await?;
    let req = body.into_inner();

    let kind = req.kind.parse::<TransactionType>()?;

    check_category(&state, user.id, req.category_id, kind).await?;

    let transaction = Transaction::new(
        user.id,
        req.description,
        req.amount,
        req.date,
        req.category_id,
        kind,
    )?;

    let saved = state.transactions.save(transaction).await?;
    tracing::debug!(transaction_id = %saved.id, "Transaction created");

    Ok(HttpResponse::Created().json(to_response(saved)))
}

/// PUT /transactions/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdateTransactionRequest>,
) -> AppResult<HttpResponse> {
    let user = current_user(&state, &identity).await?;
    let id = path.into_inner();
    let req = body.into_inner();

    let mut transaction = find_owned(&state, user.id, id).await?;

    let kind = req.kind.parse::<TransactionType>()?;
    check_category(&state, user.id, req.category_id, kind).await?;

    transaction.update(req.description, req.amount, req.date, req.category_id, kind)?;
    let saved = state.transactions.save(transaction).await?;

    Ok(HttpResponse::Ok().json(to_response(saved)))
}

/// DELETE /transactions/{id}
pub async fn remove(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user = current_user(&state, &identity).await?;
    let id = path.into_inner();

    // Ownership check before the delete; a foreign id reads as absent.
    find_owned(&state, user.id, id).await?;
    state.transactions.delete(id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("Transaction deleted")))
}

/// GET /transactions/summary
pub async fn summary(
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<SummaryQuery>,
) -> AppResult<HttpResponse> {
    let user = current_user(&state, &identity).await?;
    let query = query.into_inner();

    let period = parse_period(query.month, query.year)?.ok_or_else(|| {
        AppError::BadRequest("Query parameters 'month' and 'year' are required".to_string())
    })?;

    let transactions = state
        .transactions
        .list(user.id, TransactionFilter::for_period(period))
        .await?;
    let categories = state.categories.list(user.id, None).await?;

    let summary = summarize(&transactions, &categories);

    Ok(HttpResponse::Ok().json(SummaryResponse {
        total_incomes: summary.total_incomes,
        total_expenses: summary.total_expenses,
        balance: summary.balance,
        expenses_by_category: summary
            .expenses_by_category
            .into_iter()
            .map(|c| CategorySummaryResponse {
                category_id: c.category_id,
                category_name: c.category_name,
                category_color: c.category_color,
                amount: c.amount,
                percentage: c.percentage,
            })
            .collect(),
    }))
}

/// GET /transactions/history
///
/// Income/expense totals for the trailing window of months ending at the
/// requested (or current) month, oldest first.
pub async fn history(
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<HistoryQuery>,
) -> AppResult<HttpResponse> {
    let user = current_user(&state, &identity).await?;
    let query = query.into_inner();

    let end = match parse_period(query.month, query.year)? {
        Some(period) => period,
        None => {
            let today = chrono::Utc::now().date_naive();
            Period::new(today.month(), today.year())?
        }
    };
    let months = query.months.unwrap_or(6).clamp(1, MAX_HISTORY_MONTHS);

    let mut items = Vec::with_capacity(months as usize);
    for period in end.trailing(months) {
        let transactions = state
            .transactions
            .list(user.id, TransactionFilter::for_period(period))
            .await?;
        let totals = monthly_totals(period, &transactions);

        items.push(MonthlyItemResponse {
            name: totals.label,
            income: totals.incomes,
            expenses: totals.expenses,
        });
    }

    Ok(HttpResponse::Ok().json(items))
}

/// Both month and year, or neither.
fn parse_period(month: Option<u32>, year: Option<i32>) -> AppResult<Option<Period>> {
    match (month, year) {
        (Some(month), Some(year)) => Period::new(month, year)
            .map(Some)
            .map_err(|e| AppError::BadRequest(e.to_string())),
        (None, None) => Ok(None),
        _ => Err(AppError::BadRequest(
            "Query parameters 'month' and 'year' must be provided together".to_string(),
        )),
    }
}

fn parse_kind(kind: Option<&str>) -> AppResult<Option<TransactionType>> {
    kind.map(|k| {
        k.parse::<TransactionType>()
            .map_err(|e| AppError::BadRequest(e.to_string()))
    })
    .transpose()
}

/// A transaction must exist and belong to the caller; anything else is 404.
async fn find_owned(state: &AppState, user_id: Uuid, id: Uuid) -> AppResult<Transaction> {
    state
        .transactions
        .find_by_id(id)
        .await?
        .filter(|tx| tx.user_id == user_id)
        .ok_or_else(|| AppError::NotFound(format!("Transaction with id {} not found", id)))
}

/// The referenced category must exist, belong to the caller, and carry the
/// same type as the transaction.
async fn check_category(
    state: &AppState,
    user_id: Uuid,
    category_id: Uuid,
    kind: TransactionType,
) -> AppResult<Category> {
    let category = state
        .categories
        .find_by_id(category_id)
        .await?
        .filter(|c| c.user_id == user_id)
        .ok_or_else(|| {
            AppError::NotFound(format!("Category with id {} not found", category_id))
        })?;

    if category.kind != kind {
        return Err(AppError::Validation(format!(
            "Category '{}' is for {} transactions",
            category.name, category.kind
        )));
    }

    Ok(category)
}

fn to_response(tx: Transaction) -> TransactionResponse {
    TransactionResponse {
        id: tx.id,
        description: tx.description,
        amount: tx.amount,
        date: tx.date,
        category_id: tx.category_id,
        kind: tx.kind.to_string(),
        created_at: tx.created_at,
        updated_at: tx.updated_at,
    }
}
