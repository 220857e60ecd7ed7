//! Data Transfer Objects - request/response types for the API.
//!
//! The `type` field of transactions and categories travels as the lowercase
//! strings `"expense"` / `"income"`; handlers parse and validate it.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to create a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Request to replace a transaction's mutable fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransactionRequest {
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A transaction as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub id: Uuid,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    pub color: String,
    pub icon: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Request to rename/recolor a category. The type is immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub name: String,
    pub color: String,
    pub icon: String,
}

/// A category as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub icon: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Optional profile fields accepted by `POST /users/initialize`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeUserRequest {
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

/// A user profile as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Per-category slice of the monthly summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummaryResponse {
    pub category_id: Uuid,
    pub category_name: String,
    pub category_color: String,
    pub amount: Decimal,
    pub percentage: f64,
}

/// Response for `GET /transactions/summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub total_incomes: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    pub expenses_by_category: Vec<CategorySummaryResponse>,
}

/// One month of `GET /transactions/history`, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyItemResponse {
    /// Display label, e.g. `Mar/2025`.
    pub name: String,
    pub income: Decimal,
    pub expenses: Decimal,
}
