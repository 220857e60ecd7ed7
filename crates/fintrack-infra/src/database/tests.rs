use chrono::{NaiveDate, Utc};
use rust_decimal_macros::dec;
use sea_orm::{DatabaseBackend, MockDatabase};

use fintrack_core::domain::{Period, Transaction};
use fintrack_core::ports::{BaseRepository, TransactionFilter, TransactionRepository};

use super::entity::{Kind, transaction};
use super::postgres_repo::PostgresTransactionRepository;

fn transaction_model(description: &str) -> transaction::Model {
    let now = Utc::now();
    transaction::Model {
        id: uuid::Uuid::new_v4(),
        user_id: uuid::Uuid::new_v4(),
        description: description.to_owned(),
        amount: dec!(42.50),
        date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
        category_id: uuid::Uuid::new_v4(),
        kind: Kind::Expense,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_transaction_by_id() {
    let model = transaction_model("Groceries");
    let id = model.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model]])
        .into_connection();

    let repo = PostgresTransactionRepository::new(db);

    let result: Option<Transaction> = repo.find_by_id(id).await.unwrap();

    let tx = result.unwrap();
    assert_eq!(tx.id, id);
    assert_eq!(tx.description, "Groceries");
    assert_eq!(tx.amount, dec!(42.50));
}

#[tokio::test]
async fn test_list_maps_models_to_domain() {
    let model = transaction_model("Rent");
    let user_id = model.user_id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model]])
        .into_connection();

    let repo = PostgresTransactionRepository::new(db);
    let period = Period::new(3, 2025).unwrap();

    let listed = repo
        .list(user_id, TransactionFilter::for_period(period))
        .await
        .unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].description, "Rent");
}
