use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Category, Period, Transaction, TransactionType, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Optional narrowing criteria for transaction listings.
///
/// Mirrors the query string of `GET /transactions`: month/year, category
/// and type are all independent and optional.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionFilter {
    pub period: Option<Period>,
    pub category_id: Option<Uuid>,
    pub kind: Option<TransactionType>,
}

impl TransactionFilter {
    pub fn for_period(period: Period) -> Self {
        Self {
            period: Some(period),
            ..Self::default()
        }
    }
}

/// Transaction repository. Every listing is scoped to its owning user.
#[async_trait]
pub trait TransactionRepository: BaseRepository<Transaction, Uuid> {
    /// List a user's transactions matching `filter`, newest date first.
    async fn list(
        &self,
        user_id: Uuid,
        filter: TransactionFilter,
    ) -> Result<Vec<Transaction>, RepoError>;
}

/// Category repository.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    /// List a user's categories, optionally restricted to one type.
    async fn list(
        &self,
        user_id: Uuid,
        kind: Option<TransactionType>,
    ) -> Result<Vec<Category>, RepoError>;
}

/// User repository.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by the identity provider's subject claim.
    async fn find_by_subject(&self, subject: &str) -> Result<Option<User>, RepoError>;
}
