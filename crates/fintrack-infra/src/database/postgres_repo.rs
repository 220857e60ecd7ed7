//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use fintrack_core::domain::{Category, Transaction, TransactionType, User};
use fintrack_core::error::RepoError;
use fintrack_core::ports::{
    CategoryRepository, TransactionFilter, TransactionRepository, UserRepository,
};

use super::entity::Kind;
use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::transaction::{self, Entity as TransactionEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL transaction repository.
pub type PostgresTransactionRepository = PostgresBaseRepository<TransactionEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

#[async_trait]
impl TransactionRepository for PostgresTransactionRepository {
    async fn list(
        &self,
        user_id: Uuid,
        filter: TransactionFilter,
    ) -> Result<Vec<Transaction>, RepoError> {
        let mut query = TransactionEntity::find().filter(transaction::Column::UserId.eq(user_id));

        if let Some(period) = filter.period {
            let (start, end) = period.date_range();
            query = query
                .filter(transaction::Column::Date.gte(start))
                .filter(transaction::Column::Date.lt(end));
        }
        if let Some(category_id) = filter.category_id {
            query = query.filter(transaction::Column::CategoryId.eq(category_id));
        }
        if let Some(kind) = filter.kind {
            query = query.filter(transaction::Column::Kind.eq(Kind::from(kind)));
        }

        let result = query
            .order_by_desc(transaction::Column::Date)
            .order_by_desc(transaction::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn list(
        &self,
        user_id: Uuid,
        kind: Option<TransactionType>,
    ) -> Result<Vec<Category>, RepoError> {
        let mut query = CategoryEntity::find().filter(category::Column::UserId.eq(user_id));

        if let Some(kind) = kind {
            query = query.filter(category::Column::Kind.eq(Kind::from(kind)));
        }

        let result = query
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_subject(&self, subject: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(%subject, "Finding user by identity provider subject");

        let result = UserEntity::find()
            .filter(user::Column::Subject.eq(subject))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}
