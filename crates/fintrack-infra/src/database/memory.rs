//! In-memory repositories - used as fallback when no database is configured,
//! and as the backing store for handler tests. Data is lost on restart.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use fintrack_core::domain::{Category, Transaction, TransactionType, User};
use fintrack_core::error::RepoError;
use fintrack_core::ports::{
    BaseRepository, CategoryRepository, TransactionFilter, TransactionRepository, UserRepository,
};

#[derive(Default)]
struct Tables {
    transactions: RwLock<HashMap<Uuid, Transaction>>,
    categories: RwLock<HashMap<Uuid, Category>>,
    users: RwLock<HashMap<Uuid, User>>,
}

/// Shared in-memory store implementing every repository port.
///
/// Clones share the same underlying tables, so one store can be handed out
/// as `Arc<dyn TransactionRepository>`, `Arc<dyn CategoryRepository>`, and
/// `Arc<dyn UserRepository>` at once.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Transaction, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Transaction>, RepoError> {
        Ok(self.tables.transactions.read().await.get(&id).cloned())
    }

    async fn save(&self, tx: Transaction) -> Result<Transaction, RepoError> {
        self.tables
            .transactions
            .write()
            .await
            .insert(tx.id, tx.clone());
        Ok(tx)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.tables
            .transactions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl TransactionRepository for InMemoryStore {
    async fn list(
        &self,
        user_id: Uuid,
        filter: TransactionFilter,
    ) -> Result<Vec<Transaction>, RepoError> {
        let transactions = self.tables.transactions.read().await;

        let mut matching: Vec<Transaction> = transactions
            .values()
            .filter(|tx| tx.user_id == user_id)
            .filter(|tx| filter.period.is_none_or(|p| p.contains(tx.date)))
            .filter(|tx| filter.category_id.is_none_or(|id| tx.category_id == id))
            .filter(|tx| filter.kind.is_none_or(|kind| tx.kind == kind))
            .cloned()
            .collect();

        // Same ordering as the Postgres repository: newest date first.
        matching.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });

        Ok(matching)
    }
}

#[async_trait]
impl BaseRepository<Category, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, RepoError> {
        Ok(self.tables.categories.read().await.get(&id).cloned())
    }

    async fn save(&self, category: Category) -> Result<Category, RepoError> {
        self.tables
            .categories
            .write()
            .await
            .insert(category.id, category.clone());
        Ok(category)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.tables
            .categories
            .write()
            .await
            .remove(&id)
            .ok_or(RepoError::NotFound)?;

        // Mirror the FK cascade: a deleted category takes its transactions.
        self.tables
            .transactions
            .write()
            .await
            .retain(|_, tx| tx.category_id != id);
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn list(
        &self,
        user_id: Uuid,
        kind: Option<TransactionType>,
    ) -> Result<Vec<Category>, RepoError> {
        let categories = self.tables.categories.read().await;

        let mut matching: Vec<Category> = categories
            .values()
            .filter(|c| c.user_id == user_id)
            .filter(|c| kind.is_none_or(|k| c.kind == k))
            .cloned()
            .collect();

        matching.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(matching)
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.tables.users.read().await.get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.tables.users.write().await;

        let subject_taken = users
            .values()
            .any(|u| u.subject == user.subject && u.id != user.id);
        if subject_taken {
            return Err(RepoError::Constraint(
                "User with this subject already exists".to_string(),
            ));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.tables
            .users
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_subject(&self, subject: &str) -> Result<Option<User>, RepoError> {
        let users = self.tables.users.read().await;
        Ok(users.values().find(|u| u.subject == subject).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fintrack_core::domain::Period;
    use rust_decimal_macros::dec;

    fn tx(user_id: Uuid, category_id: Uuid, day: u32) -> Transaction {
        Transaction::new(
            user_id,
            "test".to_string(),
            dec!(10),
            NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            category_id,
            TransactionType::Expense,
        )
        .unwrap()
    }

    fn cat(user_id: Uuid, name: &str) -> Category {
        Category::new(
            user_id,
            name.to_string(),
            "#ef4444".to_string(),
            "tag".to_string(),
            TransactionType::Expense,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_list_scopes_by_user_and_period() {
        let store = InMemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let category = Uuid::new_v4();

        store.save(tx(alice, category, 5)).await.unwrap();
        store.save(tx(alice, category, 20)).await.unwrap();
        store.save(tx(bob, category, 5)).await.unwrap();

        let march = Period::new(3, 2025).unwrap();
        let listed =
            TransactionRepository::list(&store, alice, TransactionFilter::for_period(march))
                .await
                .unwrap();

        assert_eq!(listed.len(), 2);
        // Newest date first.
        assert_eq!(listed[0].date.to_string(), "2025-03-20");

        let april = Period::new(4, 2025).unwrap();
        let listed =
            TransactionRepository::list(&store, alice, TransactionFilter::for_period(april))
                .await
                .unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_category_delete_cascades_to_transactions() {
        let store = InMemoryStore::new();
        let user = Uuid::new_v4();
        let food = cat(user, "Food");
        let rent = cat(user, "Rent");

        store.save(food.clone()).await.unwrap();
        store.save(rent.clone()).await.unwrap();
        store.save(tx(user, food.id, 5)).await.unwrap();
        store.save(tx(user, rent.id, 6)).await.unwrap();

        BaseRepository::<Category, Uuid>::delete(&store, food.id)
            .await
            .unwrap();

        let remaining = TransactionRepository::list(&store, user, TransactionFilter::default())
            .await
            .unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].category_id, rent.id);
    }

    #[tokio::test]
    async fn test_delete_missing_transaction_is_not_found() {
        let store = InMemoryStore::new();

        let result = BaseRepository::<Transaction, Uuid>::delete(&store, Uuid::new_v4()).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_find_user_by_subject() {
        let store = InMemoryStore::new();
        let user = User::new("uid-123".to_string(), "a@example.com".to_string());
        store.save(user.clone()).await.unwrap();

        let found = store.find_by_subject("uid-123").await.unwrap();
        assert_eq!(found.unwrap().id, user.id);

        assert!(store.find_by_subject("uid-999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_subject_rejected() {
        let store = InMemoryStore::new();
        store
            .save(User::new("uid-123".to_string(), "a@example.com".to_string()))
            .await
            .unwrap();

        let result = store
            .save(User::new("uid-123".to_string(), "b@example.com".to_string()))
            .await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }
}
