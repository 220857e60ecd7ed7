use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Whether a transaction (or category) represents money going out or coming in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Expense,
    Income,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            other => Err(DomainError::validation(format!(
                "Unknown transaction type '{other}', expected 'expense' or 'income'"
            ))),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transaction entity - a single income or expense record owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category_id: Uuid,
    pub kind: TransactionType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction with generated ID and timestamps.
    ///
    /// Rejects empty descriptions and non-positive amounts.
    pub fn new(
        user_id: Uuid,
        description: String,
        amount: Decimal,
        date: NaiveDate,
        category_id: Uuid,
        kind: TransactionType,
    ) -> Result<Self, DomainError> {
        validate_description(&description)?;
        validate_amount(amount)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            description: description.trim().to_string(),
            amount,
            date,
            category_id,
            kind,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace the mutable fields, bumping `updated_at`.
    pub fn update(
        &mut self,
        description: String,
        amount: Decimal,
        date: NaiveDate,
        category_id: Uuid,
        kind: TransactionType,
    ) -> Result<(), DomainError> {
        validate_description(&description)?;
        validate_amount(amount)?;

        self.description = description.trim().to_string();
        self.amount = amount;
        self.date = date;
        self.category_id = category_id;
        self.kind = kind;
        self.updated_at = Utc::now();
        Ok(())
    }
}

fn validate_description(description: &str) -> Result<(), DomainError> {
    if description.trim().is_empty() {
        return Err(DomainError::validation("Description must not be empty"));
    }
    Ok(())
}

fn validate_amount(amount: Decimal) -> Result<(), DomainError> {
    if amount <= Decimal::ZERO {
        return Err(DomainError::validation("Amount must be greater than zero"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
    }

    #[test]
    fn test_new_transaction_sets_ids_and_timestamps() {
        let user_id = Uuid::new_v4();
        let category_id = Uuid::new_v4();

        let tx = Transaction::new(
            user_id,
            "Groceries".to_string(),
            dec!(42.50),
            sample_date(),
            category_id,
            TransactionType::Expense,
        )
        .unwrap();

        assert_eq!(tx.user_id, user_id);
        assert_eq!(tx.category_id, category_id);
        assert_eq!(tx.created_at, tx.updated_at);
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        let result = Transaction::new(
            Uuid::new_v4(),
            "Groceries".to_string(),
            dec!(0),
            sample_date(),
            Uuid::new_v4(),
            TransactionType::Expense,
        );

        assert!(matches!(result, Err(DomainError::Validation(_))));

        let result = Transaction::new(
            Uuid::new_v4(),
            "Refund".to_string(),
            dec!(-10),
            sample_date(),
            Uuid::new_v4(),
            TransactionType::Income,
        );

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_rejects_blank_description() {
        let result = Transaction::new(
            Uuid::new_v4(),
            "   ".to_string(),
            dec!(10),
            sample_date(),
            Uuid::new_v4(),
            TransactionType::Expense,
        );

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_update_trims_and_bumps_timestamp() {
        let mut tx = Transaction::new(
            Uuid::new_v4(),
            "Lunch".to_string(),
            dec!(12),
            sample_date(),
            Uuid::new_v4(),
            TransactionType::Expense,
        )
        .unwrap();
        let created = tx.created_at;

        tx.update(
            "  Dinner  ".to_string(),
            dec!(30),
            sample_date(),
            tx.category_id,
            TransactionType::Expense,
        )
        .unwrap();

        assert_eq!(tx.description, "Dinner");
        assert_eq!(tx.amount, dec!(30));
        assert!(tx.updated_at >= created);
    }

    #[test]
    fn test_type_parses_lowercase() {
        assert_eq!(
            "income".parse::<TransactionType>().unwrap(),
            TransactionType::Income
        );
        assert_eq!(
            "expense".parse::<TransactionType>().unwrap(),
            TransactionType::Expense
        );
        assert!("INCOME".parse::<TransactionType>().is_err());
    }
}
