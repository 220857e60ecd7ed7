//! SeaORM entities and their conversions to/from the domain types.

pub mod category;
pub mod transaction;
pub mod user;

use sea_orm::entity::prelude::*;

use fintrack_core::domain::TransactionType;

/// Database representation of [`TransactionType`], stored as a short string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Kind {
    #[sea_orm(string_value = "expense")]
    Expense,
    #[sea_orm(string_value = "income")]
    Income,
}

impl From<Kind> for TransactionType {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Expense => Self::Expense,
            Kind::Income => Self::Income,
        }
    }
}

impl From<TransactionType> for Kind {
    fn from(kind: TransactionType) -> Self {
        match kind {
            TransactionType::Expense => Self::Expense,
            TransactionType::Income => Self::Income,
        }
    }
}
