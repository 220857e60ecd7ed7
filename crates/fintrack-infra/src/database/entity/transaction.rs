//! Transaction entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use super::Kind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub amount: Decimal,
    pub date: Date,
    pub category_id: Uuid,
    pub kind: Kind,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Category,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to domain Transaction.
impl From<Model> for fintrack_core::domain::Transaction {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            description: model.description,
            amount: model.amount,
            date: model.date,
            category_id: model.category_id,
            kind: model.kind.into(),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from domain Transaction to SeaORM ActiveModel.
impl From<fintrack_core::domain::Transaction> for ActiveModel {
    fn from(tx: fintrack_core::domain::Transaction) -> Self {
        Self {
            id: Set(tx.id),
            user_id: Set(tx.user_id),
            description: Set(tx.description),
            amount: Set(tx.amount),
            date: Set(tx.date),
            category_id: Set(tx.category_id),
            kind: Set(tx.kind.into()),
            created_at: Set(tx.created_at.into()),
            updated_at: Set(tx.updated_at.into()),
        }
    }
}
