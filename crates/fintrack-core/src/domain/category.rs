use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::TransactionType;
use crate::error::DomainError;

/// Category entity - a user-defined grouping label for transactions,
/// typed as expense or income.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub color: String,
    pub icon: String,
    pub kind: TransactionType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category with generated ID and timestamps.
    pub fn new(
        user_id: Uuid,
        name: String,
        color: String,
        icon: String,
        kind: TransactionType,
    ) -> Result<Self, DomainError> {
        validate_name(&name)?;
        validate_color(&color)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            name: name.trim().to_string(),
            color,
            icon,
            kind,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace the mutable fields, bumping `updated_at`.
    ///
    /// The kind is deliberately immutable: flipping a category from expense
    /// to income would silently reclassify every transaction under it.
    pub fn update(
        &mut self,
        name: String,
        color: String,
        icon: String,
    ) -> Result<(), DomainError> {
        validate_name(&name)?;
        validate_color(&color)?;

        self.name = name.trim().to_string();
        self.color = color;
        self.icon = icon;
        self.updated_at = Utc::now();
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("Category name must not be empty"));
    }
    Ok(())
}

fn validate_color(color: &str) -> Result<(), DomainError> {
    let is_hex = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());

    if !is_hex {
        return Err(DomainError::validation(
            "Color must be a hex string like #22c55e",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let user_id = Uuid::new_v4();
        let category = Category::new(
            user_id,
            "Food".to_string(),
            "#ef4444".to_string(),
            "utensils".to_string(),
            TransactionType::Expense,
        )
        .unwrap();

        assert_eq!(category.user_id, user_id);
        assert_eq!(category.name, "Food");
        assert_eq!(category.kind, TransactionType::Expense);
    }

    #[test]
    fn test_rejects_empty_name() {
        let result = Category::new(
            Uuid::new_v4(),
            "".to_string(),
            "#ef4444".to_string(),
            "tag".to_string(),
            TransactionType::Expense,
        );

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_rejects_malformed_color() {
        for color in ["red", "#fff", "#gggggg", "ef4444"] {
            let result = Category::new(
                Uuid::new_v4(),
                "Food".to_string(),
                color.to_string(),
                "tag".to_string(),
                TransactionType::Expense,
            );
            assert!(result.is_err(), "expected '{color}' to be rejected");
        }
    }

    #[test]
    fn test_update_keeps_kind() {
        let mut category = Category::new(
            Uuid::new_v4(),
            "Food".to_string(),
            "#ef4444".to_string(),
            "utensils".to_string(),
            TransactionType::Expense,
        )
        .unwrap();

        category
            .update(
                "Dining".to_string(),
                "#22c55e".to_string(),
                "pizza".to_string(),
            )
            .unwrap();

        assert_eq!(category.name, "Dining");
        assert_eq!(category.kind, TransactionType::Expense);
    }
}
