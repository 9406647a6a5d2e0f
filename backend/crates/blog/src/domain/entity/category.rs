//! Category Entity

use chrono::{DateTime, Utc};
use kernel::id::CategoryId;

/// Maximum category name length (in characters)
pub const CATEGORY_NAME_MAX_LENGTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub category_id: CategoryId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Validated category ready for insert
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
}

impl NewCategory {
    pub fn into_category(self, created_at: DateTime<Utc>) -> Category {
        Category {
            category_id: CategoryId::new(),
            name: self.name,
            created_at,
        }
    }
}
