use serde::{Deserialize, Serialize};

/// Reference data served by `GET /api/categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
}

/// The `{ id, name }` pair embedded in each transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: u64,
    pub name: String,
}

impl Category {
    pub fn new(id: u64, name: &str) -> Self {
        Category {
            id,
            name: name.to_string(),
        }
    }

    /// Position of the category whose id renders as `id`, as stored by the form.
    pub fn position_of(categories: &[Category], id: &str) -> Option<usize> {
        categories.iter().position(|c| c.id.to_string() == id)
    }

    /// Position of the category carrying `name`, as stored by the filter.
    pub fn position_by_name(categories: &[Category], name: &str) -> Option<usize> {
        categories.iter().position(|c| c.name == name)
    }
}
