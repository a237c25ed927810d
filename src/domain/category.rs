//! The closed set of spending and earning categories.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

/// Categorises ledger activity for reporting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Rent,
    Food,
    Salary,
    Transport,
    Entertainment,
    Utilities,
    Other,
}

impl Category {
    /// Every category in the order the entry form offers them.
    pub const ALL: [Category; 7] = [
        Category::Rent,
        Category::Food,
        Category::Salary,
        Category::Transport,
        Category::Entertainment,
        Category::Utilities,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Rent => "Rent",
            Category::Food => "Food",
            Category::Salary => "Salary",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| {
                LedgerError::InvalidInput(format!(
                    "unknown category `{}` (expected one of {})",
                    needle,
                    Category::ALL
                        .iter()
                        .map(Category::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }
}
