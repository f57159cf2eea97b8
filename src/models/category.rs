//! Category model
//!
//! A category is identified by its name, compared without regard to case.
//! Collections key categories by [`category_key`] so every lookup normalizes
//! the same way.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{WalletError, WalletResult};

/// Canonical lookup key for a category name
pub fn category_key(name: &str) -> String {
    name.to_lowercase()
}

/// A spending or income category
///
/// `Default` yields the unnamed placeholder category that operations fall
/// back to when none is given; every named category goes through
/// [`Category::new`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Category {
    name: String,
    #[serde(default)]
    description: String,
}

impl Category {
    /// Create a new category
    ///
    /// Fails with `InvalidArgument` when the name is empty or whitespace.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> WalletResult<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            description: description.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The normalized key this category is stored under
    pub fn key(&self) -> String {
        category_key(&self.name)
    }

    /// Rename the category
    ///
    /// Only the value changes; a ledger holding this category under its old
    /// key must re-key it.
    pub fn set_name(&mut self, name: impl Into<String>) -> WalletResult<()> {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        Ok(())
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Case-insensitive name comparison
    pub fn matches(&self, name: &str) -> bool {
        self.key() == category_key(name)
    }
}

fn validate_name(name: &str) -> WalletResult<()> {
    if name.trim().is_empty() {
        return Err(WalletError::InvalidArgument(
            "Category name cannot be empty".into(),
        ));
    }
    Ok(())
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Category {}

impl std::hash::Hash for Category {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.description.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.description)
        }
    }
}

/// Categories every new ledger starts with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultCategory {
    Food,
    Entertainment,
    Transport,
    Utilities,
    Taxi,
    Salary,
    Bonus,
    Other,
}

impl DefaultCategory {
    /// Get all default categories in seeding order
    pub fn all() -> &'static [Self] {
        &[
            Self::Food,
            Self::Entertainment,
            Self::Transport,
            Self::Utilities,
            Self::Taxi,
            Self::Salary,
            Self::Bonus,
            Self::Other,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Entertainment => "Entertainment",
            Self::Transport => "Transport",
            Self::Utilities => "Utilities",
            Self::Taxi => "Taxi",
            Self::Salary => "Salary",
            Self::Bonus => "Bonus",
            Self::Other => "Other",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Food => "Groceries and meals",
            Self::Entertainment => "Cinema, theatre, concerts",
            Self::Transport => "Public transport and fuel",
            Self::Utilities => "Rent, electricity, water",
            Self::Taxi => "Taxi rides",
            Self::Salary => "Primary income",
            Self::Bonus => "Additional income",
            Self::Other => "Miscellaneous income and expenses",
        }
    }

    pub fn to_category(&self) -> Category {
        Category {
            name: self.name().to_string(),
            description: self.description().to_string(),
        }
    }
}
