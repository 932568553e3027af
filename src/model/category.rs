use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Requirement and service category.
///
/// Declaration order is the reporting order used by coverage reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Category {
    Technical,
    Functional,
    Timeline,
    Budget,
    Compliance,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category '{value}'")]
pub struct CategoryParseError {
    pub value: String,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Technical,
        Category::Functional,
        Category::Timeline,
        Category::Budget,
        Category::Compliance,
    ];

    #[inline]
    pub fn label(&self) -> &'static str {
        match self {
            Category::Technical => "Technical",
            Category::Functional => "Functional",
            Category::Timeline => "Timeline",
            Category::Budget => "Budget",
            Category::Compliance => "Compliance",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CategoryParseError {
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for Category {
    type Error = CategoryParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
