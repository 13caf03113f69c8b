use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// News categories supported by the top-headlines endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    General,
    Business,
    Entertainment,
    Health,
    Science,
    Sports,
    Technology,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::General,
        Category::Business,
        Category::Entertainment,
        Category::Health,
        Category::Science,
        Category::Sports,
        Category::Technology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Business => "business",
            Category::Entertainment => "entertainment",
            Category::Health => "health",
            Category::Science => "science",
            Category::Sports => "sports",
            Category::Technology => "technology",
        }
    }

    /// Parses what a person typed: surrounding whitespace and case are ignored.
    /// Stored and remote values go through the exact `FromStr` instead.
    pub fn from_user_input(s: &str) -> Result<Self, AppError> {
        s.trim()
            .to_ascii_lowercase()
            .parse()
            .map_err(|_| AppError::InvalidCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| AppError::InvalidCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_category() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn rejects_values_outside_the_set() {
        for raw in ["politics", "", "world news", " sports ", "Sports", "SCIENCE"] {
            match raw.parse::<Category>() {
                Err(AppError::InvalidCategory(value)) => assert_eq!(value, raw),
                other => panic!("expected InvalidCategory for {:?}, got {:?}", raw, other),
            }
        }
    }

    #[test]
    fn user_input_ignores_case_and_whitespace() {
        assert_eq!(Category::from_user_input(" Sports ").unwrap(), Category::Sports);
        assert_eq!(Category::from_user_input("TECHNOLOGY").unwrap(), Category::Technology);
        match Category::from_user_input(" Politics") {
            Err(AppError::InvalidCategory(value)) => assert_eq!(value, " Politics"),
            other => panic!("expected InvalidCategory, got {:?}", other),
        }
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Category::Technology).unwrap(),
            "\"technology\""
        );
    }
}
