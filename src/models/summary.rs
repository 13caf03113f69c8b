use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub summary: String,
    pub model: String,
    pub time_taken: f64,
}

impl Summary {
    pub fn display_text(&self) -> String {
        format!(
            "Time taken by {}: {:.2} seconds\n\n{}",
            self.model, self.time_taken, self.summary
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryModel {
    #[default]
    Bart,
    T5,
}

impl fmt::Display for SummaryModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryModel::Bart => f.write_str("bart"),
            SummaryModel::T5 => f.write_str("t5"),
        }
    }
}

impl FromStr for SummaryModel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bart" => Ok(SummaryModel::Bart),
            "t5" => Ok(SummaryModel::T5),
            _ => Err(AppError::InvalidModel(s.to_string())),
        }
    }
}
