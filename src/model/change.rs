use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeTag {
    Positive,
    Negative,
    NoData,
}

impl fmt::Display for ChangeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeTag::Positive => write!(f, "positive"),
            ChangeTag::Negative => write!(f, "negative"),
            ChangeTag::NoData => write!(f, "no data"),
        }
    }
}

/// Signed 24h change. Zero counts as positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Change {
    pub tag: ChangeTag,
    pub value: Option<f64>,
}

impl Change {
    pub fn formatted(&self) -> String {
        match self.value {
            Some(v) if v >= 0.0 => format!("+{:.2}", v.abs()),
            Some(v) => format!("{:.2}", v),
            None => String::from("N/A"),
        }
    }
}

impl From<Cell> for Change {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Value(v) if v >= 0.0 => Change {
                tag: ChangeTag::Positive,
                value: Some(v),
            },
            Cell::Value(v) => Change {
                tag: ChangeTag::Negative,
                value: Some(v),
            },
            Cell::NoData => Change {
                tag: ChangeTag::NoData,
                value: None,
            },
        }
    }
}

/// Derived (price, change) tuple of the selected currency for one asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedQuote {
    pub asset: String,
    pub price: Cell,
    pub change: Change,
    pub last_updated_at: Option<DateTime<Utc>>,
}
