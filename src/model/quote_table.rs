use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// One table cell: a price or change value, or the explicit "no data" marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    Value(f64),
    NoData,
}

impl Cell {
    pub fn value(&self) -> Option<f64> {
        match self {
            Cell::Value(v) => Some(*v),
            Cell::NoData => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Cell::NoData)
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) => Cell::Value(v),
            None => Cell::NoData,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Value(v) => write!(f, "{:.2}", v),
            Cell::NoData => write!(f, "N/A"),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Cell::Value(v) => serializer.serialize_f64(*v),
            Cell::NoData => serializer.serialize_none(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteRow {
    pub asset: String,
    /// Aligned with `QuoteTable::currencies`.
    pub prices: Vec<Cell>,
    /// 24h change of the selected currency.
    pub change: Cell,
    pub last_updated_at: Option<DateTime<Utc>>,
}

impl QuoteRow {
    /// Price at a column index; a row shorter than the header reads as
    /// [`Cell::NoData`].
    pub fn cell(&self, index: usize) -> Cell {
        self.prices.get(index).copied().unwrap_or(Cell::NoData)
    }
}

/// Row-per-asset quote table: one price column per requested currency and
/// the change column of the selected currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteTable {
    pub currencies: Vec<String>,
    pub selected_currency: String,
    pub change_column: String,
    pub rows: Vec<QuoteRow>,
}

impl QuoteTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, asset: &str) -> Option<&QuoteRow> {
        self.rows.iter().find(|row| row.asset == asset)
    }

    fn column_index(&self, currency: &str) -> Option<usize> {
        self.currencies.iter().position(|c| c == currency)
    }

    /// `None` when either the asset or the currency is not part of the table.
    pub fn price(&self, asset: &str, currency: &str) -> Option<Cell> {
        let index = self.column_index(currency)?;
        self.row(asset).map(|row| row.cell(index))
    }

    /// Asset → price pairs of one currency column, in row order.
    pub fn column(&self, currency: &str) -> Option<Vec<(&str, Cell)>> {
        let index = self.column_index(currency)?;
        let column = self
            .rows
            .iter()
            .map(|row| (row.asset.as_str(), row.cell(index)))
            .collect();

        Some(column)
    }
}
