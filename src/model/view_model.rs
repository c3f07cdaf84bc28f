use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{QuoteTable, SelectedQuote, TrendSeries, ViewRequest};

/// Non-fatal degradation observed while building a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    TrendUnavailable { reason: String },
    MissingTrend { asset: String },
    MissingQuote { asset: String },
}

/// Immutable result of one fetch cycle. It owns all of its data; nothing
/// points back into the raw upstream responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    request: ViewRequest,
    table: QuoteTable,
    selected: Vec<SelectedQuote>,
    trends: TrendSeries,
    notices: Vec<Notice>,
    fetched_at: DateTime<Utc>,
}

impl ViewModel {
    pub(crate) fn new(
        request: ViewRequest,
        table: QuoteTable,
        selected: Vec<SelectedQuote>,
        trends: TrendSeries,
        notices: Vec<Notice>,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        ViewModel {
            request,
            table,
            selected,
            trends,
            notices,
            fetched_at,
        }
    }

    pub fn request(&self) -> &ViewRequest {
        &self.request
    }

    pub fn table(&self) -> &QuoteTable {
        &self.table
    }

    pub fn selected_currency(&self) -> &str {
        &self.table.selected_currency
    }

    pub fn selected(&self) -> &[SelectedQuote] {
        &self.selected
    }

    pub fn trends(&self) -> &TrendSeries {
        &self.trends
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }
}
