use std::fmt;

use serde::Serialize;

use crate::types::{QuoteQuery, TrendQuery};

/// The three strings handed over by a presentation layer, untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewInput {
    pub assets: String,
    pub currencies: String,
    pub selected_currency: String,
}

impl ViewInput {
    pub fn new(
        assets: impl Into<String>,
        currencies: impl Into<String>,
        selected_currency: impl Into<String>,
    ) -> Self {
        ViewInput {
            assets: assets.into(),
            currencies: currencies.into(),
            selected_currency: selected_currency.into(),
        }
    }
}

impl fmt::Display for ViewInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "assets: {:?}, currencies: {:?}, selected: {:?}",
            self.assets, self.currencies, self.selected_currency
        )
    }
}

/// Validated request for one cycle. Identifiers are trimmed, lowercased
/// and deduplicated in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewRequest {
    pub assets: Vec<String>,
    pub currencies: Vec<String>,
    pub selected_currency: String,
    #[serde(skip)]
    pub quote_query: QuoteQuery,
    #[serde(skip)]
    pub trend_query: TrendQuery,
}
