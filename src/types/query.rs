use serde::Serialize;

/// Query string for the simple price endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteQuery {
    pub ids: String,
    pub vs_currencies: String,
    pub include_24hr_change: bool,
    pub include_last_updated_at: bool,
}

/// Query string for the markets endpoint with the 7 day sparkline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendQuery {
    pub vs_currency: String,
    pub ids: String,
    pub sparkline: bool,
}
