//! Normalized, owned structures produced by one fetch cycle.

mod change;
mod quote_table;
mod trend_series;
mod view_model;
mod view_request;

pub use change::{Change, ChangeTag, SelectedQuote};
pub use quote_table::{Cell, QuoteRow, QuoteTable};
pub use trend_series::TrendSeries;
pub use view_model::{Notice, ViewModel};
pub use view_request::{ViewInput, ViewRequest};
