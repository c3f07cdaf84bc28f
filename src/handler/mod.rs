pub mod quote;
pub mod request;
pub mod trend;
pub mod view;

pub use quote::normalize_quotes;
pub use request::build_request;
pub use trend::normalize_trends;
pub use view::{build_view, build_view_with, CycleOptions};
