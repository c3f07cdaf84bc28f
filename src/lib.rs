pub mod configuration;
pub mod error;
pub mod handler;
pub mod helpers;
pub mod model;
pub mod provider;
pub mod types;

pub use error::{CycleError, Error};
pub use handler::{build_view, build_view_with, CycleOptions};
pub use model::{ViewInput, ViewModel};
pub use provider::{PriceSource, HTTP};
