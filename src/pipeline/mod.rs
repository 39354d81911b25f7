//! Pipeline module - loading, preparation and the survival estimators

pub mod analysis;
pub mod correlation;
pub mod encoder;
pub mod error;
pub mod forest;
pub mod importance;
pub mod loader;
pub mod prepare;
pub mod rates;
pub mod records;

pub use analysis::*;
pub use correlation::*;
pub use encoder::*;
pub use error::*;
pub use forest::{ForestConfig, RandomForest};
pub use importance::*;
pub use loader::*;
pub use prepare::*;
pub use rates::*;
pub use records::*;
