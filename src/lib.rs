//! Survival factors: which passenger attributes predicted Titanic survival
//!
//! Loads a passenger list, fills and engineers features, then ranks them with
//! random forest importances and Pearson correlations alongside per-group
//! survival rates. Results render as SVG charts, console tables and JSON.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
