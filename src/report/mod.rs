//! Report module - charts, console summary and JSON export

pub mod chart;
pub mod export;
pub mod summary;
pub mod svg;

pub use chart::*;
pub use export::*;
pub use summary::*;
pub use svg::{ChartDocument, SvgNode};
