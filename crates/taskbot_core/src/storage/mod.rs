pub mod codec;
pub mod line_store;

pub use line_store::{LineStore, LoadReport, SkippedLine};
