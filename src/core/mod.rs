pub mod engine;
pub mod merge;
pub mod pipeline;

pub use crate::domain::model::{Fragment, MergeResult, PayloadStats, RunSummary};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
