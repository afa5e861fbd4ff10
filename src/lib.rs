pub mod builder;
pub mod cli;
pub mod errors;
pub mod ingest;
pub mod metrics;
pub mod model;
pub mod render;
pub mod runner;
pub mod utils;

pub use errors::TdError;
