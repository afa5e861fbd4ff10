pub mod status;
pub mod types;

pub use status::{TestStatus, normalize_status};
pub use types::{Epic, Hierarchy, KeyResolution, Story, Test, TestLink};
