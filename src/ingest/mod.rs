pub mod reader;
pub mod row;

pub use reader::{DEFAULT_DELIMITER, RowReader};
pub use row::TraceRow;
