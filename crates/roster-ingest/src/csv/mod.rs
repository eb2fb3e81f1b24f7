//! CSV reading utilities.

mod reader;
mod value;

pub use reader::{read_csv_bytes, read_csv_records};
pub use value::infer_value;
