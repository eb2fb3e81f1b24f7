//! Data model for the student roster dashboard.
//!
//! - [`RawRecord`] / [`RawValue`]: loosely-typed rows straight from a reader
//! - [`StudentRecord`] / [`Dob`]: fixed-shape records after normalization
//! - [`FilterState`] / [`FilterField`]: the dashboard's filter controls
//! - [`Column`]: the nine table columns and their headers

pub mod column;
pub mod error;
pub mod filter;
pub mod raw;
pub mod record;

pub use column::Column;
pub use error::{ModelError, Result};
pub use filter::{FilterField, FilterState};
pub use raw::{RawRecord, RawValue, format_number};
pub use record::{Dob, StudentRecord};
