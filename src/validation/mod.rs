//! Library validation
//!
//! Forces every lazy lookup in a library and reports what doesn't resolve

mod integrity;

pub use integrity::{validate_library, Issue, ValidationReport};
