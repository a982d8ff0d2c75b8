//! Normalization pipeline from raw extractor metadata to canonical records.
//!
//! Gaps never fail the pipeline. Each one is replaced by a visible sentinel
//! so the generated documentation points at the source that needs fixing.

pub mod jsdoc;
pub mod methods;
pub mod props;
pub mod styles;
pub mod types;

pub use methods::process_methods;
pub use props::{normalize_property, Mode};
pub use styles::StyleCatalog;
pub use types::normalize_type;

/// Type information is absent or unrecognised.
pub const UNKNOWN_TYPE: &str = "FIX ME UNKNOWN TYPE";
/// Inline object type too large to render as a label.
pub const BIG_OBJECT: &str = "FIX ME FORMAT BIG OBJECT";
pub const NO_NAME: &str = "FIX ME NO NAME";
pub const NO_DESCRIPTION: &str = "FIX ME NO DESCRIPTION";
pub const NO_DEFAULT: &str = "none";
