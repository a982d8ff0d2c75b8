//! Data model: raw extractor output in, canonical records out.

pub mod canonical;
pub mod raw;

pub use canonical::*;
pub use raw::*;
