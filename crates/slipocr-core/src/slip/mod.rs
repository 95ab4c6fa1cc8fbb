//! Slip field extraction module.

mod extractor;
pub mod patterns;

pub use extractor::{SlipFieldExtractor, extract_slip_fields};
