//! Core library for Thai bank-slip OCR.
//!
//! This crate provides:
//! - An OCR engine binding (PaddleOCR-style models via `pure-onnx-ocr`)
//! - Heuristic field extraction from recognized slip lines
//!   (amount, source/destination accounts, datetime line, transaction id)
//! - Configuration and result models for the HTTP service layer

pub mod error;
pub mod models;
pub mod ocr;
pub mod slip;

pub use error::{OcrError, Result, SlipError};
pub use models::config::{ModelConfig, OcrConfig, SlipConfig};
pub use models::slip::SlipFields;
pub use ocr::{OcrScan, TextLine};
#[cfg(feature = "native")]
pub use ocr::SlipOcrEngine;
pub use slip::{SlipFieldExtractor, extract_slip_fields};
