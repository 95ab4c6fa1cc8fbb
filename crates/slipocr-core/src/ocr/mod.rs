//! OCR engine binding for slip images.

#[cfg(feature = "native")]
mod engine;

#[cfg(feature = "native")]
pub use engine::SlipOcrEngine;

use serde::{Deserialize, Serialize};

/// A single recognized text line with its recognition confidence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextLine {
    /// Recognized text content.
    pub text: String,

    /// Recognition confidence score (0.0 - 1.0).
    pub confidence: f32,
}

/// Result of running OCR on a slip image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrScan {
    /// Recognized lines in reading order (top-to-bottom, left-to-right).
    pub lines: Vec<TextLine>,

    /// Full text (lines joined with newlines).
    pub text: String,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,

    /// Image dimensions (width, height).
    pub image_size: (u32, u32),
}

impl OcrScan {
    /// Create an empty scan result.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            lines: Vec::new(),
            text: String::new(),
            processing_time_ms: 0,
            image_size: (width, height),
        }
    }

    /// Line texts whose recognition confidence exceeds `threshold`, in
    /// reading order. This is the input shape the field extractor expects.
    pub fn lines_above(&self, threshold: f32) -> Vec<String> {
        self.lines
            .iter()
            .filter(|l| l.confidence > threshold)
            .map(|l| l.text.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_with(lines: Vec<(&str, f32)>) -> OcrScan {
        let lines: Vec<TextLine> = lines
            .into_iter()
            .map(|(text, confidence)| TextLine {
                text: text.to_string(),
                confidence,
            })
            .collect();
        let text = lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        OcrScan {
            lines,
            text,
            processing_time_ms: 0,
            image_size: (100, 100),
        }
    }

    #[test]
    fn test_lines_above_filters_and_preserves_order() {
        let scan = scan_with(vec![("low", 0.1), ("high", 0.9), ("mid", 0.4)]);
        assert_eq!(scan.lines_above(0.3), vec!["high", "mid"]);
    }

    #[test]
    fn test_lines_above_threshold_is_exclusive() {
        let scan = scan_with(vec![("edge", 0.3)]);
        assert!(scan.lines_above(0.3).is_empty());
    }
}
