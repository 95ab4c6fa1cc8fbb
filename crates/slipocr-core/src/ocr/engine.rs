//! OCR engine wrapper using `pure-onnx-ocr`.

use std::time::Instant;

use image::{DynamicImage, GenericImageView};
use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::SlipConfig;

use super::{OcrScan, TextLine};

/// Slip OCR engine backed by `pure-onnx-ocr` (pure Rust, no external ONNX
/// Runtime).
///
/// Construct once at service startup and share by reference; there is no
/// lazy global. The engine holds loaded model weights and is otherwise
/// stateless across `process` calls.
pub struct SlipOcrEngine {
    engine: pure_onnx_ocr::engine::OcrEngine,
    keep_unk: bool,
}

impl SlipOcrEngine {
    /// Create an engine from the model files named in the configuration.
    pub fn from_config(config: &SlipConfig) -> Result<Self, OcrError> {
        let det_path = config.model_path(&config.models.detection_model);
        let rec_path = config.model_path(&config.models.recognition_model);
        let dict_path = config.model_path(&config.models.dictionary);

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!(
            "Loaded pure-onnx-ocr engine from {}",
            config.models.model_dir.display()
        );

        Ok(Self {
            engine,
            keep_unk: config.ocr.keep_unk,
        })
    }

    /// Recognize text lines in a slip image.
    ///
    /// Lines come back in reading order so that the field extractor's
    /// top-to-bottom assumptions hold.
    pub fn process(&self, image: &DynamicImage) -> Result<OcrScan, OcrError> {
        let start = Instant::now();
        let (width, height) = image.dimensions();

        info!("Processing image: {}x{}", width, height);

        let results = self
            .engine
            .run_from_image(image)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        debug!("pure-onnx-ocr returned {} text regions", results.len());

        // Sort regions top-to-bottom, then left-to-right within a row band.
        let mut regions: Vec<((f32, f32), String, f32)> = results
            .iter()
            .map(|r| {
                let (x, y) = polygon_origin(&r.bounding_box);
                let text = if self.keep_unk {
                    r.text.clone()
                } else {
                    r.text.replace("[UNK]", " ")
                };
                ((x, y), text, r.confidence)
            })
            .collect();

        regions.sort_by(|a, b| {
            let row_a = (a.0.1 / 20.0) as i32;
            let row_b = (b.0.1 / 20.0) as i32;
            if row_a != row_b {
                row_a.cmp(&row_b)
            } else {
                a.0.0.partial_cmp(&b.0.0).unwrap_or(std::cmp::Ordering::Equal)
            }
        });

        let lines: Vec<TextLine> = regions
            .into_iter()
            .map(|(_, text, confidence)| TextLine { text, confidence })
            .collect();

        let text = lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "OCR complete: {} lines in {}ms",
            lines.len(),
            processing_time_ms
        );

        Ok(OcrScan {
            lines,
            text,
            processing_time_ms,
            image_size: (width, height),
        })
    }
}

/// Top-left corner of a region polygon, used for reading-order sorting.
fn polygon_origin(polygon: &pure_onnx_ocr::Polygon<f64>) -> (f32, f32) {
    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    for coord in polygon.exterior().coords() {
        min_x = min_x.min(coord.x as f32);
        min_y = min_y.min(coord.y as f32);
    }
    (min_x, min_y)
}
