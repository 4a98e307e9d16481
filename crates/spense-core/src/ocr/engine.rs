//! OCR engine wrapper using `pure-onnx-ocr`.

use std::path::Path;
use std::time::Instant;

use image::DynamicImage;
use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::OcrConfig;

/// Trait for OCR text extraction.
///
/// Implementations read the image themselves and return recognized text
/// fragments in reading order, with no other side effects.
pub trait TextExtractor: Send + Sync {
    /// Extract text fragments from the image at `path`.
    fn extract(&self, path: &Path) -> Result<Vec<String>, OcrError>;
}

/// Text extractor backed by `pure-onnx-ocr` (pure Rust, no external ONNX
/// Runtime).
pub struct PureOcrExtractor {
    engine: pure_onnx_ocr::engine::OcrEngine,
    config: OcrConfig,
}

impl PureOcrExtractor {
    /// Create an extractor from model files in a directory.
    pub fn from_dir(model_dir: &Path, config: OcrConfig) -> Result<Self, OcrError> {
        let det_path = model_dir.join(&config.detection_model);
        let rec_path = model_dir.join(&config.recognition_model);
        let dict_path = model_dir.join(&config.dictionary);

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded pure-onnx-ocr engine from {}", model_dir.display());

        Ok(Self { engine, config })
    }

    fn prepare(&self, image: DynamicImage) -> DynamicImage {
        let (w, h) = (image.width(), image.height());
        let max = self.config.max_image_size;
        if w.max(h) > max {
            debug!("Downscaling {}x{} image for OCR", w, h);
            image.resize(max, max, image::imageops::FilterType::Triangle)
        } else {
            image
        }
    }
}

impl TextExtractor for PureOcrExtractor {
    fn extract(&self, path: &Path) -> Result<Vec<String>, OcrError> {
        if !path.exists() {
            return Err(OcrError::NotFound(path.to_path_buf()));
        }

        let start = Instant::now();

        let image = image::open(path).map_err(|e| OcrError::InvalidImage(e.to_string()))?;
        let image = self.prepare(image);

        let results = self
            .engine
            .run_from_image(&image)
            .map_err(|e| OcrError::Extraction(format!("pure-onnx-ocr: {}", e)))?;

        // Sort into reading order: group boxes into horizontal bands, then
        // left to right within a band.
        let mut boxes: Vec<(f32, f32, String)> = results
            .iter()
            .map(|r| {
                let (x, y) = top_left(&r.bounding_box);
                (x, y, r.text.replace("[UNK]", " ").trim().to_string())
            })
            .filter(|(_, _, text)| !text.is_empty())
            .collect();

        boxes.sort_by(|a, b| {
            let row_a = (a.1 / 20.0) as i32;
            let row_b = (b.1 / 20.0) as i32;
            if row_a != row_b {
                row_a.cmp(&row_b)
            } else {
                a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal)
            }
        });

        let fragments: Vec<String> = boxes.into_iter().map(|(_, _, text)| text).collect();

        info!(
            "OCR extracted {} fragments from {} in {}ms",
            fragments.len(),
            path.display(),
            start.elapsed().as_millis()
        );

        Ok(fragments)
    }
}

/// First exterior point of the detection polygon.
fn top_left(polygon: &pure_onnx_ocr::Polygon<f64>) -> (f32, f32) {
    polygon
        .exterior()
        .coords()
        .next()
        .map(|c| (c.x as f32, c.y as f32))
        .unwrap_or((0.0, 0.0))
}
