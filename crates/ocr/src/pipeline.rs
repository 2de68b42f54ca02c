use std::path::{Path, PathBuf};

use hoadon_core::{Detection, ExtractedReceipt, RecognizedRegion};
use image::DynamicImage;
use thiserror::Error;

use crate::detector::Detector;
use crate::extract::Extractor;
use crate::preprocess;
use crate::recognizer::{RecognitionError, Recognizer};
use crate::select::select_best;

/// Why a source image could not be turned into pixels. The display text is the
/// user-facing message of the resulting failure record.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("File không tồn tại: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Không thể đọc file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Không thể đọc ảnh: {0}")]
    Decode(#[from] image::ImageError),
}

/// Orchestrates: load → detect → crop → enhance → recognize → select → extract.
pub struct ReceiptPipeline<D: Detector, R: Recognizer> {
    detector: D,
    recognizer: R,
    extractor: Extractor,
}

impl<D: Detector, R: Recognizer> ReceiptPipeline<D, R> {
    pub fn new(detector: D, recognizer: R, extractor: Extractor) -> Self {
        Self { detector, recognizer, extractor }
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// Process an image file on disk. Never fails: an unreadable source yields
    /// an empty, unsuccessful record carrying the reason.
    pub async fn process_file(&self, path: &Path) -> ExtractedReceipt {
        match load_image(path).await {
            Ok(image) => self.process_image(&image),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "receipt source unavailable");
                ExtractedReceipt::failure(e.to_string())
            }
        }
    }

    /// Process encoded image bytes (JPEG / PNG / …).
    pub fn process_bytes(&self, data: &[u8]) -> ExtractedReceipt {
        match image::load_from_memory(data) {
            Ok(image) => self.process_image(&image),
            Err(e) => {
                let e = SourceError::from(e);
                tracing::warn!(error = %e, "receipt image could not be decoded");
                ExtractedReceipt::failure(e.to_string())
            }
        }
    }

    /// Process images one after another; results are in input order.
    pub async fn process_batch(&self, paths: &[PathBuf]) -> Vec<ExtractedReceipt> {
        let mut results = Vec::with_capacity(paths.len());
        for path in paths {
            results.push(self.process_file(path).await);
        }
        results
    }

    pub fn process_image(&self, image: &DynamicImage) -> ExtractedReceipt {
        let min_confidence = self.extractor.config().min_detection_confidence;
        let detections: Vec<Detection> = self
            .detector
            .detect(image)
            .into_iter()
            .filter(|d| passes_confidence(d.confidence, min_confidence))
            .collect();

        let regions: Vec<RecognizedRegion> = detections
            .into_iter()
            .filter_map(|d| match self.recognize_region(image, &d) {
                Ok(region) => Some(region),
                Err(e) => {
                    tracing::warn!(
                        category = %d.category,
                        bbox = %d.bbox,
                        error = %e,
                        "region skipped"
                    );
                    None
                }
            })
            .collect();

        self.extractor.extract(&regions)
    }

    /// Recognize every enhancement variant of one detection and keep the best text.
    pub fn recognize_region(
        &self,
        image: &DynamicImage,
        detection: &Detection,
    ) -> Result<RecognizedRegion, RecognitionError> {
        let region = preprocess::crop(image, detection.bbox)?;

        let mut candidates = Vec::new();
        let mut first_error = None;
        for (variant, png) in preprocess::variants(&region) {
            match png.and_then(|png| self.recognizer.recognize(&png)) {
                Ok(text) => candidates.push(text),
                Err(e) => {
                    tracing::debug!(%variant, error = %e, "variant recognition failed");
                    first_error.get_or_insert(e);
                }
            }
        }

        if candidates.is_empty() {
            return Err(first_error.unwrap_or(RecognitionError::NoText));
        }
        let best = select_best(&candidates).unwrap_or_default().trim();
        if best.is_empty() {
            return Err(RecognitionError::NoText);
        }
        Ok(RecognizedRegion::new(detection.clone(), best))
    }
}

/// A detector that reports no usable score (NaN) is only trusted when no
/// threshold is configured.
fn passes_confidence(confidence: f32, min_confidence: f32) -> bool {
    if confidence.is_nan() {
        return min_confidence <= 0.0;
    }
    confidence >= min_confidence
}

async fn load_image(path: &Path) -> Result<DynamicImage, SourceError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => SourceError::NotFound(path.to_path_buf()),
        _ => SourceError::Io(e),
    })?;
    Ok(image::load_from_memory(&bytes)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
