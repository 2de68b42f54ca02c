use hoadon_core::Detection;
use image::DynamicImage;

/// Abstraction over a region detector. May return zero or many detections in
/// any order.
pub trait Detector: Send + Sync {
    fn detect(&self, image: &DynamicImage) -> Vec<Detection>;
}

/// Returns a fixed set of detections regardless of the image; used when
/// regions come from annotation files, and in tests.
pub struct StaticDetector {
    pub detections: Vec<Detection>,
}

impl StaticDetector {
    pub fn new(detections: Vec<Detection>) -> Self {
        Self { detections }
    }
}

impl Detector for StaticDetector {
    fn detect(&self, _image: &DynamicImage) -> Vec<Detection> {
        self.detections.clone()
    }
}
