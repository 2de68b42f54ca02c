use hoadon_core::BBox;
use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
use std::fmt;
use std::io::Cursor;

use crate::recognizer::RecognitionError;

/// Crops at most this wide are upscaled for the untouched variant.
const MAX_UPSCALE_WIDTH: u32 = 2000;

/// The enhancement applied to a cropped region before recognition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Blur, then contrast stretch.
    Denoised,
    /// Contrast stretch only.
    Contrast,
    /// Black/white at the mean luminance.
    Binary,
    /// Original pixels at twice the size.
    Upscaled,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Denoised,
        Variant::Contrast,
        Variant::Binary,
        Variant::Upscaled,
    ];
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Denoised => write!(f, "denoised"),
            Variant::Contrast => write!(f, "contrast"),
            Variant::Binary => write!(f, "binary"),
            Variant::Upscaled => write!(f, "upscaled"),
        }
    }
}

/// Cut `bbox` out of `image`, clamped to the image bounds.
pub fn crop(image: &DynamicImage, bbox: BBox) -> Result<DynamicImage, RecognitionError> {
    if bbox.is_empty() || bbox.x >= image.width() || bbox.y >= image.height() {
        return Err(RecognitionError::EmptyCrop(bbox));
    }
    let w = bbox.w.min(image.width() - bbox.x);
    let h = bbox.h.min(image.height() - bbox.y);
    Ok(image.crop_imm(bbox.x, bbox.y, w, h))
}

/// Render one enhancement variant of a cropped region.
pub fn enhance(region: &DynamicImage, variant: Variant) -> DynamicImage {
    match variant {
        Variant::Denoised => {
            let blurred = image::imageops::blur(&region.to_luma8(), 1.0);
            DynamicImage::ImageLuma8(stretch_contrast(blurred))
        }
        Variant::Contrast => DynamicImage::ImageLuma8(stretch_contrast(region.to_luma8())),
        Variant::Binary => DynamicImage::ImageLuma8(binarize(region.to_luma8())),
        Variant::Upscaled => {
            if region.width() > MAX_UPSCALE_WIDTH {
                region.clone()
            } else {
                region.resize(region.width() * 2, region.height() * 2, FilterType::Lanczos3)
            }
        }
    }
}

/// All variants of a region, PNG-encoded for the recognizer, in [`Variant::ALL`] order.
pub fn variants(region: &DynamicImage) -> Vec<(Variant, Result<Vec<u8>, RecognitionError>)> {
    Variant::ALL
        .iter()
        .map(|v| (*v, encode_as_png(&enhance(region, *v))))
        .collect()
}

/// Linear stretch of the luminance range to 0..=255.
fn stretch_contrast(gray: GrayImage) -> GrayImage {
    let (min_px, max_px) = gray
        .pixels()
        .fold((255u8, 0u8), |(mn, mx), p| (mn.min(p[0]), mx.max(p[0])));

    if max_px == min_px {
        return gray;
    }

    let range = (max_px - min_px) as u32;
    ImageBuffer::from_fn(gray.width(), gray.height(), |x, y| {
        let p = gray.get_pixel(x, y)[0];
        Luma([((p - min_px) as u32 * 255 / range) as u8])
    })
}

fn binarize(gray: GrayImage) -> GrayImage {
    let count = (gray.width() as u64 * gray.height() as u64).max(1);
    let mean = gray.pixels().map(|p| p[0] as u64).sum::<u64>() / count;
    ImageBuffer::from_fn(gray.width(), gray.height(), |x, y| {
        let v = if gray.get_pixel(x, y)[0] as u64 > mean { 255 } else { 0 };
        Luma([v])
    })
}

pub fn encode_as_png(img: &DynamicImage) -> Result<Vec<u8>, RecognitionError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| RecognitionError::Encode(e.to_string()))?;
    Ok(buf)
}
