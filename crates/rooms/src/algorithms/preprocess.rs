use image::GrayImage;

use crate::{
    error::{Result, RoomError},
    traits::ImagePreprocessor,
};

/// Gaussian smoothing with a fixed odd support window.
///
/// Suppresses scan noise and anti-aliasing artifacts that would otherwise
/// fragment wall edges during thresholding. Sigma is derived from the
/// window size with the `0.3·((k−1)·0.5 − 1) + 0.8` rule, so the window
/// is the only tunable.
#[derive(Debug, Clone)]
pub struct GaussianBlurPreprocessor {
    pub kernel_size: u32,
}

impl Default for GaussianBlurPreprocessor {
    fn default() -> Self {
        Self { kernel_size: 5 }
    }
}

impl ImagePreprocessor for GaussianBlurPreprocessor {
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage> {
        let kernel = gaussian_kernel(self.kernel_size)?;
        let (width, height) = image.dimensions();
        let blurred = convolve_separable(image, &kernel);
        let pixels = blurred
            .into_iter()
            .map(|v| v.round().clamp(0.0, 255.0) as u8)
            .collect();
        Ok(GrayImage::from_raw(width, height, pixels)
            .expect("blur output matches input dimensions"))
    }
}

/// Normalized 1-D Gaussian kernel for an odd support window.
pub(crate) fn gaussian_kernel(size: u32) -> Result<Vec<f32>> {
    if size < 3 || size % 2 == 0 {
        return Err(RoomError::Processing(format!(
            "kernel window must be odd and at least 3, got {size}"
        )));
    }
    let sigma = 0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8;
    let radius = i64::from(size / 2);
    let mut kernel = Vec::with_capacity(size as usize);
    for i in -radius..=radius {
        let x = i as f32;
        kernel.push((-(x * x) / (2.0 * sigma * sigma)).exp());
    }
    let sum: f32 = kernel.iter().sum();
    for weight in &mut kernel {
        *weight /= sum;
    }
    Ok(kernel)
}

/// Separable 2-D convolution with replicated borders, keeping full f32
/// precision between the passes.
pub(crate) fn convolve_separable(image: &GrayImage, kernel: &[f32]) -> Vec<f32> {
    let (width, height) = image.dimensions();
    let w = i64::from(width);
    let h = i64::from(height);
    let radius = (kernel.len() / 2) as i64;
    let data = image.as_raw();

    let mut horizontal = vec![0.0f32; (width * height) as usize];
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0;
            for (k, weight) in kernel.iter().enumerate() {
                let sx = (x + k as i64 - radius).clamp(0, w - 1);
                acc += weight * f32::from(data[(y * w + sx) as usize]);
            }
            horizontal[(y * w + x) as usize] = acc;
        }
    }

    let mut out = vec![0.0f32; (width * height) as usize];
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0;
            for (k, weight) in kernel.iter().enumerate() {
                let sy = (y + k as i64 - radius).clamp(0, h - 1);
                acc += weight * horizontal[(sy * w + x) as usize];
            }
            out[(y * w + x) as usize] = acc;
        }
    }
    out
}
