use image::GrayImage;

use crate::{
    algorithms::preprocess::{convolve_separable, gaussian_kernel},
    error::Result,
    traits::Binarizer,
};

/// Adaptive threshold with inverted polarity.
///
/// Each pixel is compared against a Gaussian-weighted mean of its
/// `window × window` neighbourhood minus the constant `c`; pixels darker
/// than that local threshold become foreground (255). Dark wall lines on
/// a lighter background therefore end up as mask foreground, and the
/// local adaptivity tolerates uneven scan lighting that a single global
/// threshold would misclassify.
#[derive(Debug, Clone)]
pub struct AdaptiveThreshold {
    pub window: u32,
    pub c: f64,
}

impl Default for AdaptiveThreshold {
    fn default() -> Self {
        Self { window: 11, c: 2.0 }
    }
}

impl Binarizer for AdaptiveThreshold {
    fn binarize(&self, image: &GrayImage) -> Result<GrayImage> {
        let kernel = gaussian_kernel(self.window)?;
        let local_mean = convolve_separable(image, &kernel);
        let (width, height) = image.dimensions();

        let mask = image
            .as_raw()
            .iter()
            .zip(&local_mean)
            .map(|(&px, &mean)| {
                if f64::from(px) < f64::from(mean) - self.c {
                    255u8
                } else {
                    0u8
                }
            })
            .collect();

        Ok(GrayImage::from_raw(width, height, mask)
            .expect("threshold output matches input dimensions"))
    }
}
