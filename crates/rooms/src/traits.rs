use image::GrayImage;

use crate::{error::Result, types::TracedContour};

/// Trait for grayscale preprocessing algorithms (e.g. smoothing).
pub trait ImagePreprocessor: Send + Sync {
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage>;
}

/// Trait for binarization algorithms producing a 0/255 foreground mask.
pub trait Binarizer: Send + Sync {
    fn binarize(&self, image: &GrayImage) -> Result<GrayImage>;
}

/// Trait for binary-mask refinement algorithms (e.g. morphological
/// closing).
pub trait MaskRefiner: Send + Sync {
    fn refine(&self, mask: &GrayImage) -> Result<GrayImage>;
}

/// Trait for boundary extraction from a binary mask.
pub trait ContourTracer: Send + Sync {
    /// Extract all closed boundaries with their nesting relationships.
    fn trace(&self, mask: &GrayImage) -> Result<Vec<TracedContour>>;
}

/// Trait for polygon simplification algorithms.
pub trait PolygonSimplifier: Send + Sync {
    /// Reduce a closed contour to a lower-vertex polygon approximating it.
    fn simplify(&self, points: &[[i32; 2]]) -> Vec<[i32; 2]>;
}

/// Trait for deciding which contours survive into the result set.
pub trait ContourFilter: Send + Sync {
    /// Whether a contour with the given enclosed area should be kept.
    fn retain(&self, area_px: f64) -> bool;
}
