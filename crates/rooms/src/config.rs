use serde::{Deserialize, Serialize};

/// Tunable constants for the extraction pipeline.
///
/// The defaults reproduce the behaviour the pipeline was calibrated with:
/// a 5×5 smoothing window, an 11×11 adaptive-threshold neighbourhood with a
/// constant offset of 2, two rounds of 5×5 morphological closing, a
/// simplification tolerance of 0.5% of each contour's perimeter, and an
/// area band of `[1000, 1000000)` px².
///
/// The closing kernel and iteration count trade gap-bridging strength
/// against the risk of merging genuinely separate rooms: each iteration
/// bridges roughly `closing_kernel` pixels of broken wall line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Support window of the Gaussian smoothing filter, in pixels.
    /// Must be odd. Sigma is derived from the window size.
    pub blur_kernel: u32,

    /// Neighbourhood window of the adaptive threshold, in pixels. Must be
    /// odd.
    pub threshold_window: u32,

    /// Constant subtracted from the local Gaussian-weighted mean before
    /// comparing a pixel against it.
    pub threshold_c: f64,

    /// Side length of the square structuring element used for
    /// morphological closing.
    pub closing_kernel: u32,

    /// How many times the closing dilation/erosion pair is applied.
    pub closing_iterations: u32,

    /// Douglas-Peucker tolerance as a fraction of each contour's
    /// perimeter.
    pub simplify_ratio: f64,

    /// Inclusive lower bound of the accepted contour area, in px².
    pub min_area: f64,

    /// Exclusive upper bound of the accepted contour area, in px².
    /// Contours at or above this are treated as the page or frame
    /// boundary and dropped.
    pub max_area: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            blur_kernel: 5,
            threshold_window: 11,
            threshold_c: 2.0,
            closing_kernel: 5,
            closing_iterations: 2,
            simplify_ratio: 0.005,
            min_area: 1000.0,
            max_area: 1_000_000.0,
        }
    }
}

/// Startup configuration for the analysis service binary.
///
/// Constructed once in `main` and passed explicitly into the server
/// bootstrap; the pipeline itself holds no global state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// TCP port the SSE transport binds to.
    pub port: u16,
    /// Verbose logging.
    pub debug: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            debug: false,
        }
    }
}
