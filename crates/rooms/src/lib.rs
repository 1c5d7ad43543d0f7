//! # Floor-Plan Room Extraction
//!
//! Converts a photographed or scanned floor-plan image into a set of
//! closed room polygons with pixel-space area and perimeter metrics.
//!
//! The pipeline runs six stages over the decoded raster: grayscale
//! smoothing, adaptive binarization, morphological gap closing, border
//! following with a nesting hierarchy, area-band filtering, and
//! Douglas-Peucker simplification. Every stage is a trait, so any of them
//! can be swapped through the builder.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rooms::{PipelineConfig, analyze_floor_plan};
//!
//! let payload = std::fs::read_to_string("plan.b64")?;
//! let result = analyze_floor_plan(&payload, &PipelineConfig::default())?;
//! for room in &result.rooms {
//!     println!("{} vertices, {:.0} px²", room.points.len(), room.area_px);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Custom Pipeline
//!
//! ```rust,no_run
//! use rooms::{Pipeline, algorithms::*};
//!
//! let pipeline = Pipeline::builder()
//!     .add_preprocessor(GaussianBlurPreprocessor { kernel_size: 7 })
//!     .set_binarizer(AdaptiveThreshold { window: 15, c: 3.0 })
//!     .set_filter(AreaBandFilter { min_area: 500.0, max_area: 250_000.0 })
//!     .build();
//! # let _ = pipeline;
//! ```
//!
//! Results are ordered as the contour tracer discovered the boundaries —
//! a hierarchy-driven order, not a spatial one — and every contour that
//! passes the area band is reported, including contours nested inside
//! another surviving contour (furniture outlines, interior islands).

// Core modules
pub mod algorithms;
pub mod config;
pub mod decode;
pub mod error;
pub mod mcp;
pub mod pipeline;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use config::{PipelineConfig, ServerConfig};
pub use decode::decode_image_payload;
pub use error::{Result, RoomError};
pub use pipeline::{Pipeline, builder::PipelineBuilder};
pub use traits::*;
pub use types::{AnalysisResponse, AnalysisResult, BorderKind, RoomCandidate, TracedContour};

/// Analyse a floor-plan payload with a pipeline built from `config`.
///
/// This is the single call contract the transport layer wraps: a base64
/// (or data-URI) image string in, an ordered list of room candidates out,
/// or a typed error. All intermediate buffers live and die within the
/// call.
pub fn analyze_floor_plan(payload: &str, config: &PipelineConfig) -> Result<AnalysisResult> {
    Pipeline::from_config(config).analyze(payload)
}
