pub mod builder;

use image::{DynamicImage, GrayImage};
use tracing::debug;

use crate::{
    config::PipelineConfig,
    decode::decode_image_payload,
    error::{Result, RoomError},
    traits::{Binarizer, ContourFilter, ContourTracer, ImagePreprocessor, MaskRefiner, PolygonSimplifier},
    types::{AnalysisResult, RoomCandidate},
};

/// The floor-plan extraction pipeline.
///
/// Stages run strictly in sequence — preprocess, binarize, refine, trace,
/// filter, simplify — with no branching and no state carried between
/// invocations, so one `Pipeline` can serve concurrent requests.
pub struct Pipeline {
    preprocessors: Vec<Box<dyn ImagePreprocessor>>,
    binarizer: Box<dyn Binarizer>,
    refiners: Vec<Box<dyn MaskRefiner>>,
    tracer: Box<dyn ContourTracer>,
    simplifier: Box<dyn PolygonSimplifier>,
    filter: Box<dyn ContourFilter>,
}

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    /// Create a pipeline with the stages derived from `config`.
    pub fn from_config(config: &PipelineConfig) -> Self {
        builder::PipelineBuilder::from_config(config).build()
    }

    /// Create a new pipeline with the given components.
    pub fn new(
        preprocessors: Vec<Box<dyn ImagePreprocessor>>,
        binarizer: Box<dyn Binarizer>,
        refiners: Vec<Box<dyn MaskRefiner>>,
        tracer: Box<dyn ContourTracer>,
        simplifier: Box<dyn PolygonSimplifier>,
        filter: Box<dyn ContourFilter>,
    ) -> Self {
        Self {
            preprocessors,
            binarizer,
            refiners,
            tracer,
            simplifier,
            filter,
        }
    }

    /// Analyse a transport payload: base64 (or data-URI) image in, room
    /// candidates out.
    pub fn analyze(&self, payload: &str) -> Result<AnalysisResult> {
        let raster = decode_image_payload(payload)?;
        let gray = DynamicImage::ImageRgb8(raster).to_luma8();
        self.process(&gray)
    }

    /// Run the pipeline over an already-decoded grayscale field.
    ///
    /// The returned candidates are ordered as the contour tracer
    /// discovered their boundaries; that order follows the nesting
    /// hierarchy, not any spatial arrangement. Contours fully inside
    /// another surviving contour are reported too — nesting depth is
    /// recorded during tracing but deliberately not used to filter.
    pub fn process(&self, image: &GrayImage) -> Result<AnalysisResult> {
        let (image_width, image_height) = image.dimensions();
        if image_width == 0 || image_height == 0 {
            return Err(RoomError::Processing("image has zero area".into()));
        }

        let mut field = image.clone();
        for preprocessor in &self.preprocessors {
            field = preprocessor.preprocess(&field)?;
        }

        let mut mask = self.binarizer.binarize(&field)?;
        for refiner in &self.refiners {
            mask = refiner.refine(&mask)?;
        }

        let contours = self.tracer.trace(&mask)?;
        debug!(
            contours = contours.len(),
            width = image_width,
            height = image_height,
            "traced mask boundaries"
        );

        let mut rooms = Vec::new();
        for contour in &contours {
            let area_px = contour.area_px();
            if !self.filter.retain(area_px) {
                continue;
            }
            let perimeter_px = contour.perimeter_px();
            let points = self.simplifier.simplify(&contour.points);
            rooms.push(RoomCandidate {
                points,
                area_px,
                perimeter_px,
            });
        }
        debug!(rooms = rooms.len(), "assembled room candidates");

        Ok(AnalysisResult {
            rooms,
            image_width,
            image_height,
        })
    }
}
