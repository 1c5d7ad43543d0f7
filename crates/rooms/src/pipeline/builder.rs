use crate::{
    algorithms::{
        AdaptiveThreshold, AreaBandFilter, BorderFollowingTracer, GaussianBlurPreprocessor,
        MorphologicalCloser, PerimeterRelativeSimplifier,
    },
    config::PipelineConfig,
    pipeline::Pipeline,
    traits::{Binarizer, ContourFilter, ContourTracer, ImagePreprocessor, MaskRefiner, PolygonSimplifier},
};

/// Builder for extraction pipelines with a fluent API.
///
/// Every stage has a default drawn from `PipelineConfig::default()`; any
/// stage can be swapped for a custom implementation of its trait.
pub struct PipelineBuilder {
    preprocessors: Vec<Box<dyn ImagePreprocessor>>,
    binarizer: Option<Box<dyn Binarizer>>,
    refiners: Vec<Box<dyn MaskRefiner>>,
    tracer: Option<Box<dyn ContourTracer>>,
    simplifier: Option<Box<dyn PolygonSimplifier>>,
    filter: Option<Box<dyn ContourFilter>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            preprocessors: Vec::new(),
            binarizer: None,
            refiners: Vec::new(),
            tracer: None,
            simplifier: None,
            filter: None,
        }
    }

    /// Seed every stage from an explicit configuration.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new()
            .add_preprocessor(GaussianBlurPreprocessor {
                kernel_size: config.blur_kernel,
            })
            .set_binarizer(AdaptiveThreshold {
                window: config.threshold_window,
                c: config.threshold_c,
            })
            .add_refiner(MorphologicalCloser {
                kernel_size: config.closing_kernel,
                iterations: config.closing_iterations,
            })
            .set_simplifier(PerimeterRelativeSimplifier {
                ratio: config.simplify_ratio,
            })
            .set_filter(AreaBandFilter {
                min_area: config.min_area,
                max_area: config.max_area,
            })
    }

    /// Add a grayscale preprocessor to the pipeline.
    pub fn add_preprocessor<P>(mut self, preprocessor: P) -> Self
    where
        P: ImagePreprocessor + 'static,
    {
        self.preprocessors.push(Box::new(preprocessor));
        self
    }

    /// Set the binarizer (replaces any existing one).
    pub fn set_binarizer<B>(mut self, binarizer: B) -> Self
    where
        B: Binarizer + 'static,
    {
        self.binarizer = Some(Box::new(binarizer));
        self
    }

    /// Add a mask refiner to the pipeline.
    pub fn add_refiner<R>(mut self, refiner: R) -> Self
    where
        R: MaskRefiner + 'static,
    {
        self.refiners.push(Box::new(refiner));
        self
    }

    /// Set the contour tracer (replaces any existing one).
    pub fn set_tracer<T>(mut self, tracer: T) -> Self
    where
        T: ContourTracer + 'static,
    {
        self.tracer = Some(Box::new(tracer));
        self
    }

    /// Set the polygon simplifier (replaces any existing one).
    pub fn set_simplifier<S>(mut self, simplifier: S) -> Self
    where
        S: PolygonSimplifier + 'static,
    {
        self.simplifier = Some(Box::new(simplifier));
        self
    }

    /// Set the contour filter (replaces any existing one).
    pub fn set_filter<F>(mut self, filter: F) -> Self
    where
        F: ContourFilter + 'static,
    {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Build the pipeline, falling back to default components for any
    /// stage left unset.
    pub fn build(self) -> Pipeline {
        let preprocessors = if self.preprocessors.is_empty() {
            vec![Box::new(GaussianBlurPreprocessor::default()) as Box<dyn ImagePreprocessor>]
        } else {
            self.preprocessors
        };
        let binarizer = self
            .binarizer
            .unwrap_or_else(|| Box::new(AdaptiveThreshold::default()));
        let refiners = if self.refiners.is_empty() {
            vec![Box::new(MorphologicalCloser::default()) as Box<dyn MaskRefiner>]
        } else {
            self.refiners
        };
        let tracer = self
            .tracer
            .unwrap_or_else(|| Box::new(BorderFollowingTracer));
        let simplifier = self
            .simplifier
            .unwrap_or_else(|| Box::new(PerimeterRelativeSimplifier::default()));
        let filter = self
            .filter
            .unwrap_or_else(|| Box::new(AreaBandFilter::default()));

        Pipeline::new(preprocessors, binarizer, refiners, tracer, simplifier, filter)
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
