use crate::{
    config::AnalysisConfig,
    interpret::TemplateInterpreter,
    pipeline::Pipeline,
    traits::{CurveDetector, Interpreter, SkeletonDetector},
};

/// Builder for creating analysis pipelines with a fluent API
pub struct PipelineBuilder {
    config: AnalysisConfig,
    skeleton_detector: Box<dyn SkeletonDetector>,
    curve_detector: Box<dyn CurveDetector>,
    interpreter: Option<Box<dyn Interpreter>>,
    interpret: bool,
}

impl PipelineBuilder {
    /// Detectors have no sensible default, so both are required up front
    pub fn new<S, C>(skeleton_detector: S, curve_detector: C) -> Self
    where
        S: SkeletonDetector + 'static,
        C: CurveDetector + 'static,
    {
        Self {
            config: AnalysisConfig::default(),
            skeleton_detector: Box::new(skeleton_detector),
            curve_detector: Box::new(curve_detector),
            interpreter: None,
            interpret: true,
        }
    }

    /// Replace every threshold at once
    pub fn config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn target_size(mut self, target_size: u32) -> Self {
        self.config.target_size = target_size;
        self
    }

    /// Set the interpreter (replaces the template default)
    pub fn interpreter<I>(mut self, interpreter: I) -> Self
    where
        I: Interpreter + 'static,
    {
        self.interpreter = Some(Box::new(interpreter));
        self.interpret = true;
        self
    }

    /// Leave `interpretation` empty on every line
    pub fn without_interpretation(mut self) -> Self {
        self.interpreter = None;
        self.interpret = false;
        self
    }

    /// Build the pipeline, using [`TemplateInterpreter`] unless told otherwise
    pub fn build(self) -> Pipeline {
        let interpreter = if self.interpret {
            Some(self.interpreter.unwrap_or_else(|| Box::new(TemplateInterpreter)))
        } else {
            None
        };

        Pipeline::new(self.config, self.skeleton_detector, self.curve_detector, interpreter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::Result,
        types::{DetectedCurve, LandmarkSkeleton, LengthClass, LineCategory, ShapeDescriptor},
    };
    use image::DynamicImage;

    struct NoHand;

    impl SkeletonDetector for NoHand {
        fn detect(&self, _image: &DynamicImage, _min_confidence: f32) -> Result<Option<LandmarkSkeleton>> {
            Ok(None)
        }
    }

    struct NoCurves;

    impl CurveDetector for NoCurves {
        fn detect(&self, _image: &DynamicImage, _confidence: f32, _overlap: f32) -> Result<Vec<DetectedCurve>> {
            Ok(Vec::new())
        }
    }

    struct Shout;

    impl Interpreter for Shout {
        fn interpret(&self, category: LineCategory, _length: LengthClass, _descriptor: &ShapeDescriptor) -> String {
            category.to_string().to_uppercase()
        }
    }

    #[test]
    fn test_builder_defaults() {
        let pipeline = PipelineBuilder::new(NoHand, NoCurves).build();
        assert_eq!(pipeline.config(), &AnalysisConfig::default());
        assert!(pipeline.interpreter.is_some());
    }

    #[test]
    fn test_builder_overrides() {
        let pipeline = PipelineBuilder::new(NoHand, NoCurves)
            .target_size(512)
            .interpreter(Shout)
            .build();
        assert_eq!(pipeline.config().target_size, 512);

        let text = pipeline
            .interpreter
            .as_ref()
            .map(|i| i.interpret(LineCategory::Fate, LengthClass::Long, &ShapeDescriptor::invalid()));
        assert_eq!(text.as_deref(), Some("FATE"));
    }

    #[test]
    fn test_builder_without_interpretation() {
        let pipeline = PipelineBuilder::new(NoHand, NoCurves)
            .interpreter(Shout)
            .without_interpretation()
            .build();
        assert!(pipeline.interpreter.is_none());
    }
}
