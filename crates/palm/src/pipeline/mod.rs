pub mod builder;

use std::path::Path;

use geo_types::{Coord, LineString};
use image::{DynamicImage, GenericImageView, GrayImage, imageops::FilterType};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    algorithms::{MountClassifier, MountLocator, OrientationSelector, Rotation, ShapeAnalyzer, grayscale},
    config::AnalysisConfig,
    error::Result,
    traits::{CurveDetector, Interpreter, SkeletonDetector},
    types::{CurveTrace, LandmarkSkeleton, LengthClass, LineCategory, MountSet, Point, ShapeDescriptor},
};

/// Measurements and classification of one detected line
#[derive(Debug, Clone, Serialize)]
pub struct LineReport {
    /// Class name reported by the curve detector
    pub label: String,
    pub category: LineCategory,
    pub length_class: LengthClass,
    pub descriptor: ShapeDescriptor,
    pub interpretation: Option<String>,
    pub points: Vec<Point>,
}

impl LineReport {
    pub fn to_line_string(&self) -> LineString<f64> {
        self.points.iter().map(|&p| Coord::from(p)).collect()
    }
}

/// Result of one successful pass over an image
#[derive(Debug, Clone, Serialize)]
pub struct PalmAnalysis {
    /// Clockwise rotation applied to the standardized image
    pub rotation: Rotation,
    /// Standardized size / original size
    pub scale: f64,
    pub image_width: u32,
    pub image_height: u32,
    pub skeleton: LandmarkSkeleton,
    pub mounts: MountSet,
    pub lines: Vec<LineReport>,
    /// Upright standardized image every coordinate refers to
    #[serde(skip)]
    pub image: DynamicImage,
}

/// Sequences orientation, mount location and per-curve analysis for one image
pub struct Pipeline {
    config: AnalysisConfig,
    skeleton_detector: Box<dyn SkeletonDetector>,
    curve_detector: Box<dyn CurveDetector>,
    interpreter: Option<Box<dyn Interpreter>>,
    orientation: OrientationSelector,
    locator: MountLocator,
    analyzer: ShapeAnalyzer,
    classifier: MountClassifier,
}

impl Pipeline {
    /// Create a new pipeline builder around the two detectors
    pub fn builder<S, C>(skeleton_detector: S, curve_detector: C) -> builder::PipelineBuilder
    where
        S: SkeletonDetector + 'static,
        C: CurveDetector + 'static,
    {
        builder::PipelineBuilder::new(skeleton_detector, curve_detector)
    }

    /// Create a new pipeline with the given components
    pub fn new(
        config: AnalysisConfig,
        skeleton_detector: Box<dyn SkeletonDetector>,
        curve_detector: Box<dyn CurveDetector>,
        interpreter: Option<Box<dyn Interpreter>>,
    ) -> Self {
        Self {
            orientation: OrientationSelector::new(config.orientation.clone()),
            locator: MountLocator::new(config.mounts.clone()),
            analyzer: ShapeAnalyzer::new(config.features.clone()),
            classifier: MountClassifier::new(config.classifier.clone()),
            config,
            skeleton_detector,
            curve_detector,
            interpreter,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Load and process an image file
    pub fn process_path<P: AsRef<Path>>(&self, path: P) -> Result<Option<PalmAnalysis>> {
        let image = image::open(path)?;
        self.process(&image)
    }

    /// Process an image through the entire pipeline.
    ///
    /// `Ok(None)` when no hand is found in any orientation.
    pub fn process(&self, image: &DynamicImage) -> Result<Option<PalmAnalysis>> {
        // Step 1: Standardize size
        let (standardized, scale) = standardize(image, self.config.target_size);
        info!(
            from = ?image.dimensions(),
            to = ?standardized.dimensions(),
            scale,
            "standardized image"
        );

        // Step 2: Rotate upright
        let (mut upright, mut rotation) = match self.orientation.select(&standardized, self.skeleton_detector.as_ref()) {
            Ok(selected) => selected,
            Err(e) => {
                warn!(error = %e, "orientation search failed, falling back to portrait");
                if standardized.width() > standardized.height() {
                    (Rotation::Deg90.apply(&standardized), Rotation::Deg90)
                } else {
                    (standardized, Rotation::Deg0)
                }
            }
        };

        // Step 3: Final skeleton, with one half-turn retry
        let confidence = self.config.detection.skeleton_confidence;
        let skeleton = match self.skeleton_detector.detect(&upright, confidence)? {
            Some(skeleton) => skeleton,
            None => {
                warn!("no hand after orientation, retrying with 180 degree flip");
                upright = upright.rotate180();
                rotation = rotation.then(Rotation::Deg180);
                match self.skeleton_detector.detect(&upright, confidence)? {
                    Some(skeleton) => skeleton,
                    None => {
                        info!("no hand detected");
                        return Ok(None);
                    }
                }
            }
        };

        // Step 4: Mounts
        let (width, height) = upright.dimensions();
        let mounts = self.locator.locate(&skeleton, width, height)?;

        // Step 5: Curves
        let detection = &self.config.detection;
        let curves = self.curve_detector.detect(&upright, detection.curve_confidence, detection.curve_overlap)?;
        let gray = grayscale(&upright);

        let lines: Vec<LineReport> = curves
            .iter()
            .filter_map(|curve| {
                let Some(trace) = CurveTrace::from_detection(curve) else {
                    debug!(label = %curve.class_name, "skipping curve with fewer than two valid points");
                    return None;
                };
                if trace.category == LineCategory::Unknown {
                    debug!(label = %trace.label, "skipping unrecognized curve class");
                    return None;
                }
                self.analyze_trace(trace, &mounts, &gray)
            })
            .collect();

        info!(
            degrees = rotation.degrees(),
            detected = curves.len(),
            analyzed = lines.len(),
            "palm analysis complete"
        );

        Ok(Some(PalmAnalysis {
            rotation,
            scale,
            image_width: width,
            image_height: height,
            skeleton,
            mounts,
            lines,
            image: upright,
        }))
    }

    /// `None` for a trace without endpoints
    fn analyze_trace(&self, trace: CurveTrace, mounts: &MountSet, gray: &GrayImage) -> Option<LineReport> {
        let (start, end) = (trace.start()?, trace.end()?);
        let length_class = self.classifier.classify(start, end, trace.category, mounts);
        let descriptor = self.analyzer.analyze(&trace.points, gray);
        let interpretation = self
            .interpreter
            .as_ref()
            .map(|interpreter| interpreter.interpret(trace.category, length_class, &descriptor));

        Some(LineReport {
            label: trace.label,
            category: trace.category,
            length_class,
            descriptor,
            interpretation,
            points: trace.points,
        })
    }
}

/// Resize so the longer edge equals `target_size`, keeping the aspect ratio.
///
/// Returns the resized image and the applied scale factor.
pub fn standardize(image: &DynamicImage, target_size: u32) -> (DynamicImage, f64) {
    let (width, height) = image.dimensions();
    let longer = width.max(height).max(1);
    let scale = target_size as f64 / longer as f64;

    let (new_width, new_height) = if height > width {
        ((width as f64 * scale) as u32, target_size)
    } else {
        (target_size, (height as f64 * scale) as u32)
    };

    let resized = image.resize_exact(new_width.max(1), new_height.max(1), FilterType::Lanczos3);
    (resized, scale)
}
