use image::DynamicImage;
use crate::{
    error::Result,
    types::{DetectedCurve, LandmarkSkeleton, LengthClass, LineCategory, ShapeDescriptor},
};

/// Trait for hand skeleton detectors
pub trait SkeletonDetector: Send + Sync {
    /// Detect one hand; `Ok(None)` when no hand is found at `min_confidence`
    fn detect(&self, image: &DynamicImage, min_confidence: f32) -> Result<Option<LandmarkSkeleton>>;
}

/// Trait for palm curve detectors
pub trait CurveDetector: Send + Sync {
    /// Detect labeled polylines in pixel coordinates of `image`
    fn detect(&self, image: &DynamicImage, confidence: f32, overlap: f32) -> Result<Vec<DetectedCurve>>;
}

/// Trait for turning measurements into readable text
pub trait Interpreter: Send + Sync {
    fn interpret(&self, category: LineCategory, length: LengthClass, descriptor: &ShapeDescriptor) -> String;
}
