use image::DynamicImage;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    config::OrientationConfig,
    error::Result,
    traits::SkeletonDetector,
    types::{HandLandmark, LandmarkSkeleton},
};

/// Quarter-turn rotations, applied clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum Rotation {
    #[default]
    #[serde(rename = "0")]
    Deg0,
    #[serde(rename = "90")]
    Deg90,
    #[serde(rename = "180")]
    Deg180,
    #[serde(rename = "270")]
    Deg270,
}

impl Rotation {
    /// Candidate order of the orientation search
    pub const ALL: [Rotation; 4] = [Self::Deg0, Self::Deg90, Self::Deg180, Self::Deg270];

    pub fn degrees(self) -> u32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    pub fn from_degrees(degrees: u32) -> Option<Self> {
        match degrees % 360 {
            0 => Some(Self::Deg0),
            90 => Some(Self::Deg90),
            180 => Some(Self::Deg180),
            270 => Some(Self::Deg270),
            _ => None,
        }
    }

    /// This rotation followed by `next`
    pub fn then(self, next: Rotation) -> Rotation {
        Self::from_degrees(self.degrees() + next.degrees()).unwrap_or_default()
    }

    pub fn apply(self, image: &DynamicImage) -> DynamicImage {
        match self {
            Self::Deg0 => image.clone(),
            Self::Deg90 => image.rotate90(),
            Self::Deg180 => image.rotate180(),
            Self::Deg270 => image.rotate270(),
        }
    }
}

/// Larger when the fingers point further up the frame.
///
/// Sum of the wrist to middle-fingertip rise and the wrist to knuckle-line
/// rise, in normalized coordinates.
pub fn uprightness_score(skeleton: &LandmarkSkeleton) -> Option<f64> {
    let wrist = skeleton.landmark(HandLandmark::Wrist)?;
    let middle_tip = skeleton.landmark(HandLandmark::MiddleTip)?;
    let index_base = skeleton.landmark(HandLandmark::IndexBase)?;
    let pinky_base = skeleton.landmark(HandLandmark::PinkyBase)?;

    let vertical_distance = wrist.y - middle_tip.y;
    let knuckle_center_y = (index_base.y + pinky_base.y) / 2.0;
    Some(vertical_distance + (wrist.y - knuckle_center_y))
}

/// First candidate with the strictly greatest score
pub fn best_rotation(scored: &[(Rotation, f64)]) -> Option<(Rotation, f64)> {
    scored.iter().fold(None, |best, &(rotation, score)| match best {
        Some((_, best_score)) if score <= best_score => best,
        _ => Some((rotation, score)),
    })
}

/// Picks the quarter turn at which the detected hand is most upright
pub struct OrientationSelector {
    config: OrientationConfig,
}

impl OrientationSelector {
    pub fn new(config: OrientationConfig) -> Self {
        Self { config }
    }

    /// Try every rotation once; without any detection the image comes back unrotated
    pub fn select(
        &self,
        image: &DynamicImage,
        detector: &dyn SkeletonDetector,
    ) -> Result<(DynamicImage, Rotation)> {
        let mut scored = Vec::with_capacity(Rotation::ALL.len());

        for rotation in Rotation::ALL {
            let candidate = rotation.apply(image);
            let Some(skeleton) = detector.detect(&candidate, self.config.detection_confidence)? else {
                debug!(degrees = rotation.degrees(), "no hand at rotation");
                continue;
            };
            if let Some(score) = uprightness_score(&skeleton) {
                debug!(degrees = rotation.degrees(), score, "uprightness");
                scored.push((rotation, score));
            }
        }

        match best_rotation(&scored) {
            Some((rotation, score)) => {
                info!(degrees = rotation.degrees(), score, "selected orientation");
                Ok((rotation.apply(image), rotation))
            }
            None => {
                info!("hand not detected at any rotation, keeping original orientation");
                Ok((image.clone(), Rotation::Deg0))
            }
        }
    }
}

/// [`OrientationSelector::select`] with the default probe confidence
pub fn select_orientation(image: &DynamicImage, detector: &dyn SkeletonDetector) -> Result<(DynamicImage, Rotation)> {
    OrientationSelector::new(OrientationConfig::default()).select(image, detector)
}
