//! Tunable thresholds for every analysis stage.
//!
//! Pixel-based values (radii, search lengths, trend threshold) are calibrated
//! against images standardized to [`AnalysisConfig::target_size`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Longer image edge after standardization, in pixels
    #[schemars(range(min = 64, max = 8192))]
    pub target_size: u32,
    pub orientation: OrientationConfig,
    pub detection: DetectionConfig,
    pub mounts: MountConfig,
    pub features: FeatureConfig,
    pub classifier: ClassifierConfig,
    pub render: RenderConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            target_size: 1024,
            orientation: OrientationConfig::default(),
            detection: DetectionConfig::default(),
            mounts: MountConfig::default(),
            features: FeatureConfig::default(),
            classifier: ClassifierConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OrientationConfig {
    /// Skeleton confidence used while probing rotations
    pub detection_confidence: f32,
}

impl Default for OrientationConfig {
    fn default() -> Self {
        Self { detection_confidence: 0.3 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DetectionConfig {
    /// Skeleton confidence for the final detection on the upright image
    pub skeleton_confidence: f32,
    pub curve_confidence: f32,
    /// Overlap (IoU) threshold for curve detector non-max suppression
    pub curve_overlap: f32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            skeleton_confidence: 0.5,
            curve_confidence: 0.3,
            curve_overlap: 0.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MountConfig {
    /// Fraction of the wrist to mercury x offset placed at the moon mount
    pub moon_x_ratio: f64,
    /// Fraction of the wrist to mercury y offset placed at the moon mount
    pub moon_y_ratio: f64,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            moon_x_ratio: 0.7,
            moon_y_ratio: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FeatureConfig {
    /// Gaps above median + factor * stddev count as breaks
    pub break_std_dev_factor: f64,
    /// Half size of the fork search window, in pixels
    pub branch_radius: u32,
    /// Pixels above this value are foreground in the fork window
    pub branch_binarize_threshold: u8,
    /// Vertical change (px) to the next vertex that counts as an up/down trend
    pub trend_threshold: f64,
    pub thickness_samples: usize,
    /// Steps walked along the normal when measuring thickness
    pub thickness_search: u32,
    /// Pixels below this value belong to the stroke
    pub dark_pixel_threshold: u8,
    pub deep_thickness: f64,
    pub medium_thickness: f64,
    pub wavy_overall: f64,
    /// Degrees
    pub wavy_local: f64,
    pub curved_overall: f64,
    /// Degrees
    pub curved_local: f64,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            break_std_dev_factor: 2.0,
            branch_radius: 15,
            branch_binarize_threshold: 127,
            trend_threshold: 5.0,
            thickness_samples: 5,
            thickness_search: 20,
            dark_pixel_threshold: 128,
            deep_thickness: 6.0,
            medium_thickness: 3.0,
            wavy_overall: 0.3,
            wavy_local: 45.0,
            curved_overall: 0.1,
            curved_local: 20.0,
        }
    }
}

/// Zone ratios for mount-relative length classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ClassifierConfig {
    pub heart_jupiter_ratio: f64,
    pub heart_saturn_ratio: f64,
    pub life_long_ratio: f64,
    pub life_medium_ratio: f64,
    pub head_long_ratio: f64,
    pub fate_long_ratio: f64,
    pub fate_medium_ratio: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            heart_jupiter_ratio: 0.4,
            heart_saturn_ratio: 0.5,
            life_long_ratio: 0.6,
            life_medium_ratio: 0.35,
            head_long_ratio: 0.3,
            fate_long_ratio: 0.25,
            fate_medium_ratio: 0.5,
        }
    }
}

/// RGB colors and sizes for annotation rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RenderConfig {
    pub landmark_color: [u8; 3],
    pub connection_color: [u8; 3],
    pub mount_color: [u8; 3],
    pub line_color: [u8; 3],
    pub landmark_radius: i32,
    pub mount_radius: i32,
    pub line_width: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            landmark_color: [0, 255, 0],
            connection_color: [0, 0, 255],
            mount_color: [255, 0, 255],
            line_color: [0, 255, 0],
            landmark_radius: 2,
            mount_radius: 5,
            line_width: 3,
        }
    }
}

impl AnalysisConfig {
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(AnalysisConfig)
    }
}
