use geo_types::Coord;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// 2D point in either normalized (0..1) or pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Detector output pads unused vertex slots with (0, 0)
    pub fn is_zero_padding(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for Coord<f64> {
    fn from(p: Point) -> Self {
        Coord { x: p.x, y: p.y }
    }
}

/// Fixed landmark indices of the 21-point hand topology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandLandmark {
    Wrist = 0,
    ThumbBase = 1,
    ThumbTip = 4,
    IndexBase = 5,
    IndexTip = 8,
    MiddleBase = 9,
    MiddleTip = 12,
    RingBase = 13,
    RingTip = 16,
    PinkyBase = 17,
    PinkyTip = 20,
}

impl HandLandmark {
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Bone connections of the 21-point hand topology, as (from, to) landmark indices
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    // thumb
    (0, 1), (1, 2), (2, 3), (3, 4),
    // index
    (0, 5), (5, 6), (6, 7), (7, 8),
    // middle
    (9, 10), (10, 11), (11, 12),
    // ring
    (13, 14), (14, 15), (15, 16),
    // pinky
    (0, 17), (17, 18), (18, 19), (19, 20),
    // palm
    (5, 9), (9, 13), (13, 17),
];

/// Landmarks produced by one skeleton detection, in normalized image coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LandmarkSkeleton {
    pub points: Vec<Point>,
}

impl LandmarkSkeleton {
    pub const LANDMARK_COUNT: usize = 21;

    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn landmark(&self, landmark: HandLandmark) -> Option<Point> {
        self.points.get(landmark.index()).copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Named anatomical reference points
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, IntoStaticStr,
)]
pub enum Mount {
    #[serde(rename = "wrist")]
    #[strum(serialize = "wrist")]
    Wrist,
    #[serde(rename = "mount_venus")]
    #[strum(serialize = "mount_venus")]
    Venus,
    #[serde(rename = "mount_jupiter")]
    #[strum(serialize = "mount_jupiter")]
    Jupiter,
    #[serde(rename = "mount_saturn")]
    #[strum(serialize = "mount_saturn")]
    Saturn,
    #[serde(rename = "mount_apollo")]
    #[strum(serialize = "mount_apollo")]
    Apollo,
    #[serde(rename = "mount_mercury")]
    #[strum(serialize = "mount_mercury")]
    Mercury,
    #[serde(rename = "mount_moon")]
    #[strum(serialize = "mount_moon")]
    Moon,
}

/// Mount positions in pixel space plus derived palm dimensions.
///
/// Every mount is a mandatory field, so a partially located set cannot exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MountSet {
    pub wrist: Point,
    pub mount_venus: Point,
    pub mount_jupiter: Point,
    pub mount_saturn: Point,
    pub mount_apollo: Point,
    pub mount_mercury: Point,
    pub mount_moon: Point,
    /// Distance between venus and mercury
    pub palm_width: f64,
    /// Distance between wrist and saturn
    pub palm_length: f64,
}

impl MountSet {
    pub fn get(&self, mount: Mount) -> Point {
        match mount {
            Mount::Wrist => self.wrist,
            Mount::Venus => self.mount_venus,
            Mount::Jupiter => self.mount_jupiter,
            Mount::Saturn => self.mount_saturn,
            Mount::Apollo => self.mount_apollo,
            Mount::Mercury => self.mount_mercury,
            Mount::Moon => self.mount_moon,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Mount, Point)> + '_ {
        use strum::IntoEnumIterator;
        Mount::iter().map(move |mount| (mount, self.get(mount)))
    }
}

/// Declared category of a detected curve
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LineCategory {
    Life,
    Heart,
    Head,
    Fate,
    Unknown,
}

impl LineCategory {
    /// Resolve a detector class name such as "Heart Line" or "life_line"
    pub fn from_class_name(name: &str) -> Self {
        let name = name.to_lowercase();
        [Self::Life, Self::Heart, Self::Head, Self::Fate]
            .into_iter()
            .find(|category| {
                let key: &'static str = (*category).into();
                name.contains(key)
            })
            .unwrap_or(Self::Unknown)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LengthClass {
    Long,
    Medium,
    Short,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CurvatureClass {
    Straight,
    Curved,
    Wavy,
    /// Descriptor could not be computed
    Unknown,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Depth {
    Deep,
    Medium,
    Faint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct BranchCounts {
    pub upward: usize,
    pub downward: usize,
    pub forks: usize,
}

/// Shape measurements of one curve trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ShapeDescriptor {
    /// Path length in pixels
    pub length: f64,
    pub curvature_ratio: f64,
    /// Largest turn angle at an interior vertex, in degrees
    pub max_local_curvature: f64,
    pub curvature: CurvatureClass,
    pub breaks: usize,
    pub break_positions: Vec<usize>,
    pub branches: BranchCounts,
    /// Estimated stroke width in pixels
    pub thickness: f64,
    pub depth: Depth,
    pub start_point: Option<Point>,
    pub end_point: Option<Point>,
    /// False when the trace had too few points to measure
    pub valid: bool,
}

impl ShapeDescriptor {
    pub fn invalid() -> Self {
        Self {
            length: 0.0,
            curvature_ratio: 0.0,
            max_local_curvature: 0.0,
            curvature: CurvatureClass::Unknown,
            breaks: 0,
            break_positions: Vec::new(),
            branches: BranchCounts::default(),
            thickness: 0.0,
            depth: Depth::Medium,
            start_point: None,
            end_point: None,
            valid: false,
        }
    }
}

/// Raw output of the curve detector for one detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DetectedCurve {
    pub class_name: String,
    pub vertices: Vec<[f64; 2]>,
    #[serde(default)]
    pub bbox: Option<[f64; 4]>,
}

/// An ordered, filtered pixel trace with its declared category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CurveTrace {
    pub label: String,
    pub category: LineCategory,
    pub points: Vec<Point>,
}

impl CurveTrace {
    pub const MIN_POINTS: usize = 2;

    /// Drop zero-padding vertices; `None` when fewer than two remain
    pub fn from_detection(detection: &DetectedCurve) -> Option<Self> {
        let points: Vec<Point> = detection
            .vertices
            .iter()
            .map(|&v| Point::from(v))
            .filter(|p| !p.is_zero_padding())
            .collect();

        if points.len() < Self::MIN_POINTS {
            return None;
        }

        Some(Self {
            label: detection.class_name.clone(),
            category: LineCategory::from_class_name(&detection.class_name),
            points,
        })
    }

    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn end(&self) -> Option<Point> {
        self.points.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_class_name() {
        assert_eq!(LineCategory::from_class_name("Life Line"), LineCategory::Life);
        assert_eq!(LineCategory::from_class_name("heart_line"), LineCategory::Heart);
        assert_eq!(LineCategory::from_class_name("HEAD"), LineCategory::Head);
        assert_eq!(LineCategory::from_class_name("fate"), LineCategory::Fate);
        assert_eq!(LineCategory::from_class_name("sun line"), LineCategory::Unknown);
    }

    #[test]
    fn test_trace_filters_zero_padding() {
        let detection = DetectedCurve {
            class_name: "life".to_string(),
            vertices: vec![[10.0, 20.0], [0.0, 0.0], [30.0, 40.0], [0.0, 0.0]],
            bbox: None,
        };
        let trace = CurveTrace::from_detection(&detection).expect("two valid points");
        assert_eq!(trace.points, vec![Point::new(10.0, 20.0), Point::new(30.0, 40.0)]);
        assert_eq!(trace.category, LineCategory::Life);
        assert_eq!(trace.start(), Some(Point::new(10.0, 20.0)));
        assert_eq!(trace.end(), Some(Point::new(30.0, 40.0)));
    }

    #[test]
    fn test_trace_rejects_single_point() {
        let detection = DetectedCurve {
            class_name: "heart".to_string(),
            vertices: vec![[0.0, 0.0], [5.0, 5.0], [0.0, 0.0]],
            bbox: None,
        };
        assert!(CurveTrace::from_detection(&detection).is_none());
    }

    #[test]
    fn test_empty_trace_has_no_endpoints() {
        let trace = CurveTrace {
            label: "life".to_string(),
            category: LineCategory::Life,
            points: Vec::new(),
        };
        assert_eq!(trace.start(), None);
        assert_eq!(trace.end(), None);
    }

    #[test]
    fn test_mount_names() {
        assert_eq!(Mount::Moon.to_string(), "mount_moon");
        assert_eq!(Mount::Wrist.to_string(), "wrist");
        assert_eq!(LengthClass::Long.to_string(), "long");
    }
}
