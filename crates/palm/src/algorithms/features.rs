//! Shape descriptors of a single curve trace: length, curvature, breaks,
//! branches and stroke thickness.
//!
//! Image-based measurements read a grayscale copy of the upright, standardized
//! image the trace was detected on.

use image::{DynamicImage, GrayImage, Luma, Rgb};
use imageproc::{
    map::map_colors,
    region_labelling::{Connectivity, connected_components},
};

use crate::{
    config::FeatureConfig,
    geometry::{chord_length, median, offset_along, path_length, segment_gaps, std_dev, turn_angle, unit_normal},
    types::{BranchCounts, CurvatureClass, Depth, Point, ShapeDescriptor},
};

/// Overall and maximum local curvature of a trace
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curvature {
    /// (path - chord) / chord
    pub overall: f64,
    /// Degrees
    pub max_local: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ShapeAnalyzer {
    config: FeatureConfig,
}

impl ShapeAnalyzer {
    pub fn new(config: FeatureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Measure the trace against `image`; fewer than two points yields an invalid descriptor
    pub fn analyze(&self, points: &[Point], image: &GrayImage) -> ShapeDescriptor {
        if points.len() < 2 {
            return ShapeDescriptor::invalid();
        }

        let curvature = self.curvature(points);
        let break_positions = self.break_positions(points);
        let thickness = self.thickness(points, image);

        ShapeDescriptor {
            length: path_length(points),
            curvature_ratio: curvature.overall,
            max_local_curvature: curvature.max_local,
            curvature: self.classify_curvature(curvature),
            breaks: break_positions.len(),
            break_positions,
            branches: self.branches(points, image),
            thickness,
            depth: self.classify_depth(thickness),
            start_point: points.first().copied(),
            end_point: points.last().copied(),
            valid: true,
        }
    }

    /// Zero for fewer than three points or coincident endpoints
    pub fn curvature(&self, points: &[Point]) -> Curvature {
        let flat = Curvature { overall: 0.0, max_local: 0.0 };
        if points.len() < 3 {
            return flat;
        }

        let chord = chord_length(points);
        if chord == 0.0 {
            return flat;
        }

        let overall = (path_length(points) - chord) / chord;
        let max_local = points
            .windows(3)
            .filter_map(|w| turn_angle(w[0], w[1], w[2]))
            .fold(0.0, f64::max);

        Curvature { overall, max_local }
    }

    pub fn classify_curvature(&self, curvature: Curvature) -> CurvatureClass {
        let c = &self.config;
        if curvature.max_local > c.wavy_local || curvature.overall > c.wavy_overall {
            CurvatureClass::Wavy
        } else if curvature.overall > c.curved_overall || curvature.max_local > c.curved_local {
            CurvatureClass::Curved
        } else {
            CurvatureClass::Straight
        }
    }

    /// Zero-based indices of gaps longer than median + factor * stddev
    pub fn break_positions(&self, points: &[Point]) -> Vec<usize> {
        let gaps = segment_gaps(points);
        let (Some(median_gap), Some(std_gap)) = (median(&gaps), std_dev(&gaps)) else {
            return Vec::new();
        };
        let threshold = median_gap + self.config.break_std_dev_factor * std_gap;

        gaps.iter()
            .enumerate()
            .filter(|&(_, &gap)| gap > threshold)
            .map(|(i, _)| i)
            .collect()
    }

    /// Forks and vertical trend changes at interior vertices.
    ///
    /// A vertex whose search window would leave the image is skipped entirely.
    pub fn branches(&self, points: &[Point], image: &GrayImage) -> BranchCounts {
        let mut counts = BranchCounts::default();
        if points.len() < 3 {
            return counts;
        }

        let r = self.config.branch_radius as i64;
        let (width, height) = (image.width() as i64, image.height() as i64);

        for i in 1..points.len() - 1 {
            let x = points[i].x as i64;
            let y = points[i].y as i64;

            if x < r || y < r || x >= width - r || y >= height - r {
                continue;
            }

            if self.window_components(image, (x - r) as u32, (y - r) as u32) > 2 {
                counts.forks += 1;
            }

            // The last interior vertex has no trend: its successor ends the trace
            if i < points.len() - 2 {
                let dy = points[i + 1].y - points[i].y;
                if dy < -self.config.trend_threshold {
                    counts.upward += 1;
                } else if dy > self.config.trend_threshold {
                    counts.downward += 1;
                }
            }
        }

        counts
    }

    /// Number of labels in the binarized window, background included
    fn window_components(&self, image: &GrayImage, left: u32, top: u32) -> u32 {
        let side = self.config.branch_radius * 2;
        let mut window = image::imageops::crop_imm(image, left, top, side, side).to_image();
        for pixel in window.pixels_mut() {
            pixel.0[0] = if pixel.0[0] > self.config.branch_binarize_threshold { 255 } else { 0 };
        }

        let labels = connected_components(&window, Connectivity::Eight, Luma([0u8]));
        let foreground = labels.pixels().map(|p| p.0[0]).max().unwrap_or(0);
        foreground + 1
    }

    /// Mean stroke width over evenly spaced samples; 1.0 when nothing could be sampled
    pub fn thickness(&self, points: &[Point], image: &GrayImage) -> f64 {
        if points.len() < 2 {
            return 1.0;
        }

        let samples: Vec<f64> = sample_indices(points.len(), self.config.thickness_samples)
            .into_iter()
            .filter(|&idx| idx < points.len() - 1)
            .filter_map(|idx| {
                let normal = unit_normal(points[idx], points[idx + 1])?;
                Some(2.0 * self.dark_run(image, points[idx], normal) as f64)
            })
            .collect();

        if samples.is_empty() {
            1.0
        } else {
            samples.iter().sum::<f64>() / samples.len() as f64
        }
    }

    /// Contiguous dark pixels walking from `center` along `normal`
    fn dark_run(&self, image: &GrayImage, center: Point, normal: Point) -> u32 {
        let mut run = 0;
        for step in 1..self.config.thickness_search {
            let sample = offset_along(center, normal, step as f64);
            let (x, y) = (sample.x as i64, sample.y as i64);
            if x < 0 || y < 0 || x >= image.width() as i64 || y >= image.height() as i64 {
                break;
            }
            if image.get_pixel(x as u32, y as u32).0[0] < self.config.dark_pixel_threshold {
                run += 1;
            } else {
                break;
            }
        }
        run
    }

    pub fn classify_depth(&self, thickness: f64) -> Depth {
        if thickness > self.config.deep_thickness {
            Depth::Deep
        } else if thickness > self.config.medium_thickness {
            Depth::Medium
        } else {
            Depth::Faint
        }
    }
}

/// BT.601 luma in 14-bit fixed point, rounded.
///
/// The dark-pixel and binarization thresholds are tuned to these weights
/// rather than the Rec.709 ones `DynamicImage::to_luma8` uses.
pub fn grayscale(image: &DynamicImage) -> GrayImage {
    map_colors(&image.to_rgb8(), |Rgb([r, g, b])| {
        let luma = (4899 * r as u32 + 9617 * g as u32 + 1868 * b as u32 + (1 << 13)) >> 14;
        Luma([luma as u8])
    })
}

/// `count` evenly spaced indices over `0..len`, truncated toward zero
fn sample_indices(len: usize, count: usize) -> Vec<usize> {
    let count = count.min(len);
    match count {
        0 => Vec::new(),
        1 => vec![0],
        _ => {
            let step = (len - 1) as f64 / (count - 1) as f64;
            let mut indices: Vec<usize> = (0..count).map(|k| (k as f64 * step) as usize).collect();
            indices[count - 1] = len - 1;
            indices
        }
    }
}
