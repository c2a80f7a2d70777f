//! Annotation drawing, kept apart from the measurement code.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};

use crate::{
    config::RenderConfig,
    geometry::to_pixel,
    pipeline::PalmAnalysis,
    types::{HAND_CONNECTIONS, LandmarkSkeleton, MountSet, Point},
};

/// Draw skeleton, analyzed lines and mounts on a copy of the upright image
pub fn annotate(analysis: &PalmAnalysis, config: &RenderConfig) -> RgbImage {
    let mut canvas = analysis.image.to_rgb8();

    draw_skeleton(&mut canvas, &analysis.skeleton, config);
    for line in &analysis.lines {
        draw_polyline(&mut canvas, &line.points, Rgb(config.line_color), config.line_width);
    }
    draw_mounts(&mut canvas, &analysis.mounts, config);

    canvas
}

pub fn draw_skeleton(canvas: &mut RgbImage, skeleton: &LandmarkSkeleton, config: &RenderConfig) {
    let (width, height) = canvas.dimensions();
    let pixels: Vec<Point> = skeleton.points.iter().map(|&p| to_pixel(p, width, height)).collect();

    for &(from, to) in HAND_CONNECTIONS.iter() {
        if let (Some(&a), Some(&b)) = (pixels.get(from), pixels.get(to)) {
            draw_thick_segment(canvas, a, b, Rgb(config.connection_color), 2);
        }
    }
    for point in &pixels {
        draw_filled_circle_mut(canvas, as_center(*point), config.landmark_radius, Rgb(config.landmark_color));
    }
}

pub fn draw_mounts(canvas: &mut RgbImage, mounts: &MountSet, config: &RenderConfig) {
    for (_, point) in mounts.iter() {
        draw_filled_circle_mut(canvas, as_center(point), config.mount_radius, Rgb(config.mount_color));
    }
}

pub fn draw_polyline(canvas: &mut RgbImage, points: &[Point], color: Rgb<u8>, width: u32) {
    for pair in points.windows(2) {
        draw_thick_segment(canvas, pair[0], pair[1], color, width);
    }
}

/// Approximate a wide stroke with parallel one-pixel segments
fn draw_thick_segment(canvas: &mut RgbImage, from: Point, to: Point, color: Rgb<u8>, width: u32) {
    let half = (width.max(1) as i32 - 1) / 2;
    let steep = (to.y - from.y).abs() > (to.x - from.x).abs();

    for offset in -half..=(width.max(1) as i32 - 1 - half) {
        let (dx, dy) = if steep { (offset as f32, 0.0) } else { (0.0, offset as f32) };
        draw_line_segment_mut(
            canvas,
            (from.x as f32 + dx, from.y as f32 + dy),
            (to.x as f32 + dx, to.y as f32 + dy),
            color,
        );
    }
}

fn as_center(point: Point) -> (i32, i32) {
    (point.x.round() as i32, point.y.round() as i32)
}
