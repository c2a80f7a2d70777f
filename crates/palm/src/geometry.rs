//! Polyline measurements and small vector helpers shared by the analysis stages.

use geo::{EuclideanDistance, EuclideanLength};
use geo_types::{Coord, LineString};

use crate::types::Point;

/// Sum of segment lengths along the polyline (0 for fewer than two points)
pub fn path_length(points: &[Point]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let line: LineString<f64> = points.iter().map(|&p| Coord::from(p)).collect();
    line.euclidean_length()
}

/// Straight-line distance between the first and last point
pub fn chord_length(points: &[Point]) -> f64 {
    match (points.first(), points.last()) {
        (Some(&first), Some(&last)) => {
            geo::Point::from(Coord::from(first)).euclidean_distance(&geo::Point::from(Coord::from(last)))
        }
        _ => 0.0,
    }
}

/// Consecutive point distances
pub fn segment_gaps(points: &[Point]) -> Vec<f64> {
    points.windows(2).map(|w| w[0].distance_to(w[1])).collect()
}

/// Turn angle in degrees between the segments `prev -> at` and `at -> next`.
///
/// `None` when either segment has zero length.
pub fn turn_angle(prev: Point, at: Point, next: Point) -> Option<f64> {
    let (ax, ay) = (at.x - prev.x, at.y - prev.y);
    let (bx, by) = (next.x - at.x, next.y - at.y);
    let norm_a = (ax * ax + ay * ay).sqrt();
    let norm_b = (bx * bx + by * by).sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }

    let cos = ((ax * bx + ay * by) / (norm_a * norm_b)).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees())
}

/// Unit normal (rotated +90°) of the segment `from -> to`, `None` for a zero-length segment
pub fn unit_normal(from: Point, to: Point) -> Option<Point> {
    let (vx, vy) = (to.x - from.x, to.y - from.y);
    let len = (vx * vx + vy * vy).sqrt();
    if len == 0.0 {
        return None;
    }
    Some(Point::new(-vy / len, vx / len))
}

/// Project `origin` by `distance` along `direction`
pub fn offset_along(origin: Point, direction: Point, distance: f64) -> Point {
    Point::new(origin.x + direction.x * distance, origin.y + direction.y * distance)
}

/// Map a normalized (0..1) coordinate to the nearest pixel
pub fn to_pixel(normalized: Point, width: u32, height: u32) -> Point {
    Point::new(
        (normalized.x * width as f64).round(),
        (normalized.y * height as f64).round(),
    )
}

/// Median of the values; the mean of the two middle values for even counts
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Population standard deviation
pub fn std_dev(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Some(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[[f64; 2]]) -> Vec<Point> {
        raw.iter().map(|&p| Point::from(p)).collect()
    }

    #[test]
    fn test_path_length_colinear() {
        let points = pts(&[[0.0, 0.0], [3.0, 0.0], [7.0, 0.0]]);
        assert_eq!(path_length(&points), 7.0);
        assert_eq!(chord_length(&points), 7.0);
    }

    #[test]
    fn test_path_length_is_not_chord() {
        let points = pts(&[[0.0, 0.0], [3.0, 4.0], [3.0, 0.0]]);
        assert!((path_length(&points) - 9.0).abs() < 1e-9);
        assert!((chord_length(&points) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_path_length_degenerate() {
        assert_eq!(path_length(&[]), 0.0);
        assert_eq!(path_length(&pts(&[[4.0, 4.0]])), 0.0);
        assert_eq!(chord_length(&[]), 0.0);
    }

    #[test]
    fn test_path_length_never_below_chord() {
        let traces = [
            pts(&[[0.0, 0.0], [10.0, 1.0], [20.0, -3.0], [25.0, 8.0]]),
            pts(&[[5.0, 5.0], [5.0, 5.0], [9.0, 2.0]]),
            pts(&[[0.0, 0.0], [10.0, 0.0], [0.0, 0.0]]),
        ];
        for trace in &traces {
            assert!(path_length(trace) + 1e-9 >= chord_length(trace));
        }

        // Doubling back is never a straight run
        let backtrack = &traces[2];
        assert_eq!(chord_length(backtrack), 0.0);
        assert!(path_length(backtrack) > chord_length(backtrack));

        let folded = pts(&[[0.0, 0.0], [10.0, 0.0], [4.0, 0.0]]);
        assert!(path_length(&folded) > chord_length(&folded));
    }

    #[test]
    fn test_turn_angle() {
        let right = turn_angle(Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0))
            .expect("non-degenerate");
        assert!((right - 90.0).abs() < 1e-9);

        let straight = turn_angle(Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(2.0, 0.0))
            .expect("non-degenerate");
        assert!(straight.abs() < 1e-9);

        assert!(turn_angle(Point::new(1.0, 1.0), Point::new(1.0, 1.0), Point::new(2.0, 0.0)).is_none());
    }

    #[test]
    fn test_unit_normal() {
        let n = unit_normal(Point::new(0.0, 0.0), Point::new(10.0, 0.0)).expect("non-degenerate");
        assert!(n.x.abs() < 1e-12);
        assert!((n.y - 1.0).abs() < 1e-12);
        assert!(unit_normal(Point::new(2.0, 2.0), Point::new(2.0, 2.0)).is_none());
        assert_eq!(offset_along(Point::new(1.0, 1.0), n, 3.0).y, 4.0);
    }

    #[test]
    fn test_to_pixel_rounds() {
        assert_eq!(to_pixel(Point::new(0.5, 0.5), 100, 200), Point::new(50.0, 100.0));
        assert_eq!(to_pixel(Point::new(1.0, 1.0), 640, 480), Point::new(640.0, 480.0));
        assert_eq!(to_pixel(Point::new(0.1234, 0.9876), 100, 100), Point::new(12.0, 99.0));
    }

    #[test]
    fn test_median_and_std_dev() {
        assert_eq!(median(&[5.0, 40.0, 5.0, 5.0, 5.0]), Some(5.0));
        assert_eq!(median(&[1.0, 3.0]), Some(2.0));
        assert_eq!(median(&[]), None);
        // NaN sorts after every number
        assert_eq!(median(&[3.0, f64::NAN, 1.0]), Some(3.0));
        let sd = std_dev(&[5.0, 5.0, 5.0, 5.0, 40.0]).expect("non-empty");
        assert!((sd - 14.0).abs() < 1e-9);
    }
}
