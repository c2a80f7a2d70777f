//! Mount-relative length classes.
//!
//! Each category is read in its own direction across the palm, so each has its
//! own zone rule. Only the trace endpoints are consulted, never the full path.
//! Image y grows toward the wrist.

use crate::{
    config::ClassifierConfig,
    types::{LengthClass, LineCategory, MountSet, Point},
};

#[derive(Debug, Clone, Default)]
pub struct MountClassifier {
    config: ClassifierConfig,
}

impl MountClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn classify(&self, start: Point, end: Point, category: LineCategory, mounts: &MountSet) -> LengthClass {
        match category {
            LineCategory::Heart => self.heart(end, mounts),
            LineCategory::Life => self.life(end, mounts),
            LineCategory::Head => self.head(start, end, mounts),
            LineCategory::Fate => self.fate(end, mounts),
            LineCategory::Unknown => LengthClass::Medium,
        }
    }

    /// Long when it reaches jupiter or the jupiter-saturn span, medium near saturn
    fn heart(&self, end: Point, mounts: &MountSet) -> LengthClass {
        let jupiter_x = mounts.mount_jupiter.x;
        let saturn_x = mounts.mount_saturn.x;
        let span = (jupiter_x - saturn_x).abs();

        if (end.x - jupiter_x).abs() <= span * self.config.heart_jupiter_ratio {
            return LengthClass::Long;
        }
        if end.x >= jupiter_x.min(saturn_x) && end.x <= jupiter_x.max(saturn_x) {
            return LengthClass::Long;
        }
        if (end.x - saturn_x).abs() <= span * self.config.heart_saturn_ratio {
            return LengthClass::Medium;
        }
        LengthClass::Short
    }

    /// Deeper toward the wrist is longer
    fn life(&self, end: Point, mounts: &MountSet) -> LengthClass {
        let saturn_y = mounts.mount_saturn.y;
        let palm_height = (mounts.wrist.y - saturn_y).abs();

        if end.y >= saturn_y + palm_height * self.config.life_long_ratio {
            LengthClass::Long
        } else if end.y >= saturn_y + palm_height * self.config.life_medium_ratio {
            LengthClass::Medium
        } else {
            LengthClass::Short
        }
    }

    /// Long when it crosses to the far mount on the side opposite its start
    fn head(&self, start: Point, end: Point, mounts: &MountSet) -> LengthClass {
        let venus_x = mounts.mount_venus.x;
        let moon_x = mounts.mount_moon.x;
        let center_x = (venus_x + moon_x) / 2.0;
        let width = (moon_x - venus_x).abs();
        let reach = width * self.config.head_long_ratio;

        if start.x < center_x {
            if (end.x - moon_x).abs() < reach {
                LengthClass::Long
            } else if end.x > center_x {
                LengthClass::Medium
            } else {
                LengthClass::Short
            }
        } else if (end.x - venus_x).abs() < reach {
            LengthClass::Long
        } else if end.x < center_x {
            LengthClass::Medium
        } else {
            LengthClass::Short
        }
    }

    /// Higher toward saturn is longer
    fn fate(&self, end: Point, mounts: &MountSet) -> LengthClass {
        let saturn_y = mounts.mount_saturn.y;
        let palm_height = (mounts.wrist.y - saturn_y).abs();

        if end.y <= saturn_y + palm_height * self.config.fate_long_ratio {
            LengthClass::Long
        } else if end.y <= saturn_y + palm_height * self.config.fate_medium_ratio {
            LengthClass::Medium
        } else {
            LengthClass::Short
        }
    }
}

/// [`MountClassifier::classify`] with default zone ratios
pub fn classify_length(start: Point, end: Point, category: LineCategory, mounts: &MountSet) -> LengthClass {
    MountClassifier::default().classify(start, end, category, mounts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mounts() -> MountSet {
        MountSet {
            wrist: Point::new(150.0, 300.0),
            mount_venus: Point::new(50.0, 150.0),
            mount_jupiter: Point::new(100.0, 50.0),
            mount_saturn: Point::new(150.0, 50.0),
            mount_apollo: Point::new(200.0, 50.0),
            mount_mercury: Point::new(250.0, 50.0),
            mount_moon: Point::new(250.0, 150.0),
            palm_width: 200.0,
            palm_length: 250.0,
        }
    }

    fn at(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_heart_line_zones() {
        let m = mounts();
        let start = at(50.0, 100.0);
        assert_eq!(classify_length(start, at(110.0, 90.0), LineCategory::Heart, &m), LengthClass::Long);
        assert_eq!(classify_length(start, m.mount_jupiter, LineCategory::Heart, &m), LengthClass::Long);
        // Between jupiter and saturn
        assert_eq!(classify_length(start, at(140.0, 90.0), LineCategory::Heart, &m), LengthClass::Long);
        // Past saturn but within half the span
        assert_eq!(classify_length(start, at(170.0, 90.0), LineCategory::Heart, &m), LengthClass::Medium);
        assert_eq!(classify_length(start, at(220.0, 90.0), LineCategory::Heart, &m), LengthClass::Short);
        assert_eq!(classify_length(start, m.mount_apollo, LineCategory::Heart, &m), LengthClass::Short);
    }

    #[test]
    fn test_heart_span_is_order_independent() {
        let mut m = mounts();
        std::mem::swap(&mut m.mount_jupiter, &mut m.mount_saturn);
        // jupiter at 150, saturn at 100: 105 lies between them
        assert_eq!(classify_length(at(0.0, 0.0), at(105.0, 0.0), LineCategory::Heart, &m), LengthClass::Long);
    }

    #[test]
    fn test_life_line_zones() {
        let mut m = mounts();
        m.wrist = at(0.0, 300.0);
        m.mount_saturn = at(0.0, 50.0);
        let start = at(0.0, 60.0);
        assert_eq!(classify_length(start, at(0.0, 210.0), LineCategory::Life, &m), LengthClass::Long);
        assert_eq!(classify_length(start, at(0.0, 140.0), LineCategory::Life, &m), LengthClass::Medium);
        assert_eq!(classify_length(start, at(0.0, 80.0), LineCategory::Life, &m), LengthClass::Short);
        assert_eq!(classify_length(at(100.0, 100.0), at(80.0, 280.0), LineCategory::Life, &mounts()), LengthClass::Long);
    }

    #[test]
    fn test_head_line_from_venus_side() {
        let m = mounts();
        // center 150, width 200, reach 60
        let start = at(60.0, 150.0);
        assert_eq!(classify_length(start, at(230.0, 150.0), LineCategory::Head, &m), LengthClass::Long);
        assert_eq!(classify_length(start, at(170.0, 150.0), LineCategory::Head, &m), LengthClass::Medium);
        assert_eq!(classify_length(start, at(120.0, 150.0), LineCategory::Head, &m), LengthClass::Short);
    }

    #[test]
    fn test_head_line_from_moon_side() {
        let m = mounts();
        let start = at(240.0, 150.0);
        assert_eq!(classify_length(start, at(70.0, 150.0), LineCategory::Head, &m), LengthClass::Long);
        assert_eq!(classify_length(start, at(130.0, 150.0), LineCategory::Head, &m), LengthClass::Medium);
        assert_eq!(classify_length(start, at(180.0, 150.0), LineCategory::Head, &m), LengthClass::Short);
    }

    #[test]
    fn test_fate_line_zones() {
        let m = mounts();
        // saturn 50, palm height 250: long <= 112.5, medium <= 175
        let start = at(150.0, 290.0);
        assert_eq!(classify_length(start, at(150.0, 100.0), LineCategory::Fate, &m), LengthClass::Long);
        assert_eq!(classify_length(start, at(150.0, 160.0), LineCategory::Fate, &m), LengthClass::Medium);
        assert_eq!(classify_length(start, at(150.0, 240.0), LineCategory::Fate, &m), LengthClass::Short);
    }

    #[test]
    fn test_unknown_category_is_medium() {
        let m = mounts();
        assert_eq!(classify_length(at(0.0, 0.0), at(1.0, 1.0), LineCategory::Unknown, &m), LengthClass::Medium);
    }

    #[test]
    fn test_classification_is_pure() {
        let m = mounts();
        let first = classify_length(at(60.0, 150.0), at(170.0, 150.0), LineCategory::Head, &m);
        for _ in 0..10 {
            assert_eq!(classify_length(at(60.0, 150.0), at(170.0, 150.0), LineCategory::Head, &m), first);
        }
    }

    #[test]
    fn test_custom_ratios() {
        let m = mounts();
        let strict = MountClassifier::new(ClassifierConfig { life_long_ratio: 0.95, ..ClassifierConfig::default() });
        assert_eq!(strict.classify(at(0.0, 0.0), at(80.0, 280.0), LineCategory::Life, &m), LengthClass::Medium);
    }
}
