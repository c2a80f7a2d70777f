use crate::{
    config::MountConfig,
    error::{PalmError, Result},
    geometry::to_pixel,
    types::{HandLandmark, LandmarkSkeleton, MountSet, Point},
};

/// Derives anatomical reference points from a hand skeleton
#[derive(Debug, Clone, Default)]
pub struct MountLocator {
    config: MountConfig,
}

impl MountLocator {
    pub fn new(config: MountConfig) -> Self {
        Self { config }
    }

    /// Map the skeleton into pixel space of a `width` x `height` image
    pub fn locate(&self, skeleton: &LandmarkSkeleton, width: u32, height: u32) -> Result<MountSet> {
        if skeleton.len() < LandmarkSkeleton::LANDMARK_COUNT {
            return Err(PalmError::IncompleteSkeleton {
                found: skeleton.len(),
                expected: LandmarkSkeleton::LANDMARK_COUNT,
            });
        }

        let pixel = |landmark: HandLandmark| to_pixel(skeleton.points[landmark.index()], width, height);

        let wrist = pixel(HandLandmark::Wrist);
        let mount_venus = pixel(HandLandmark::ThumbBase);
        let mount_jupiter = pixel(HandLandmark::IndexBase);
        let mount_saturn = pixel(HandLandmark::MiddleBase);
        let mount_apollo = pixel(HandLandmark::RingBase);
        let mount_mercury = pixel(HandLandmark::PinkyBase);

        // Not a landmark: interpolated toward mercury, biased down the wrist side
        let mount_moon = Point::new(
            wrist.x + self.config.moon_x_ratio * (mount_mercury.x - wrist.x),
            wrist.y - self.config.moon_y_ratio * (wrist.y - mount_mercury.y),
        );

        Ok(MountSet {
            wrist,
            mount_venus,
            mount_jupiter,
            mount_saturn,
            mount_apollo,
            mount_mercury,
            mount_moon,
            palm_width: mount_venus.distance_to(mount_mercury),
            palm_length: wrist.distance_to(mount_saturn),
        })
    }
}

/// [`MountLocator::locate`] with default ratios
pub fn locate_mounts(skeleton: &LandmarkSkeleton, width: u32, height: u32) -> Result<MountSet> {
    MountLocator::default().locate(skeleton, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Mount;

    fn skeleton_at(positions: &[(HandLandmark, [f64; 2])]) -> LandmarkSkeleton {
        let mut points = vec![Point::default(); LandmarkSkeleton::LANDMARK_COUNT];
        for &(landmark, p) in positions {
            points[landmark.index()] = Point::from(p);
        }
        LandmarkSkeleton::new(points)
    }

    #[test]
    fn test_all_landmarks_at_origin() {
        let mounts = locate_mounts(&skeleton_at(&[]), 640, 480).expect("Should locate mounts");
        for (_, point) in mounts.iter() {
            assert_eq!(point, Point::new(0.0, 0.0));
        }
        assert_eq!(mounts.palm_width, 0.0);
        assert_eq!(mounts.palm_length, 0.0);
    }

    #[test]
    fn test_pixel_mapping_and_moon() {
        let skeleton = skeleton_at(&[
            (HandLandmark::Wrist, [0.5, 0.9]),
            (HandLandmark::ThumbBase, [0.2, 0.7]),
            (HandLandmark::IndexBase, [0.3, 0.4]),
            (HandLandmark::MiddleBase, [0.45, 0.35]),
            (HandLandmark::RingBase, [0.6, 0.37]),
            (HandLandmark::PinkyBase, [0.7, 0.45]),
        ]);
        let mounts = locate_mounts(&skeleton, 100, 200).expect("Should locate mounts");

        assert_eq!(mounts.wrist, Point::new(50.0, 180.0));
        assert_eq!(mounts.get(Mount::Venus), Point::new(20.0, 140.0));
        assert_eq!(mounts.mount_jupiter, Point::new(30.0, 80.0));
        assert_eq!(mounts.mount_saturn, Point::new(45.0, 70.0));
        assert_eq!(mounts.mount_apollo, Point::new(60.0, 74.0));
        assert_eq!(mounts.mount_mercury, Point::new(70.0, 90.0));

        // x = 50 + 0.7 * 20, y = 180 - 0.3 * 90
        assert!((mounts.mount_moon.x - 64.0).abs() < 1e-9);
        assert!((mounts.mount_moon.y - 153.0).abs() < 1e-9);

        assert!((mounts.palm_width - 50.0_f64.hypot(50.0)).abs() < 1e-9);
        assert!((mounts.palm_length - 5.0_f64.hypot(110.0)).abs() < 1e-9);
    }

    #[test]
    fn test_custom_moon_ratios() {
        let skeleton = skeleton_at(&[
            (HandLandmark::Wrist, [0.0, 1.0]),
            (HandLandmark::PinkyBase, [1.0, 0.0]),
        ]);
        let locator = MountLocator::new(MountConfig { moon_x_ratio: 0.5, moon_y_ratio: 0.5 });
        let mounts = locator.locate(&skeleton, 10, 10).expect("Should locate mounts");
        assert_eq!(mounts.mount_moon, Point::new(5.0, 5.0));
    }

    #[test]
    fn test_short_skeleton_fails() {
        let skeleton = LandmarkSkeleton::new(vec![Point::default(); 20]);
        match locate_mounts(&skeleton, 100, 100) {
            Err(PalmError::IncompleteSkeleton { found, expected }) => {
                assert_eq!(found, 20);
                assert_eq!(expected, 21);
            }
            other => panic!("expected IncompleteSkeleton, got {:?}", other),
        }
    }
}
