use std::process::{Command, Output};

use image::{DynamicImage, ImageFormat};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{PalmError, Result},
    traits::{CurveDetector, SkeletonDetector},
    types::{DetectedCurve, LandmarkSkeleton, Point},
};

/// External program plus the fixed arguments placed before the per-call ones
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CommandSpec {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), args: Vec::new() }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Write `image` to a temporary PNG and run the program on it
    fn run(&self, image: &DynamicImage, extra: &[String]) -> Result<Vec<u8>> {
        let temp_image = tempfile::Builder::new().suffix(".png").tempfile()?;
        image.to_rgb8().save_with_format(temp_image.path(), ImageFormat::Png)?;

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg("--image")
            .arg(temp_image.path())
            .args(extra)
            .output()
            .map_err(|e| PalmError::Detector(format!("failed to run {}: {}", self.program, e)))?;

        check_status(&self.program, output)
    }
}

fn check_status(program: &str, output: Output) -> Result<Vec<u8>> {
    if !output.status.success() {
        return Err(PalmError::Detector(format!(
            "{} failed: {}",
            program,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(output.stdout)
}

#[derive(Debug, Deserialize)]
struct SkeletonOutput {
    #[serde(default)]
    landmarks: Option<Vec<[f64; 2]>>,
}

#[derive(Debug, Deserialize)]
struct CurveOutput {
    #[serde(default)]
    curves: Vec<DetectedCurve>,
}

/// Parse `{"landmarks": [[x, y], ...] | null}`
pub fn parse_skeleton_output(stdout: &[u8]) -> Result<Option<LandmarkSkeleton>> {
    let output: SkeletonOutput = serde_json::from_slice(stdout)
        .map_err(|e| PalmError::Detector(format!("unreadable skeleton output: {}", e)))?;

    Ok(output
        .landmarks
        .filter(|landmarks| !landmarks.is_empty())
        .map(|landmarks| LandmarkSkeleton::new(landmarks.into_iter().map(Point::from).collect())))
}

/// Parse `{"curves": [{"class_name": ..., "vertices": [[x, y], ...]}, ...]}`
pub fn parse_curve_output(stdout: &[u8]) -> Result<Vec<DetectedCurve>> {
    let output: CurveOutput = serde_json::from_slice(stdout)
        .map_err(|e| PalmError::Detector(format!("unreadable curve output: {}", e)))?;
    Ok(output.curves)
}

/// Hand landmark model behind an external program
#[derive(Debug, Clone)]
pub struct CommandSkeletonDetector {
    command: CommandSpec,
}

impl CommandSkeletonDetector {
    pub fn new(command: CommandSpec) -> Self {
        Self { command }
    }
}

impl SkeletonDetector for CommandSkeletonDetector {
    fn detect(&self, image: &DynamicImage, min_confidence: f32) -> Result<Option<LandmarkSkeleton>> {
        let stdout = self.command.run(image, &["--confidence".to_string(), min_confidence.to_string()])?;
        let skeleton = parse_skeleton_output(&stdout)?;
        debug!(
            program = %self.command.program,
            landmarks = skeleton.as_ref().map_or(0, LandmarkSkeleton::len),
            "skeleton detector finished"
        );
        Ok(skeleton)
    }
}

/// Palm line segmentation model behind an external program
#[derive(Debug, Clone)]
pub struct CommandCurveDetector {
    command: CommandSpec,
}

impl CommandCurveDetector {
    pub fn new(command: CommandSpec) -> Self {
        Self { command }
    }
}

impl CurveDetector for CommandCurveDetector {
    fn detect(&self, image: &DynamicImage, confidence: f32, overlap: f32) -> Result<Vec<DetectedCurve>> {
        let extra = [
            "--confidence".to_string(),
            confidence.to_string(),
            "--overlap".to_string(),
            overlap.to_string(),
        ];
        let curves = parse_curve_output(&self.command.run(image, &extra)?)?;
        debug!(program = %self.command.program, curves = curves.len(), "curve detector finished");
        Ok(curves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skeleton_output() {
        let skeleton = parse_skeleton_output(br#"{"landmarks": [[0.5, 0.9], [0.25, 0.7]]}"#)
            .expect("Should parse")
            .expect("landmarks present");
        assert_eq!(skeleton.len(), 2);
        assert_eq!(skeleton.points[1], Point::new(0.25, 0.7));

        assert!(parse_skeleton_output(br#"{"landmarks": null}"#).expect("Should parse").is_none());
        assert!(parse_skeleton_output(br#"{"landmarks": []}"#).expect("Should parse").is_none());
        assert!(parse_skeleton_output(b"{}").expect("Should parse").is_none());
    }

    #[test]
    fn test_parse_curve_output() {
        let curves = parse_curve_output(
            br#"{"curves": [
                {"class_name": "Heart Line", "vertices": [[1, 2], [3, 4]], "bbox": [0, 0, 5, 5]},
                {"class_name": "life", "vertices": []}
            ]}"#,
        )
        .expect("Should parse");

        assert_eq!(curves.len(), 2);
        assert_eq!(curves[0].vertices, vec![[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(curves[0].bbox, Some([0.0, 0.0, 5.0, 5.0]));
        assert_eq!(curves[1].bbox, None);
    }

    #[test]
    fn test_garbage_output_is_detector_error() {
        assert!(matches!(parse_curve_output(b"Traceback"), Err(PalmError::Detector(_))));
        assert!(matches!(parse_skeleton_output(b""), Err(PalmError::Detector(_))));
    }

    #[test]
    fn test_missing_program_is_detector_error() {
        let detector = CommandCurveDetector::new(CommandSpec::new("definitely-not-a-palm-detector"));
        let result = detector.detect(&DynamicImage::new_rgb8(4, 4), 0.3, 0.4);
        assert!(matches!(result, Err(PalmError::Detector(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_detector_round_trip() {
        // Per-call arguments land in $1.. and are ignored by the script
        let command = CommandSpec::new("sh")
            .arg("-c")
            .arg(r#"printf '{"landmarks": [[0.1, 0.2]]}'"#)
            .arg("detector");
        let skeleton = CommandSkeletonDetector::new(command)
            .detect(&DynamicImage::new_rgb8(4, 4), 0.5)
            .expect("Should run")
            .expect("landmarks present");
        assert_eq!(skeleton.points, vec![Point::new(0.1, 0.2)]);
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program_reports_stderr() {
        let command = CommandSpec::new("sh").arg("-c").arg("echo model missing >&2; exit 3").arg("detector");
        match CommandSkeletonDetector::new(command).detect(&DynamicImage::new_rgb8(4, 4), 0.5) {
            Err(PalmError::Detector(message)) => assert!(message.contains("model missing")),
            other => panic!("expected Detector error, got {:?}", other),
        }
    }
}
