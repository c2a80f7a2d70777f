//! # Palm Line Analysis Library
//!
//! Geometric analysis of palm images: picks the upright orientation of a hand,
//! derives anatomical mounts from its 21-point skeleton, and measures and
//! classifies the palm lines found by a curve detector.
//!
//! ## Core Features
//!
//! - **Orientation search**: four quarter turns scored by how upright the hand is
//! - **Mount location**: seven reference points plus palm width and length
//! - **Shape descriptors**: length, curvature, breaks, branches and stroke thickness
//! - **Mount-relative classification**: long / medium / short per line category
//! - **Pluggable detectors**: trait-based, with adapters for external programs
//! - **Export**: JSON, GeoJSON and an annotated image
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use palm::{CommandCurveDetector, CommandSkeletonDetector, CommandSpec, Pipeline};
//!
//! let pipeline = Pipeline::builder(
//!     CommandSkeletonDetector::new(CommandSpec::new("hand-landmarks")),
//!     CommandCurveDetector::new(CommandSpec::new("palm-lines")),
//! )
//! .build();
//!
//! if let Some(analysis) = pipeline.process_path("palm.jpg")? {
//!     analysis.save_geojson("palm_lines.geojson")?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod types;
pub mod config;
pub mod geometry;
pub mod traits;
pub mod algorithms;
pub mod pipeline;
pub mod interpret;
pub mod render;
pub mod detectors;
pub mod io;

pub use error::{PalmError, Result};
pub use types::*;
pub use config::*;
pub use traits::*;
pub use algorithms::*;
pub use pipeline::{LineReport, PalmAnalysis, Pipeline, builder::PipelineBuilder, standardize};
pub use interpret::TemplateInterpreter;
pub use render::annotate;
pub use detectors::*;
