pub mod orientation;
pub mod mounts;
pub mod features;
pub mod classification;

pub use orientation::*;
pub use mounts::*;
pub use features::*;
pub use classification::*;
