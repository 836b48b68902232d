pub mod canopy;
pub mod components;
pub mod config;
pub mod controls;
pub mod detector;
pub mod morphology;
pub mod overlay;
pub mod run_loop;
pub mod source;

pub use canopy::CanopyPatchDetector;
pub use config::DetectionConfig;
pub use controls::DetectionControls;
pub use detector::{filter_by_confidence, BoundingBox, Detection, ObjectDetector};
pub use overlay::Overlay;
pub use run_loop::{DetectionFrame, DetectionLoop, LoopState};
pub use source::{FrameSource, ImageSequence, StillFrames};
