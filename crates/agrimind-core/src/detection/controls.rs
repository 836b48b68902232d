use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use crate::consts::{DEFAULT_CONFIDENCE, MAX_CONFIDENCE, MIN_CONFIDENCE};

/// Loop state shared between the control surface and the detection thread.
///
/// The loop reads both cells at every iteration, so changes take effect on
/// the next frame without restarting.
#[derive(Clone, Debug)]
pub struct DetectionControls {
    running: Arc<AtomicBool>,
    /// f32 threshold stored as raw bits.
    confidence: Arc<AtomicU32>,
}

impl DetectionControls {
    pub fn new(confidence: f32) -> Self {
        let controls = Self {
            running: Arc::new(AtomicBool::new(false)),
            confidence: Arc::new(AtomicU32::new(DEFAULT_CONFIDENCE.to_bits())),
        };
        controls.set_confidence(confidence);
        controls
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub(crate) fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::Release);
    }

    /// Signal the loop to stop at the top of its next iteration.
    pub fn request_stop(&self) {
        self.set_running(false);
    }

    /// Current threshold. An unset (zero) cell reads as the default.
    pub fn confidence(&self) -> f32 {
        let value = f32::from_bits(self.confidence.load(Ordering::Acquire));
        if value > 0.0 {
            value
        } else {
            DEFAULT_CONFIDENCE
        }
    }

    /// Set the threshold, clamped to [0.3, 0.9]. Returns the stored value.
    pub fn set_confidence(&self, threshold: f32) -> f32 {
        let clamped = if threshold.is_finite() {
            threshold.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
        } else {
            DEFAULT_CONFIDENCE
        };
        self.confidence.store(clamped.to_bits(), Ordering::Release);
        clamped
    }
}

impl Default for DetectionControls {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE)
    }
}
