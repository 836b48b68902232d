use std::sync::mpsc;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{Builder, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::consts::DETECTION_QUEUE_DEPTH;
use crate::error::Result;

use super::controls::DetectionControls;
use super::detector::{filter_by_confidence, Detection, ObjectDetector};
use super::overlay::Overlay;
use super::source::FrameSource;

/// Filtered detections published for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectionFrame {
    pub frame_index: usize,
    /// Threshold that was applied to this frame.
    pub threshold: f32,
    pub detections: Vec<Detection>,
    /// Overlay as drawn for this frame.
    pub overlay: Overlay,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
}

/// Live detection over a frame source, one inference per frame.
///
/// The loop thread checks the run flag at the top of every iteration and
/// samples the confidence threshold after every inference, so a stop or a
/// threshold change is seen within one frame interval. An in-flight
/// inference always completes.
pub struct DetectionLoop {
    controls: DetectionControls,
    frame_interval: Duration,
    overlay: Arc<Mutex<Overlay>>,
    latest: Arc<Mutex<Vec<Detection>>>,
    handle: Option<JoinHandle<Option<Box<dyn ObjectDetector>>>>,
    /// Detector recovered from a worker that never started.
    parked: Option<Box<dyn ObjectDetector>>,
}

impl DetectionLoop {
    pub fn new(controls: DetectionControls, frame_interval: Duration) -> Self {
        Self {
            controls,
            frame_interval,
            overlay: Arc::new(Mutex::new(Overlay::for_source(None))),
            latest: Arc::new(Mutex::new(Vec::new())),
            handle: None,
            parked: None,
        }
    }

    pub fn controls(&self) -> &DetectionControls {
        &self.controls
    }

    pub fn state(&self) -> LoopState {
        match &self.handle {
            Some(handle) if !handle.is_finished() && self.controls.is_running() => {
                LoopState::Running
            }
            _ => LoopState::Idle,
        }
    }

    /// Copy of the overlay as last drawn.
    pub fn overlay(&self) -> Overlay {
        self.overlay
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Detections published for the most recent frame.
    pub fn latest(&self) -> Vec<Detection> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Enter Running: size the overlay to the source and spawn the loop.
    ///
    /// A loop that is already running is stopped first; its detector is
    /// dropped in favor of `detector`. If the thread cannot be spawned the
    /// detector is kept and handed back by the next [`Self::stop`].
    pub fn start(
        &mut self,
        source: Box<dyn FrameSource>,
        detector: Box<dyn ObjectDetector>,
    ) -> Result<mpsc::Receiver<DetectionFrame>> {
        let builder = Builder::new().name("agrimind-detect".into());
        self.start_on(builder, source, detector)
    }

    fn start_on(
        &mut self,
        builder: Builder,
        source: Box<dyn FrameSource>,
        detector: Box<dyn ObjectDetector>,
    ) -> Result<mpsc::Receiver<DetectionFrame>> {
        self.stop();

        *self.overlay.lock().unwrap_or_else(PoisonError::into_inner) =
            Overlay::for_source(source.natural_size());
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();

        let (tx, rx) = mpsc::sync_channel(DETECTION_QUEUE_DEPTH);
        info!(detector = detector.name(), "Starting detection loop");
        let slot = Arc::new(Mutex::new(Some(LoopWorker {
            source,
            detector,
            controls: self.controls.clone(),
            overlay: Arc::clone(&self.overlay),
            latest: Arc::clone(&self.latest),
            tx,
            frame_interval: self.frame_interval,
        })));

        self.controls.set_running(true);
        let handoff = Arc::clone(&slot);
        let spawned = builder.spawn(move || {
            let worker = handoff.lock().unwrap_or_else(PoisonError::into_inner).take();
            worker.map(LoopWorker::run)
        });
        match spawned {
            Ok(handle) => {
                self.handle = Some(handle);
                Ok(rx)
            }
            Err(e) => {
                self.controls.set_running(false);
                warn!(error = %e, "Failed to spawn detection thread");
                self.parked = slot
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .take()
                    .map(|worker| worker.detector);
                Err(e.into())
            }
        }
    }

    /// Signal the loop to stop and wait for the in-flight frame to finish.
    ///
    /// Returns the detector so the caller can keep it for the next run.
    pub fn stop(&mut self) -> Option<Box<dyn ObjectDetector>> {
        self.controls.request_stop();
        let Some(handle) = self.handle.take() else {
            return self.parked.take();
        };
        match handle.join() {
            Ok(detector) => {
                info!("Detection loop stopped");
                detector
            }
            Err(_) => {
                warn!("Detection thread panicked");
                None
            }
        }
    }
}

impl Drop for DetectionLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

/// State moved onto the detection thread.
struct LoopWorker {
    source: Box<dyn FrameSource>,
    detector: Box<dyn ObjectDetector>,
    controls: DetectionControls,
    overlay: Arc<Mutex<Overlay>>,
    latest: Arc<Mutex<Vec<Detection>>>,
    tx: mpsc::SyncSender<DetectionFrame>,
    frame_interval: Duration,
}

impl LoopWorker {
    fn run(mut self) -> Box<dyn ObjectDetector> {
        let mut frame_index = 0usize;
        while self.controls.is_running() {
            let started = Instant::now();

            match self.source.next_frame() {
                None => {
                    info!(frames = frame_index, "Frame source ended");
                    self.controls.request_stop();
                    break;
                }
                Some(Err(e)) => warn!(frame_index, error = %e, "Frame read failed"),
                Some(Ok(frame)) => self.process(frame_index, &frame),
            }
            frame_index += 1;

            if let Some(remaining) = self.frame_interval.checked_sub(started.elapsed()) {
                std::thread::sleep(remaining);
            }
        }
        self.detector
    }

    fn process(&mut self, frame_index: usize, frame: &image::RgbImage) {
        self.overlay
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();

        let raw = match self.detector.detect(frame) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(frame_index, error = %e, "Inference failed, continuing");
                return;
            }
        };

        let threshold = self.controls.confidence();
        let detections = filter_by_confidence(raw, threshold);
        debug!(frame_index, threshold, kept = detections.len(), "Frame detected");

        let overlay = {
            let mut overlay = self.overlay.lock().unwrap_or_else(PoisonError::into_inner);
            for detection in &detections {
                overlay.draw(detection);
            }
            overlay.clone()
        };
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner) = detections.clone();

        let frame = DetectionFrame {
            frame_index,
            threshold,
            detections,
            overlay,
        };
        if let Err(mpsc::TrySendError::Full(_)) = self.tx.try_send(frame) {
            debug!(frame_index, "Frame queue full, dropping");
        }
    }
}
