use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use image::{RgbImage, RgbaImage};
use serde::Serialize;
use tracing::{info, warn};

use crate::consts::{MAX_ZONE_COUNT, MIN_ZONE_COUNT};
use crate::detection::{
    CanopyPatchDetector, Detection, DetectionControls, DetectionFrame, DetectionLoop,
    FrameSource, LoopState, ObjectDetector, Overlay,
};
use crate::error::Result;
use crate::forecast::{forecast_yield, yield_series, ForecastOutcome, ForecastPoint, ModelStatus};
use crate::io::image_io::{load_raster, load_raster_url};
use crate::recommend::{recommend, Recommendation};
use crate::series::{normalize, parse_csv_records, parse_json_records, read_csv_records, RawRecord, TimeSeriesPoint};
use crate::trend::{analyze, TrendSignals};
use crate::vegetation::{extract_greenness, render_heatmap, zone_summary, ZoneSummary};

use super::config::AnalyticsConfig;
use super::types::ProgressReporter;

/// Everything the session currently shows, as plain data.
#[derive(Clone, Debug, Serialize)]
pub struct SessionReport {
    pub series: Vec<TimeSeriesPoint>,
    pub signals: TrendSignals,
    pub model_status: String,
    pub forecast: Vec<ForecastPoint>,
    pub zones: Option<ZoneSummary>,
    pub recommendations: Vec<Recommendation>,
    pub detections: Vec<Detection>,
}

/// Owns all analytics state for one session.
///
/// The control surface mutates state through explicit calls, each of which
/// recomputes what depends on it. Nothing outlives the session; dropping it
/// stops a running detection loop and releases the cached detector.
pub struct AnalyticsSession {
    config: AnalyticsConfig,
    records: Vec<RawRecord>,
    series: Vec<TimeSeriesPoint>,
    signals: TrendSignals,
    forecast: Vec<ForecastPoint>,
    model_status: ModelStatus,
    raster: Option<RgbImage>,
    heatmap: Option<RgbaImage>,
    zones: Option<ZoneSummary>,
    zone_count: usize,
    recommendations: Vec<Recommendation>,
    detector: Option<Box<dyn ObjectDetector>>,
    detection: DetectionLoop,
    detection_rx: Option<mpsc::Receiver<DetectionFrame>>,
}

impl AnalyticsSession {
    pub fn new(config: AnalyticsConfig) -> Self {
        let controls = DetectionControls::new(config.detection.confidence);
        let detection = DetectionLoop::new(
            controls,
            Duration::from_millis(config.detection.frame_interval_ms),
        );
        let zone_count = config.zoning.zone_count.clamp(MIN_ZONE_COUNT, MAX_ZONE_COUNT);
        Self {
            config,
            records: Vec::new(),
            series: Vec::new(),
            signals: TrendSignals::default(),
            forecast: Vec::new(),
            model_status: ModelStatus::Idle,
            raster: None,
            heatmap: None,
            zones: None,
            zone_count,
            recommendations: Vec::new(),
            detector: None,
            detection,
            detection_rx: None,
        }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Tabular data
    // ------------------------------------------------------------------

    /// Replace the uploaded rows and recompute the series, signals and
    /// recommendations. Returns the number of rows.
    pub fn ingest_records(&mut self, records: Vec<RawRecord>) -> usize {
        self.series = normalize(&records);
        self.records = records;
        self.refresh_advice();
        info!(rows = self.series.len(), "Rows ingested");
        self.series.len()
    }

    pub fn ingest_csv(&mut self, path: &Path) -> Result<usize> {
        let records = read_csv_records(path)?;
        Ok(self.ingest_records(records))
    }

    pub fn ingest_csv_text(&mut self, text: &str) -> Result<usize> {
        let records = parse_csv_records(text)?;
        Ok(self.ingest_records(records))
    }

    pub fn ingest_json_text(&mut self, text: &str) -> Result<usize> {
        let records = parse_json_records(text)?;
        Ok(self.ingest_records(records))
    }

    pub fn records(&self) -> &[RawRecord] {
        &self.records
    }

    pub fn series(&self) -> &[TimeSeriesPoint] {
        &self.series
    }

    pub fn signals(&self) -> TrendSignals {
        self.signals
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    /// Last finite yield of the series.
    pub fn latest_yield(&self) -> Option<f64> {
        yield_series(&self.series).last().copied()
    }

    fn refresh_advice(&mut self) {
        if self.series.is_empty() {
            self.signals = TrendSignals::default();
            self.recommendations.clear();
            return;
        }
        self.signals = analyze(&self.series, &self.config.trend);
        self.recommendations = recommend(
            &self.signals,
            &self.forecast,
            self.latest_yield(),
            &self.config.advice,
        );
    }

    // ------------------------------------------------------------------
    // Forecast
    // ------------------------------------------------------------------

    /// Retrain the forecast regressor from scratch on the current series.
    ///
    /// Does nothing without data. On failure the previous forecast is kept
    /// and only the status changes.
    pub fn train_forecast(&mut self, reporter: &dyn ProgressReporter) -> ModelStatus {
        if self.series.is_empty() {
            return self.model_status;
        }
        self.model_status = ModelStatus::Training;
        let outcome = forecast_yield(&self.series, &self.config.forecast, reporter);
        self.model_status = outcome.status();
        if let ForecastOutcome::Ready(points) = outcome {
            self.forecast = points;
            self.refresh_advice();
        }
        self.model_status
    }

    pub fn model_status(&self) -> ModelStatus {
        self.model_status
    }

    pub fn forecast(&self) -> &[ForecastPoint] {
        &self.forecast
    }

    // ------------------------------------------------------------------
    // Imagery
    // ------------------------------------------------------------------

    /// Load a field image from disk. A decode failure leaves prior state
    /// untouched and returns `false`.
    pub fn load_image_file(&mut self, path: &Path) -> bool {
        match load_raster(path) {
            Ok(raster) => {
                self.load_image(raster);
                true
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Image load failed");
                false
            }
        }
    }

    /// Load a field image from a URL. Same failure policy as
    /// [`Self::load_image_file`].
    pub fn load_image_url(&mut self, url: &str) -> bool {
        match load_raster_url(url) {
            Ok(raster) => {
                self.load_image(raster);
                true
            }
            Err(e) => {
                warn!(url, error = %e, "Image load failed");
                false
            }
        }
    }

    /// Keep `raster` as the session image and zone it.
    pub fn load_image(&mut self, raster: RgbImage) {
        self.raster = Some(raster);
        self.recompute_zones();
    }

    /// Set the zone count (clamped to 2..=6) and re-zone the loaded image.
    pub fn set_zone_count(&mut self, zones: usize) -> usize {
        self.zone_count = zones.clamp(MIN_ZONE_COUNT, MAX_ZONE_COUNT);
        self.recompute_zones();
        self.zone_count
    }

    pub fn zone_count(&self) -> usize {
        self.zone_count
    }

    /// Re-run greenness extraction and clustering from scratch.
    fn recompute_zones(&mut self) {
        let Some(raster) = &self.raster else {
            return;
        };
        let map = extract_greenness(raster, self.config.zoning.max_width);
        self.heatmap = Some(render_heatmap(&map));
        self.zones = Some(zone_summary(
            &map,
            self.zone_count,
            self.config.zoning.iterations,
        ));
    }

    pub fn zones(&self) -> Option<&ZoneSummary> {
        self.zones.as_ref()
    }

    pub fn heatmap(&self) -> Option<&RgbaImage> {
        self.heatmap.as_ref()
    }

    // ------------------------------------------------------------------
    // Detection
    // ------------------------------------------------------------------

    /// Use `detector` for the next detection run instead of the built-in one.
    pub fn use_detector(&mut self, detector: Box<dyn ObjectDetector>) {
        self.detector = Some(detector);
    }

    /// Start the live loop on `source`. The detector is created on first
    /// need and kept for the rest of the session.
    pub fn start_detection(&mut self, source: Box<dyn FrameSource>) -> Result<()> {
        if let Some(previous) = self.detection.stop() {
            self.detector.get_or_insert(previous);
        }
        let detector: Box<dyn ObjectDetector> = match self.detector.take() {
            Some(detector) => detector,
            None => {
                info!("Loading built-in canopy detector");
                Box::new(CanopyPatchDetector::from_config(&self.config.detection))
            }
        };
        match self.detection.start(source, detector) {
            Ok(rx) => {
                self.detection_rx = Some(rx);
                Ok(())
            }
            Err(e) => {
                self.stop_detection();
                Err(e)
            }
        }
    }

    /// Stop the loop, keeping its detector cached.
    pub fn stop_detection(&mut self) {
        if let Some(detector) = self.detection.stop() {
            self.detector = Some(detector);
        }
    }

    /// Toggle between Idle and Running. `open_source` is only called when
    /// starting.
    pub fn toggle_detection<F>(&mut self, open_source: F) -> Result<LoopState>
    where
        F: FnOnce() -> Result<Box<dyn FrameSource>>,
    {
        if self.detection.state() == LoopState::Running {
            self.stop_detection();
        } else {
            self.start_detection(open_source()?)?;
        }
        Ok(self.detection.state())
    }

    pub fn detection_state(&self) -> LoopState {
        self.detection.state()
    }

    /// Set the live confidence threshold (clamped to 0.3..=0.9).
    pub fn set_confidence(&self, threshold: f32) -> f32 {
        self.detection.controls().set_confidence(threshold)
    }

    pub fn confidence(&self) -> f32 {
        self.detection.controls().confidence()
    }

    /// Frames published since the last call, oldest first.
    pub fn poll_detections(&self) -> Vec<DetectionFrame> {
        self.detection_rx
            .as_ref()
            .map(|rx| rx.try_iter().collect())
            .unwrap_or_default()
    }

    /// Wait up to `timeout` for the next published frame.
    pub fn next_detection(&self, timeout: Duration) -> Option<DetectionFrame> {
        self.detection_rx.as_ref()?.recv_timeout(timeout).ok()
    }

    pub fn latest_detections(&self) -> Vec<Detection> {
        self.detection.latest()
    }

    pub fn overlay(&self) -> Overlay {
        self.detection.overlay()
    }

    // ------------------------------------------------------------------

    pub fn snapshot(&self) -> SessionReport {
        SessionReport {
            series: self.series.clone(),
            signals: self.signals,
            model_status: self.model_status.to_string(),
            forecast: self.forecast.clone(),
            zones: self.zones.clone(),
            recommendations: self.recommendations.clone(),
            detections: self.latest_detections(),
        }
    }
}

impl Default for AnalyticsSession {
    fn default() -> Self {
        Self::new(AnalyticsConfig::default())
    }
}
