/// Minimum pixel count to use Rayon parallelism in zone assignment.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Trailing window for the yield moving average.
pub const DEFAULT_MOVING_AVERAGE_WINDOW: usize = 3;

/// Latest rainfall below this fraction of the series mean is a deficit.
pub const DEFAULT_RAINFALL_DEFICIT_RATIO: f64 = 0.85;

/// Latest temperature above this value (°C) is heat stress.
pub const DEFAULT_HEAT_STRESS_CELSIUS: f64 = 32.0;

/// Minimum number of finite yield values before a forecast is attempted.
pub const MIN_FORECAST_POINTS: usize = 3;

/// Number of future points predicted per forecast.
pub const DEFAULT_FORECAST_HORIZON: usize = 3;

/// Hidden units in the forecast regressor.
pub const DEFAULT_HIDDEN_UNITS: usize = 8;

/// Training epochs per forecast. Every invocation retrains from scratch.
pub const DEFAULT_FORECAST_EPOCHS: usize = 100;

/// Adam learning rate for the forecast regressor.
pub const DEFAULT_LEARNING_RATE: f64 = 0.05;

/// Adam first-moment decay.
pub const ADAM_BETA1: f64 = 0.9;

/// Adam second-moment decay.
pub const ADAM_BETA2: f64 = 0.999;

/// Adam denominator epsilon.
pub const ADAM_EPSILON: f64 = 1e-7;

/// Seed for the regressor's weight initialization.
pub const DEFAULT_FORECAST_SEED: u64 = 0x5eed_a621;

/// Forecast points below this fraction of the latest yield signal a dip.
pub const DEFAULT_DIP_RATIO: f64 = 0.95;

/// Working raster width cap for greenness extraction. Never upscaled.
pub const MAX_RASTER_WIDTH: u32 = 1024;

/// Default number of vigor zones.
pub const DEFAULT_ZONE_COUNT: usize = 3;

/// Zone count range accepted by the control surface.
pub const MIN_ZONE_COUNT: usize = 2;
pub const MAX_ZONE_COUNT: usize = 6;

/// Fixed k-means round budget. No convergence check.
pub const KMEANS_ITERATIONS: usize = 8;

/// Heatmap red channel.
pub const HEATMAP_RED: u8 = 20;

/// Heatmap blue channel.
pub const HEATMAP_BLUE: u8 = 40;

/// Default detection confidence threshold.
pub const DEFAULT_CONFIDENCE: f32 = 0.5;

/// Confidence range accepted by the control surface.
pub const MIN_CONFIDENCE: f32 = 0.3;
pub const MAX_CONFIDENCE: f32 = 0.9;

/// Detection loop cadence, one display refresh at 60 Hz.
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;

/// Published frames buffered for a consumer. Newer frames are dropped while
/// the queue is full; `latest` and `overlay` always reflect the newest frame.
pub const DETECTION_QUEUE_DEPTH: usize = 4;

/// Overlay size used when the source does not report natural dimensions.
pub const FALLBACK_OVERLAY_WIDTH: u32 = 640;
pub const FALLBACK_OVERLAY_HEIGHT: u32 = 360;

/// Greenness (G - R) a pixel needs to count as canopy in the built-in detector.
pub const DEFAULT_CANOPY_GREENNESS: f32 = 20.0;

/// Minimum canopy patch area, as a fraction of the frame, to be reported.
pub const DEFAULT_MIN_PATCH_FRACTION: f32 = 0.002;

/// Overlay box stroke width in pixels.
pub const OVERLAY_STROKE_WIDTH: u32 = 2;
