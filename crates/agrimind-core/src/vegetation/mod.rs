//! Greenness extraction and vigor zoning for RGB field imagery.
//!
//! There is no near-infrared channel: `G - R` stands in for a vegetation
//! index. Zones are clustered on the raw greenness values; the heatmap uses
//! values rescaled against the frame's own min/max.

mod config;
pub mod greenness;
pub mod zones;

pub use config::ZoningConfig;
pub use greenness::{extract_greenness, render_heatmap, scale_to_255, working_size, GreennessMap};
pub use zones::{clamp_zone_count, kmeans_1d, zone_summary, Zone, ZoneSummary};
