use std::path::PathBuf;

use agrimind_core::io::image_io::save_rgba_png;
use agrimind_core::pipeline::AnalyticsSession;
use anyhow::{bail, Context, Result};
use clap::Args;

use crate::summary;

#[derive(Args)]
pub struct ZonesArgs {
    /// Image path, or a file:// / http(s):// URL
    pub image: String,

    /// Analytics config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of zones (2-6), overrides the config
    #[arg(long)]
    pub zones: Option<usize>,

    /// Save the greenness heatmap as PNG
    #[arg(long)]
    pub heatmap: Option<PathBuf>,
}

pub fn run(args: &ZonesArgs) -> Result<()> {
    let config = super::load_config(args.config.as_ref())?;
    let mut session = AnalyticsSession::new(config);
    if let Some(zones) = args.zones {
        session.set_zone_count(zones);
    }

    if !session.load_image_url(&args.image) {
        bail!("Could not load image {}", args.image);
    }

    if let Some(zones) = session.zones() {
        summary::print_zones(zones);
    }

    if let (Some(path), Some(heatmap)) = (&args.heatmap, session.heatmap()) {
        save_rgba_png(heatmap, path)
            .with_context(|| format!("Failed to write heatmap to {}", path.display()))?;
        println!("Heatmap saved to {}", path.display());
    }
    Ok(())
}
