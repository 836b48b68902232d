use std::path::PathBuf;
use std::time::Duration;

use agrimind_core::detection::{ImageSequence, LoopState};
use agrimind_core::pipeline::{AnalyticsSession, NoOpReporter};
use anyhow::{bail, Context, Result};
use clap::Args;

use crate::progress::BarReporter;
use crate::summary;

#[derive(Args)]
pub struct ReportArgs {
    /// CSV file with one row per period
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Field image path or URL
    #[arg(long)]
    pub image: Option<String>,

    /// Directory of frames for a short detection pass
    #[arg(long)]
    pub frames: Option<PathBuf>,

    /// Frames to wait for in the detection pass
    #[arg(long, default_value = "5")]
    pub max_frames: usize,

    /// Analytics config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &ReportArgs) -> Result<()> {
    if args.csv.is_none() && args.image.is_none() && args.frames.is_none() {
        bail!("Nothing to report: pass --csv, --image or --frames");
    }
    let config = super::load_config(args.config.as_ref())?;
    let mut session = AnalyticsSession::new(config);

    if let Some(ref csv) = args.csv {
        session
            .ingest_csv(csv)
            .with_context(|| format!("Failed to read {}", csv.display()))?;
        if args.json {
            session.train_forecast(&NoOpReporter);
        } else {
            let reporter = BarReporter::new();
            let status = session.train_forecast(&reporter);
            reporter.finish(&status.to_string());
        }
    }

    if let Some(ref image) = args.image {
        if !session.load_image_url(image) {
            bail!("Could not load image {}", image);
        }
    }

    if let Some(ref frames) = args.frames {
        let source = ImageSequence::open_dir(frames, false)
            .with_context(|| format!("No frames in {}", frames.display()))?;
        session.start_detection(Box::new(source))?;
        let mut received = 0usize;
        while received < args.max_frames {
            match session.next_detection(Duration::from_millis(250)) {
                Some(_) => received += 1,
                None if session.detection_state() == LoopState::Idle => break,
                None => {}
            }
        }
        session.stop_detection();
    }

    let report = session.snapshot();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        summary::print_report(&report, session.config().trend.window);
    }
    Ok(())
}
