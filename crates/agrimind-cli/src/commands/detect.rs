use std::path::PathBuf;
use std::time::Duration;

use agrimind_core::detection::{ImageSequence, LoopState};
use agrimind_core::io::image_io::save_rgba_png;
use agrimind_core::pipeline::AnalyticsSession;
use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use crate::summary;

#[derive(Args)]
pub struct DetectArgs {
    /// Directory of frames, played in file-name order
    pub frames: PathBuf,

    /// Analytics config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Confidence threshold (0.3-0.9), overrides the config
    #[arg(long)]
    pub confidence: Option<f32>,

    /// Stop after this many published frames
    #[arg(long)]
    pub max_frames: Option<usize>,

    /// Restart from the first frame when the sequence ends
    #[arg(long = "loop")]
    pub looping: bool,

    /// Save the overlay of every published frame into this directory
    #[arg(long)]
    pub overlay_dir: Option<PathBuf>,
}

pub fn run(args: &DetectArgs) -> Result<()> {
    let config = super::load_config(args.config.as_ref())?;
    let looping = args.looping || config.detection.loop_frames;
    let source = ImageSequence::open_dir(&args.frames, looping)
        .with_context(|| format!("No frames in {}", args.frames.display()))?;
    println!("{} frame(s) from {}", source.len(), args.frames.display());

    if let Some(ref dir) = args.overlay_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let mut session = AnalyticsSession::new(config);
    if let Some(confidence) = args.confidence {
        session.set_confidence(confidence);
    }
    session.start_detection(Box::new(source))?;

    let mut received = 0usize;
    loop {
        if args.max_frames.is_some_and(|max| received >= max) {
            break;
        }
        match session.next_detection(Duration::from_millis(250)) {
            Some(frame) => {
                summary::print_detection_frame(&frame);
                if let Some(ref dir) = args.overlay_dir {
                    let path = dir.join(format!("overlay_{:05}.png", frame.frame_index));
                    save_rgba_png(&frame.overlay.surface, &path)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                }
                received += 1;
            }
            None if session.detection_state() == LoopState::Idle => break,
            None => {}
        }
    }

    session.stop_detection();
    info!(frames = received, "Detection finished");
    println!("\n{} frame(s) with published detections", received);
    Ok(())
}
