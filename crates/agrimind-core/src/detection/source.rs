use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::error::{AgriError, Result};

/// Frame extensions picked up by [`ImageSequence::open_dir`].
const FRAME_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff", "webp"];

/// A playable video-like source exposing per-frame pixels.
pub trait FrameSource: Send {
    /// Natural frame dimensions, if known before the first frame.
    fn natural_size(&self) -> Option<(u32, u32)>;

    /// The frame currently showing. `None` once playback has ended.
    fn next_frame(&mut self) -> Option<Result<RgbImage>>;
}

/// A directory of still frames played back in file-name order.
pub struct ImageSequence {
    paths: Vec<PathBuf>,
    position: usize,
    looping: bool,
    natural_size: Option<(u32, u32)>,
}

impl ImageSequence {
    pub fn new(paths: Vec<PathBuf>, looping: bool) -> Result<Self> {
        if paths.is_empty() {
            return Err(AgriError::EmptySequence);
        }
        let natural_size = image::image_dimensions(&paths[0]).ok();
        Ok(Self {
            paths,
            position: 0,
            looping,
            natural_size,
        })
    }

    /// Collect the image files of `dir`, sorted by name.
    pub fn open_dir(dir: &Path, looping: bool) -> Result<Self> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|e| FRAME_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            })
            .collect();
        paths.sort();
        Self::new(paths, looping)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl FrameSource for ImageSequence {
    fn natural_size(&self) -> Option<(u32, u32)> {
        self.natural_size
    }

    fn next_frame(&mut self) -> Option<Result<RgbImage>> {
        if self.position >= self.paths.len() {
            if !self.looping {
                return None;
            }
            self.position = 0;
        }
        let path = &self.paths[self.position];
        self.position += 1;
        let frame = match image::open(path) {
            Ok(img) => img.to_rgb8(),
            Err(e) => return Some(Err(e.into())),
        };
        // Boxes are drawn on an overlay sized to the first frame.
        match self.natural_size {
            Some(size) if size != frame.dimensions() => Some(Err(AgriError::InvalidDimensions {
                width: frame.width(),
                height: frame.height(),
            })),
            _ => Some(Ok(frame)),
        }
    }
}

/// Decoded frames held in memory.
pub struct StillFrames {
    frames: Vec<RgbImage>,
    position: usize,
    looping: bool,
}

impl StillFrames {
    pub fn new(frames: Vec<RgbImage>, looping: bool) -> Self {
        Self {
            frames,
            position: 0,
            looping,
        }
    }
}

impl FrameSource for StillFrames {
    fn natural_size(&self) -> Option<(u32, u32)> {
        self.frames.first().map(|f| f.dimensions())
    }

    fn next_frame(&mut self) -> Option<Result<RgbImage>> {
        if self.frames.is_empty() {
            return None;
        }
        if self.position >= self.frames.len() {
            if !self.looping {
                return None;
            }
            self.position = 0;
        }
        let frame = self.frames[self.position].clone();
        self.position += 1;
        Some(Ok(frame))
    }
}
