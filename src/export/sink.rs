use crate::foundation::core::Fps;
use crate::foundation::error::KineoResult;
use crate::render::backend::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Project frames-per-second.
    pub fps: Fps,
    /// Number of frames that will be pushed.
    pub frames: u32,
}

/// Sink contract for consuming exported frames.
///
/// Ordering contract: `push_frame` is called with indices `0..frames` in increasing order.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> KineoResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: u32, frame: &FrameRGBA) -> KineoResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> KineoResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(u32, FrameRGBA)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(u32, FrameRGBA)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> KineoResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: u32, frame: &FrameRGBA) -> KineoResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> KineoResult<()> {
        Ok(())
    }
}
