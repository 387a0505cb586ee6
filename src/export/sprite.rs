use crate::{
    compile::plan::compile_frame,
    composition::model::Layer,
    composition::settings::ProjectSettings,
    export::sink::{FrameSink, SinkConfig},
    foundation::core::Canvas,
    foundation::error::{KineoError, KineoResult},
    render::backend::{FrameRGBA, RenderBackend, execute_plan},
};

/// Largest frame count a sprite sheet holds.
pub const MAX_SPRITE_FRAMES: u32 = 30;

/// Largest sprite-sheet edge in pixels.
pub const MAX_SHEET_EDGE: u32 = 32_768;

/// Sprite-sheet export options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpriteSheetOpts {
    /// Requested frame count; clamped to `[1, 30]`.
    pub frames: u32,
}

impl Default for SpriteSheetOpts {
    fn default() -> Self {
        Self { frames: 12 }
    }
}

/// Row-major tiling of equally sized frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpriteGrid {
    /// Number of frames.
    pub frames: u32,
    /// Columns, `ceil(sqrt(frames))`.
    pub cols: u32,
    /// Rows, `ceil(frames / cols)`.
    pub rows: u32,
    /// Size of one cell.
    pub cell: Canvas,
}

impl SpriteGrid {
    /// Grid for `frames` (clamped to `[1, 30]`) cells of size `cell`.
    pub fn new(frames: u32, cell: Canvas) -> Self {
        let frames = frames.clamp(1, MAX_SPRITE_FRAMES);
        let cols = (f64::from(frames).sqrt().ceil() as u32).max(1);
        let rows = frames.div_ceil(cols);
        Self {
            frames,
            cols,
            rows,
            cell,
        }
    }

    /// Full sheet size.
    pub fn sheet_canvas(&self) -> KineoResult<Canvas> {
        let w = self.cell.width.checked_mul(self.cols);
        let h = self.cell.height.checked_mul(self.rows);
        match (w, h) {
            (Some(w), Some(h)) if w <= MAX_SHEET_EDGE && h <= MAX_SHEET_EDGE => Canvas::new(w, h),
            _ => Err(KineoError::export(format!(
                "sprite sheet of {}x{} cells at {}x{} exceeds {MAX_SHEET_EDGE}px per edge",
                self.cols, self.rows, self.cell.width, self.cell.height
            ))),
        }
    }

    /// Normalized time of frame `i`: `i / (frames - 1)`, or `0` for a single frame.
    pub fn time_of(&self, i: u32) -> f64 {
        if self.frames <= 1 {
            0.0
        } else {
            f64::from(i.min(self.frames - 1)) / f64::from(self.frames - 1)
        }
    }

    /// Top-left pixel of cell `i`.
    pub fn cell_origin(&self, i: u32) -> (u32, u32) {
        ((i % self.cols) * self.cell.width, (i / self.cols) * self.cell.height)
    }
}

/// Sink that tiles pushed frames into one sheet.
#[derive(Debug, Default)]
pub struct SpriteSheetSink {
    grid: Option<SpriteGrid>,
    sheet: Option<FrameRGBA>,
    pushed: u32,
    finished: bool,
}

impl SpriteSheetSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grid chosen in `begin`, if any.
    pub fn grid(&self) -> Option<SpriteGrid> {
        self.grid
    }

    /// Take the finished sheet.
    pub fn into_sheet(self) -> KineoResult<FrameRGBA> {
        if !self.finished {
            return Err(KineoError::export("sprite sheet taken before end()"));
        }
        self.sheet
            .ok_or_else(|| KineoError::export("sprite sheet sink was never started"))
    }
}

impl FrameSink for SpriteSheetSink {
    fn begin(&mut self, cfg: SinkConfig) -> KineoResult<()> {
        let grid = SpriteGrid::new(cfg.frames, Canvas::new(cfg.width, cfg.height)?);
        let sheet = FrameRGBA::transparent(grid.sheet_canvas()?);
        self.grid = Some(grid);
        self.sheet = Some(sheet);
        self.pushed = 0;
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: u32, frame: &FrameRGBA) -> KineoResult<()> {
        let (Some(grid), Some(sheet)) = (self.grid, self.sheet.as_mut()) else {
            return Err(KineoError::export("push_frame before begin"));
        };
        if idx != self.pushed || idx >= grid.frames {
            return Err(KineoError::export(format!(
                "unexpected sprite frame {idx} (expected {} of {})",
                self.pushed, grid.frames
            )));
        }
        if frame.width != grid.cell.width || frame.height != grid.cell.height {
            return Err(KineoError::export(format!(
                "sprite frame is {}x{}, cell is {}x{}",
                frame.width, frame.height, grid.cell.width, grid.cell.height
            )));
        }
        if frame.premultiplied != sheet.premultiplied {
            return Err(KineoError::export("sprite frames must share alpha mode"));
        }
        frame.validate()?;

        let (ox, oy) = grid.cell_origin(idx);
        let row_bytes = (grid.cell.width as usize) * 4;
        let sheet_stride = (sheet.width as usize) * 4;
        for y in 0..grid.cell.height as usize {
            let src = y * row_bytes;
            let dst = (oy as usize + y) * sheet_stride + (ox as usize) * 4;
            sheet.data[dst..dst + row_bytes].copy_from_slice(&frame.data[src..src + row_bytes]);
        }
        self.pushed += 1;
        Ok(())
    }

    fn end(&mut self) -> KineoResult<()> {
        let grid = self
            .grid
            .ok_or_else(|| KineoError::export("end before begin"))?;
        if self.pushed != grid.frames {
            return Err(KineoError::export(format!(
                "sprite sheet received {} of {} frames",
                self.pushed, grid.frames
            )));
        }
        self.finished = true;
        Ok(())
    }
}

/// Render `frames` evenly spaced frames at native size into `sink`.
pub fn render_frames_into(
    layers: &[Layer],
    settings: &ProjectSettings,
    backend: &mut dyn RenderBackend,
    frames: u32,
    sink: &mut dyn FrameSink,
) -> KineoResult<()> {
    settings.validate()?;
    let canvas = settings.canvas();
    let grid = SpriteGrid::new(frames, canvas);
    sink.begin(SinkConfig {
        width: canvas.width,
        height: canvas.height,
        fps: settings.fps.fps(),
        frames: grid.frames,
    })?;
    for i in 0..grid.frames {
        let plan = compile_frame(layers, grid.time_of(i), settings, canvas);
        let frame = execute_plan(backend, &plan)?;
        sink.push_frame(i, &frame)?;
    }
    sink.end()
}

/// Render a sprite sheet of the composition (frame count clamped to `[1, 30]`).
///
/// Frames are sampled at `i / (n - 1)` and tiled row-major. The output is a pure function of
/// the layers, settings and backend configuration.
#[tracing::instrument(skip(layers, settings, backend), fields(layers = layers.len()))]
pub fn export_sprite_sheet(
    layers: &[Layer],
    settings: &ProjectSettings,
    backend: &mut dyn RenderBackend,
    opts: SpriteSheetOpts,
) -> KineoResult<FrameRGBA> {
    let mut sink = SpriteSheetSink::new();
    render_frames_into(layers, settings, backend, opts.frames, &mut sink)?;
    if let Some(grid) = sink.grid() {
        tracing::info!(frames = grid.frames, cols = grid.cols, rows = grid.rows, "sprite sheet rendered");
    }
    sink.into_sheet()
}

/// Render one frame at the project's native size.
pub fn render_still(
    layers: &[Layer],
    t: f64,
    settings: &ProjectSettings,
    backend: &mut dyn RenderBackend,
) -> KineoResult<FrameRGBA> {
    settings.validate()?;
    crate::render::pipeline::render_frame(layers, t, settings, backend)
}

#[cfg(test)]
#[path = "../../tests/unit/export/sprite.rs"]
mod tests;
