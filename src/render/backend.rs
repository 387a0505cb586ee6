use crate::{
    compile::plan::{DrawOp, FramePlan},
    foundation::core::Canvas,
    foundation::error::{KineoError, KineoResult},
};

/// A rendered frame as RGBA8 pixels.
///
/// Backends produce **premultiplied alpha**; the `premultiplied` flag makes this explicit at API
/// boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Fully transparent premultiplied frame.
    pub fn transparent(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            data: vec![0; canvas.rgba_len()],
            premultiplied: true,
        }
    }

    /// RGBA bytes of pixel `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Check that `data` matches `width * height * 4`.
    pub fn validate(&self) -> KineoResult<()> {
        let expected = (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4);
        if self.data.len() != expected {
            return Err(KineoError::render(format!(
                "frame buffer is {} bytes, expected {expected} for {}x{}",
                self.data.len(),
                self.width,
                self.height
            )));
        }
        Ok(())
    }
}

/// A renderer that can execute a compiled [`FramePlan`] into a [`FrameRGBA`].
///
/// Implementors provide the three primitive steps; most callers go through
/// [`RenderBackend::render_plan`] or the functions in [`crate::render_frame`] and friends.
pub trait RenderBackend {
    /// Prepare a cleared surface of the given size.
    fn begin_frame(&mut self, canvas: Canvas) -> KineoResult<()>;
    /// Paint one operation on top of the surface.
    fn draw(&mut self, op: &DrawOp) -> KineoResult<()>;
    /// Finish painting and read back the frame.
    fn finish_frame(&mut self) -> KineoResult<FrameRGBA>;

    /// Execute a whole plan in order.
    fn render_plan(&mut self, plan: &FramePlan) -> KineoResult<FrameRGBA> {
        execute_plan(self, plan)
    }
}

/// Run every op of `plan` through `backend`, back to front.
pub fn execute_plan<B: RenderBackend + ?Sized>(backend: &mut B, plan: &FramePlan) -> KineoResult<FrameRGBA> {
    backend.begin_frame(plan.canvas)?;
    for op in &plan.ops {
        backend.draw(op)?;
    }
    let frame = backend.finish_frame()?;
    frame.validate()?;
    Ok(frame)
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
