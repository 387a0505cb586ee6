use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{
    compile::plan::{DrawOp, TextAlign},
    foundation::color::Color,
    foundation::core::{Affine, BezPath, Canvas, Rect, Vec2},
    foundation::error::{KineoError, KineoResult},
    render::backend::{FrameRGBA, RenderBackend},
    render::text::TextEngine,
};

/// Environment variable naming a font file loaded by [`CpuBackendOpts::from_env`].
pub const FONT_ENV: &str = "KINEO_FONT";

/// Options for the CPU backend.
#[derive(Debug, Clone, Default)]
pub struct CpuBackendOpts {
    pub(crate) fonts: Vec<PathBuf>,
    pub(crate) clear_rgba: Option<[u8; 4]>,
}

impl CpuBackendOpts {
    /// Defaults plus the font named by `KINEO_FONT`, if set.
    pub fn from_env() -> Self {
        let mut opts = Self::default();
        if let Some(p) = std::env::var_os(FONT_ENV).filter(|v| !v.is_empty()) {
            opts.fonts.push(PathBuf::from(p));
        }
        opts
    }

    /// Return options with a configured clear color for the output surface.
    pub fn with_clear_rgba(mut self, clear: Option<[u8; 4]>) -> Self {
        self.clear_rgba = clear;
        self
    }

    /// Add a TTF/OTF file to the fonts available to text layers.
    pub fn with_font(mut self, path: impl Into<PathBuf>) -> Self {
        self.fonts.push(path.into());
        self
    }

    /// Font files that will be registered.
    pub fn fonts(&self) -> &[PathBuf] {
        &self.fonts
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct GradientKey {
    top: [u8; 4],
    bottom: [u8; 4],
    w: u32,
    h: u32,
}

/// CPU raster backend powered by `vello_cpu` for vector and text rasterization.
pub struct CpuBackend {
    opts: CpuBackendOpts,
    ctx: Option<vello_cpu::RenderContext>,
    canvas: Option<Canvas>,
    text: TextEngine,
    warned_no_font: bool,
    gradient_cache: HashMap<GradientKey, vello_cpu::Image>,
}

impl CpuBackend {
    /// Create a backend, reading and registering every configured font.
    pub fn new(opts: CpuBackendOpts) -> KineoResult<Self> {
        let mut text = TextEngine::new();
        for path in &opts.fonts {
            let bytes = read_font(path)?;
            let families = text.register_font(bytes)?;
            tracing::debug!(path = %path.display(), ?families, "font registered");
        }
        Ok(Self {
            opts,
            ctx: None,
            canvas: None,
            text,
            warned_no_font: false,
            gradient_cache: HashMap::new(),
        })
    }

    fn ctx_mut(&mut self) -> KineoResult<&mut vello_cpu::RenderContext> {
        self.ctx
            .as_mut()
            .ok_or_else(|| KineoError::render("draw called outside begin_frame/finish_frame"))
    }

    fn gradient_paint(&mut self, top: Color, bottom: Color, w: u32, h: u32) -> KineoResult<vello_cpu::Image> {
        let start = top.to_premul_rgba8();
        let end = bottom.to_premul_rgba8();
        let key = GradientKey {
            top: start,
            bottom: end,
            w,
            h,
        };
        if let Some(img) = self.gradient_cache.get(&key).cloned() {
            return Ok(img);
        }
        let mut bytes = vec![0u8; (w as usize).saturating_mul(h as usize).saturating_mul(4)];
        let h1 = (h.max(1) - 1) as f32;
        for y in 0..h {
            let t = if h1 <= 0.0 { 0.0 } else { (y as f32) / h1 };
            let lerp = |a: u8, b: u8| -> u8 {
                let af = a as f32;
                let bf = b as f32;
                (af + (bf - af) * t).round().clamp(0.0, 255.0) as u8
            };
            let c = [
                lerp(start[0], end[0]),
                lerp(start[1], end[1]),
                lerp(start[2], end[2]),
                lerp(start[3], end[3]),
            ];
            let row = (y as usize) * (w as usize) * 4;
            for px in bytes[row..row + (w as usize) * 4].chunks_exact_mut(4) {
                px.copy_from_slice(&c);
            }
        }
        let img = rgba_premul_to_image(&bytes, w, h)?;
        self.gradient_cache.insert(key, img.clone());
        Ok(img)
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_text(
        &mut self,
        text: &str,
        size: f64,
        weight: u16,
        family: &str,
        color: Color,
        transform: Affine,
        opacity: f32,
        align: TextAlign,
    ) -> KineoResult<()> {
        if !self.text.has_fonts() {
            if !self.warned_no_font {
                tracing::warn!(
                    "no font registered (set {FONT_ENV} or pass a font); text layers are skipped"
                );
                self.warned_no_font = true;
            }
            return Ok(());
        }
        if !size.is_finite() || size <= 0.0 {
            return Ok(());
        }
        let Some(shaped) = self.text.shape(text, family, size as f32, weight) else {
            return Ok(());
        };
        let w = f64::from(shaped.layout.width());
        let h = f64::from(shaped.layout.height());
        let dx = match align {
            TextAlign::Start => 0.0,
            TextAlign::Center => -w * 0.5,
            TextAlign::End => -w,
        };
        let tr = transform * Affine::translate(Vec2::new(dx, -h * 0.5));

        let ctx = self.ctx_mut()?;
        ctx.set_transform(affine_to_cpu(tr));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
        if opacity < 1.0 {
            ctx.push_opacity_layer(opacity);
        }
        for line in shaped.layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&shaped.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        if opacity < 1.0 {
            ctx.pop_layer();
        }
        Ok(())
    }
}

impl RenderBackend for CpuBackend {
    fn begin_frame(&mut self, canvas: Canvas) -> KineoResult<()> {
        let (w, h) = surface_dims(canvas)?;
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();
        if let Some([r, g, b, a]) = self.opts.clear_rgba {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(canvas.width),
                f64::from(canvas.height),
            ));
        }
        self.ctx = Some(ctx);
        self.canvas = Some(canvas);
        Ok(())
    }

    fn draw(&mut self, op: &DrawOp) -> KineoResult<()> {
        match op {
            DrawOp::FillPath {
                path,
                transform,
                color,
                opacity,
            } => {
                let ctx = self.ctx_mut()?;
                ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
                ctx.set_transform(affine_to_cpu(*transform));
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    color.r, color.g, color.b, color.a,
                ));
                if *opacity < 1.0 {
                    ctx.push_opacity_layer(*opacity);
                }
                ctx.fill_path(&bezpath_to_cpu(path));
                if *opacity < 1.0 {
                    ctx.pop_layer();
                }
                Ok(())
            }
            DrawOp::VerticalGradient { rect, top, bottom } => {
                let iw = rect.width().max(1.0).ceil() as u32;
                let ih = rect.height().max(1.0).ceil() as u32;
                let img = self.gradient_paint(*top, *bottom, iw, ih)?;
                let ctx = self.ctx_mut()?;
                ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
                ctx.set_transform(affine_to_cpu(Affine::translate(Vec2::new(rect.x0, rect.y0))));
                ctx.set_paint(img);
                ctx.fill_rect(&rect_to_cpu(Rect::new(0.0, 0.0, f64::from(iw), f64::from(ih))));
                Ok(())
            }
            DrawOp::Text {
                text,
                size,
                weight,
                family,
                color,
                transform,
                opacity,
                align,
            } => self.draw_text(text, *size, *weight, family, *color, *transform, *opacity, *align),
        }
    }

    fn finish_frame(&mut self) -> KineoResult<FrameRGBA> {
        let canvas = self
            .canvas
            .take()
            .ok_or_else(|| KineoError::render("finish_frame without begin_frame"))?;
        let (w, h) = surface_dims(canvas)?;
        let ctx = self.ctx_mut()?;
        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);
        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn read_font(path: &Path) -> KineoResult<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        KineoError::validation(format!("failed to read font '{}': {e}", path.display()))
    })
}

fn surface_dims(canvas: Canvas) -> KineoResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| KineoError::render("surface width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| KineoError::render("surface height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(KineoError::render("surface must be non-empty"));
    }
    Ok((w, h))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn rgba_premul_to_image(bytes: &[u8], width: u32, height: u32) -> KineoResult<vello_cpu::Image> {
    let w: u16 = width
        .try_into()
        .map_err(|_| KineoError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| KineoError::render("pixmap height exceeds u16"))?;
    if bytes.len() != (width as usize).saturating_mul(height as usize).saturating_mul(4) {
        return Err(KineoError::render("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
