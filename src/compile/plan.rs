use std::f64::consts::TAU;

use kurbo::{Circle, Ellipse, PathEl, Shape};

use crate::{
    animation::keyframes::interpolate,
    animation::particles::generate_particles,
    composition::model::{
        COUNTDOWN_LAYER_NAME, Category, Layer, LayerKind, MAX_PARTICLES, ParticleLayer,
        ShapeKind, ShapeLayer,
    },
    composition::settings::{BackgroundFill, FrameRate, ProjectSettings},
    foundation::color::Color,
    foundation::core::{Affine, BezPath, Canvas, LOGICAL_HEIGHT, LOGICAL_WIDTH, Point, Rect, Vec2},
};

/// Layers at or below this opacity produce no draw operations.
pub const MIN_VISIBLE_OPACITY: f64 = 1e-3;

pub(crate) const TOLERANCE: f64 = 0.1;

const GUIDE_INSET: f64 = 0.05;
const GUIDE_COLOR: Color = Color::rgba(255, 255, 255, 40);
const TIMECODE_COLOR: Color = Color::rgba(255, 255, 255, 160);
const TIMECODE_SIZE: f64 = 14.0;

#[derive(Clone, Debug, PartialEq)]
/// Backend-agnostic draw list for a single frame, in paint order.
pub struct FramePlan {
    /// Target surface size.
    pub canvas: Canvas,
    /// Operations painted back to front.
    pub ops: Vec<DrawOp>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Horizontal text placement relative to the anchor. Text is always centered vertically.
pub enum TextAlign {
    /// Anchor on the left edge.
    Start,
    /// Anchor in the middle.
    Center,
    /// Anchor on the right edge.
    End,
}

#[derive(Clone, Debug, PartialEq)]
/// Draw operation emitted by the compiler.
pub enum DrawOp {
    /// Fill vector path geometry.
    FillPath {
        /// Path geometry in local space.
        path: BezPath,
        /// Local-to-surface transform.
        transform: Affine,
        /// Straight-alpha fill color.
        color: Color,
        /// Opacity multiplier in `[0, 1]`.
        opacity: f32,
    },
    /// Fill a surface-space rectangle with a two-stop vertical gradient.
    VerticalGradient {
        /// Covered area in surface pixels.
        rect: Rect,
        /// Color at `rect.y0`.
        top: Color,
        /// Color at `rect.y1`.
        bottom: Color,
    },
    /// Lay out and fill a single-line text run.
    Text {
        /// Displayed string.
        text: String,
        /// Font size in local units.
        size: f64,
        /// CSS-style weight.
        weight: u16,
        /// Requested family.
        family: String,
        /// Straight-alpha fill color.
        color: Color,
        /// Local-to-surface transform; the anchor is the local origin.
        transform: Affine,
        /// Opacity multiplier in `[0, 1]`.
        opacity: f32,
        /// Horizontal placement relative to the anchor.
        align: TextAlign,
    },
}

/// Format an elapsed time as `MM:SS:FF` at the given frame rate.
pub fn format_timecode(secs: f64, fps: FrameRate) -> String {
    let per_sec = u64::from(fps.per_second());
    let frames = fps.fps().secs_to_frames_floor(secs.max(0.0));
    let ff = frames % per_sec;
    let total_secs = frames / per_sec;
    format!("{:02}:{:02}:{:02}", total_secs / 60, total_secs % 60, ff)
}

/// Seconds displayed by the countdown layer at normalized time `t`.
pub fn countdown_value(duration_secs: f64, t: f64) -> u64 {
    (duration_secs * (1.0 - t.clamp(0.0, 1.0))).ceil().max(0.0) as u64
}

/// Compile the frame at normalized time `t` into a draw list for `canvas`.
///
/// Layers are authored in the 960x540 logical space, which is fitted into `canvas` uniformly.
#[tracing::instrument(level = "trace", skip(layers, settings), fields(layers = layers.len()))]
pub fn compile_frame(layers: &[Layer], t: f64, settings: &ProjectSettings, canvas: Canvas) -> FramePlan {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let mut ops = Vec::with_capacity(layers.len() + 4);
    push_background(&mut ops, settings.background, canvas);

    let view = canvas.logical_to_device();
    let countdown = (settings.category == Category::Countdowns)
        .then(|| countdown_value(settings.duration_secs, t).to_string());

    for layer in layers {
        if !layer.visible {
            continue;
        }
        let xf = interpolate(&layer.keyframes, t, layer.easing);
        if !xf.opacity.is_finite() || xf.opacity <= MIN_VISIBLE_OPACITY {
            continue;
        }
        let opacity = xf.opacity.clamp(0.0, 1.0) as f32;
        let local = view * xf.to_transform2d().to_affine();
        match &layer.kind {
            LayerKind::Text(text) => {
                let content = match &countdown {
                    Some(n) if layer.name == COUNTDOWN_LAYER_NAME => n.clone(),
                    _ => text.content.clone(),
                };
                if content.is_empty() {
                    continue;
                }
                ops.push(DrawOp::Text {
                    text: content,
                    size: text.size,
                    weight: text.weight,
                    family: text.family.clone(),
                    color: text.color,
                    transform: local,
                    opacity,
                    align: TextAlign::Center,
                });
            }
            LayerKind::Shape(shape) => push_shape(&mut ops, shape, local, opacity),
            LayerKind::Particle(p) => push_particles(&mut ops, p, t, local, opacity),
            LayerKind::Accent(a) => {
                let rect = centered_rect(a.width, a.thickness);
                push_fill(&mut ops, rect.to_path(TOLERANCE), local, a.color, opacity);
            }
            LayerKind::Background(bg) => {
                let anchor = view * Affine::translate(Vec2::new(xf.x, xf.y));
                let rect = centered_rect(LOGICAL_WIDTH, LOGICAL_HEIGHT);
                push_fill(&mut ops, rect.to_path(TOLERANCE), anchor, bg.color, opacity);
            }
            LayerKind::Unsupported => {}
        }
    }

    let guide = Rect::new(
        LOGICAL_WIDTH * GUIDE_INSET,
        LOGICAL_HEIGHT * GUIDE_INSET,
        LOGICAL_WIDTH * (1.0 - GUIDE_INSET),
        LOGICAL_HEIGHT * (1.0 - GUIDE_INSET),
    );
    push_fill(&mut ops, stroke_path(guide.path_elements(TOLERANCE), 1.0), view, GUIDE_COLOR, 1.0);

    ops.push(DrawOp::Text {
        text: format_timecode(t * settings.duration_secs, settings.fps),
        size: TIMECODE_SIZE,
        weight: 500,
        family: "monospace".to_owned(),
        color: TIMECODE_COLOR,
        transform: view * Affine::translate(Vec2::new(guide.x1 - 8.0, guide.y1 - 14.0)),
        opacity: 1.0,
        align: TextAlign::End,
    });

    FramePlan { canvas, ops }
}

fn push_background(ops: &mut Vec<DrawOp>, fill: BackgroundFill, canvas: Canvas) {
    let rect = Rect::new(0.0, 0.0, f64::from(canvas.width), f64::from(canvas.height));
    match fill {
        BackgroundFill::Solid { color } => {
            push_fill(ops, rect.to_path(TOLERANCE), Affine::IDENTITY, color, 1.0);
        }
        BackgroundFill::Gradient { top, bottom } => {
            ops.push(DrawOp::VerticalGradient { rect, top, bottom });
        }
    }
}

pub(crate) fn push_fill(ops: &mut Vec<DrawOp>, path: BezPath, transform: Affine, color: Color, opacity: f32) {
    if color.a == 0 || opacity <= 0.0 || path.elements().is_empty() {
        return;
    }
    ops.push(DrawOp::FillPath {
        path,
        transform,
        color,
        opacity,
    });
}

pub(crate) fn centered_rect(width: f64, height: f64) -> Rect {
    Rect::new(-width * 0.5, -height * 0.5, width * 0.5, height * 0.5)
}

/// Outline `path` into fillable geometry.
pub(crate) fn stroke_path(path: impl IntoIterator<Item = PathEl>, width: f64) -> BezPath {
    kurbo::stroke(
        path,
        &kurbo::Stroke::new(width),
        &kurbo::StrokeOpts::default(),
        TOLERANCE,
    )
}

fn polygon(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    for (i, p) in points.iter().enumerate() {
        if i == 0 {
            path.move_to(*p);
        } else {
            path.line_to(*p);
        }
    }
    path.close_path();
    path
}

fn shape_outline(shape: &ShapeLayer) -> BezPath {
    let (hw, hh) = (shape.width * 0.5, shape.height * 0.5);
    match shape.shape {
        ShapeKind::Rect => centered_rect(shape.width, shape.height).to_path(TOLERANCE),
        ShapeKind::Circle => Ellipse::new(Point::ORIGIN, Vec2::new(hw, hh), 0.0).to_path(TOLERANCE),
        ShapeKind::Triangle => polygon(&[
            Point::new(0.0, -hh),
            Point::new(hw, hh),
            Point::new(-hw, hh),
        ]),
        ShapeKind::Diamond => polygon(&[
            Point::new(0.0, -hh),
            Point::new(hw, 0.0),
            Point::new(0.0, hh),
            Point::new(-hw, 0.0),
        ]),
        ShapeKind::Line => {
            let mut path = BezPath::new();
            path.move_to((-hw, 0.0));
            path.line_to((hw, 0.0));
            path
        }
    }
}

fn push_shape(ops: &mut Vec<DrawOp>, shape: &ShapeLayer, transform: Affine, opacity: f32) {
    let outline = shape_outline(shape);
    if shape.shape == ShapeKind::Line {
        // A line has no interior; it is drawn with the stroke, or a 2px fill-colored stroke.
        let (color, width) = match shape.stroke {
            Some(s) => (s.color, s.width),
            None => (shape.fill, 2.0),
        };
        if width > 0.0 {
            push_fill(ops, stroke_path(outline, width), transform, color, opacity);
        }
        return;
    }
    if let Some(stroke) = shape.stroke
        && stroke.width > 0.0
    {
        push_fill(ops, outline.clone(), transform, shape.fill, opacity);
        push_fill(ops, stroke_path(outline, stroke.width), transform, stroke.color, opacity);
    } else {
        push_fill(ops, outline, transform, shape.fill, opacity);
    }
}

fn push_particles(ops: &mut Vec<DrawOp>, p: &ParticleLayer, t: f64, transform: Affine, opacity: f32) {
    let count = p.count.min(MAX_PARTICLES) as usize;
    let size = p.particle_size;
    if size <= 0.0 {
        return;
    }
    for d in generate_particles(p.seed, count, p.spread) {
        let wobble = d.phase + t * TAU * d.speed;
        let center = Point::new(
            d.offset_x + wobble.cos() * size * 2.0,
            d.offset_y + wobble.sin() * size * 2.0,
        );
        let pulse = 0.5 + 0.5 * (wobble * 1.5).sin();
        let alpha = 0.35 + 0.65 * pulse;
        push_fill(
            ops,
            Circle::new(center, size * 2.5).to_path(TOLERANCE),
            transform,
            p.color.with_alpha_factor(alpha * 0.25),
            opacity,
        );
        push_fill(
            ops,
            Circle::new(center, size).to_path(TOLERANCE),
            transform,
            p.color.with_alpha_factor(alpha),
            opacity,
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/plan.rs"]
mod tests;
