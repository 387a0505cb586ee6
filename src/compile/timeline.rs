use crate::{
    compile::plan::{DrawOp, FramePlan, TOLERANCE, TextAlign, push_fill},
    composition::model::{Layer, LayerId},
    foundation::color::Color,
    foundation::core::{Affine, BezPath, Canvas, Point, Rect, Vec2},
    foundation::error::KineoResult,
};
use kurbo::Shape;

/// Ruler tick spacing in normalized time.
pub const TICK_STEP: f64 = 0.05;
/// Every n-th tick is a major tick (0.25 spacing).
pub const MAJOR_TICK_EVERY: u32 = 5;

const PANEL: Color = Color::rgb(0x0b, 0x11, 0x20);
const RULER: Color = Color::rgb(0x11, 0x18, 0x27);
const TICK: Color = Color::rgba(0x94, 0xa3, 0xb8, 0xb0);
const TRACK: Color = Color::rgba(0x33, 0x41, 0x55, 0xff);
const SELECTED: Color = Color::rgba(0x38, 0xbd, 0xf8, 0x30);
const MARKER: Color = Color::rgb(0x38, 0xbd, 0xf8);
const LABEL: Color = Color::rgb(0xe2, 0xe8, 0xf0);
const PLAYHEAD: Color = Color::rgb(0xf4, 0x3f, 0x5e);
const HIDDEN_OPACITY: f32 = 0.35;
const MARKER_RADIUS: f64 = 5.0;

/// Pixel geometry of the timeline panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineView {
    /// Panel size.
    pub canvas: Canvas,
    /// Width of the layer-name gutter on the left.
    pub label_width: f64,
    /// Height of the ruler strip on top.
    pub ruler_height: f64,
    /// Height of one layer row.
    pub row_height: f64,
    /// Blank margin right of the track.
    pub right_padding: f64,
}

impl TimelineView {
    /// Panel `width` pixels wide with room for `rows` layer rows.
    pub fn for_layers(width: u32, rows: usize) -> KineoResult<Self> {
        let (ruler_height, row_height) = (24.0, 28.0);
        let height = (ruler_height + row_height * rows.max(1) as f64).ceil() as u32;
        Ok(Self {
            canvas: Canvas::new(width, height)?,
            label_width: 140.0_f64.min(f64::from(width) * 0.4),
            ruler_height,
            row_height,
            right_padding: 12.0,
        })
    }

    /// Left edge of the track area.
    pub fn track_x0(&self) -> f64 {
        self.label_width
    }

    /// Width of the track area in pixels.
    pub fn track_width(&self) -> f64 {
        (f64::from(self.canvas.width) - self.label_width - self.right_padding).max(1.0)
    }

    /// Pixel x of normalized time `t`.
    pub fn x_at(&self, t: f64) -> f64 {
        self.track_x0() + t.clamp(0.0, 1.0) * self.track_width()
    }

    /// Normalized time under pixel x, clamped to `[0, 1]`.
    pub fn time_at(&self, x: f64) -> f64 {
        if !x.is_finite() {
            return 0.0;
        }
        ((x - self.track_x0()) / self.track_width()).clamp(0.0, 1.0)
    }

    fn row_y(&self, row: usize) -> f64 {
        self.ruler_height + row as f64 * self.row_height
    }
}

fn rect_path(x0: f64, y0: f64, x1: f64, y1: f64) -> BezPath {
    Rect::new(x0, y0, x1, y1).to_path(TOLERANCE)
}

fn diamond(center: Point, r: f64) -> BezPath {
    let mut p = BezPath::new();
    p.move_to((center.x, center.y - r));
    p.line_to((center.x + r, center.y));
    p.line_to((center.x, center.y + r));
    p.line_to((center.x - r, center.y));
    p.close_path();
    p
}

/// Draw the read-only timeline panel: ruler, one row per layer with keyframe markers, playhead.
pub fn compile_timeline(
    layers: &[Layer],
    t: f64,
    selected: Option<LayerId>,
    view: &TimelineView,
) -> FramePlan {
    let w = f64::from(view.canvas.width);
    let h = f64::from(view.canvas.height);
    let id = Affine::IDENTITY;
    let mut ops = Vec::new();

    push_fill(&mut ops, rect_path(0.0, 0.0, w, h), id, PANEL, 1.0);
    push_fill(&mut ops, rect_path(0.0, 0.0, w, view.ruler_height), id, RULER, 1.0);

    let ticks = (1.0 / TICK_STEP).round() as u32;
    for i in 0..=ticks {
        let x = view.x_at(f64::from(i) * TICK_STEP).round();
        let len = if i % MAJOR_TICK_EVERY == 0 {
            view.ruler_height * 0.6
        } else {
            view.ruler_height * 0.3
        };
        push_fill(
            &mut ops,
            rect_path(x - 0.5, view.ruler_height - len, x + 0.5, view.ruler_height),
            id,
            TICK,
            1.0,
        );
    }

    for (row, layer) in layers.iter().enumerate() {
        let y0 = view.row_y(row);
        let cy = y0 + view.row_height * 0.5;
        let opacity = if layer.visible { 1.0 } else { HIDDEN_OPACITY };
        if selected == Some(layer.id) {
            push_fill(&mut ops, rect_path(0.0, y0, w, y0 + view.row_height), id, SELECTED, 1.0);
        }
        ops.push(DrawOp::Text {
            text: layer.name.clone(),
            size: 12.0,
            weight: 500,
            family: "sans-serif".to_owned(),
            color: LABEL,
            transform: Affine::translate(Vec2::new(8.0, cy)),
            opacity,
            align: TextAlign::Start,
        });
        push_fill(
            &mut ops,
            rect_path(view.track_x0(), cy - 1.0, view.track_x0() + view.track_width(), cy + 1.0),
            id,
            TRACK,
            opacity,
        );
        for k in &layer.keyframes {
            let marker = diamond(Point::new(view.x_at(k.time), cy), MARKER_RADIUS);
            push_fill(&mut ops, marker, id, MARKER, opacity);
        }
    }

    let px = view.x_at(if t.is_finite() { t } else { 0.0 });
    push_fill(&mut ops, rect_path(px - 1.0, 0.0, px + 1.0, h), id, PLAYHEAD, 1.0);

    FramePlan {
        canvas: view.canvas,
        ops,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/timeline.rs"]
mod tests;
