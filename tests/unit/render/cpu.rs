use super::*;
use crate::compile::plan::FramePlan;
use kurbo::Shape;

fn backend() -> CpuBackend {
    CpuBackend::new(CpuBackendOpts::default()).unwrap()
}

fn fill(rect: Rect, color: Color, opacity: f32) -> DrawOp {
    DrawOp::FillPath {
        path: rect.to_path(0.1),
        transform: Affine::IDENTITY,
        color,
        opacity,
    }
}

#[test]
fn fills_produce_premultiplied_pixels() {
    let canvas = Canvas::new(8, 8).unwrap();
    let plan = FramePlan {
        canvas,
        ops: vec![
            fill(Rect::new(0.0, 0.0, 8.0, 8.0), Color::rgb(255, 0, 0), 1.0),
            fill(Rect::new(0.0, 0.0, 4.0, 8.0), Color::rgba(0, 0, 255, 255), 0.5),
        ],
    };
    let frame = backend().render_plan(&plan).unwrap();
    assert!(frame.premultiplied);
    assert_eq!(frame.pixel(6, 4), Some([255, 0, 0, 255]));
    let [r, _, b, a] = frame.pixel(1, 4).unwrap();
    assert_eq!(a, 255);
    assert!((120..=136).contains(&r), "r = {r}");
    assert!((120..=136).contains(&b), "b = {b}");
}

#[test]
fn gradient_runs_top_to_bottom() {
    let canvas = Canvas::new(4, 16).unwrap();
    let plan = FramePlan {
        canvas,
        ops: vec![DrawOp::VerticalGradient {
            rect: Rect::new(0.0, 0.0, 4.0, 16.0),
            top: Color::WHITE,
            bottom: Color::BLACK,
        }],
    };
    let frame = backend().render_plan(&plan).unwrap();
    let top = frame.pixel(2, 0).unwrap();
    let bottom = frame.pixel(2, 15).unwrap();
    assert!(top[0] > 240, "top = {top:?}");
    assert!(bottom[0] < 16, "bottom = {bottom:?}");
    assert_eq!(top[3], 255);
}

#[test]
fn clear_color_fills_surface() {
    let mut b = CpuBackend::new(CpuBackendOpts::default().with_clear_rgba(Some([0, 255, 0, 255])))
        .unwrap();
    let frame = b
        .render_plan(&FramePlan {
            canvas: Canvas::new(3, 3).unwrap(),
            ops: vec![],
        })
        .unwrap();
    assert!(frame.data.chunks_exact(4).all(|px| px == [0, 255, 0, 255]));
}

#[test]
fn text_without_fonts_is_skipped() {
    let plan = FramePlan {
        canvas: Canvas::new(16, 16).unwrap(),
        ops: vec![DrawOp::Text {
            text: "hello".into(),
            size: 12.0,
            weight: 400,
            family: "sans-serif".into(),
            color: Color::WHITE,
            transform: Affine::IDENTITY,
            opacity: 1.0,
            align: TextAlign::Center,
        }],
    };
    let frame = backend().render_plan(&plan).unwrap();
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn oversized_surface_is_a_render_error() {
    let plan = FramePlan {
        canvas: Canvas::new(70_000, 2).unwrap(),
        ops: vec![],
    };
    assert!(matches!(
        backend().render_plan(&plan),
        Err(KineoError::Render(_))
    ));
}

#[test]
fn draw_outside_frame_is_rejected() {
    let mut b = backend();
    let op = fill(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE, 1.0);
    assert!(b.draw(&op).is_err());
    assert!(b.finish_frame().is_err());
}

#[test]
fn missing_font_file_is_validation_error() {
    let res = CpuBackend::new(CpuBackendOpts::default().with_font("/nonexistent/kineo-font.ttf"));
    assert!(matches!(res, Err(KineoError::Validation(_))));
}
