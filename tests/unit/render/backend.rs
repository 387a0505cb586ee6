use super::*;
use crate::foundation::color::Color;
use crate::foundation::core::{Affine, BezPath};

#[derive(Default)]
struct MockBackend {
    began: u32,
    drawn: Vec<DrawOp>,
    finished: u32,
    short_buffer: bool,
    canvas: Option<Canvas>,
}

impl RenderBackend for MockBackend {
    fn begin_frame(&mut self, canvas: Canvas) -> KineoResult<()> {
        self.began += 1;
        self.canvas = Some(canvas);
        Ok(())
    }

    fn draw(&mut self, op: &DrawOp) -> KineoResult<()> {
        self.drawn.push(op.clone());
        Ok(())
    }

    fn finish_frame(&mut self) -> KineoResult<FrameRGBA> {
        self.finished += 1;
        let mut f = FrameRGBA::transparent(self.canvas.unwrap());
        if self.short_buffer {
            f.data.pop();
        }
        Ok(f)
    }
}

fn plan() -> FramePlan {
    let op = DrawOp::FillPath {
        path: BezPath::new(),
        transform: Affine::IDENTITY,
        color: Color::WHITE,
        opacity: 1.0,
    };
    FramePlan {
        canvas: Canvas::new(4, 2).unwrap(),
        ops: vec![op.clone(), op],
    }
}

#[test]
fn execute_plan_runs_ops_in_order() {
    let mut b = MockBackend::default();
    let frame = b.render_plan(&plan()).unwrap();
    assert_eq!((b.began, b.drawn.len(), b.finished), (1, 2, 1));
    assert_eq!((frame.width, frame.height, frame.data.len()), (4, 2, 32));
    assert!(frame.premultiplied);
}

#[test]
fn short_buffers_are_rejected() {
    let mut b = MockBackend {
        short_buffer: true,
        ..MockBackend::default()
    };
    assert!(matches!(
        execute_plan(&mut b, &plan()),
        Err(KineoError::Render(_))
    ));
}

#[test]
fn pixel_reads_are_bounds_checked() {
    let mut f = FrameRGBA::transparent(Canvas::new(2, 2).unwrap());
    f.data[12..16].copy_from_slice(&[1, 2, 3, 4]);
    assert_eq!(f.pixel(1, 1), Some([1, 2, 3, 4]));
    assert_eq!(f.pixel(2, 0), None);
}
