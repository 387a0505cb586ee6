use super::*;
use crate::animation::keyframes::Keyframe;
use crate::composition::dsl::LayerBuilder;

fn layers() -> Vec<Layer> {
    let mut a = LayerBuilder::text("Title", "hi", 20.0, Color::WHITE)
        .keys([Keyframe::at(0.0, 0.0, 0.0), Keyframe::at(0.5, 0.0, 0.0)])
        .build();
    a.id = LayerId(1);
    let mut b = LayerBuilder::accent("Rule", 10.0, Color::WHITE)
        .key(Keyframe::at(1.0, 0.0, 0.0))
        .hidden()
        .build();
    b.id = LayerId(2);
    vec![a, b]
}

fn count_fills(plan: &FramePlan, color: Color) -> usize {
    plan.ops
        .iter()
        .filter(|op| matches!(op, DrawOp::FillPath { color: c, .. } if *c == color))
        .count()
}

#[test]
fn time_at_inverts_x_at_and_clamps() {
    let view = TimelineView::for_layers(640, 3).unwrap();
    for t in [0.0, 0.25, 0.5, 1.0] {
        assert!((view.time_at(view.x_at(t)) - t).abs() < 1e-12);
    }
    assert_eq!(view.time_at(-50.0), 0.0);
    assert_eq!(view.time_at(10_000.0), 1.0);
    assert_eq!(view.time_at(f64::NAN), 0.0);
}

#[test]
fn ruler_has_twenty_one_ticks() {
    let view = TimelineView::for_layers(640, 2).unwrap();
    let plan = compile_timeline(&[], 0.0, None, &view);
    assert_eq!(count_fills(&plan, TICK), 21);
}

#[test]
fn markers_rows_and_selection() {
    let view = TimelineView::for_layers(640, 2).unwrap();
    let plan = compile_timeline(&layers(), 0.4, Some(LayerId(2)), &view);
    assert_eq!(count_fills(&plan, MARKER), 3);
    assert_eq!(count_fills(&plan, SELECTED), 1);
    assert_eq!(count_fills(&plan, PLAYHEAD), 1);

    let hidden_label = plan
        .ops
        .iter()
        .find_map(|op| match op {
            DrawOp::Text { text, opacity, .. } if text == "Rule" => Some(*opacity),
            _ => None,
        })
        .unwrap();
    assert_eq!(hidden_label, HIDDEN_OPACITY);
}

#[test]
fn playhead_is_drawn_last_at_t() {
    let view = TimelineView::for_layers(640, 2).unwrap();
    let plan = compile_timeline(&layers(), 0.5, None, &view);
    let Some(DrawOp::FillPath { path, .. }) = plan.ops.last() else {
        panic!("expected playhead");
    };
    let bbox = path.bounding_box();
    assert!((bbox.center().x - view.x_at(0.5)).abs() < 1e-9);
}
