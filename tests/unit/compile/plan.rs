use super::*;
use crate::animation::keyframes::Keyframe;
use crate::composition::dsl::LayerBuilder;

fn settings() -> ProjectSettings {
    ProjectSettings {
        background: BackgroundFill::Solid {
            color: Color::BLACK,
        },
        ..ProjectSettings::default()
    }
}

fn canvas() -> Canvas {
    Canvas::new(960, 540).unwrap()
}

fn text_of(op: &DrawOp) -> Option<&str> {
    match op {
        DrawOp::Text { text, .. } => Some(text.as_str()),
        _ => None,
    }
}

#[test]
fn empty_frame_has_background_guide_and_timecode() {
    let plan = compile_frame(&[], 0.0, &settings(), canvas());
    assert_eq!(plan.ops.len(), 3);
    let DrawOp::FillPath { transform, color, .. } = &plan.ops[0] else {
        panic!("expected solid background fill");
    };
    assert_eq!(*transform, Affine::IDENTITY);
    assert_eq!(*color, Color::BLACK);
    assert_eq!(text_of(&plan.ops[2]), Some("00:00:00"));
}

#[test]
fn gradient_background_is_first_op() {
    let plan = compile_frame(&[], 0.0, &ProjectSettings::default(), canvas());
    assert!(matches!(plan.ops[0], DrawOp::VerticalGradient { .. }));
}

#[test]
fn transparent_and_hidden_layers_emit_nothing() {
    let shape = LayerBuilder::shape("S", ShapeKind::Rect, 50.0, 50.0, Color::WHITE)
        .key(Keyframe::at(0.0, 100.0, 100.0))
        .build();
    let faded = LayerBuilder::text("Ghost", "boo", 20.0, Color::WHITE)
        .key(Keyframe::at(0.0, 10.0, 10.0).opacity(0.0))
        .build();
    let hidden = LayerBuilder::accent("Rule", 100.0, Color::WHITE).hidden().build();
    let unsupported = Layer::new("Mystery", LayerKind::Unsupported);

    let baseline = compile_frame(std::slice::from_ref(&shape), 0.5, &settings(), canvas());
    let with_extra = compile_frame(
        &[faded, shape, hidden, unsupported],
        0.5,
        &settings(),
        canvas(),
    );
    assert_eq!(baseline, with_extra);
}

#[test]
fn countdown_layer_shows_remaining_seconds() {
    let layers = [LayerBuilder::text(COUNTDOWN_LAYER_NAME, "stored", 80.0, Color::WHITE).build()];
    let mut s = settings();
    s.category = Category::Countdowns;
    s.duration_secs = 10.0;

    let shown = |t: f64, s: &ProjectSettings| {
        compile_frame(&layers, t, s, canvas())
            .ops
            .iter()
            .find_map(|op| text_of(op).map(str::to_owned))
            .unwrap()
    };
    assert_eq!(shown(0.0, &s), "10");
    assert_eq!(shown(0.55, &s), "5");
    assert_eq!(shown(1.0, &s), "0");

    s.category = Category::TitleCards;
    assert_eq!(shown(0.5, &s), "stored");
}

#[test]
fn timecode_uses_frame_rate() {
    assert_eq!(format_timecode(0.0, FrameRate::Fps30), "00:00:00");
    assert_eq!(format_timecode(65.5, FrameRate::Fps30), "01:05:15");
    assert_eq!(format_timecode(1.5, FrameRate::Fps24), "00:01:12");
    assert_eq!(format_timecode(-3.0, FrameRate::Fps60), "00:00:00");
}

#[test]
fn stroke_adds_second_fill_and_clear_fill_is_skipped() {
    let stroked = LayerBuilder::shape("S", ShapeKind::Diamond, 40.0, 40.0, Color::WHITE)
        .stroke(Color::BLACK, 2.0)
        .build();
    let ring = LayerBuilder::shape("R", ShapeKind::Circle, 40.0, 40.0, Color::rgba(0, 0, 0, 0))
        .stroke(Color::WHITE, 2.0)
        .build();
    let base = compile_frame(&[], 0.0, &settings(), canvas()).ops.len();
    assert_eq!(compile_frame(&[stroked], 0.0, &settings(), canvas()).ops.len(), base + 2);
    assert_eq!(compile_frame(&[ring], 0.0, &settings(), canvas()).ops.len(), base + 1);
}

#[test]
fn particles_emit_halo_and_core_deterministically() {
    let mut layer = LayerBuilder::particles("P", 12, 2.0, Color::WHITE, 40.0)
        .key(Keyframe::at(0.0, 480.0, 270.0))
        .build();
    if let LayerKind::Particle(p) = &mut layer.kind {
        p.seed = 1234;
    }
    let a = compile_frame(std::slice::from_ref(&layer), 0.3, &settings(), canvas());
    let b = compile_frame(std::slice::from_ref(&layer), 0.3, &settings(), canvas());
    let base = compile_frame(&[], 0.3, &settings(), canvas()).ops.len();
    assert_eq!(a.ops.len(), base + 24);
    assert_eq!(a, b);
}

#[test]
fn background_layer_ignores_scale_and_rotation() {
    let layer = LayerBuilder::background("Wash", Color::rgba(255, 0, 0, 128))
        .key(Keyframe::at(0.0, 480.0, 270.0).scale(3.0).rotation(45.0))
        .build();
    let plan = compile_frame(&[layer], 0.0, &settings(), Canvas::new(1920, 1080).unwrap());
    let DrawOp::FillPath { transform, .. } = &plan.ops[1] else {
        panic!("expected wash fill");
    };
    let expected = Affine::scale(2.0) * Affine::translate(Vec2::new(480.0, 270.0));
    assert_eq!(*transform, expected);
}

#[test]
fn out_of_range_time_is_clamped() {
    let layers = [LayerBuilder::accent("A", 10.0, Color::WHITE)
        .keys([Keyframe::at(0.0, 0.0, 0.0), Keyframe::at(1.0, 100.0, 0.0)])
        .build()];
    let s = settings();
    assert_eq!(
        compile_frame(&layers, 7.0, &s, canvas()),
        compile_frame(&layers, 1.0, &s, canvas())
    );
    assert_eq!(
        compile_frame(&layers, f64::NAN, &s, canvas()),
        compile_frame(&layers, 0.0, &s, canvas())
    );
}
