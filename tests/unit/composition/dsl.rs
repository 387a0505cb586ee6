use super::*;

#[test]
fn builders_create_expected_structure() {
    let tpl = TemplateBuilder::new("demo", "Demo", Category::TitleCards)
        .description("two layers")
        .duration_secs(3.0)
        .layer(LayerBuilder::background("Wash", Color::rgba(0, 0, 0, 80)))
        .layer(
            LayerBuilder::text("Title", "Hello", 48.0, Color::WHITE)
                .weight(800)
                .family("Inter")
                .easing(Ease::Back)
                .key(Keyframe::at(0.0, 480.0, 270.0).opacity(0.0))
                .key(Keyframe::at(0.3, 480.0, 270.0)),
        )
        .build()
        .unwrap();

    assert_eq!(tpl.layers.len(), 2);
    assert_eq!(tpl.duration_secs, 3.0);
    let title = &tpl.layers[1];
    assert_eq!(title.easing, Ease::Back);
    assert_eq!(title.keyframes.len(), 2);
    let LayerKind::Text(t) = &title.kind else {
        panic!("expected text");
    };
    assert_eq!(t.weight, 800);
    assert_eq!(t.family, "Inter");
}

#[test]
fn kind_specific_setters_ignore_other_kinds() {
    let layer = LayerBuilder::accent("Rule", 100.0, Color::WHITE)
        .weight(900)
        .stroke(Color::BLACK, 2.0)
        .thickness(6.0)
        .hidden()
        .build();
    assert!(!layer.visible);
    let LayerKind::Accent(a) = &layer.kind else {
        panic!("expected accent");
    };
    assert_eq!(a.thickness, 6.0);
}

#[test]
fn build_rejects_invalid_layers() {
    let res = TemplateBuilder::new("bad", "Bad", Category::Intros)
        .layer(LayerBuilder::text("Title", "x", -1.0, Color::WHITE))
        .build();
    assert!(res.is_err());
}
