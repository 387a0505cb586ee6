use super::*;

fn text(content: &str) -> LayerKind {
    LayerKind::Text(TextLayer {
        content: content.to_owned(),
        size: 32.0,
        weight: 700,
        family: "Inter".to_owned(),
        color: Color::WHITE,
    })
}

#[test]
fn layer_json_uses_flat_kind_tag() {
    let layer = Layer::new("Title", text("Hello"));
    let v = serde_json::to_value(&layer).unwrap();
    assert_eq!(v["kind"], "text");
    assert_eq!(v["content"], "Hello");
    assert_eq!(v["easing"], "linear");

    let back: Layer = serde_json::from_value(v).unwrap();
    assert_eq!(back, layer);
}

#[test]
fn layer_json_defaults_optional_fields() {
    let layer: Layer = serde_json::from_str(
        r##"{"name":"Dots","kind":"particle","count":12,"particle_size":2,"color":"#ffffff","spread":40}"##,
    )
    .unwrap();
    assert!(layer.visible);
    assert_eq!(layer.easing, Ease::Linear);
    assert!(layer.keyframes.is_empty());
    let LayerKind::Particle(p) = &layer.kind else {
        panic!("expected particle layer");
    };
    assert_eq!(p.seed, 0);
    assert_eq!(p.count, 12);
}

#[test]
fn unknown_kind_deserializes_as_unsupported() {
    let layer: Layer =
        serde_json::from_str(r#"{"name":"Lottie","kind":"lottie","src":"a.json"}"#).unwrap();
    assert_eq!(layer.kind, LayerKind::Unsupported);
    assert_eq!(layer.kind.name(), "unsupported");
}

#[test]
fn validate_rejects_bad_parameters() {
    let mut layer = Layer::new("Title", text("x"));
    assert!(layer.validate().is_ok());

    if let LayerKind::Text(t) = &mut layer.kind {
        t.size = 0.0;
    }
    assert!(layer.validate().is_err());

    let particles = Layer::new(
        "Dots",
        LayerKind::Particle(ParticleLayer {
            count: MAX_PARTICLES + 1,
            particle_size: 2.0,
            color: Color::WHITE,
            spread: 10.0,
            seed: 1,
        }),
    );
    assert!(particles.validate().is_err());

    let mut shape = Layer::new(
        "Box",
        LayerKind::Shape(ShapeLayer {
            shape: ShapeKind::Rect,
            width: 10.0,
            height: 10.0,
            fill: Color::BLACK,
            stroke: Some(Stroke {
                color: Color::WHITE,
                width: -1.0,
            }),
        }),
    );
    assert!(shape.validate().is_err());
    if let LayerKind::Shape(s) = &mut shape.kind {
        s.stroke = None;
    }
    assert!(shape.validate().is_ok());
    shape.keyframes.push(Keyframe::at(0.0, f64::NAN, 0.0));
    assert!(shape.validate().is_err());
}

#[test]
fn template_validation_checks_id_and_duration() {
    let mut tpl = CompositionTemplate {
        id: "t".to_owned(),
        name: "T".to_owned(),
        category: Category::Intros,
        description: String::new(),
        duration_secs: 3.0,
        layers: vec![Layer::new("Title", text("x"))],
    };
    assert!(tpl.validate().is_ok());
    tpl.duration_secs = 0.0;
    assert!(tpl.validate().is_err());
    tpl.duration_secs = 3.0;
    tpl.id = "  ".to_owned();
    assert!(tpl.validate().is_err());
}

#[test]
fn category_ids_match_serde() {
    for c in Category::ALL {
        assert_eq!(serde_json::to_string(&c).unwrap(), format!("\"{}\"", c.id()));
    }
    assert_eq!(LayerId(7).to_string(), "layer-7");
}
