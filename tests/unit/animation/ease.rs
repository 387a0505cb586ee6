use super::*;

#[test]
fn endpoints_are_exact_for_every_variant() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(0.0), 0.0, "{ease} at 0");
        assert_eq!(ease.apply(1.0), 1.0, "{ease} at 1");
    }
}

#[test]
fn input_is_clamped() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(-0.5), 0.0);
        assert_eq!(ease.apply(7.0), 1.0);
    }
}

#[test]
fn cubic_shapes() {
    assert_eq!(Ease::EaseIn.apply(0.5), 0.125);
    assert_eq!(Ease::EaseOut.apply(0.5), 0.875);
    assert_eq!(Ease::EaseInOut.apply(0.5), 0.5);
    assert!((Ease::EaseInOut.apply(0.25) - 0.0625).abs() < 1e-12);
    assert!((Ease::EaseInOut.apply(0.75) - 0.9375).abs() < 1e-12);
}

#[test]
fn bounce_segments_join_continuously() {
    for edge in [1.0 / 2.75, 2.0 / 2.75, 2.5 / 2.75] {
        let below = Ease::Bounce.apply(edge - 1e-9);
        let above = Ease::Bounce.apply(edge + 1e-9);
        assert!((below - above).abs() < 1e-6, "discontinuity at {edge}");
    }
    assert!((Ease::Bounce.apply(1.0 / 2.75) - 1.0).abs() < 1e-12);
}

#[test]
fn back_and_elastic_overshoot() {
    let peak_back = (1..100)
        .map(|i| Ease::Back.apply(f64::from(i) / 100.0))
        .fold(f64::MIN, f64::max);
    assert!(peak_back > 1.0);

    let peak_elastic = (1..100)
        .map(|i| Ease::Elastic.apply(f64::from(i) / 100.0))
        .fold(f64::MIN, f64::max);
    assert!(peak_elastic > 1.0);
}

#[test]
fn ids_round_trip_through_serde() {
    for ease in Ease::ALL {
        assert_eq!(Ease::from_id(ease.id()), Some(ease));
        let json = serde_json::to_string(&ease).unwrap();
        assert_eq!(json, format!("\"{}\"", ease.id()));
    }
    assert_eq!(Ease::from_id("wobble"), None);
}
