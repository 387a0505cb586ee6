use super::*;

#[test]
fn canvas_sizes_follow_ratio_and_tier() {
    let mut s = ProjectSettings::default();
    assert_eq!(s.canvas(), Canvas { width: 1280, height: 720 });

    s.resolution = Resolution::FullHd1080;
    assert_eq!(s.canvas(), Canvas { width: 1920, height: 1080 });

    s.aspect_ratio = AspectRatio::Portrait9x16;
    assert_eq!(s.canvas(), Canvas { width: 1080, height: 1920 });

    s.aspect_ratio = AspectRatio::Square1x1;
    assert_eq!(s.canvas(), Canvas { width: 1080, height: 1080 });

    s.aspect_ratio = AspectRatio::Portrait4x5;
    assert_eq!(s.canvas(), Canvas { width: 1080, height: 1350 });

    s.aspect_ratio = AspectRatio::Landscape16x9;
    s.resolution = Resolution::Uhd2160;
    assert_eq!(s.canvas(), Canvas { width: 3840, height: 2160 });
}

#[test]
fn frame_rate_accepts_only_supported_values() {
    assert_eq!(FrameRate::try_from(60).unwrap(), FrameRate::Fps60);
    assert!(FrameRate::try_from(25).is_err());
    let fr: FrameRate = serde_json::from_str("24").unwrap();
    assert_eq!(fr, FrameRate::Fps24);
    assert!(serde_json::from_str::<FrameRate>("50").is_err());
    assert_eq!(serde_json::to_string(&FrameRate::Fps30).unwrap(), "30");
}

#[test]
fn partial_json_fills_defaults() {
    let s = ProjectSettings::from_json_str(
        r##"{
            "aspect_ratio": "1:1",
            "fps": 60,
            "background": { "type": "solid", "color": "#112233" },
            "category": "countdowns"
        }"##,
    )
    .unwrap();
    assert_eq!(s.aspect_ratio, AspectRatio::Square1x1);
    assert_eq!(s.fps, FrameRate::Fps60);
    assert_eq!(
        s.background,
        BackgroundFill::Solid {
            color: Color::rgb(0x11, 0x22, 0x33)
        }
    );
    assert_eq!(s.category, Category::Countdowns);
    assert_eq!(s.duration_secs, 5.0);
    assert_eq!(s.resolution, Resolution::Hd720);
}

#[test]
fn invalid_duration_is_rejected() {
    for d in [0.0, -1.0, f64::INFINITY, MAX_DURATION_SECS + 1.0] {
        let s = ProjectSettings {
            duration_secs: d,
            ..ProjectSettings::default()
        };
        assert!(s.validate().is_err(), "{d} should be rejected");
    }
    assert!(ProjectSettings::from_json_str(r#"{"duration_secs": 0}"#).is_err());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = ProjectSettings::from_json_str("{").unwrap_err();
    assert!(matches!(err, KineoError::Serde(_)));
}

#[test]
fn missing_file_is_reported_with_path() {
    let err = ProjectSettings::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.json"));
}
