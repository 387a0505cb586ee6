use std::time::Duration;

use super::*;

fn playback(duration: f64) -> Playback<ManualFrames> {
    Playback::new(ManualFrames::new(), duration).unwrap()
}

#[test]
fn play_requests_and_pause_cancels() {
    let mut p = playback(4.0);
    let now = Instant::now();
    p.play(now);
    assert!(p.is_playing());
    assert_eq!(p.requester().outstanding().len(), 1);

    p.pause();
    assert_eq!(p.state(), PlaybackState::Paused);
    assert!(p.requester().outstanding().is_empty());
    assert_eq!(p.requester().cancelled(), 1);
    assert_eq!(p.pending(), None);
}

#[test]
fn tick_follows_wall_clock() {
    let mut p = playback(4.0);
    let start = Instant::now();
    p.play(start);
    let t = p.tick(start + Duration::from_secs(1)).unwrap();
    assert!((t - 0.25).abs() < 1e-9);
    assert_eq!(p.requester().requested(), 2);
}

#[test]
fn ticks_are_ignored_while_paused() {
    let mut p = playback(4.0);
    assert_eq!(p.tick(Instant::now()), None);
    assert_eq!(p.requester().requested(), 0);
}

#[test]
fn overflow_wraps_and_reanchors() {
    let mut p = playback(4.0);
    let start = Instant::now();
    p.play(start);
    let wrapped = start + Duration::from_millis(4100);
    let t = p.tick(wrapped).unwrap();
    assert!((t - 0.025).abs() < 1e-9, "t = {t}");
    let t = p.tick(wrapped + Duration::from_millis(100)).unwrap();
    assert!((t - 0.05).abs() < 1e-9, "t = {t}");
}

#[test]
fn resume_continues_from_displayed_time() {
    let mut p = playback(2.0);
    p.seek(0.5);
    let now = Instant::now();
    p.play(now);
    let t = p.tick(now + Duration::from_millis(500)).unwrap();
    assert!((t - 0.75).abs() < 1e-9);
}

#[test]
fn keys_scrub_and_toggle() {
    let mut p = playback(4.0);
    let now = Instant::now();
    p.handle_key(PlaybackKey::Space, now);
    assert!(p.is_playing());
    p.handle_key(PlaybackKey::ArrowRight, now);
    assert!(!p.is_playing());
    assert!((p.t() - NUDGE_STEP).abs() < 1e-12);
    p.handle_key(PlaybackKey::ArrowLeft, now);
    p.handle_key(PlaybackKey::ArrowLeft, now);
    assert_eq!(p.t(), 0.0);
    p.handle_key(PlaybackKey::End, now);
    assert_eq!(p.t(), 1.0);
    p.handle_key(PlaybackKey::Home, now);
    assert_eq!(p.t(), 0.0);

    assert_eq!(PlaybackKey::from_key_name(" "), Some(PlaybackKey::Space));
    assert_eq!(PlaybackKey::from_key_name("End"), Some(PlaybackKey::End));
    assert_eq!(PlaybackKey::from_key_name("x"), None);
}

#[test]
fn set_duration_keeps_displayed_t() {
    let mut p = playback(4.0);
    let start = Instant::now();
    p.play(start);
    let mid = start + Duration::from_secs(2);
    p.tick(mid);
    p.set_duration(8.0, mid).unwrap();
    assert_eq!(p.t(), 0.5);
    let t = p.tick(mid + Duration::from_secs(2)).unwrap();
    assert!((t - 0.75).abs() < 1e-9);
    assert!(p.set_duration(0.0, mid).is_err());
}

#[test]
fn shutdown_and_drop_cancel_pending() {
    let mut p = playback(1.0);
    p.play(Instant::now());
    p.shutdown();
    assert!(p.requester().outstanding().is_empty());
    assert!(Playback::new(ManualFrames::new(), f64::NAN).is_err());
}

#[test]
fn ticks_keep_a_single_outstanding_request() {
    let mut p = playback(4.0);
    let start = Instant::now();
    p.play(start);
    for i in 1..=5 {
        p.tick(start + Duration::from_millis(16 * i)).unwrap();
        assert_eq!(p.requester().outstanding(), &[p.pending().unwrap()]);
    }
    assert_eq!(p.requester().requested(), 6);

    p.pause();
    assert!(p.requester().outstanding().is_empty());
    assert_eq!(p.requester().cancelled(), 1);
}
