use std::time::Instant;

use crate::{
    composition::settings::MAX_DURATION_SECS,
    foundation::error::{KineoError, KineoResult},
};

/// Scrub step applied by the arrow keys, in normalized time.
pub const NUDGE_STEP: f64 = 0.02;

/// Handle to one pending per-frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub u64);

/// The host's per-frame callback primitive (an animation-frame or timer facility).
pub trait FrameRequester {
    /// Ask for one callback on the next display frame.
    fn request_frame(&mut self) -> FrameRequest;
    /// Cancel a callback that has not fired yet.
    fn cancel_frame(&mut self, request: FrameRequest);
    /// Called when `request` has fired and been handled. Hosts whose callbacks are one-shot
    /// need nothing here.
    fn frame_fired(&mut self, _request: FrameRequest) {}
}

/// In-process requester that only records requests; the caller drives `tick` itself.
#[derive(Debug, Default)]
pub struct ManualFrames {
    next: u64,
    outstanding: Vec<FrameRequest>,
    cancelled: u64,
}

impl ManualFrames {
    /// Create an empty requester.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests issued and not yet fired or cancelled.
    pub fn outstanding(&self) -> &[FrameRequest] {
        &self.outstanding
    }

    /// Total number of requests issued.
    pub fn requested(&self) -> u64 {
        self.next
    }

    /// Total number of cancellations received.
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }

    /// Mark a request as fired.
    pub fn fire(&mut self, request: FrameRequest) -> bool {
        let before = self.outstanding.len();
        self.outstanding.retain(|r| *r != request);
        before != self.outstanding.len()
    }
}

impl FrameRequester for ManualFrames {
    fn request_frame(&mut self) -> FrameRequest {
        self.next += 1;
        let r = FrameRequest(self.next);
        self.outstanding.push(r);
        r
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if self.fire(request) {
            self.cancelled += 1;
        }
    }

    fn frame_fired(&mut self, request: FrameRequest) {
        self.fire(request);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Scheduler state.
pub enum PlaybackState {
    /// Time only changes through scrubbing.
    Paused,
    /// Time follows the wall clock and loops.
    Playing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Keyboard shortcuts understood by the scheduler.
pub enum PlaybackKey {
    /// Toggle play/pause.
    Space,
    /// Nudge back by [`NUDGE_STEP`].
    ArrowLeft,
    /// Nudge forward by [`NUDGE_STEP`].
    ArrowRight,
    /// Jump to `t = 0`.
    Home,
    /// Jump to `t = 1`.
    End,
}

impl PlaybackKey {
    /// Map a DOM-style key name (`" "`, `"Space"`, `"ArrowLeft"`, ...).
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            " " | "Space" | "space" => Some(Self::Space),
            "ArrowLeft" | "left" => Some(Self::ArrowLeft),
            "ArrowRight" | "right" => Some(Self::ArrowRight),
            "Home" | "home" => Some(Self::Home),
            "End" | "end" => Some(Self::End),
            _ => None,
        }
    }
}

/// Wall-clock playback of a looping composition.
///
/// While playing, `elapsed = anchor_elapsed + (now - anchor)` and `t = elapsed / duration`.
/// Overflow past `t = 1` wraps and re-anchors at the tick instant.
#[derive(Debug)]
pub struct Playback<R: FrameRequester> {
    requester: R,
    state: PlaybackState,
    t: f64,
    duration_secs: f64,
    anchor: Option<Instant>,
    anchor_elapsed: f64,
    pending: Option<FrameRequest>,
}

fn check_duration(secs: f64) -> KineoResult<()> {
    if !secs.is_finite() || secs <= 0.0 || secs > MAX_DURATION_SECS {
        return Err(KineoError::validation(format!(
            "playback duration must be in (0, {MAX_DURATION_SECS}], got {secs}"
        )));
    }
    Ok(())
}

impl<R: FrameRequester> Playback<R> {
    /// Paused at `t = 0`.
    pub fn new(requester: R, duration_secs: f64) -> KineoResult<Self> {
        check_duration(duration_secs)?;
        Ok(Self {
            requester,
            state: PlaybackState::Paused,
            t: 0.0,
            duration_secs,
            anchor: None,
            anchor_elapsed: 0.0,
            pending: None,
        })
    }

    /// Current state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether the clock is running.
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Displayed normalized time.
    pub fn t(&self) -> f64 {
        self.t
    }

    /// Composition duration.
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// The pending per-frame callback, if any.
    pub fn pending(&self) -> Option<FrameRequest> {
        self.pending
    }

    /// Borrow the host requester.
    pub fn requester(&self) -> &R {
        &self.requester
    }

    /// Mutably borrow the host requester.
    pub fn requester_mut(&mut self) -> &mut R {
        &mut self.requester
    }

    fn anchor_at(&mut self, now: Instant) {
        self.anchor = Some(now);
        self.anchor_elapsed = self.t * self.duration_secs;
    }

    fn cancel_pending(&mut self) {
        if let Some(req) = self.pending.take() {
            self.requester.cancel_frame(req);
        }
    }

    /// Start the clock so that the displayed time continues from `t`.
    pub fn play(&mut self, now: Instant) {
        if self.is_playing() {
            return;
        }
        self.anchor_at(now);
        self.state = PlaybackState::Playing;
        self.pending = Some(self.requester.request_frame());
        tracing::debug!(t = self.t, "playback started");
    }

    /// Stop the clock and cancel the pending callback.
    pub fn pause(&mut self) {
        self.cancel_pending();
        if self.is_playing() {
            tracing::debug!(t = self.t, "playback paused");
        }
        self.state = PlaybackState::Paused;
        self.anchor = None;
    }

    /// Play when paused, pause when playing.
    pub fn toggle(&mut self, now: Instant) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play(now);
        }
    }

    /// Per-frame callback. Returns the new `t` while playing, `None` otherwise.
    pub fn tick(&mut self, now: Instant) -> Option<f64> {
        if !self.is_playing() {
            return None;
        }
        let anchor = self.anchor?;
        if let Some(req) = self.pending.take() {
            self.requester.frame_fired(req);
        }
        let elapsed = self.anchor_elapsed + now.saturating_duration_since(anchor).as_secs_f64();
        let mut t = elapsed / self.duration_secs;
        if t >= 1.0 {
            t = t.fract();
            self.t = t;
            self.anchor_at(now);
            tracing::trace!(t, "playback wrapped");
        } else {
            self.t = t;
        }
        self.pending = Some(self.requester.request_frame());
        Some(self.t)
    }

    /// Pause and display `t` (clamped to `[0, 1]`).
    pub fn seek(&mut self, t: f64) {
        self.pause();
        self.t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    }

    /// Pause and move forward by [`NUDGE_STEP`].
    pub fn step_forward(&mut self) {
        self.seek(self.t + NUDGE_STEP);
    }

    /// Pause and move back by [`NUDGE_STEP`].
    pub fn step_back(&mut self) {
        self.seek(self.t - NUDGE_STEP);
    }

    /// Pause at `t = 0`.
    pub fn jump_to_start(&mut self) {
        self.seek(0.0);
    }

    /// Pause at `t = 1`.
    pub fn jump_to_end(&mut self) {
        self.seek(1.0);
    }

    /// Change the duration, keeping the displayed `t`.
    pub fn set_duration(&mut self, secs: f64, now: Instant) -> KineoResult<()> {
        check_duration(secs)?;
        self.duration_secs = secs;
        if self.is_playing() {
            self.anchor_at(now);
        }
        Ok(())
    }

    /// Dispatch a keyboard shortcut.
    pub fn handle_key(&mut self, key: PlaybackKey, now: Instant) {
        match key {
            PlaybackKey::Space => self.toggle(now),
            PlaybackKey::ArrowLeft => self.step_back(),
            PlaybackKey::ArrowRight => self.step_forward(),
            PlaybackKey::Home => self.jump_to_start(),
            PlaybackKey::End => self.jump_to_end(),
        }
    }

    /// Cancel any pending callback; called when the host view goes away.
    pub fn shutdown(&mut self) {
        self.pause();
    }
}

impl<R: FrameRequester> Drop for Playback<R> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/scheduler.rs"]
mod tests;
