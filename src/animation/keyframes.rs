use crate::{
    animation::ease::Ease,
    foundation::core::{Transform2D, Vec2},
    foundation::math::lerp,
};

/// A timestamped snapshot of a layer's transform at normalized time `time`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe {
    /// Normalized time in `[0, 1]`.
    pub time: f64,
    /// Anchor x in logical space.
    pub x: f64,
    /// Anchor y in logical space.
    pub y: f64,
    /// Uniform scale.
    #[serde(default = "one")]
    pub scale: f64,
    /// Opacity in `[0, 1]`.
    #[serde(default = "one")]
    pub opacity: f64,
    /// Rotation in degrees.
    #[serde(default)]
    pub rotation: f64,
}

fn one() -> f64 {
    1.0
}

impl Keyframe {
    /// Keyframe at `time` placed at `(x, y)` with identity scale/opacity/rotation.
    pub fn at(time: f64, x: f64, y: f64) -> Self {
        Self {
            time,
            x,
            y,
            scale: 1.0,
            opacity: 1.0,
            rotation: 0.0,
        }
    }

    /// Set the scale.
    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set the opacity.
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Set the rotation in degrees.
    pub fn rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    fn to_transform(self) -> LayerTransform {
        LayerTransform {
            x: self.x,
            y: self.y,
            scale: self.scale,
            opacity: self.opacity,
            rotation: self.rotation,
        }
    }
}

/// Interpolated transform of one layer at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerTransform {
    /// Anchor x in logical space.
    pub x: f64,
    /// Anchor y in logical space.
    pub y: f64,
    /// Uniform scale.
    pub scale: f64,
    /// Opacity, not clamped (easing may overshoot).
    pub opacity: f64,
    /// Rotation in degrees.
    pub rotation: f64,
}

impl LayerTransform {
    /// The transform used when a layer has no keyframes.
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        scale: 1.0,
        opacity: 1.0,
        rotation: 0.0,
    };

    /// Geometric part of this transform.
    pub fn to_transform2d(self) -> Transform2D {
        Transform2D {
            translate: Vec2::new(self.x, self.y),
            rotation_deg: self.rotation,
            scale: self.scale,
        }
    }
}

impl Default for LayerTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Sample a keyframe track at normalized time `t`.
///
/// The bracket defaults to the first and last keyframes and is replaced by the first
/// consecutive pair containing `t`, so times outside the track clamp to its ends. All five
/// fields share one eased progress value.
pub fn interpolate(keyframes: &[Keyframe], t: f64, ease: Ease) -> LayerTransform {
    let (first, last) = match keyframes {
        [] => return LayerTransform::IDENTITY,
        [only] => return only.to_transform(),
        [first, .., last] => (first, last),
    };

    let (k0, k1) = keyframes
        .windows(2)
        .find(|w| w[0].time <= t && t <= w[1].time)
        .map(|w| (&w[0], &w[1]))
        .unwrap_or((first, last));

    let span = k1.time - k0.time;
    if span == 0.0 {
        return k0.to_transform();
    }

    let local = ((t - k0.time) / span).clamp(0.0, 1.0);
    let e = ease.apply(local);
    LayerTransform {
        x: lerp(k0.x, k1.x, e),
        y: lerp(k0.y, k1.y, e),
        scale: lerp(k0.scale, k1.scale, e),
        opacity: lerp(k0.opacity, k1.opacity, e),
        rotation: lerp(k0.rotation, k1.rotation, e),
    }
}

/// Stable-sort keyframes by time and clamp their times into `[0, 1]`.
///
/// Applied whenever keyframes enter a document so the bracket scan sees an ascending track.
pub fn normalize_keyframes(keyframes: &mut [Keyframe]) {
    for k in keyframes.iter_mut() {
        k.time = if k.time.is_finite() {
            k.time.clamp(0.0, 1.0)
        } else {
            0.0
        };
    }
    keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframes.rs"]
mod tests;
