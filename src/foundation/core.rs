use crate::foundation::error::{KineoError, KineoResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Width of the logical coordinate space every layer is authored in.
pub const LOGICAL_WIDTH: f64 = 960.0;
/// Height of the logical coordinate space every layer is authored in.
pub const LOGICAL_HEIGHT: f64 = 540.0;

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> KineoResult<Self> {
        if den == 0 {
            return Err(KineoError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(KineoError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Convert seconds to frame count using floor semantics.
    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64()).floor().max(0.0) as u64
    }
}

/// Output surface dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Build a canvas, rejecting zero-sized surfaces.
    pub fn new(width: u32, height: u32) -> KineoResult<Self> {
        if width == 0 || height == 0 {
            return Err(KineoError::validation(format!(
                "canvas must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Maps the 960x540 logical space onto this canvas.
    ///
    /// The logical box is scaled uniformly to fit and centered; the remaining bands stay
    /// covered by the background fill only.
    pub fn logical_to_device(self) -> Affine {
        let w = f64::from(self.width);
        let h = f64::from(self.height);
        let s = (w / LOGICAL_WIDTH).min(h / LOGICAL_HEIGHT);
        let ox = (w - LOGICAL_WIDTH * s) * 0.5;
        let oy = (h - LOGICAL_HEIGHT * s) * 0.5;
        Affine::translate(Vec2::new(ox, oy)) * Affine::scale(s)
    }

    /// Number of bytes in a tightly packed RGBA8 buffer of this size.
    pub fn rgba_len(self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }
}

/// Instantaneous transform of a layer: translate, then rotate, then scale.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform2D {
    /// Anchor position in logical space.
    pub translate: Vec2,
    /// Rotation around the anchor, in degrees.
    pub rotation_deg: f64,
    /// Uniform scale around the anchor.
    pub scale: f64,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            rotation_deg: 0.0,
            scale: 1.0,
        }
    }
}

impl Transform2D {
    /// Compose into an affine acting on layer-local geometry centered at the origin.
    pub fn to_affine(self) -> Affine {
        // T(translate) * R(rot) * S(scale)
        Affine::translate(self.translate)
            * Affine::rotate(self.rotation_deg.to_radians())
            * Affine::scale(self.scale)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
