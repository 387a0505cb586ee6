/// Easing functions used to shape progress between two keyframes.
///
/// Every variant maps `0 -> 0` and `1 -> 1` exactly; `back` and `elastic` overshoot in between.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ease {
    /// Identity mapping.
    #[default]
    Linear,
    /// Cubic ease-in.
    EaseIn,
    /// Cubic ease-out.
    EaseOut,
    /// Cubic ease-in/out, mirrored at the midpoint.
    EaseInOut,
    /// Four-segment piecewise quadratic bounce toward the end.
    Bounce,
    /// Exponentially decayed sine settling on the end value.
    Elastic,
    /// Cubic overshoot past the end value before settling.
    Back,
}

const BOUNCE_N1: f64 = 7.5625;
const BOUNCE_D1: f64 = 2.75;
const BACK_C1: f64 = 1.70158;
const BACK_C3: f64 = BACK_C1 + 1.0;
const ELASTIC_C4: f64 = std::f64::consts::TAU / 3.0;

impl Ease {
    /// All variants in catalog order.
    pub const ALL: [Ease; 7] = [
        Ease::Linear,
        Ease::EaseIn,
        Ease::EaseOut,
        Ease::EaseInOut,
        Ease::Bounce,
        Ease::Elastic,
        Ease::Back,
    ];

    /// Stable string id (same as the serialized form).
    pub fn id(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseIn => "ease-in",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
            Self::Bounce => "bounce",
            Self::Elastic => "elastic",
            Self::Back => "back",
        }
    }

    /// Look up a variant by its string id.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.id() == id)
    }

    /// Apply this easing function to normalized progress `t`, clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        // The piecewise forms only reach the endpoints up to rounding.
        if t == 0.0 {
            return 0.0;
        }
        if t == 1.0 {
            return 1.0;
        }
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t * t,
            Self::EaseOut => 1.0 - (1.0 - t).powi(3),
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::Bounce => bounce_out(t),
            Self::Elastic => 2f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * ELASTIC_C4).sin() + 1.0,
            Self::Back => 1.0 + BACK_C3 * (t - 1.0).powi(3) + BACK_C1 * (t - 1.0).powi(2),
        }
    }
}

fn bounce_out(t: f64) -> f64 {
    if t < 1.0 / BOUNCE_D1 {
        BOUNCE_N1 * t * t
    } else if t < 2.0 / BOUNCE_D1 {
        let t = t - 1.5 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.75
    } else if t < 2.5 / BOUNCE_D1 {
        let t = t - 2.25 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / BOUNCE_D1;
        BOUNCE_N1 * t * t + 0.984375
    }
}

impl std::fmt::Display for Ease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
