use crate::{
    animation::ease::Ease,
    animation::keyframes::Keyframe,
    foundation::color::Color,
    foundation::error::{KineoError, KineoResult},
    composition::settings::MAX_DURATION_SECS,
};

/// Name of the text layer whose content is derived from time in countdown templates.
pub const COUNTDOWN_LAYER_NAME: &str = "Countdown Number";

/// Upper bound on particles per layer.
pub const MAX_PARTICLES: u32 = 2_000;

/// Template catalog category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Name/title straps in the lower third of the frame.
    LowerThirds,
    /// Full-frame titles.
    TitleCards,
    /// Wipes and reveals between scenes.
    Transitions,
    /// Opening logo/brand sequences.
    Intros,
    /// Short branded social clips.
    SocialBumpers,
    /// Numeric countdowns.
    Countdowns,
}

impl Category {
    /// All categories in catalog order.
    pub const ALL: [Category; 6] = [
        Category::LowerThirds,
        Category::TitleCards,
        Category::Transitions,
        Category::Intros,
        Category::SocialBumpers,
        Category::Countdowns,
    ];

    /// Stable string id (same as the serialized form).
    pub fn id(self) -> &'static str {
        match self {
            Self::LowerThirds => "lower-thirds",
            Self::TitleCards => "title-cards",
            Self::Transitions => "transitions",
            Self::Intros => "intros",
            Self::SocialBumpers => "social-bumpers",
            Self::Countdowns => "countdowns",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Document-unique layer identity.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct LayerId(pub u64);

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "layer-{}", self.0)
    }
}

/// One independently animated visual element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Layer {
    /// Identity; reassigned when the layer enters a document.
    #[serde(default)]
    pub id: LayerId,
    /// Display name.
    pub name: String,
    /// Hidden layers are skipped by the renderer.
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Easing applied between every pair of keyframes.
    #[serde(default)]
    pub easing: Ease,
    /// Keyframe track, ascending by time once inside a document.
    #[serde(default)]
    pub keyframes: Vec<Keyframe>,
    /// Kind-specific parameters.
    #[serde(flatten)]
    pub kind: LayerKind,
}

fn default_visible() -> bool {
    true
}

/// Kind-specific layer parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayerKind {
    /// A run of glyphs centered on the anchor.
    Text(TextLayer),
    /// Filled (and optionally stroked) geometry.
    Shape(ShapeLayer),
    /// Seeded particle cloud.
    Particle(ParticleLayer),
    /// Thin horizontal rule.
    Accent(AccentLayer),
    /// Full-bleed translucent wash.
    Background(BackgroundLayer),
    /// A kind this engine does not know; never drawn.
    #[serde(other)]
    Unsupported,
}

/// Text layer parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextLayer {
    /// Displayed string.
    pub content: String,
    /// Font size in logical pixels.
    pub size: f64,
    /// CSS-style weight (100..=900).
    #[serde(default = "default_weight")]
    pub weight: u16,
    /// Font family name; resolved against the fonts registered with the backend.
    #[serde(default = "default_family")]
    pub family: String,
    /// Fill color.
    pub color: Color,
}

fn default_weight() -> u16 {
    400
}

fn default_family() -> String {
    "sans-serif".to_owned()
}

/// Geometry primitive of a shape layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    /// Axis-aligned rectangle.
    Rect,
    /// Ellipse inscribed in the width/height box.
    Circle,
    /// Isosceles triangle pointing up.
    Triangle,
    /// Rhombus touching the box edge midpoints.
    Diamond,
    /// Horizontal segment of the box width; drawn with the stroke (or the fill color).
    Line,
}

/// Outline parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stroke {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in logical pixels.
    pub width: f64,
}

/// Shape layer parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShapeLayer {
    /// Primitive.
    pub shape: ShapeKind,
    /// Box width in logical pixels.
    pub width: f64,
    /// Box height in logical pixels.
    pub height: f64,
    /// Fill color.
    pub fill: Color,
    /// Optional outline.
    #[serde(default)]
    pub stroke: Option<Stroke>,
}

/// Particle layer parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParticleLayer {
    /// Number of particles.
    pub count: u32,
    /// Core radius of each particle in logical pixels.
    pub particle_size: f64,
    /// Particle color.
    pub color: Color,
    /// Maximum rest distance from the anchor.
    pub spread: f64,
    /// Generator seed; assigned once from the layer id when the layer enters a document.
    #[serde(default)]
    pub seed: u64,
}

/// Accent rule parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AccentLayer {
    /// Rule length in logical pixels.
    pub width: f64,
    /// Rule thickness in logical pixels.
    #[serde(default = "default_thickness")]
    pub thickness: f64,
    /// Rule color.
    pub color: Color,
}

fn default_thickness() -> f64 {
    3.0
}

/// Background wash parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BackgroundLayer {
    /// Wash color; its alpha is multiplied with the keyframed opacity.
    pub color: Color,
}

impl LayerKind {
    /// Lowercase kind tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Shape(_) => "shape",
            Self::Particle(_) => "particle",
            Self::Accent(_) => "accent",
            Self::Background(_) => "background",
            Self::Unsupported => "unsupported",
        }
    }
}

impl Layer {
    /// Build a visible, linearly eased layer without keyframes.
    pub fn new(name: impl Into<String>, kind: LayerKind) -> Self {
        Self {
            id: LayerId::default(),
            name: name.into(),
            visible: true,
            easing: Ease::Linear,
            keyframes: Vec::new(),
            kind,
        }
    }

    /// Validate numeric parameters.
    pub fn validate(&self) -> KineoResult<()> {
        let bad = |what: &str| {
            Err(KineoError::validation(format!(
                "layer '{}' ({}): {what}",
                self.name,
                self.kind.name()
            )))
        };
        for k in &self.keyframes {
            if ![k.time, k.x, k.y, k.scale, k.opacity, k.rotation]
                .iter()
                .all(|v| v.is_finite())
            {
                return bad("keyframe values must be finite");
            }
        }
        match &self.kind {
            LayerKind::Text(t) => {
                if !t.size.is_finite() || t.size <= 0.0 {
                    return bad("text size must be finite and > 0");
                }
                if !(1..=1000).contains(&t.weight) {
                    return bad("text weight must be in 1..=1000");
                }
            }
            LayerKind::Shape(s) => {
                if !(s.width.is_finite() && s.height.is_finite()) || s.width < 0.0 || s.height < 0.0
                {
                    return bad("shape width/height must be finite and >= 0");
                }
                if let Some(stroke) = s.stroke
                    && (!stroke.width.is_finite() || stroke.width < 0.0)
                {
                    return bad("stroke width must be finite and >= 0");
                }
            }
            LayerKind::Particle(p) => {
                if p.count > MAX_PARTICLES {
                    return bad("particle count exceeds the per-layer limit");
                }
                if !p.particle_size.is_finite() || p.particle_size < 0.0 {
                    return bad("particle size must be finite and >= 0");
                }
                if !p.spread.is_finite() || p.spread < 0.0 {
                    return bad("particle spread must be finite and >= 0");
                }
            }
            LayerKind::Accent(a) => {
                if !(a.width.is_finite() && a.thickness.is_finite())
                    || a.width < 0.0
                    || a.thickness < 0.0
                {
                    return bad("accent width/thickness must be finite and >= 0");
                }
            }
            LayerKind::Background(_) | LayerKind::Unsupported => {}
        }
        Ok(())
    }
}

/// Immutable blueprint for a motion graphic.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CompositionTemplate {
    /// Catalog-unique id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Catalog category.
    pub category: Category,
    /// One-line description.
    #[serde(default)]
    pub description: String,
    /// Default duration in seconds.
    pub duration_secs: f64,
    /// Layers back to front.
    pub layers: Vec<Layer>,
}

impl CompositionTemplate {
    /// Validate the template and each of its layers.
    pub fn validate(&self) -> KineoResult<()> {
        if self.id.trim().is_empty() {
            return Err(KineoError::validation("template id must be non-empty"));
        }
        if !self.duration_secs.is_finite()
            || self.duration_secs <= 0.0
            || self.duration_secs > MAX_DURATION_SECS
        {
            return Err(KineoError::validation(format!(
                "template '{}': duration_secs must be in (0, {MAX_DURATION_SECS}]",
                self.id
            )));
        }
        for layer in &self.layers {
            layer.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
