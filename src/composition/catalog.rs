use std::path::Path;

use crate::{
    animation::ease::Ease,
    animation::keyframes::Keyframe,
    composition::dsl::{LayerBuilder, TemplateBuilder},
    composition::model::{COUNTDOWN_LAYER_NAME, Category, CompositionTemplate, ShapeKind},
    foundation::color::Color,
    foundation::error::{KineoError, KineoResult},
};

const WHITE: Color = Color::WHITE;
const SLATE: Color = Color::rgb(0x1e, 0x29, 0x3b);
const SKY: Color = Color::rgb(0x38, 0xbd, 0xf8);
const AMBER: Color = Color::rgb(0xf5, 0x9e, 0x0b);
const ROSE: Color = Color::rgb(0xf4, 0x3f, 0x5e);
const VIOLET: Color = Color::rgb(0x8b, 0x5c, 0xf6);
const EMERALD: Color = Color::rgb(0x10, 0xb9, 0x81);

/// Immutable registry of composition templates, keyed by id.
///
/// Templates keep insertion order; `by_category` yields them in that order.
#[derive(Clone, Debug, Default)]
pub struct TemplateCatalog {
    templates: Vec<CompositionTemplate>,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    List(Vec<CompositionTemplate>),
    Wrapped { templates: Vec<CompositionTemplate> },
}

impl TemplateCatalog {
    /// Catalog without any templates.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in templates, two per category.
    pub fn builtin() -> KineoResult<Self> {
        Self::from_templates([
            lower_third_slide()?,
            lower_third_stack()?,
            title_center_reveal()?,
            title_particle_glow()?,
            transition_circle_wipe()?,
            transition_bar_sweep()?,
            intro_logo_bounce()?,
            intro_spin_burst()?,
            bumper_follow()?,
            bumper_subscribe()?,
            countdown_ring()?,
            countdown_minimal()?,
        ])
    }

    /// Build a catalog from templates, validating each and rejecting duplicate ids.
    pub fn from_templates(templates: impl IntoIterator<Item = CompositionTemplate>) -> KineoResult<Self> {
        let mut out = Self::empty();
        for tpl in templates {
            out.insert(tpl)?;
        }
        Ok(out)
    }

    /// Parse a JSON catalog: either an array of templates or `{ "templates": [...] }`.
    pub fn from_json_str(s: &str) -> KineoResult<Self> {
        let file: CatalogFile =
            serde_json::from_str(s).map_err(|e| KineoError::serde(format!("catalog: {e}")))?;
        let templates = match file {
            CatalogFile::List(t) | CatalogFile::Wrapped { templates: t } => t,
        };
        Self::from_templates(templates)
    }

    /// Read and parse a catalog JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> KineoResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| {
            KineoError::validation(format!("failed to read catalog '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&s)
    }

    /// Append all templates of `other`. Ids must stay unique.
    pub fn merge(mut self, other: TemplateCatalog) -> KineoResult<Self> {
        for tpl in other.templates {
            self.insert(tpl)?;
        }
        Ok(self)
    }

    fn insert(&mut self, tpl: CompositionTemplate) -> KineoResult<()> {
        tpl.validate()?;
        if self.get(&tpl.id).is_some() {
            return Err(KineoError::validation(format!(
                "duplicate template id '{}'",
                tpl.id
            )));
        }
        self.templates.push(tpl);
        Ok(())
    }

    /// Look up a template by id.
    pub fn get(&self, id: &str) -> Option<&CompositionTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Look up a template by id, failing with a validation error when it is unknown.
    pub fn require(&self, id: &str) -> KineoResult<&CompositionTemplate> {
        self.get(id)
            .ok_or_else(|| KineoError::validation(format!("unknown template id '{id}'")))
    }

    /// Templates of one category.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &CompositionTemplate> {
        self.templates.iter().filter(move |t| t.category == category)
    }

    /// All templates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CompositionTemplate> {
        self.templates.iter()
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the catalog has no templates.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn lower_third_slide() -> KineoResult<CompositionTemplate> {
    TemplateBuilder::new("lower-third-slide", "Clean Slide", Category::LowerThirds)
        .description("Name strap slides in from the left, holds, and fades out")
        .duration_secs(5.0)
        .layer(
            LayerBuilder::shape("Strap", ShapeKind::Rect, 420.0, 72.0, SLATE.with_alpha_factor(0.9))
                .easing(Ease::EaseOut)
                .keys([
                    Keyframe::at(0.0, -220.0, 440.0),
                    Keyframe::at(0.2, 250.0, 440.0),
                    Keyframe::at(0.85, 250.0, 440.0),
                    Keyframe::at(1.0, 250.0, 440.0).opacity(0.0),
                ]),
        )
        .layer(
            LayerBuilder::accent("Rule", 420.0, SKY)
                .thickness(4.0)
                .easing(Ease::EaseOut)
                .keys([
                    Keyframe::at(0.0, 250.0, 478.0).scale(0.0),
                    Keyframe::at(0.25, 250.0, 478.0),
                    Keyframe::at(0.85, 250.0, 478.0),
                    Keyframe::at(1.0, 250.0, 478.0).opacity(0.0),
                ]),
        )
        .layer(
            LayerBuilder::text("Name", "Jordan Rivera", 30.0, WHITE)
                .weight(700)
                .easing(Ease::EaseOut)
                .keys([
                    Keyframe::at(0.1, 230.0, 430.0).opacity(0.0),
                    Keyframe::at(0.3, 250.0, 430.0),
                    Keyframe::at(0.85, 250.0, 430.0),
                    Keyframe::at(1.0, 250.0, 430.0).opacity(0.0),
                ]),
        )
        .layer(
            LayerBuilder::text("Title", "Creative Director", 18.0, SKY)
                .easing(Ease::EaseOut)
                .keys([
                    Keyframe::at(0.15, 230.0, 458.0).opacity(0.0),
                    Keyframe::at(0.35, 250.0, 458.0),
                    Keyframe::at(0.85, 250.0, 458.0),
                    Keyframe::at(1.0, 250.0, 458.0).opacity(0.0),
                ]),
        )
        .build()
}

fn lower_third_stack() -> KineoResult<CompositionTemplate> {
    TemplateBuilder::new("lower-third-stack", "Bold Stack", Category::LowerThirds)
        .description("Two stacked bars pop in one after the other")
        .duration_secs(4.0)
        .layer(
            LayerBuilder::shape("Top Bar", ShapeKind::Rect, 360.0, 52.0, AMBER)
                .easing(Ease::Back)
                .keys([
                    Keyframe::at(0.0, 220.0, 420.0).scale(0.0),
                    Keyframe::at(0.15, 220.0, 420.0),
                    Keyframe::at(0.9, 220.0, 420.0),
                    Keyframe::at(1.0, 220.0, 420.0).scale(0.0),
                ]),
        )
        .layer(
            LayerBuilder::shape("Bottom Bar", ShapeKind::Rect, 280.0, 36.0, SLATE)
                .easing(Ease::Back)
                .keys([
                    Keyframe::at(0.08, 180.0, 466.0).scale(0.0),
                    Keyframe::at(0.23, 180.0, 466.0),
                    Keyframe::at(0.9, 180.0, 466.0),
                    Keyframe::at(1.0, 180.0, 466.0).scale(0.0),
                ]),
        )
        .layer(
            LayerBuilder::text("Headline", "BREAKING NEWS", 28.0, SLATE)
                .weight(900)
                .keys([
                    Keyframe::at(0.12, 220.0, 420.0).opacity(0.0),
                    Keyframe::at(0.2, 220.0, 420.0),
                    Keyframe::at(0.9, 220.0, 420.0),
                    Keyframe::at(0.95, 220.0, 420.0).opacity(0.0),
                ]),
        )
        .layer(
            LayerBuilder::text("Subline", "Live from the studio", 16.0, WHITE).keys([
                Keyframe::at(0.2, 180.0, 466.0).opacity(0.0),
                Keyframe::at(0.3, 180.0, 466.0),
                Keyframe::at(0.9, 180.0, 466.0),
                Keyframe::at(0.95, 180.0, 466.0).opacity(0.0),
            ]),
        )
        .build()
}

fn title_center_reveal() -> KineoResult<CompositionTemplate> {
    TemplateBuilder::new("title-center-reveal", "Center Reveal", Category::TitleCards)
        .description("Big centered title scales up with a growing underline")
        .duration_secs(5.0)
        .layer(
            LayerBuilder::background("Wash", VIOLET.with_alpha_factor(0.25)).keys([
                Keyframe::at(0.0, 480.0, 270.0).opacity(0.0),
                Keyframe::at(0.3, 480.0, 270.0),
            ]),
        )
        .layer(
            LayerBuilder::text("Title", "Your Big Idea", 72.0, WHITE)
                .weight(800)
                .easing(Ease::Back)
                .keys([
                    Keyframe::at(0.0, 480.0, 250.0).scale(0.8).opacity(0.0),
                    Keyframe::at(0.3, 480.0, 250.0),
                ]),
        )
        .layer(
            LayerBuilder::accent("Underline", 320.0, AMBER)
                .thickness(4.0)
                .easing(Ease::EaseInOut)
                .keys([
                    Keyframe::at(0.2, 480.0, 305.0).scale(0.0),
                    Keyframe::at(0.5, 480.0, 305.0),
                ]),
        )
        .layer(
            LayerBuilder::text("Subtitle", "A story in motion", 24.0, SKY)
                .easing(Ease::EaseOut)
                .keys([
                    Keyframe::at(0.35, 480.0, 350.0).opacity(0.0),
                    Keyframe::at(0.6, 480.0, 340.0),
                ]),
        )
        .build()
}

fn title_particle_glow() -> KineoResult<CompositionTemplate> {
    TemplateBuilder::new("title-particle-glow", "Particle Glow", Category::TitleCards)
        .description("Title floats over a drifting particle field")
        .duration_secs(6.0)
        .layer(
            LayerBuilder::particles("Sparkles", 80, 2.5, SKY, 320.0).keys([
                Keyframe::at(0.0, 480.0, 270.0).opacity(0.0),
                Keyframe::at(0.25, 480.0, 270.0),
                Keyframe::at(1.0, 480.0, 270.0).scale(1.15),
            ]),
        )
        .layer(
            LayerBuilder::text("Title", "Shine Bright", 64.0, WHITE)
                .weight(700)
                .easing(Ease::EaseOut)
                .keys([
                    Keyframe::at(0.1, 480.0, 290.0).opacity(0.0),
                    Keyframe::at(0.4, 480.0, 270.0),
                ]),
        )
        .build()
}

fn transition_circle_wipe() -> KineoResult<CompositionTemplate> {
    TemplateBuilder::new("transition-circle-wipe", "Circle Wipe", Category::Transitions)
        .description("A circle grows from the center to cover the frame")
        .duration_secs(2.0)
        .layer(
            LayerBuilder::shape("Wipe", ShapeKind::Circle, 100.0, 100.0, ROSE)
                .easing(Ease::EaseInOut)
                .keys([
                    Keyframe::at(0.0, 480.0, 270.0).scale(0.0),
                    Keyframe::at(1.0, 480.0, 270.0).scale(12.0),
                ]),
        )
        .build()
}

fn transition_bar_sweep() -> KineoResult<CompositionTemplate> {
    let bar = |name: &str, y: f64, delay: f64, color: Color| {
        LayerBuilder::shape(name, ShapeKind::Rect, 1000.0, 180.0, color)
            .easing(Ease::EaseInOut)
            .keys([
                Keyframe::at(delay, -520.0, y),
                Keyframe::at(delay + 0.5, 480.0, y),
                Keyframe::at(1.0, 480.0, y),
            ])
    };
    TemplateBuilder::new("transition-bar-sweep", "Bar Sweep", Category::Transitions)
        .description("Three staggered bars sweep across the frame")
        .duration_secs(2.0)
        .layer(bar("Bar 1", 90.0, 0.0, SKY))
        .layer(bar("Bar 2", 270.0, 0.1, VIOLET))
        .layer(bar("Bar 3", 450.0, 0.2, ROSE))
        .build()
}

fn intro_logo_bounce() -> KineoResult<CompositionTemplate> {
    TemplateBuilder::new("intro-logo-bounce", "Logo Bounce", Category::Intros)
        .description("A diamond mark drops in with a bounce, followed by the brand name")
        .duration_secs(4.0)
        .layer(
            LayerBuilder::shape("Mark", ShapeKind::Diamond, 120.0, 120.0, AMBER)
                .stroke(WHITE, 4.0)
                .easing(Ease::Bounce)
                .keys([
                    Keyframe::at(0.0, 480.0, -80.0),
                    Keyframe::at(0.4, 480.0, 220.0),
                ]),
        )
        .layer(
            LayerBuilder::text("Brand", "ACME STUDIO", 44.0, WHITE)
                .weight(800)
                .easing(Ease::EaseOut)
                .keys([
                    Keyframe::at(0.4, 480.0, 360.0).opacity(0.0),
                    Keyframe::at(0.6, 480.0, 340.0),
                ]),
        )
        .build()
}

fn intro_spin_burst() -> KineoResult<CompositionTemplate> {
    TemplateBuilder::new("intro-spin-burst", "Spin Burst", Category::Intros)
        .description("A spinning triangle releases a burst of particles")
        .duration_secs(4.0)
        .layer(
            LayerBuilder::particles("Burst", 120, 3.0, EMERALD, 260.0)
                .easing(Ease::EaseOut)
                .keys([
                    Keyframe::at(0.3, 480.0, 270.0).scale(0.1).opacity(0.0),
                    Keyframe::at(0.7, 480.0, 270.0),
                    Keyframe::at(1.0, 480.0, 270.0).scale(1.3).opacity(0.0),
                ]),
        )
        .layer(
            LayerBuilder::shape("Spinner", ShapeKind::Triangle, 140.0, 120.0, EMERALD)
                .easing(Ease::Elastic)
                .keys([
                    Keyframe::at(0.0, 480.0, 270.0).scale(0.0).rotation(-180.0),
                    Keyframe::at(0.4, 480.0, 270.0),
                ]),
        )
        .layer(
            LayerBuilder::text("Brand", "LAUNCH", 40.0, WHITE)
                .weight(700)
                .keys([
                    Keyframe::at(0.5, 480.0, 400.0).opacity(0.0),
                    Keyframe::at(0.7, 480.0, 390.0),
                ]),
        )
        .build()
}

fn bumper_follow() -> KineoResult<CompositionTemplate> {
    TemplateBuilder::new("bumper-follow", "Follow For More", Category::SocialBumpers)
        .description("Handle and call to action with a pulsing ring")
        .duration_secs(3.0)
        .layer(
            LayerBuilder::shape("Ring", ShapeKind::Circle, 160.0, 160.0, Color::rgba(0, 0, 0, 0))
                .stroke(ROSE, 6.0)
                .easing(Ease::EaseInOut)
                .keys([
                    Keyframe::at(0.0, 480.0, 220.0).scale(0.6).opacity(0.0),
                    Keyframe::at(0.3, 480.0, 220.0),
                    Keyframe::at(0.6, 480.0, 220.0).scale(1.1),
                    Keyframe::at(1.0, 480.0, 220.0),
                ]),
        )
        .layer(
            LayerBuilder::text("Handle", "@kineo", 36.0, WHITE)
                .weight(700)
                .keys([
                    Keyframe::at(0.1, 480.0, 220.0).opacity(0.0),
                    Keyframe::at(0.3, 480.0, 220.0),
                ]),
        )
        .layer(
            LayerBuilder::text("CTA", "Follow for more", 26.0, ROSE)
                .easing(Ease::EaseOut)
                .keys([
                    Keyframe::at(0.3, 480.0, 380.0).opacity(0.0),
                    Keyframe::at(0.5, 480.0, 360.0),
                ]),
        )
        .build()
}

fn bumper_subscribe() -> KineoResult<CompositionTemplate> {
    TemplateBuilder::new("bumper-subscribe", "Subscribe Button", Category::SocialBumpers)
        .description("Elastic subscribe button with a click line")
        .duration_secs(3.0)
        .layer(
            LayerBuilder::shape("Button", ShapeKind::Rect, 280.0, 76.0, ROSE)
                .easing(Ease::Elastic)
                .keys([
                    Keyframe::at(0.0, 480.0, 270.0).scale(0.0),
                    Keyframe::at(0.4, 480.0, 270.0),
                ]),
        )
        .layer(
            LayerBuilder::text("Label", "SUBSCRIBE", 30.0, WHITE)
                .weight(800)
                .easing(Ease::Elastic)
                .keys([
                    Keyframe::at(0.0, 480.0, 270.0).scale(0.0),
                    Keyframe::at(0.4, 480.0, 270.0),
                ]),
        )
        .layer(
            LayerBuilder::shape("Click", ShapeKind::Line, 120.0, 0.0, WHITE)
                .stroke(WHITE, 3.0)
                .easing(Ease::EaseOut)
                .keys([
                    Keyframe::at(0.5, 480.0, 330.0).scale(0.0),
                    Keyframe::at(0.7, 480.0, 330.0),
                    Keyframe::at(0.9, 480.0, 330.0).opacity(0.0),
                ]),
        )
        .build()
}

fn countdown_ring() -> KineoResult<CompositionTemplate> {
    TemplateBuilder::new("countdown-ring", "Classic Ring", Category::Countdowns)
        .description("Seconds tick down inside an outlined ring")
        .duration_secs(10.0)
        .layer(
            LayerBuilder::shape("Ring", ShapeKind::Circle, 240.0, 240.0, SLATE.with_alpha_factor(0.6))
                .stroke(SKY, 8.0)
                .keys([Keyframe::at(0.0, 480.0, 260.0)]),
        )
        .layer(
            LayerBuilder::text(COUNTDOWN_LAYER_NAME, "10", 110.0, WHITE)
                .weight(800)
                .keys([Keyframe::at(0.0, 480.0, 260.0)]),
        )
        .layer(
            LayerBuilder::text("Label", "STARTING SOON", 22.0, SKY)
                .weight(600)
                .keys([Keyframe::at(0.0, 480.0, 430.0)]),
        )
        .build()
}

fn countdown_minimal() -> KineoResult<CompositionTemplate> {
    TemplateBuilder::new("countdown-minimal", "Minimal", Category::Countdowns)
        .description("Large number over a thin rule")
        .duration_secs(5.0)
        .layer(
            LayerBuilder::text(COUNTDOWN_LAYER_NAME, "5", 140.0, WHITE)
                .weight(300)
                .keys([Keyframe::at(0.0, 480.0, 250.0)]),
        )
        .layer(
            LayerBuilder::accent("Rule", 200.0, AMBER)
                .thickness(2.0)
                .easing(Ease::Linear)
                .keys([
                    Keyframe::at(0.0, 480.0, 350.0),
                    Keyframe::at(1.0, 480.0, 350.0).scale(0.0),
                ]),
        )
        .build()
}

#[cfg(test)]
#[path = "../../tests/unit/composition/catalog.rs"]
mod tests;
