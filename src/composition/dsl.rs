use crate::{
    animation::ease::Ease,
    animation::keyframes::Keyframe,
    composition::model::{
        AccentLayer, BackgroundLayer, Category, CompositionTemplate, Layer, LayerKind,
        ParticleLayer, ShapeKind, ShapeLayer, Stroke, TextLayer,
    },
    foundation::color::Color,
    foundation::error::KineoResult,
};

/// Builder for [`Layer`](crate::Layer) values.
///
/// Kind-specific setters are ignored when the layer being built is of another kind.
pub struct LayerBuilder {
    layer: Layer,
}

impl LayerBuilder {
    fn with_kind(name: impl Into<String>, kind: LayerKind) -> Self {
        Self {
            layer: Layer::new(name, kind),
        }
    }

    /// Start a text layer (weight 400, family `sans-serif`).
    pub fn text(name: impl Into<String>, content: impl Into<String>, size: f64, color: Color) -> Self {
        Self::with_kind(
            name,
            LayerKind::Text(TextLayer {
                content: content.into(),
                size,
                weight: 400,
                family: "sans-serif".to_owned(),
                color,
            }),
        )
    }

    /// Start a shape layer without a stroke.
    pub fn shape(name: impl Into<String>, shape: ShapeKind, width: f64, height: f64, fill: Color) -> Self {
        Self::with_kind(
            name,
            LayerKind::Shape(ShapeLayer {
                shape,
                width,
                height,
                fill,
                stroke: None,
            }),
        )
    }

    /// Start a particle layer; its seed is assigned when it enters a document.
    pub fn particles(
        name: impl Into<String>,
        count: u32,
        particle_size: f64,
        color: Color,
        spread: f64,
    ) -> Self {
        Self::with_kind(
            name,
            LayerKind::Particle(ParticleLayer {
                count,
                particle_size,
                color,
                spread,
                seed: 0,
            }),
        )
    }

    /// Start an accent rule (3px thick).
    pub fn accent(name: impl Into<String>, width: f64, color: Color) -> Self {
        Self::with_kind(
            name,
            LayerKind::Accent(AccentLayer {
                width,
                thickness: 3.0,
                color,
            }),
        )
    }

    /// Start a full-bleed background wash.
    pub fn background(name: impl Into<String>, color: Color) -> Self {
        Self::with_kind(name, LayerKind::Background(BackgroundLayer { color }))
    }

    /// Set the easing curve.
    pub fn easing(mut self, ease: Ease) -> Self {
        self.layer.easing = ease;
        self
    }

    /// Mark the layer hidden.
    pub fn hidden(mut self) -> Self {
        self.layer.visible = false;
        self
    }

    /// Append one keyframe.
    pub fn key(mut self, key: Keyframe) -> Self {
        self.layer.keyframes.push(key);
        self
    }

    /// Append several keyframes.
    pub fn keys(mut self, keys: impl IntoIterator<Item = Keyframe>) -> Self {
        self.layer.keyframes.extend(keys);
        self
    }

    /// Text weight.
    pub fn weight(mut self, weight: u16) -> Self {
        if let LayerKind::Text(t) = &mut self.layer.kind {
            t.weight = weight;
        }
        self
    }

    /// Text family.
    pub fn family(mut self, family: impl Into<String>) -> Self {
        if let LayerKind::Text(t) = &mut self.layer.kind {
            t.family = family.into();
        }
        self
    }

    /// Shape outline.
    pub fn stroke(mut self, color: Color, width: f64) -> Self {
        if let LayerKind::Shape(s) = &mut self.layer.kind {
            s.stroke = Some(Stroke { color, width });
        }
        self
    }

    /// Accent thickness.
    pub fn thickness(mut self, thickness: f64) -> Self {
        if let LayerKind::Accent(a) = &mut self.layer.kind {
            a.thickness = thickness;
        }
        self
    }

    /// Finish the layer.
    pub fn build(self) -> Layer {
        self.layer
    }
}

/// Builder for [`CompositionTemplate`](crate::CompositionTemplate) values.
pub struct TemplateBuilder {
    id: String,
    name: String,
    category: Category,
    description: String,
    duration_secs: f64,
    layers: Vec<Layer>,
}

impl TemplateBuilder {
    /// Create a 5-second template builder.
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: Category) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            description: String::new(),
            duration_secs: 5.0,
            layers: Vec::new(),
        }
    }

    /// Set the one-line description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the default duration.
    pub fn duration_secs(mut self, secs: f64) -> Self {
        self.duration_secs = secs;
        self
    }

    /// Append a layer on top of the existing ones.
    pub fn layer(mut self, layer: LayerBuilder) -> Self {
        self.layers.push(layer.build());
        self
    }

    /// Build and validate the final template.
    pub fn build(self) -> KineoResult<CompositionTemplate> {
        let tpl = CompositionTemplate {
            id: self.id,
            name: self.name,
            category: self.category,
            description: self.description,
            duration_secs: self.duration_secs,
            layers: self.layers,
        };
        tpl.validate()?;
        Ok(tpl)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/dsl.rs"]
mod tests;
