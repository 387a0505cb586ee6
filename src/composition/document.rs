use std::sync::Arc;

use crate::{
    animation::ease::Ease,
    animation::keyframes::{Keyframe, normalize_keyframes},
    animation::particles::particle_seed_for,
    composition::catalog::TemplateCatalog,
    composition::model::{COUNTDOWN_LAYER_NAME, Layer, LayerId, LayerKind},
    composition::settings::ProjectSettings,
    foundation::error::{KineoError, KineoResult},
};

/// The live animation document: project settings plus a flat, z-ordered layer list.
///
/// Layers entering the document get a fresh id, a particle seed derived from that id, and
/// keyframes sorted by time with times clamped to `[0, 1]`.
#[derive(Clone, Debug)]
pub struct Document {
    catalog: Arc<TemplateCatalog>,
    settings: ProjectSettings,
    layers: Vec<Layer>,
    next_id: u64,
}

/// Partial update of one layer. `None` fields are left untouched.
#[derive(Clone, Debug, Default)]
pub struct LayerPatch {
    /// New display name.
    pub name: Option<String>,
    /// New visibility.
    pub visible: Option<bool>,
    /// New easing.
    pub easing: Option<Ease>,
    /// Replacement keyframe track.
    pub keyframes: Option<Vec<Keyframe>>,
    /// Replacement parameters; must be the same kind as the layer.
    pub kind: Option<LayerKind>,
}

impl Document {
    /// Empty document with default settings.
    pub fn new(catalog: Arc<TemplateCatalog>) -> Self {
        Self {
            catalog,
            settings: ProjectSettings::default(),
            layers: Vec::new(),
            next_id: 1,
        }
    }

    /// Empty document with the given settings.
    pub fn with_settings(catalog: Arc<TemplateCatalog>, settings: ProjectSettings) -> KineoResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            ..Self::new(catalog)
        })
    }

    /// The template registry this document instantiates from.
    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// Current project settings.
    pub fn settings(&self) -> &ProjectSettings {
        &self.settings
    }

    /// Replace the project settings after validating them.
    pub fn set_settings(&mut self, settings: ProjectSettings) -> KineoResult<()> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    /// Layers back to front.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Look up a layer by id.
    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    fn layer_mut(&mut self, id: LayerId) -> KineoResult<&mut Layer> {
        self.layers
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| KineoError::validation(format!("unknown layer {id}")))
    }

    fn admit(&mut self, mut layer: Layer, fresh_seed: bool) -> Layer {
        layer.id = LayerId(self.next_id);
        self.next_id += 1;
        if let LayerKind::Particle(p) = &mut layer.kind
            && (fresh_seed || p.seed == 0)
        {
            p.seed = particle_seed_for(layer.id.0);
        }
        normalize_keyframes(&mut layer.keyframes);
        layer
    }

    /// Replace all layers with a deep copy of a catalog template.
    ///
    /// Also adopts the template's duration and category and records its id.
    #[tracing::instrument(skip(self))]
    pub fn apply_template(&mut self, template_id: &str) -> KineoResult<()> {
        let tpl = self.catalog.require(template_id)?.clone();
        let layers: Vec<Layer> = tpl
            .layers
            .into_iter()
            .map(|l| self.admit(l, true))
            .collect();
        tracing::debug!(layers = layers.len(), "template applied");
        self.layers = layers;
        self.settings.duration_secs = tpl.duration_secs;
        self.settings.category = tpl.category;
        self.settings.template_id = Some(tpl.id);
        Ok(())
    }

    /// Append a layer on top and return its new id.
    ///
    /// A particle layer keeps a non-zero seed it already carries.
    pub fn add_layer(&mut self, layer: Layer) -> KineoResult<LayerId> {
        layer.validate()?;
        let layer = self.admit(layer, false);
        let id = layer.id;
        self.layers.push(layer);
        Ok(id)
    }

    /// Remove a layer and return it.
    pub fn remove_layer(&mut self, id: LayerId) -> KineoResult<Layer> {
        let idx = self
            .layers
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| KineoError::validation(format!("unknown layer {id}")))?;
        Ok(self.layers.remove(idx))
    }

    /// Apply a property patch. The layer is left unchanged when the result is invalid.
    pub fn patch_layer(&mut self, id: LayerId, patch: LayerPatch) -> KineoResult<()> {
        let layer = self.layer_mut(id)?;
        let mut next = layer.clone();
        if let Some(name) = patch.name {
            next.name = name;
        }
        if let Some(visible) = patch.visible {
            next.visible = visible;
        }
        if let Some(easing) = patch.easing {
            next.easing = easing;
        }
        if let Some(mut keys) = patch.keyframes {
            normalize_keyframes(&mut keys);
            next.keyframes = keys;
        }
        if let Some(mut kind) = patch.kind {
            if std::mem::discriminant(&kind) != std::mem::discriminant(&next.kind) {
                return Err(KineoError::validation(format!(
                    "layer {id}: cannot change kind from {} to {}",
                    next.kind.name(),
                    kind.name()
                )));
            }
            if let (LayerKind::Particle(new), LayerKind::Particle(old)) = (&mut kind, &next.kind)
                && new.seed == 0
            {
                new.seed = old.seed;
            }
            next.kind = kind;
        }
        next.validate()?;
        *layer = next;
        Ok(())
    }

    /// Translate a layer's whole motion path by `(dx, dy)` logical pixels.
    ///
    /// A layer without keyframes gets a single keyframe at the dragged position.
    pub fn move_layer(&mut self, id: LayerId, dx: f64, dy: f64) -> KineoResult<()> {
        if !(dx.is_finite() && dy.is_finite()) {
            return Err(KineoError::validation("drag offset must be finite"));
        }
        let layer = self.layer_mut(id)?;
        if layer.keyframes.is_empty() {
            layer.keyframes.push(Keyframe::at(0.0, dx, dy));
            return Ok(());
        }
        for k in &mut layer.keyframes {
            k.x += dx;
            k.y += dy;
        }
        Ok(())
    }

    /// Resize a shape (width and height) or an accent rule (width only).
    pub fn resize_shape(&mut self, id: LayerId, width: f64, height: f64) -> KineoResult<()> {
        if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
            return Err(KineoError::validation(format!(
                "invalid size {width}x{height}"
            )));
        }
        let layer = self.layer_mut(id)?;
        match &mut layer.kind {
            LayerKind::Shape(s) => {
                s.width = width;
                s.height = height;
            }
            LayerKind::Accent(a) => a.width = width,
            other => {
                return Err(KineoError::validation(format!(
                    "layer {id}: {} layers cannot be resized",
                    other.name()
                )));
            }
        }
        Ok(())
    }

    /// Overwrite the `content` of text layers, back to front, with externally generated strings.
    ///
    /// Only the string field changes. The countdown number layer is skipped. Surplus strings are
    /// ignored; returns how many layers were updated.
    pub fn replace_text_contents<I, S>(&mut self, contents: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let targets = self
            .layers
            .iter_mut()
            .filter(|l| l.name != COUNTDOWN_LAYER_NAME)
            .filter_map(|l| match &mut l.kind {
                LayerKind::Text(t) => Some(t),
                _ => None,
            });
        let mut n = 0;
        for (t, s) in targets.zip(contents) {
            t.content = s.into();
            n += 1;
        }
        n
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/document.rs"]
mod tests;
