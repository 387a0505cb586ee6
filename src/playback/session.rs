use std::sync::Arc;
use std::time::Instant;

use crate::{
    compile::timeline::TimelineView,
    composition::catalog::TemplateCatalog,
    composition::document::{Document, LayerPatch},
    composition::model::{Layer, LayerId},
    composition::settings::ProjectSettings,
    foundation::core::Canvas,
    foundation::error::{KineoError, KineoResult},
    playback::scheduler::{FrameRequester, Playback, PlaybackKey},
    render::backend::{FrameRGBA, RenderBackend},
    render::pipeline::{render_frame_at, render_timeline},
};

/// Default timeline panel width in pixels.
pub const DEFAULT_TIMELINE_WIDTH: u32 = 960;

/// An editing session: the document, its playback clock and the selected layer.
///
/// All edits go through the session so that the selection never names a removed layer.
pub struct MotionSession<R: FrameRequester> {
    document: Document,
    playback: Playback<R>,
    selected: Option<LayerId>,
    timeline_width: u32,
}

impl<R: FrameRequester> MotionSession<R> {
    /// Empty document with default settings, paused at `t = 0`.
    pub fn new(catalog: Arc<TemplateCatalog>, requester: R) -> KineoResult<Self> {
        let document = Document::new(catalog);
        let playback = Playback::new(requester, document.settings().duration_secs)?;
        Ok(Self {
            document,
            playback,
            selected: None,
            timeline_width: DEFAULT_TIMELINE_WIDTH,
        })
    }

    /// Read-only view of the document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The playback clock.
    pub fn playback(&self) -> &Playback<R> {
        &self.playback
    }

    /// Displayed normalized time.
    pub fn t(&self) -> f64 {
        self.playback.t()
    }

    /// Selected layer, if any.
    pub fn selected(&self) -> Option<LayerId> {
        self.selected
    }

    /// Select a layer of the document.
    pub fn select(&mut self, id: LayerId) -> KineoResult<()> {
        if self.document.layer(id).is_none() {
            return Err(KineoError::validation(format!("unknown layer {id}")));
        }
        self.selected = Some(id);
        Ok(())
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Set the timeline panel width.
    pub fn set_timeline_width(&mut self, width: u32) {
        self.timeline_width = width.max(1);
    }

    /// Switch to a catalog template. Playback stops at `t = 0` and the selection is cleared.
    #[tracing::instrument(skip(self, now))]
    pub fn apply_template(&mut self, template_id: &str, now: Instant) -> KineoResult<()> {
        self.document.apply_template(template_id)?;
        self.playback.jump_to_start();
        self.playback
            .set_duration(self.document.settings().duration_secs, now)?;
        self.selected = None;
        Ok(())
    }

    /// Replace project settings; the playback duration follows.
    pub fn set_settings(&mut self, settings: ProjectSettings, now: Instant) -> KineoResult<()> {
        let duration = settings.duration_secs;
        self.document.set_settings(settings)?;
        self.playback.set_duration(duration, now)
    }

    /// Add a layer on top and select it.
    pub fn add_layer(&mut self, layer: Layer) -> KineoResult<LayerId> {
        let id = self.document.add_layer(layer)?;
        self.selected = Some(id);
        Ok(id)
    }

    /// Remove a layer, clearing the selection when it was selected.
    pub fn remove_layer(&mut self, id: LayerId) -> KineoResult<Layer> {
        let layer = self.document.remove_layer(id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        Ok(layer)
    }

    /// See [`Document::patch_layer`].
    pub fn patch_layer(&mut self, id: LayerId, patch: LayerPatch) -> KineoResult<()> {
        self.document.patch_layer(id, patch)
    }

    /// See [`Document::move_layer`].
    pub fn move_layer(&mut self, id: LayerId, dx: f64, dy: f64) -> KineoResult<()> {
        self.document.move_layer(id, dx, dy)
    }

    /// See [`Document::resize_shape`].
    pub fn resize_shape(&mut self, id: LayerId, width: f64, height: f64) -> KineoResult<()> {
        self.document.resize_shape(id, width, height)
    }

    /// See [`Document::replace_text_contents`].
    pub fn replace_text_contents<I, S>(&mut self, contents: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.document.replace_text_contents(contents)
    }

    /// Geometry of the timeline panel for the current layer count.
    pub fn timeline_view(&self) -> KineoResult<TimelineView> {
        TimelineView::for_layers(self.timeline_width, self.document.layers().len())
    }

    /// Scrub from a timeline pixel x coordinate; always pauses.
    pub fn scrub_at(&mut self, x: f64) -> KineoResult<f64> {
        let view = self.timeline_view()?;
        self.playback.seek(view.time_at(x));
        Ok(self.playback.t())
    }

    /// See [`Playback::toggle`].
    pub fn toggle(&mut self, now: Instant) {
        self.playback.toggle(now);
    }

    /// See [`Playback::tick`].
    pub fn tick(&mut self, now: Instant) -> Option<f64> {
        self.playback.tick(now)
    }

    /// See [`Playback::handle_key`].
    pub fn handle_key(&mut self, key: PlaybackKey, now: Instant) {
        self.playback.handle_key(key, now);
    }

    /// Render the current frame at a display size.
    pub fn render_live(&self, display: Canvas, backend: &mut dyn RenderBackend) -> KineoResult<FrameRGBA> {
        render_frame_at(
            self.document.layers(),
            self.playback.t(),
            self.document.settings(),
            display,
            backend,
        )
    }

    /// Render the timeline panel for the current state.
    pub fn render_timeline(&self, backend: &mut dyn RenderBackend) -> KineoResult<FrameRGBA> {
        let view = self.timeline_view()?;
        render_timeline(
            self.document.layers(),
            self.playback.t(),
            self.selected,
            &view,
            backend,
        )
    }

    /// Stop playback and cancel pending callbacks.
    pub fn shutdown(&mut self) {
        self.playback.shutdown();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/session.rs"]
mod tests;
