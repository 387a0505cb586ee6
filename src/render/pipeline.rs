use crate::{
    compile::plan::compile_frame,
    compile::timeline::{TimelineView, compile_timeline},
    composition::model::{Layer, LayerId},
    composition::settings::ProjectSettings,
    foundation::core::Canvas,
    foundation::error::KineoResult,
    render::backend::{FrameRGBA, RenderBackend, execute_plan},
};

/// Compile and render the frame at normalized time `t` at the project's native pixel size.
///
/// Returns a [`FrameRGBA`] containing **premultiplied** RGBA8 pixels.
pub fn render_frame(
    layers: &[Layer],
    t: f64,
    settings: &ProjectSettings,
    backend: &mut dyn RenderBackend,
) -> KineoResult<FrameRGBA> {
    render_frame_at(layers, t, settings, settings.canvas(), backend)
}

/// Compile and render the frame at `t` onto an arbitrary surface, e.g. a live preview widget.
pub fn render_frame_at(
    layers: &[Layer],
    t: f64,
    settings: &ProjectSettings,
    canvas: Canvas,
    backend: &mut dyn RenderBackend,
) -> KineoResult<FrameRGBA> {
    let plan = compile_frame(layers, t, settings, canvas);
    execute_plan(backend, &plan)
}

/// Render the timeline panel.
pub fn render_timeline(
    layers: &[Layer],
    t: f64,
    selected: Option<LayerId>,
    view: &TimelineView,
    backend: &mut dyn RenderBackend,
) -> KineoResult<FrameRGBA> {
    let plan = compile_timeline(layers, t, selected, view);
    execute_plan(backend, &plan)
}
