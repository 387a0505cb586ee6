//! kineo is a motion-graphics timeline engine.
//!
//! Layers carry keyframe tracks in a 960x540 logical space. A frame is produced in two steps:
//!
//! - [`compile_frame`] interpolates every layer at normalized time `t` into a [`FramePlan`]
//! - a [`RenderBackend`] (usually [`CpuBackend`]) executes the plan into a [`FrameRGBA`]
//!
//! [`Playback`] supplies `t` from the wall clock, [`MotionSession`] ties it to an editable
//! [`Document`], and [`export_sprite_sheet`] tiles evenly spaced frames into one image.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod compile;
pub(crate) mod composition;
/// Still, sprite-sheet and PNG export.
pub mod export;
pub(crate) mod playback;
/// Rendering backends.
pub mod render;

pub use crate::animation::ease::Ease;
pub use crate::animation::keyframes::{Keyframe, LayerTransform, interpolate, normalize_keyframes};
pub use crate::animation::particles::{
    Lcg, ParticleDescriptor, generate_particles, particle_seed_for,
};
pub use crate::compile::plan::{
    DrawOp, FramePlan, MIN_VISIBLE_OPACITY, TextAlign, compile_frame, countdown_value,
    format_timecode,
};
pub use crate::compile::timeline::{TimelineView, compile_timeline};
pub use crate::composition::catalog::TemplateCatalog;
pub use crate::composition::document::{Document, LayerPatch};
pub use crate::composition::dsl::{LayerBuilder, TemplateBuilder};
pub use crate::composition::model::{
    AccentLayer, BackgroundLayer, COUNTDOWN_LAYER_NAME, Category, CompositionTemplate, Layer,
    LayerId, LayerKind, MAX_PARTICLES, ParticleLayer, ShapeKind, ShapeLayer, Stroke, TextLayer,
};
pub use crate::composition::settings::{
    AspectRatio, BackgroundFill, FrameRate, MAX_DURATION_SECS, ProjectSettings, Resolution,
};
pub use crate::foundation::color::Color;
pub use crate::foundation::core::{
    Affine, BezPath, Canvas, Fps, LOGICAL_HEIGHT, LOGICAL_WIDTH, Point, Rect, Transform2D, Vec2,
};
pub use crate::foundation::error::{KineoError, KineoResult};

pub use crate::export::png::{encode_png, unpremultiply_rgba8, write_png};
pub use crate::export::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::export::sprite::{
    MAX_SPRITE_FRAMES, SpriteGrid, SpriteSheetOpts, SpriteSheetSink, export_sprite_sheet,
    render_frames_into, render_still,
};
pub use crate::playback::scheduler::{
    FrameRequest, FrameRequester, ManualFrames, NUDGE_STEP, Playback, PlaybackKey, PlaybackState,
};
pub use crate::playback::session::{DEFAULT_TIMELINE_WIDTH, MotionSession};
pub use crate::render::backend::{FrameRGBA, RenderBackend, execute_plan};
pub use crate::render::cpu::{CpuBackend, CpuBackendOpts, FONT_ENV};
pub use crate::render::pipeline::{render_frame, render_frame_at, render_timeline};
