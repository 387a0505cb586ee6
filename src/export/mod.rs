/// PNG encoding of frames.
pub mod png;
/// Frame sink trait and the in-memory sink.
pub mod sink;
/// Sprite-sheet tiling and still export.
pub mod sprite;
