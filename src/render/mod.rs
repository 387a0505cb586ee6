/// Backend trait and frame type.
pub mod backend;
/// `vello_cpu` raster backend.
pub mod cpu;
pub(crate) mod pipeline;
mod text;
