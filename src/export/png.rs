use std::io::Cursor;
use std::path::Path;

use image::ImageEncoder;

use crate::{
    foundation::error::{KineoError, KineoResult},
    render::backend::FrameRGBA,
};

/// Convert premultiplied RGBA8 to straight alpha. Fully transparent pixels become zero.
pub fn unpremultiply_rgba8(premul: &[u8]) -> Vec<u8> {
    let mut out = premul.to_vec();
    for px in out.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            let v = (u16::from(*c) * 255 + a / 2) / a;
            *c = v.min(255) as u8;
        }
    }
    out
}

fn straight_bytes(frame: &FrameRGBA) -> KineoResult<Vec<u8>> {
    frame.validate()?;
    Ok(if frame.premultiplied {
        unpremultiply_rgba8(&frame.data)
    } else {
        frame.data.clone()
    })
}

/// Encode a frame as a straight-alpha RGBA PNG in memory.
pub fn encode_png(frame: &FrameRGBA) -> KineoResult<Vec<u8>> {
    let data = straight_bytes(frame)?;
    let mut buf = Cursor::new(Vec::new());
    image::codecs::png::PngEncoder::new(&mut buf)
        .write_image(&data, frame.width, frame.height, image::ExtendedColorType::Rgba8)
        .map_err(|e| KineoError::export(format!("png encode failed: {e}")))?;
    Ok(buf.into_inner())
}

/// Write a frame as a straight-alpha RGBA PNG file, creating parent directories.
pub fn write_png(path: impl AsRef<Path>, frame: &FrameRGBA) -> KineoResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            KineoError::export(format!("create output dir '{}': {e}", parent.display()))
        })?;
    }
    let data = straight_bytes(frame)?;
    image::save_buffer_with_format(
        path,
        &data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| KineoError::export(format!("write png '{}': {e}", path.display())))?;
    tracing::info!(path = %path.display(), width = frame.width, height = frame.height, "png written");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/export/png.rs"]
mod tests;
