//! Reading and writing of image files
//!
//! The format is picked from the file extension (png, bmp, ppm, jpeg, gif).

use crate::buffer::RenderingBuffer;
use crate::error::Error;

use image::ImageFormat;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Sibling of `path` used while the image is being written
fn temporary_path(path: &Path) -> PathBuf {
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    path.with_file_name(format!(".{}.partial", name))
}

/// Encode `buf` into `path`
///
/// The image is written next to `path` first and renamed into place once
/// complete, so `path` is either absent, unchanged, or the full new image.
pub fn write_file<P: AsRef<Path>>(buf: &RenderingBuffer, path: P) -> Result<(), Error> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;
    let tmp = temporary_path(path);
    let written = image::save_buffer_with_format(
        &tmp,
        &buf.data,
        buf.width as u32,
        buf.height as u32,
        image::ExtendedColorType::Rgb8,
        format,
    );
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    info!("wrote {}x{} image to {}", buf.width, buf.height, path.display());
    Ok(())
}

/// Decode the image at `path` into an RGB buffer
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<RenderingBuffer, Error> {
    let img = image::open(path)?.to_rgb8();
    let (w, h) = img.dimensions();
    Ok(RenderingBuffer { data: img.into_raw(), width: w as usize, height: h as usize })
}

/// Compare two image files pixel by pixel
pub fn img_diff<P: AsRef<Path>>(f1: P, f2: P) -> Result<bool, Error> {
    let a = read_file(f1)?;
    let b = read_file(f2)?;
    Ok(a == b)
}

impl RenderingBuffer {
    /// Encode the buffer into `path`, see [`write_file`]
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        write_file(self, path)
    }
}
