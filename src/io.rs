//! Bridge to displayable image formats through the `image` crate
//!
//! Everything here works on the same row-major RGB8 buffers the rest of the
//! crate consumes and produces, so a decoded file plugs straight into
//! [`YiqImage::from_rgb8`](crate::YiqImage::from_rgb8) and a
//! [`to_rgb8`](crate::YiqImage::to_rgb8) result straight into
//! [`encode_image`].

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::container::{data_len, ImageError};

pub use image::ImageFormat;

/// Everything that can go wrong when talking to the external image codecs
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("cannot decode image {}", path.display())]
    UnreadableImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("unrecognized output image format `{0}`")]
    UnsupportedFormat(String),

    #[error("cannot encode {format:?} image")]
    EncodeFailed {
        format: ImageFormat,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Image(#[from] ImageError),
}

/// Decode an image file into `(width, height, row-major RGB8 triplets)`.
///
/// Any source of failure on the way to pixels, a missing file, an unknown
/// format or corrupt contents, is reported as [`IoError::UnreadableImage`].
pub fn decode_image(path: impl AsRef<Path>) -> Result<(u32, u32, Vec<u8>), IoError> {
    let path = path.as_ref();

    let decoded = image::open(path).map_err(|source| IoError::UnreadableImage {
        path: path.to_owned(),
        source,
    })?;

    let rgb = decoded.into_rgb8();
    Ok((rgb.width(), rgb.height(), rgb.into_raw()))
}

/// Encode a row-major RGB8 buffer into the requested format, in memory
pub fn encode_image(
    width: u32,
    height: u32,
    rgb: Vec<u8>,
    format: ImageFormat,
) -> Result<Vec<u8>, IoError> {
    let got = rgb.len();

    let image = RgbImage::from_raw(width, height, rgb).ok_or(ImageError::InvalidBufferSize {
        width,
        height,
        expected: data_len(width, height),
        got,
    })?;

    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, format)
        .map_err(|source| IoError::EncodeFailed { format, source })?;

    Ok(bytes.into_inner())
}

/// Resolve an output type name (`png`, `jpeg`, ...) to an encoder format
pub fn format_for_type(name: &str) -> Result<ImageFormat, IoError> {
    ImageFormat::from_extension(name).ok_or_else(|| IoError::UnsupportedFormat(name.to_owned()))
}

/// Resolve an output path to an encoder format via its extension
pub fn format_for_path(path: impl AsRef<Path>) -> Result<ImageFormat, IoError> {
    let path = path.as_ref();
    ImageFormat::from_path(path)
        .map_err(|_| IoError::UnsupportedFormat(path.display().to_string()))
}
