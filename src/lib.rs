//! Convert raster images to and from the YIQ luma/chroma container format
//!
//! [`YiqImage`] holds the decoded form, [`rgb_to_yiq`] and [`yiq_to_rgb`]
//! are the per-pixel transforms behind it, and the `io` feature bridges to
//! displayable formats through the `image` crate.

pub use color::ColorimetryMethod;
pub use container::{is_container, ImageError, ReadError, YiqImage};
pub use convert::{rgb_to_yiq, yiq_to_rgb};
#[cfg(feature = "io")]
pub use io::{decode_image, encode_image, format_for_path, format_for_type, ImageFormat, IoError};
#[cfg(feature = "multi-thread")]
pub use multi_thread::{from_rgb8_multi_thread, to_rgb8_multi_thread};

mod color;
mod container;
mod convert;
#[cfg(feature = "io")]
mod io;
#[cfg(feature = "multi-thread")]
mod multi_thread;
