//! The YIQ container: a fixed header followed by packed (Y, I, Q) triplets
//!
//! Byte layout, little-endian multi-byte fields:
//!
//! | offset | size  | field    | value                      |
//! |--------|-------|----------|----------------------------|
//! | 0      | 3     | magic    | `YIQ`                      |
//! | 3      | 1     | version  | `1`                        |
//! | 4      | 1     | method   | `0` NTSC1953, `1` SMPTEC   |
//! | 5      | 4     | width    | u32 LE                     |
//! | 9      | 4     | height   | u32 LE                     |
//! | 13     | 4     | sentinel | `DATA`                     |
//! | 17     | w×h×3 | data     | row-major (Y, I, Q) bytes  |

use std::io::{Read, Write};

use crate::color::ColorimetryMethod;
use crate::convert::{rgb_to_yiq, yiq_to_rgb};

pub(crate) const MAGIC: &[u8; 3] = b"YIQ";
pub(crate) const VERSION: u8 = 1;
pub(crate) const SENTINEL: &[u8; 4] = b"DATA";

pub(crate) const HEADER_LEN: usize = 17;

/// Everything that can go wrong when parsing a YIQ container
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("missing YIQ magic or DATA sentinel")]
    InvalidFormat,

    #[error("unsupported container version {0}")]
    UnsupportedVersion(u8),

    #[error("invalid colorimetry method tag {0}")]
    InvalidMethod(u8),

    #[error("pixel data ends after {got} of {expected} bytes")]
    TruncatedData { expected: usize, got: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Everything that can go wrong when constructing a [`YiqImage`]
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("buffer holds {got} bytes, but {width}x{height} pixels require {expected}")]
    InvalidBufferSize {
        width: u32,
        height: u32,
        expected: usize,
        got: usize,
    },
}

/// A decoded YIQ container: dimensions, colorimetry method and the
/// row-major (Y, I, Q) triplets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YiqImage {
    method: ColorimetryMethod,
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl YiqImage {
    /// Wrap an already-encoded buffer of packed (Y, I, Q) triplets
    pub fn from_yiq8(
        method: ColorimetryMethod,
        width: u32,
        height: u32,
        data: Vec<u8>,
    ) -> Result<Self, ImageError> {
        let expected = data_len(width, height);

        if data.len() != expected {
            return Err(ImageError::InvalidBufferSize {
                width,
                height,
                expected,
                got: data.len(),
            });
        }

        Ok(Self {
            method,
            width,
            height,
            data,
        })
    }

    /// Encode a row-major RGB8 buffer, one pixel at a time, in row-major order
    pub fn from_rgb8(
        method: ColorimetryMethod,
        width: u32,
        height: u32,
        rgb: &[u8],
    ) -> Result<Self, ImageError> {
        let expected = data_len(width, height);

        if rgb.len() != expected {
            return Err(ImageError::InvalidBufferSize {
                width,
                height,
                expected,
                got: rgb.len(),
            });
        }

        let mut data = vec![0u8; expected];

        for (src, dst) in rgb.chunks_exact(3).zip(data.chunks_exact_mut(3)) {
            dst.copy_from_slice(&rgb_to_yiq([src[0], src[1], src[2]], method));
        }

        Ok(Self {
            method,
            width,
            height,
            data,
        })
    }

    /// Reconstruct a row-major RGB8 buffer of the same dimensions
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut rgb = vec![0u8; self.data.len()];

        for (src, dst) in self.data.chunks_exact(3).zip(rgb.chunks_exact_mut(3)) {
            dst.copy_from_slice(&yiq_to_rgb([src[0], src[1], src[2]], self.method));
        }

        rgb
    }

    /// Serialize header and pixel data in container order
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.serialized_len());

        out.extend_from_slice(MAGIC);
        out.push(VERSION);
        out.push(self.method.tag());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(SENTINEL);
        out.extend_from_slice(&self.data);

        out
    }

    /// Serialize into a sink, as a single write of the assembled container.
    ///
    /// The only error conditions are sink failures, which are propagated.
    pub fn write_to(&self, dst: &mut impl Write) -> std::io::Result<()> {
        dst.write_all(&self.to_bytes())
    }

    /// Parse and validate a container from a byte stream.
    ///
    /// Reads exactly header plus width×height triplets; trailing bytes are
    /// left in the stream and ignored.
    pub fn read_from(src: &mut impl Read) -> Result<Self, ReadError> {
        let mut header = [0u8; HEADER_LEN];
        read_header(src, &mut header)?;

        if &header[0..3] != MAGIC {
            return Err(ReadError::InvalidFormat);
        }

        if header[3] != VERSION {
            return Err(ReadError::UnsupportedVersion(header[3]));
        }

        let method =
            ColorimetryMethod::from_tag(header[4]).ok_or(ReadError::InvalidMethod(header[4]))?;

        let width = u32::from_le_bytes(header[5..9].try_into().unwrap());
        let height = u32::from_le_bytes(header[9..13].try_into().unwrap());

        if &header[13..17] != SENTINEL {
            return Err(ReadError::InvalidFormat);
        }

        let expected = data_len(width, height);
        let mut data = vec![0u8; expected];

        let mut filled = 0;
        while filled < expected {
            let n = src.read(&mut data[filled..])?;
            if n == 0 {
                return Err(ReadError::TruncatedData {
                    expected,
                    got: filled,
                });
            }
            filled += n;
        }

        Ok(Self {
            method,
            width,
            height,
            data,
        })
    }

    pub fn method(&self) -> ColorimetryMethod {
        self.method
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Packed row-major (Y, I, Q) triplets
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Size of the serialized container in bytes
    pub fn serialized_len(&self) -> usize {
        HEADER_LEN + self.data.len()
    }

    pub(crate) fn from_parts(
        method: ColorimetryMethod,
        width: u32,
        height: u32,
        data: Vec<u8>,
    ) -> Self {
        debug_assert_eq!(data.len(), data_len(width, height));

        Self {
            method,
            width,
            height,
            data,
        }
    }
}

/// True if the buffer starts with the container signature.
///
/// Useful to pick a processing direction for a file of unknown kind before
/// committing to a full parse.
pub fn is_container(bytes: &[u8]) -> bool {
    bytes.starts_with(MAGIC)
}

pub(crate) fn data_len(width: u32, height: u32) -> usize {
    (width as usize) * (height as usize) * 3
}

/// A stream too short to hold the fixed header cannot contain the signature,
/// so short reads here report `InvalidFormat` instead of a raw io error.
fn read_header(src: &mut impl Read, header: &mut [u8; HEADER_LEN]) -> Result<(), ReadError> {
    src.read_exact(header).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            ReadError::InvalidFormat
        } else {
            ReadError::Io(e)
        }
    })
}
