//! Per-pixel transforms between RGB and the stored YIQ encoding

use crate::color::mat_idxs::*;
use crate::color::{ColorimetryMethod, I_MAX, I_OFFSET, Q_MAX, Q_OFFSET, Y_MAX};

/// Convert one RGB pixel to its stored YIQ encoding.
///
/// Channels are normalized to `[0, 1]`, weighted with the method's matrix,
/// the chroma components are shifted into non-negative range, and all three
/// are scaled by 100. Scaled values round half away from zero and saturate
/// into their storage domains: Y `[0, 100]`, I `[0, 119]`, Q `[0, 105]`.
#[inline]
pub fn rgb_to_yiq(rgb: [u8; 3], method: ColorimetryMethod) -> [u8; 3] {
    let mat = method.rgb_to_yiq_mat();

    let r = rgb[R] as f32 / 255.0;
    let g = rgb[G] as f32 / 255.0;
    let b = rgb[B] as f32 / 255.0;

    let y = mat[Y][R] * r + mat[Y][G] * g + mat[Y][B] * b;
    let i = mat[I][R] * r + mat[I][G] * g + mat[I][B] * b;
    let q = mat[Q][R] * r + mat[Q][G] * g + mat[Q][B] * b;

    [
        quantize(y, Y_MAX),
        quantize(i + I_OFFSET, I_MAX),
        quantize(q + Q_OFFSET, Q_MAX),
    ]
}

/// Reconstruct an approximate RGB pixel from its stored YIQ encoding.
///
/// Undoes the storage scaling and offsets exactly, then applies the inverse
/// matrix of the method. The result is only an approximation of the pixel
/// passed to [`rgb_to_yiq`]: encoding already discarded precision through
/// rounding and clamping. Each channel is off by at most 6 of 255 levels.
#[inline]
pub fn yiq_to_rgb(yiq: [u8; 3], method: ColorimetryMethod) -> [u8; 3] {
    let mat = method.yiq_to_rgb_mat();

    let y = yiq[0] as f32 / 100.0;
    let i = yiq[1] as f32 / 100.0 - I_OFFSET;
    let q = yiq[2] as f32 / 100.0 - Q_OFFSET;

    let channel = |row: &[f32; 3]| -> u8 {
        let v = row[Y] * y + row[I] * i + row[Q] * q;
        (v.clamp(0.0, 1.0) * 255.0).round() as u8
    };

    [channel(&mat[R]), channel(&mat[G]), channel(&mat[B])]
}

#[inline]
fn quantize(v: f32, max: u8) -> u8 {
    (v * 100.0).round().clamp(0.0, max as f32) as u8
}
