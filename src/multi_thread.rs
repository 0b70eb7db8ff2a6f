//! Multi-threaded variants of the whole-image transforms
//!
//! The pixel data is split into one band of rows per available core and the
//! bands are converted in parallel. Output is byte-identical to the
//! single-threaded paths.

use rayon::iter::{IndexedParallelIterator, ParallelIterator};
use rayon::slice::{ParallelSlice, ParallelSliceMut};

use crate::color::ColorimetryMethod;
use crate::container::{data_len, ImageError, YiqImage};
use crate::convert::{rgb_to_yiq, yiq_to_rgb};

/// Parallel equivalent of [`YiqImage::from_rgb8`]
#[inline(never)]
pub fn from_rgb8_multi_thread(
    method: ColorimetryMethod,
    width: u32,
    height: u32,
    rgb: &[u8],
) -> Result<YiqImage, ImageError> {
    let expected = data_len(width, height);

    if rgb.len() != expected {
        return Err(ImageError::InvalidBufferSize {
            width,
            height,
            expected,
            got: rgb.len(),
        });
    }

    let threads = num_cpus::get();

    if threads == 1 || expected == 0 {
        return YiqImage::from_rgb8(method, width, height, rgb);
    }

    let band = band_len(width, height, threads);
    let mut data = vec![0u8; expected];

    rgb.par_chunks(band)
        .zip(data.par_chunks_mut(band))
        .for_each(|(src_band, dst_band)| {
            for (src, dst) in src_band.chunks_exact(3).zip(dst_band.chunks_exact_mut(3)) {
                dst.copy_from_slice(&rgb_to_yiq([src[0], src[1], src[2]], method));
            }
        });

    Ok(YiqImage::from_parts(method, width, height, data))
}

/// Parallel equivalent of [`YiqImage::to_rgb8`]
#[inline(never)]
pub fn to_rgb8_multi_thread(image: &YiqImage) -> Vec<u8> {
    let threads = num_cpus::get();

    if threads == 1 || image.data().is_empty() {
        return image.to_rgb8();
    }

    let band = band_len(image.width(), image.height(), threads);
    let method = image.method();
    let mut rgb = vec![0u8; image.data().len()];

    image
        .data()
        .par_chunks(band)
        .zip(rgb.par_chunks_mut(band))
        .for_each(|(src_band, dst_band)| {
            for (src, dst) in src_band.chunks_exact(3).zip(dst_band.chunks_exact_mut(3)) {
                dst.copy_from_slice(&yiq_to_rgb([src[0], src[1], src[2]], method));
            }
        });

    rgb
}

/// Band size in bytes, aligned to whole rows.
///
/// Only called for non-empty images, so the result is always positive.
fn band_len(width: u32, height: u32, threads: usize) -> usize {
    let rows_per_band = (height as usize).div_ceil(threads);
    rows_per_band * width as usize * 3
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorimetryMethod::{NTSC1953, SMPTEC};

    fn gradient_rgb(width: u32, height: u32) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(data_len(width, height));
        for y in 0..height {
            for x in 0..width {
                rgb.push((x * 7 % 256) as u8);
                rgb.push((y * 13 % 256) as u8);
                rgb.push(((x + y) * 3 % 256) as u8);
            }
        }
        rgb
    }

    #[test]
    fn parallel_encode_matches_single_threaded() {
        for method in [NTSC1953, SMPTEC] {
            for (w, h) in [(1, 1), (64, 48), (127, 3), (3, 127)] {
                let rgb = gradient_rgb(w, h);

                let single = YiqImage::from_rgb8(method, w, h, &rgb).unwrap();
                let parallel = from_rgb8_multi_thread(method, w, h, &rgb).unwrap();

                assert_eq!(parallel, single, "{method:?} {w}x{h}");
            }
        }
    }

    #[test]
    fn parallel_decode_matches_single_threaded() {
        for method in [NTSC1953, SMPTEC] {
            let rgb = gradient_rgb(80, 45);
            let image = YiqImage::from_rgb8(method, 80, 45, &rgb).unwrap();

            assert_eq!(to_rgb8_multi_thread(&image), image.to_rgb8(), "{method:?}");
        }
    }

    #[test]
    fn empty_images_convert_without_panicking() {
        for (w, h) in [(0, 0), (0, 7), (7, 0)] {
            let image = from_rgb8_multi_thread(SMPTEC, w, h, &[]).unwrap();
            assert!(image.data().is_empty());
            assert!(to_rgb8_multi_thread(&image).is_empty());
        }
    }

    #[test]
    fn buffer_size_is_still_validated() {
        assert!(matches!(
            from_rgb8_multi_thread(NTSC1953, 4, 4, &[0u8; 10]),
            Err(ImageError::InvalidBufferSize {
                expected: 48,
                got: 10,
                ..
            })
        ));
    }
}
