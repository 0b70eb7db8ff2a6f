use yiq_image::{ColorimetryMethod, YiqImage};

fn make_rgb8_image(width: u32, height: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity((width * height * 3) as usize);

    for y in 0..height {
        for x in 0..width {
            out.push((x * 255 / width.max(1)) as u8);
            out.push((y * 255 / height.max(1)) as u8);
            out.push(((x + y) % 256) as u8);
        }
    }

    out
}

fn assert_close(original: &[u8], reconstructed: &[u8], context: &str) {
    assert_eq!(original.len(), reconstructed.len(), "{context}");

    for (i, (a, b)) in original.iter().zip(reconstructed).enumerate() {
        let diff = (*a as i16 - *b as i16).abs();
        assert!(
            diff <= 6,
            "{context}: byte {i} was {a}, came back as {b} (off by {diff})"
        );
    }
}

#[test]
fn full_pipeline_preserves_dimensions_and_approximates_pixels() {
    for method in [ColorimetryMethod::NTSC1953, ColorimetryMethod::SMPTEC] {
        let width = 311;
        let height = 97;
        let rgb = make_rgb8_image(width, height);

        let image = YiqImage::from_rgb8(method, width, height, &rgb).unwrap();

        let mut container = Vec::new();
        image.write_to(&mut container).unwrap();
        assert_eq!(container.len(), image.serialized_len());

        let parsed = YiqImage::read_from(&mut container.as_slice()).unwrap();
        assert_eq!(parsed.width(), width);
        assert_eq!(parsed.height(), height);
        assert_eq!(parsed.method(), method);

        assert_close(&rgb, &parsed.to_rgb8(), &format!("{method:?}"));
    }
}

#[test]
fn zero_sized_images_survive_the_pipeline() {
    for (width, height) in [(0, 0), (0, 12), (12, 0)] {
        let image = YiqImage::from_rgb8(ColorimetryMethod::SMPTEC, width, height, &[]).unwrap();

        let mut container = Vec::new();
        image.write_to(&mut container).unwrap();

        let parsed = YiqImage::read_from(&mut container.as_slice()).unwrap();
        assert_eq!(parsed.width(), width);
        assert_eq!(parsed.height(), height);
        assert!(parsed.to_rgb8().is_empty());
    }
}

#[test]
fn re_encoding_stored_triplets_is_lossless() {
    // The container stores already-quantized triplets, so unpacking and
    // re-packing the reconstructed pixels must reproduce them exactly.
    let rgb = make_rgb8_image(64, 64);

    for method in [ColorimetryMethod::NTSC1953, ColorimetryMethod::SMPTEC] {
        let first = YiqImage::from_rgb8(method, 64, 64, &rgb).unwrap();
        let second = YiqImage::from_rgb8(method, 64, 64, &first.to_rgb8()).unwrap();

        assert_eq!(first.data(), second.data(), "{method:?}");
    }
}

#[cfg(feature = "multi-thread")]
#[test]
fn multi_threaded_pipeline_is_byte_identical() {
    use yiq_image::{from_rgb8_multi_thread, to_rgb8_multi_thread};

    let width = 640;
    let height = 357;
    let rgb = make_rgb8_image(width, height);

    for method in [ColorimetryMethod::NTSC1953, ColorimetryMethod::SMPTEC] {
        let single = YiqImage::from_rgb8(method, width, height, &rgb).unwrap();
        let parallel = from_rgb8_multi_thread(method, width, height, &rgb).unwrap();

        assert_eq!(parallel, single, "{method:?}");
        assert_eq!(to_rgb8_multi_thread(&parallel), single.to_rgb8(), "{method:?}");
    }
}

#[cfg(feature = "io")]
#[test]
fn packing_a_png_and_unpacking_it_approximates_the_source() {
    use yiq_image::{encode_image, ImageFormat};

    let width = 120;
    let height = 80;
    let rgb = make_rgb8_image(width, height);

    // PNG in, PNG out, with only the YIQ quantization in between
    let png = encode_image(width, height, rgb.clone(), ImageFormat::Png).unwrap();
    let decoded = image::load_from_memory(&png).unwrap().into_rgb8();
    assert_eq!(decoded.as_raw(), &rgb);

    let image =
        YiqImage::from_rgb8(ColorimetryMethod::SMPTEC, width, height, decoded.as_raw()).unwrap();
    let reconstructed = image.to_rgb8();

    let png_out = encode_image(width, height, reconstructed.clone(), ImageFormat::Png).unwrap();
    let round = image::load_from_memory(&png_out).unwrap().into_rgb8();

    assert_eq!(round.dimensions(), (width, height));
    assert_eq!(round.as_raw(), &reconstructed);
    assert_close(&rgb, round.as_raw(), "png pipeline");
}
