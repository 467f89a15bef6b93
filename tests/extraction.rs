//! End-to-end extraction tests over in-memory buffers and encoded images.

use image::{ImageFormat, Rgba, RgbaImage};
use vibrant_colors_wasm::color::{distance, parse_hex};
use vibrant_colors_wasm::{
    ColorFormat, ExtractError, ExtractionConfig, extract_from_rgba, extract_vibrant_colors_bytes,
};

// ============================================================================
// Helpers
// ============================================================================

fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    RgbaImage::from_pixel(width, height, Rgba([rgb[0], rgb[1], rgb[2], 255])).into_raw()
}

/// Vertical stripes, one per color, each `stripe` pixels wide.
fn stripes(colors: &[[u8; 3]], stripe: u32, height: u32) -> RgbaImage {
    let width = stripe * colors.len() as u32;
    RgbaImage::from_fn(width, height, |x, _| {
        let c = colors[(x / stripe) as usize];
        Rgba([c[0], c[1], c[2], 255])
    })
}

fn encode_png(img: &RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

const VIVID: [[u8; 3]; 6] = [
    [255, 0, 0],
    [0, 200, 0],
    [0, 0, 255],
    [255, 220, 0],
    [160, 0, 200],
    [0, 190, 210],
];

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn all_red_buffer_yields_red() {
    let palette = extract_from_rgba(&solid(10, 10, [255, 0, 0]), 10, 10, &ExtractionConfig::default())
        .unwrap();
    assert_eq!(palette.colors, ["#FF0000"]);
}

#[test]
fn black_and_white_checkerboard_is_grayscale() {
    let img = RgbaImage::from_fn(10, 10, |x, y| {
        if (x + y) % 2 == 0 { Rgba([255, 255, 255, 255]) } else { Rgba([0, 0, 0, 255]) }
    });
    let err = extract_from_rgba(img.as_raw(), 10, 10, &ExtractionConfig::default()).unwrap_err();
    assert!(matches!(err, ExtractError::Grayscale));
}

#[test]
fn grayscale_fails_whatever_the_parameters() {
    let gray = RgbaImage::from_fn(16, 16, |x, y| {
        let v = ((x * 16 + y) % 256) as u8;
        Rgba([v, v.saturating_add(5), v, 255])
    });
    for config in [
        ExtractionConfig::default(),
        ExtractionConfig { saturation_threshold: 0.0, grid_size: 16, ..Default::default() },
        ExtractionConfig { exclude_dark_colors: true, max_colors: 1, ..Default::default() },
    ] {
        let err = extract_from_rgba(gray.as_raw(), 16, 16, &config).unwrap_err();
        assert!(matches!(err, ExtractError::Grayscale), "{config:?}");
    }
}

#[test]
fn single_tile_samples_only_the_center() {
    // Red everywhere except a blue center pixel.
    let mut img = RgbaImage::from_pixel(9, 9, Rgba([255, 0, 0, 255]));
    img.put_pixel(4, 4, Rgba([0, 0, 255, 255]));
    let config = ExtractionConfig { grid_size: 1, ..Default::default() };
    let palette = extract_from_rgba(img.as_raw(), 9, 9, &config).unwrap();
    assert_eq!(palette.colors, ["#0000FF"]);

    // A gray center makes the whole image look gray.
    img.put_pixel(4, 4, Rgba([128, 128, 128, 255]));
    let err = extract_from_rgba(img.as_raw(), 9, 9, &config).unwrap_err();
    assert!(matches!(err, ExtractError::Grayscale));
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn vivid_image_gives_bounded_non_empty_palette() {
    let img = stripes(&VIVID, 10, 30);
    for max_colors in 1..=6 {
        let config = ExtractionConfig { max_colors, ..Default::default() };
        let palette = extract_from_rgba(img.as_raw(), img.width(), img.height(), &config).unwrap();
        assert!(!palette.colors.is_empty());
        assert!(palette.colors.len() <= max_colors);
    }
}

#[test]
fn palette_entries_are_far_apart() {
    let img = stripes(
        &[[255, 0, 0], [240, 20, 10], [0, 200, 0], [20, 210, 30], [0, 0, 255], [255, 220, 0]],
        8,
        24,
    );
    let config = ExtractionConfig { max_colors: 10, grid_size: 12, ..Default::default() };
    let palette = extract_from_rgba(img.as_raw(), img.width(), img.height(), &config).unwrap();
    let rgb: Vec<_> = palette.colors.iter().map(|c| parse_hex(c).unwrap()).collect();
    for (i, a) in rgb.iter().enumerate() {
        for b in &rgb[i + 1..] {
            assert!(distance(*a, *b) >= 100.0, "{a:?} vs {b:?}");
        }
    }
}

#[test]
fn palette_is_ranked_brightest_first() {
    let img = stripes(&VIVID, 10, 30);
    let config = ExtractionConfig { max_colors: 6, ..Default::default() };
    let palette = extract_from_rgba(img.as_raw(), img.width(), img.height(), &config).unwrap();
    // (255, 220, 0) is by far the brightest stripe.
    assert_eq!(palette.colors[0], "#FFDC00");
}

#[test]
fn extraction_is_repeatable() {
    let img = stripes(&VIVID, 7, 21);
    let config = ExtractionConfig { grid_size: 9, ..Default::default() };
    let first = extract_from_rgba(img.as_raw(), img.width(), img.height(), &config).unwrap();
    let second = extract_from_rgba(img.as_raw(), img.width(), img.height(), &config).unwrap();
    assert_eq!(first.colors, second.colors);
    assert_eq!(first.suggested_skip_tiles, second.suggested_skip_tiles);
}

#[test]
fn rgb_format_only_changes_encoding() {
    let img = stripes(&VIVID, 10, 30);
    let (w, h) = img.dimensions();
    let hex = extract_from_rgba(img.as_raw(), w, h, &ExtractionConfig::default()).unwrap();
    let config = ExtractionConfig { color_format: ColorFormat::Rgb, ..Default::default() };
    let rgb = extract_from_rgba(img.as_raw(), w, h, &config).unwrap();

    assert_eq!(hex.colors.len(), rgb.colors.len());
    for (h, r) in hex.colors.iter().zip(&rgb.colors) {
        let c = parse_hex(h).unwrap();
        assert_eq!(*r, format!("rgb({}, {}, {})", c.red, c.green, c.blue));
    }
}

#[test]
fn skip_tiles_thins_the_grid() {
    // One color per quadrant; with skip_tiles = 1 on a 2x2 grid only the
    // off-diagonal tiles (1, 0) and (0, 1) are sampled.
    let img = RgbaImage::from_fn(10, 10, |x, y| match (x < 5, y < 5) {
        (true, true) => Rgba([255, 0, 0, 255]),
        (false, true) => Rgba([0, 0, 255, 255]),
        (true, false) => Rgba([0, 200, 0, 255]),
        (false, false) => Rgba([255, 220, 0, 255]),
    });
    let config = ExtractionConfig { grid_size: 2, skip_tiles: 1, ..Default::default() };
    let palette = extract_from_rgba(img.as_raw(), 10, 10, &config).unwrap();
    assert_eq!(palette.colors, ["#00C800", "#0000FF"]);
}

// ============================================================================
// Encoded input
// ============================================================================

#[test]
fn encoded_png_goes_through_scaled_surface() {
    let png = encode_png(&RgbaImage::from_pixel(200, 100, Rgba([255, 0, 0, 255])));
    let palette = extract_vibrant_colors_bytes(&png, &ExtractionConfig::default()).unwrap();
    assert_eq!(palette.colors, ["#FF0000"]);
    assert!(palette.elapsed_ms >= 0.0);
}

#[test]
fn undecodable_input_is_a_load_error() {
    let err = extract_vibrant_colors_bytes(&[0x89, 0x50, 0x4E], &ExtractionConfig::default())
        .unwrap_err();
    assert_eq!(err.kind(), "LoadError");
}

#[test]
fn image_too_small_for_scale_is_a_resource_error() {
    let png = encode_png(&RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255])));
    let err = extract_vibrant_colors_bytes(&png, &ExtractionConfig::default()).unwrap_err();
    assert_eq!(err.kind(), "ResourceError");
}

#[test]
fn invalid_config_is_rejected_before_decoding() {
    let config = ExtractionConfig { grid_size: 0, ..Default::default() };
    let err = extract_vibrant_colors_bytes(b"garbage", &config).unwrap_err();
    assert!(matches!(err, ExtractError::InvalidParameter { .. }));
}
