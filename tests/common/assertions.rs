//! Assertion helpers for tests.

use fast_bitmap::{Bitmap, Color};
use pretty_assertions::assert_eq;
use shotfx::rendering::decode_png;

/// Assert bytes start with the PNG signature
pub fn assert_png(bytes: &[u8]) {
    assert!(
        bytes.starts_with(&[0x89, b'P', b'N', b'G']),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}

/// Decode a PNG, asserting it is one
pub fn decode(bytes: &[u8]) -> Bitmap {
    assert_png(bytes);
    decode_png(bytes).expect("Output should decode")
}

/// Read every pixel of `bitmap` as rows of colors
pub fn pixels(bitmap: &Bitmap) -> Vec<Vec<Color>> {
    let view = bitmap.view(None).expect("view bitmap");
    (0..bitmap.height())
        .map(|y| {
            (0..bitmap.width())
                .map(|x| view.get_color_at(x, y).expect("pixel in range"))
                .collect()
        })
        .collect()
}

/// Assert the image is `expected`, written as rows of `#` (black) and `.`
/// (white)
pub fn assert_pattern(bitmap: &Bitmap, expected: &[&str]) {
    let actual: Vec<String> = pixels(bitmap)
        .iter()
        .map(|row| {
            row.iter()
                .map(|&c| match c {
                    Color::BLACK => '#',
                    Color::WHITE => '.',
                    _ => '?',
                })
                .collect()
        })
        .collect();
    let expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
    assert_eq!(actual, expected);
}
