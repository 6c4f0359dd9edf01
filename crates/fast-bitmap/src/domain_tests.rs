//! Regression tests for pixel addressing and Scale2x behaviour.
//!
//! Each test names the class of bug it guards against.

#[cfg(test)]
mod domain_tests {
    use crate::{expand_pixel, scale2x, scale2x_view, Bitmap, Color, PixelFormat, Rect};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const ALL_FORMATS: [PixelFormat; 5] = [
        PixelFormat::Rgb24,
        PixelFormat::Bgr24,
        PixelFormat::Bgrx32,
        PixelFormat::Rgba32,
        PixelFormat::Bgra32,
    ];

    fn random_bitmap(rng: &mut StdRng, width: u32, height: u32, format: PixelFormat) -> Bitmap {
        // A small palette makes equal neighbours common so the edge rules fire.
        let palette = [
            Color::BLACK,
            Color::WHITE,
            Color::RED,
            Color::from_argb(128, 0, 128, 255),
        ];
        let mut bitmap = Bitmap::new(width, height, format);
        {
            let mut pixels = bitmap.lock(None).unwrap();
            for y in 0..height {
                for x in 0..width {
                    let color = palette[rng.gen_range(0..palette.len())];
                    pixels.set_color_at(x, y, color).unwrap();
                }
            }
        }
        bitmap
    }

    fn reference_scale2x(source: &Bitmap) -> Vec<Vec<Color>> {
        let view = source.view(None).unwrap();
        let (w, h) = (view.width() as i64, view.height() as i64);
        let at = |x: i64, y: i64| {
            view.get_color_at(x.clamp(0, w - 1) as u32, y.clamp(0, h - 1) as u32)
                .unwrap()
        };
        let mut out = vec![vec![Color::TRANSPARENT; (w * 2) as usize]; (h * 2) as usize];
        for y in 0..h {
            for x in 0..w {
                let block = expand_pixel(
                    at(x, y),
                    at(x, y - 1),
                    at(x + 1, y),
                    at(x - 1, y),
                    at(x, y + 1),
                );
                let (ox, oy) = ((x * 2) as usize, (y * 2) as usize);
                out[oy][ox] = block[0];
                out[oy][ox + 1] = block[1];
                out[oy + 1][ox] = block[2];
                out[oy + 1][ox + 1] = block[3];
            }
        }
        out
    }

    fn pixels_of(bitmap: &Bitmap) -> Vec<Vec<Color>> {
        let view = bitmap.view(None).unwrap();
        (0..view.height())
            .map(|y| {
                (0..view.width())
                    .map(|x| view.get_color_at(x, y).unwrap())
                    .collect()
            })
            .collect()
    }

    // ========================================================================
    // Pixel access
    // ========================================================================

    /// If this breaks, a channel-offset table is wrong: set followed by get
    /// must return the RGB that was written, with alpha normalized to 255
    /// for formats that carry none.
    #[test]
    fn test_set_then_get_is_identity_for_every_format() {
        let color = Color::from_argb(40, 11, 22, 33);
        for format in ALL_FORMATS {
            let mut bitmap = Bitmap::new(3, 2, format);
            let mut pixels = bitmap.lock(None).unwrap();
            pixels.set_color_at(2, 1, color).unwrap();
            let read = pixels.get_color_at(2, 1).unwrap();

            assert_eq!((read.r, read.g, read.b), (11, 22, 33), "{}", format);
            let expected_alpha = if format.has_alpha() { 40 } else { 255 };
            assert_eq!(read.a, expected_alpha, "{}", format);
        }
    }

    /// If this breaks, a write leaked into a neighbouring pixel or the row
    /// padding because offsets were computed from width instead of stride.
    #[test]
    fn test_writes_stay_inside_their_pixel() {
        for format in ALL_FORMATS {
            let mut bitmap = Bitmap::new(3, 3, format);
            bitmap
                .lock(None)
                .unwrap()
                .set_color_at(1, 1, Color::WHITE)
                .unwrap();

            let touched = bitmap.data().iter().filter(|&&b| b != 0).count();
            let expected = if format.has_alpha() { 4 } else { 3 };
            assert_eq!(touched, expected, "{}", format);
        }
    }

    /// If this breaks, a sub-area lock ignores its origin.
    #[test]
    fn test_sub_area_lock_agrees_with_full_lock() {
        let mut rng = StdRng::seed_from_u64(3);
        let bitmap = random_bitmap(&mut rng, 7, 5, PixelFormat::Bgr24);
        let full = bitmap.view(None).unwrap();
        let area = bitmap.view(Some(Rect::new(2, 1, 4, 3))).unwrap();
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(
                    area.get_color_at(x, y).unwrap(),
                    full.get_color_at(x + 2, y + 1).unwrap()
                );
            }
        }
    }

    // ========================================================================
    // Scale2x
    // ========================================================================

    /// If this breaks, the output is not exactly double the input in both
    /// dimensions.
    #[test]
    fn test_scale2x_dimension_law() {
        for (w, h) in [(1, 1), (1, 7), (7, 1), (5, 3), (16, 9)] {
            let source = Bitmap::new(w, h, PixelFormat::Rgb24);
            let scaled = scale2x(&source).unwrap();
            assert_eq!((scaled.width(), scaled.height()), (w * 2, h * 2));
        }
    }

    /// If this breaks, an edge rule fired on a uniform image, which can only
    /// happen when neighbour lookups read outside the source (e.g. a wrong
    /// clamp pulling in padding bytes).
    #[test]
    fn test_scale2x_flat_region_invariant() {
        let color = Color::from_argb(200, 12, 34, 56);
        for format in ALL_FORMATS {
            let source = Bitmap::filled(5, 4, format, color);
            let expected = source.view(None).unwrap().get_color_at(0, 0).unwrap();
            let scaled = scale2x(&source).unwrap();
            assert!(
                pixels_of(&scaled).iter().flatten().all(|&c| c == expected),
                "{}",
                format
            );
        }
    }

    /// If this breaks, row bands are being written out of order or overlap
    /// when processed in parallel.
    #[test]
    fn test_scale2x_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(42);
        let source = random_bitmap(&mut rng, 37, 23, PixelFormat::Bgra32);
        let first = scale2x(&source).unwrap();
        let second = scale2x(&source).unwrap();
        assert_eq!(first.data(), second.data());
    }

    /// If this breaks, the row-banded implementation disagrees with a plain
    /// per-pixel evaluation of the four rules with edge clamping.
    #[test]
    fn test_scale2x_matches_reference_on_random_images() {
        let mut rng = StdRng::seed_from_u64(7);
        for format in [PixelFormat::Rgb24, PixelFormat::Bgra32] {
            for _ in 0..8 {
                let w = rng.gen_range(1..12);
                let h = rng.gen_range(1..12);
                let source = random_bitmap(&mut rng, w, h, format);
                let scaled = scale2x(&source).unwrap();
                assert_eq!(pixels_of(&scaled), reference_scale2x(&source));
            }
        }
    }

    /// 2x2 image with four distinct colors: no neighbour pair is ever equal
    /// across the rule's conditions, so every output block must be the
    /// center pixel unchanged.
    #[test]
    fn test_scale2x_distinct_checkerboard_is_nearest_neighbour() {
        let a = Color::from_rgb(10, 0, 0);
        let b = Color::from_rgb(0, 20, 0);
        let c = Color::from_rgb(0, 0, 30);
        let d = Color::from_rgb(40, 40, 40);

        let mut source = Bitmap::new(2, 2, PixelFormat::Rgb24);
        {
            let mut pixels = source.lock(None).unwrap();
            pixels.set_color_at(0, 0, a).unwrap();
            pixels.set_color_at(1, 0, b).unwrap();
            pixels.set_color_at(0, 1, c).unwrap();
            pixels.set_color_at(1, 1, d).unwrap();
        }

        let scaled = pixels_of(&scale2x(&source).unwrap());
        assert_eq!(
            scaled,
            vec![
                vec![a, a, b, b],
                vec![a, a, b, b],
                vec![c, c, d, d],
                vec![c, c, d, d],
            ]
        );
    }

    /// If this breaks, a padded source stride leaks into neighbour lookups.
    #[test]
    fn test_scale2x_ignores_source_padding() {
        // 2x2 RGB with 4 bytes of garbage padding per row
        let data = vec![
            1, 1, 1, 1, 1, 1, 0xEE, 0xEE, 0xEE, 0xEE, //
            1, 1, 1, 1, 1, 1, 0xEE, 0xEE, 0xEE, 0xEE,
        ];
        let source = Bitmap::from_raw(2, 2, 10, PixelFormat::Rgb24, data).unwrap();
        let scaled = scale2x(&source).unwrap();
        assert!(pixels_of(&scaled)
            .iter()
            .flatten()
            .all(|&c| c == Color::from_rgb(1, 1, 1)));
    }

    /// If this breaks, scaling a sub-area clamps against the parent bitmap
    /// instead of the area, pulling in pixels from outside it.
    #[test]
    fn test_scale2x_view_clamps_to_area() {
        let mut source = Bitmap::filled(4, 1, PixelFormat::Rgb24, Color::BLACK);
        source
            .lock(Some(Rect::new(1, 0, 2, 1)))
            .unwrap()
            .fill(Color::WHITE)
            .unwrap();

        let view = source.view(Some(Rect::new(1, 0, 2, 1))).unwrap();
        let scaled = scale2x_view(&view).unwrap();
        assert!(pixels_of(&scaled)
            .iter()
            .flatten()
            .all(|&c| c == Color::WHITE));
    }
}
