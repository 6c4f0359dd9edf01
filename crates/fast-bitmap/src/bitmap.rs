//! Owned bitmap memory with scoped pixel locks.

use crate::buffer::{Layout, PixelBuffer, PixelView};
use crate::color::Color;
use crate::error::BitmapError;
use crate::format::PixelFormat;
use crate::geometry::Rect;

/// An owned, row-major image in one of the supported [`PixelFormat`]s.
///
/// Rows may be padded: `stride` is the byte distance between the starts of
/// consecutive rows and can exceed `width * bytes_per_pixel`.
///
/// Pixel access goes through a lock:
///
/// ```
/// use fast_bitmap::{Bitmap, Color, PixelFormat, Rect};
///
/// let mut bitmap = Bitmap::new(4, 4, PixelFormat::Bgrx32);
/// {
///     let mut pixels = bitmap.lock(Some(Rect::new(1, 1, 2, 2))).unwrap();
///     pixels.fill(Color::RED).unwrap();
/// } // unlocked here
///
/// let view = bitmap.view(None).unwrap();
/// assert_eq!(view.get_color_at(1, 1).unwrap(), Color::RED);
/// assert_eq!(view.get_color_at(0, 0).unwrap(), Color::BLACK);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    stride: usize,
    format: PixelFormat,
    data: Vec<u8>,
}

impl Bitmap {
    /// Zero-filled bitmap with rows padded to a 4-byte boundary.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        let stride = format.aligned_stride(width);
        Self {
            width,
            height,
            stride,
            format,
            data: vec![0; stride * height as usize],
        }
    }

    /// Bitmap with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, format: PixelFormat, color: Color) -> Self {
        let mut bitmap = Self::new(width, height, format);
        bitmap.fill(color);
        bitmap
    }

    /// Take ownership of existing pixel memory.
    ///
    /// Fails with [`BitmapError::InvalidLayout`] when `stride` cannot hold a
    /// row or `data` is too short for `height` rows.
    pub fn from_raw(
        width: u32,
        height: u32,
        stride: usize,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Result<Self, BitmapError> {
        Layout::new(width, height, stride, format, data.len(), None)?;
        Ok(Self {
            width,
            height,
            stride,
            format,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Rectangle covering the whole bitmap.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width as i32, self.height as i32)
    }

    /// Raw pixel memory, including row padding.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the bitmap, returning its pixel memory.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    fn layout(&self, area: Option<Rect>) -> Result<Layout, BitmapError> {
        Layout::new(
            self.width,
            self.height,
            self.stride,
            self.format,
            self.data.len(),
            area,
        )
    }

    /// Lock `area` (or the whole bitmap) for reading and writing.
    pub fn lock(&mut self, area: Option<Rect>) -> Result<PixelBuffer<'_>, BitmapError> {
        let layout = self.layout(area)?;
        Ok(PixelBuffer::with_layout(&mut self.data, layout))
    }

    /// Lock with a specific accessor variant.
    ///
    /// Fails with [`BitmapError::UnsupportedFormat`] when the bitmap is not
    /// stored in `format`, e.g. when an opaque 32-bit accessor is requested
    /// for a bitmap that carries alpha.
    pub fn lock_as(
        &mut self,
        area: Option<Rect>,
        format: PixelFormat,
    ) -> Result<PixelBuffer<'_>, BitmapError> {
        if self.format != format {
            return Err(BitmapError::UnsupportedFormat {
                expected: format,
                actual: self.format,
            });
        }
        self.lock(area)
    }

    /// Lock `area` (or the whole bitmap) for reading.
    pub fn view(&self, area: Option<Rect>) -> Result<PixelView<'_>, BitmapError> {
        let layout = self.layout(area)?;
        Ok(PixelView::with_layout(&self.data, layout))
    }

    fn fill(&mut self, color: Color) {
        let bpp = self.format.bytes_per_pixel();
        let o = self.format.channel_offsets();
        let row_bytes = self.format.min_stride(self.width);
        if row_bytes == 0 {
            return;
        }
        for row in self.data.chunks_mut(self.stride) {
            for pixel in row[..row_bytes].chunks_exact_mut(bpp) {
                pixel[o.r] = color.r;
                pixel[o.g] = color.g;
                pixel[o.b] = color.b;
                if let Some(a) = o.a {
                    pixel[a] = color.a;
                }
            }
        }
    }

    /// Copy into a new bitmap stored as `format`.
    ///
    /// Alpha becomes 255 when the source has none and is dropped when the
    /// target has none.
    pub fn convert(&self, format: PixelFormat) -> Result<Bitmap, BitmapError> {
        if format == self.format {
            return Ok(self.clone());
        }
        let source = self.view(None)?;
        let mut target = Bitmap::new(self.width, self.height, format);
        {
            let mut out = target.lock(None)?;
            let mut channels = [0u8; 4];
            for y in 0..self.height {
                for x in 0..self.width {
                    source.get_bytes_at(x, y, &mut channels)?;
                    out.set_bytes_at(x, y, &channels)?;
                }
            }
        }
        Ok(target)
    }
}
