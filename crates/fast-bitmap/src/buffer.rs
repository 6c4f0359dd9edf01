//! Locked, stride-aware views over raw pixel memory.
//!
//! [`PixelView`] gives read access and [`PixelBuffer`] read/write access to
//! a rectangle of pixels inside a byte buffer. Both address pixels as
//!
//! ```text
//! offset = origin + x * bytes_per_pixel + y * stride
//! ```
//!
//! where `origin` is the byte offset of the locked rectangle's top-left
//! pixel. Every access is bounds checked against the locked rectangle.
//!
//! A view borrows the memory it reads from, so the borrow checker plays the
//! role of the lock: while a [`PixelBuffer`] exists nothing else can read or
//! write the same bitmap, and the lock is released when the buffer is
//! dropped, on every exit path.

use crate::color::Color;
use crate::error::BitmapError;
use crate::format::{
    ChannelOffsets, PixelFormat, COLOR_INDEX_A, COLOR_INDEX_B, COLOR_INDEX_G, COLOR_INDEX_R,
};
use crate::geometry::Rect;

/// Addressing parameters shared by [`PixelView`] and [`PixelBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Layout {
    origin: usize,
    width: u32,
    height: u32,
    stride: usize,
    bpp: usize,
    offsets: ChannelOffsets,
    format: PixelFormat,
}

impl Layout {
    /// Validate a `full_width x full_height` image in `data_len` bytes and
    /// select `area` (the whole image when `None`).
    pub(crate) fn new(
        full_width: u32,
        full_height: u32,
        stride: usize,
        format: PixelFormat,
        data_len: usize,
        area: Option<Rect>,
    ) -> Result<Self, BitmapError> {
        let min_stride = format.min_stride(full_width);
        if stride < min_stride {
            return Err(BitmapError::InvalidLayout(format!(
                "stride {} is smaller than {} bytes needed for {} {} pixels",
                stride, min_stride, full_width, format
            )));
        }
        let required = required_len(full_height, stride, min_stride);
        if data_len < required {
            return Err(BitmapError::InvalidLayout(format!(
                "buffer holds {} bytes, {}x{} {} with stride {} needs {}",
                data_len, full_width, full_height, format, stride, required
            )));
        }

        let bounds = Rect::from_size(full_width as i32, full_height as i32);
        let area = match area {
            Some(area) => {
                let area = area.normalized();
                if !bounds.contains_rect(&area) {
                    return Err(BitmapError::InvalidArea {
                        area,
                        width: full_width,
                        height: full_height,
                    });
                }
                area
            }
            None => bounds,
        };

        let bpp = format.bytes_per_pixel();
        Ok(Self {
            origin: area.x as usize * bpp + area.y as usize * stride,
            width: area.width as u32,
            height: area.height as u32,
            stride,
            bpp,
            offsets: format.channel_offsets(),
            format,
        })
    }

    /// Byte offset of pixel (x, y) relative to the start of the buffer.
    #[inline]
    pub(crate) fn offset(&self, x: u32, y: u32) -> Result<usize, BitmapError> {
        if x >= self.width || y >= self.height {
            return Err(BitmapError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.origin + x as usize * self.bpp + y as usize * self.stride)
    }

    #[inline]
    fn read(&self, data: &[u8], x: u32, y: u32) -> Result<Color, BitmapError> {
        let at = self.offset(x, y)?;
        let o = &self.offsets;
        let a = match o.a {
            Some(a) => data[at + a],
            None => 255,
        };
        Ok(Color::from_argb(a, data[at + o.r], data[at + o.g], data[at + o.b]))
    }

    #[inline]
    fn read_bytes(&self, data: &[u8], x: u32, y: u32, out: &mut [u8]) -> Result<(), BitmapError> {
        check_channel_slice(out.len())?;
        let at = self.offset(x, y)?;
        let o = &self.offsets;
        out[COLOR_INDEX_R] = data[at + o.r];
        out[COLOR_INDEX_G] = data[at + o.g];
        out[COLOR_INDEX_B] = data[at + o.b];
        if out.len() > COLOR_INDEX_A {
            out[COLOR_INDEX_A] = match o.a {
                Some(a) => data[at + a],
                None => 255,
            };
        }
        Ok(())
    }
}

/// Bytes needed to hold `height` rows where the last row may omit padding.
fn required_len(height: u32, stride: usize, min_stride: usize) -> usize {
    if height == 0 {
        0
    } else {
        (height as usize - 1) * stride + min_stride
    }
}

fn check_channel_slice(len: usize) -> Result<(), BitmapError> {
    if len <= COLOR_INDEX_B {
        return Err(BitmapError::InvalidInput(format!(
            "color byte slice needs at least 3 entries, got {}",
            len
        )));
    }
    Ok(())
}

/// Read-only access to a locked pixel rectangle.
#[derive(Debug, Clone, Copy)]
pub struct PixelView<'a> {
    data: &'a [u8],
    layout: Layout,
}

impl<'a> PixelView<'a> {
    /// Lock foreign memory holding a `width x height` image for reading.
    pub fn from_raw(
        data: &'a [u8],
        width: u32,
        height: u32,
        stride: usize,
        format: PixelFormat,
    ) -> Result<Self, BitmapError> {
        let layout = Layout::new(width, height, stride, format, data.len(), None)?;
        Ok(Self { data, layout })
    }

    pub(crate) fn with_layout(data: &'a [u8], layout: Layout) -> Self {
        Self { data, layout }
    }

    /// Width of the locked rectangle.
    #[inline]
    pub fn width(&self) -> u32 {
        self.layout.width
    }

    /// Height of the locked rectangle.
    #[inline]
    pub fn height(&self) -> u32 {
        self.layout.height
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.layout.stride
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.layout.format
    }

    /// Color at (x, y). Formats without alpha report full opacity.
    #[inline]
    pub fn get_color_at(&self, x: u32, y: u32) -> Result<Color, BitmapError> {
        self.layout.read(self.data, x, y)
    }

    /// Copy the channels at (x, y) into `out`, indexed by the `COLOR_INDEX_*`
    /// constants. Alpha is filled in only when `out` has a fourth slot.
    #[inline]
    pub fn get_bytes_at(&self, x: u32, y: u32, out: &mut [u8]) -> Result<(), BitmapError> {
        self.layout.read_bytes(self.data, x, y, out)
    }
}

/// Read/write access to a locked pixel rectangle.
///
/// Writes go straight to the underlying memory; nothing is copied.
#[derive(Debug)]
pub struct PixelBuffer<'a> {
    data: &'a mut [u8],
    layout: Layout,
}

impl<'a> PixelBuffer<'a> {
    /// Lock foreign memory holding a `width x height` image for writing.
    ///
    /// ```
    /// use fast_bitmap::{Color, PixelBuffer, PixelFormat};
    ///
    /// let mut memory = vec![0u8; 2 * 8];
    /// let mut buffer = PixelBuffer::from_raw(&mut memory, 2, 2, 8, PixelFormat::Bgra32).unwrap();
    /// buffer.set_color_at(1, 0, Color::from_rgb(10, 20, 30)).unwrap();
    /// buffer.unlock();
    ///
    /// assert_eq!(&memory[4..8], &[30, 20, 10, 255]);
    /// ```
    pub fn from_raw(
        data: &'a mut [u8],
        width: u32,
        height: u32,
        stride: usize,
        format: PixelFormat,
    ) -> Result<Self, BitmapError> {
        let layout = Layout::new(width, height, stride, format, data.len(), None)?;
        Ok(Self { data, layout })
    }

    pub(crate) fn with_layout(data: &'a mut [u8], layout: Layout) -> Self {
        Self { data, layout }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.layout.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.layout.height
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.layout.stride
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.layout.format
    }

    /// Read-only view of the same rectangle.
    pub fn as_view(&self) -> PixelView<'_> {
        PixelView::with_layout(self.data, self.layout)
    }

    #[inline]
    pub fn get_color_at(&self, x: u32, y: u32) -> Result<Color, BitmapError> {
        self.layout.read(self.data, x, y)
    }

    #[inline]
    pub fn get_bytes_at(&self, x: u32, y: u32, out: &mut [u8]) -> Result<(), BitmapError> {
        self.layout.read_bytes(self.data, x, y, out)
    }

    /// Write `color` at (x, y). Alpha is dropped for formats without alpha.
    #[inline]
    pub fn set_color_at(&mut self, x: u32, y: u32, color: Color) -> Result<(), BitmapError> {
        let at = self.layout.offset(x, y)?;
        let o = self.layout.offsets;
        self.data[at + o.r] = color.r;
        self.data[at + o.g] = color.g;
        self.data[at + o.b] = color.b;
        if let Some(a) = o.a {
            self.data[at + a] = color.a;
        }
        Ok(())
    }

    /// Write channels from `color` (indexed by `COLOR_INDEX_*`) at (x, y).
    /// Alpha is written only when the format has alpha and `color` has a
    /// fourth slot.
    #[inline]
    pub fn set_bytes_at(&mut self, x: u32, y: u32, color: &[u8]) -> Result<(), BitmapError> {
        check_channel_slice(color.len())?;
        let at = self.layout.offset(x, y)?;
        let o = self.layout.offsets;
        self.data[at + o.r] = color[COLOR_INDEX_R];
        self.data[at + o.g] = color[COLOR_INDEX_G];
        self.data[at + o.b] = color[COLOR_INDEX_B];
        if let (Some(a), Some(&alpha)) = (o.a, color.get(COLOR_INDEX_A)) {
            self.data[at + a] = alpha;
        }
        Ok(())
    }

    /// Set every pixel of the locked rectangle to `color`.
    pub fn fill(&mut self, color: Color) -> Result<(), BitmapError> {
        for y in 0..self.height() {
            for x in 0..self.width() {
                self.set_color_at(x, y, color)?;
            }
        }
        Ok(())
    }

    /// Release the lock. Dropping the buffer has the same effect.
    pub fn unlock(self) {}
}
