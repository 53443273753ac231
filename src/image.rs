use crate::{Color, Rgba8};
use std::io::Write;

/// Width and height of an image in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    /// Width of the image
    pub width: usize,
    /// Height of the image
    pub height: usize,
    /// How many elements we need to skip to get to the next row.
    pub row_stride: usize,
    /// How many elements we need to skip to get to the next column.
    pub col_stride: usize,
}

impl Shape {
    #[inline]
    pub fn offset(&self, row: usize, col: usize) -> usize {
        row * self.row_stride + col * self.col_stride
    }

    #[inline]
    pub fn nth(&self, n: usize) -> Option<(usize, usize)> {
        if self.width == 0 {
            return None;
        }
        let row = n / self.width;
        let col = n - row * self.width;
        (row < self.height).then(move || (row, col))
    }

    pub fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }
}

pub trait Image {
    type Pixel;

    fn data(&self) -> &[Self::Pixel];

    fn shape(&self) -> Shape;

    fn width(&self) -> usize {
        self.shape().width
    }

    fn height(&self) -> usize {
        self.shape().height
    }

    fn get(&self, row: usize, col: usize) -> Option<&Self::Pixel> {
        if row >= self.height() || col >= self.width() {
            return None;
        }
        let offset = self.shape().offset(row, col);
        self.data().get(offset)
    }

    fn iter(&self) -> ImageIter<'_, Self::Pixel> {
        ImageIter {
            index: 0,
            shape: self.shape(),
            data: self.data(),
        }
    }

    /// Write image in the BMP format
    ///
    /// 32-bit BGRA with a V4 header so the alpha channel survives.
    /// BMP files store rows bottom-up which matches the buffer layout,
    /// so rows are streamed in storage order.
    fn write_bmp(&self, mut w: impl Write) -> std::io::Result<()>
    where
        Self::Pixel: Copy + Into<Rgba8>,
    {
        const FILE_HEADER: u32 = 14;
        const INFO_HEADER: u32 = 108;
        let shape = self.shape();
        let image_size = (shape.width * shape.height * 4) as u32;

        // BITMAPFILEHEADER
        w.write_all(b"BM")?;
        w.write_all(&(FILE_HEADER + INFO_HEADER + image_size).to_le_bytes())?;
        w.write_all(&0u32.to_le_bytes())?;
        w.write_all(&(FILE_HEADER + INFO_HEADER).to_le_bytes())?;

        // BITMAPV4HEADER
        w.write_all(&INFO_HEADER.to_le_bytes())?;
        w.write_all(&(shape.width as i32).to_le_bytes())?;
        // positive height means bottom-up pixel data
        w.write_all(&(shape.height as i32).to_le_bytes())?;
        w.write_all(&1u16.to_le_bytes())?; // planes
        w.write_all(&32u16.to_le_bytes())?; // bits per pixel
        w.write_all(&3u32.to_le_bytes())?; // BI_BITFIELDS
        w.write_all(&image_size.to_le_bytes())?;
        w.write_all(&2835i32.to_le_bytes())?; // x pixels per meter
        w.write_all(&2835i32.to_le_bytes())?; // y pixels per meter
        w.write_all(&0u32.to_le_bytes())?; // palette colors used
        w.write_all(&0u32.to_le_bytes())?; // important colors
        w.write_all(&0x00ff_0000u32.to_le_bytes())?; // red mask
        w.write_all(&0x0000_ff00u32.to_le_bytes())?; // green mask
        w.write_all(&0x0000_00ffu32.to_le_bytes())?; // blue mask
        w.write_all(&0xff00_0000u32.to_le_bytes())?; // alpha mask
        w.write_all(&0x57696E20u32.to_le_bytes())?; // LCS_WINDOWS_COLOR_SPACE
        w.write_all(&[0u8; 36])?; // CIEXYZ endpoints
        w.write_all(&0u32.to_le_bytes())?; // gamma red
        w.write_all(&0u32.to_le_bytes())?; // gamma green
        w.write_all(&0u32.to_le_bytes())?; // gamma blue

        let data = self.data();
        for row in 0..shape.height {
            for col in 0..shape.width {
                let pixel: Rgba8 = data[shape.offset(row, col)].into();
                let [r, g, b, a] = pixel.to_rgba();
                let bgra = ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32);
                w.write_all(&bgra.to_le_bytes())?;
            }
        }
        w.flush()
    }

    /// Write image in the PNG format (8-bit RGBA)
    ///
    /// PNG stores rows top-down while the buffer starts at the bottom
    /// row, so rows are emitted in reverse order.
    #[cfg(feature = "png")]
    fn write_png(&self, w: impl Write) -> Result<(), png::EncodingError>
    where
        Self::Pixel: Copy + Into<Rgba8>,
    {
        let shape = self.shape();
        let mut encoder = png::Encoder::new(w, shape.width as u32, shape.height as u32);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;

        let data = self.data();
        let mut pixels: Vec<Rgba8> = Vec::with_capacity(shape.width * shape.height);
        for row in (0..shape.height).rev() {
            for col in 0..shape.width {
                pixels.push(data[shape.offset(row, col)].into());
            }
        }
        writer.write_image_data(bytemuck::cast_slice(&pixels))?;
        writer.finish()
    }
}

pub struct ImageIter<'a, P> {
    index: usize,
    shape: Shape,
    data: &'a [P],
}

impl<'a, P> Iterator for ImageIter<'a, P> {
    type Item = &'a P;

    fn next(&mut self) -> Option<Self::Item> {
        self.nth(0)
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.index += n + 1;
        let (row, col) = self.shape.nth(self.index - 1)?;
        self.data.get(self.shape.offset(row, col))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageOwned<P> {
    shape: Shape,
    data: Vec<P>,
}

impl<P> ImageOwned<P> {
    pub fn new_with<F>(height: usize, width: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> P,
    {
        let mut data = Vec::with_capacity(height * width);
        for row in 0..height {
            for col in 0..width {
                data.push(f(row, col))
            }
        }
        Self {
            shape: Shape {
                width,
                height,
                row_stride: width,
                col_stride: 1,
            },
            data,
        }
    }
}

impl<P> Image for ImageOwned<P> {
    type Pixel = P;

    fn shape(&self) -> Shape {
        self.shape
    }

    fn data(&self) -> &[Self::Pixel] {
        &self.data
    }
}

impl std::fmt::Debug for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shape")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// Pixel grid produced by the rasterizers
///
/// Row-major grid of [`Color`] values. Row 0 is the **bottom** row of
/// the texture, matching the coordinate frame of the gradient formulas;
/// the image writers take care of the flip where the format needs it.
pub type PixelBuffer = ImageOwned<Color>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape() {
        let shape = Shape {
            width: 3,
            height: 2,
            row_stride: 3,
            col_stride: 1,
        };
        assert_eq!(shape.offset(0, 0), 0);
        assert_eq!(shape.offset(1, 2), 5);
        assert_eq!(shape.nth(0), Some((0, 0)));
        assert_eq!(shape.nth(4), Some((1, 1)));
        assert_eq!(shape.nth(6), None);
        assert_eq!(
            shape.size(),
            Size {
                width: 3,
                height: 2
            }
        );
    }

    #[test]
    fn test_new_with() {
        let img = ImageOwned::new_with(2, 3, |row, col| (row, col));
        assert_eq!(img.width(), 3);
        assert_eq!(img.height(), 2);
        assert_eq!(img.get(1, 2), Some(&(1, 2)));
        assert_eq!(img.get(2, 0), None);
        assert_eq!(img.get(0, 3), None);
        assert_eq!(img.iter().count(), 6);
        assert_eq!(img.data()[4], (1, 1));
    }

    #[test]
    fn test_write_bmp() -> std::io::Result<()> {
        let img: PixelBuffer =
            ImageOwned::new_with(2, 2, |_, _| Color::new(1.0, 0.0, 0.0, 1.0));
        let mut out = Vec::new();
        img.write_bmp(&mut out)?;
        assert_eq!(&out[..2], b"BM");
        assert_eq!(out.len(), 14 + 108 + 2 * 2 * 4);
        // first data pixel is BGRA little-endian: blue byte first
        assert_eq!(&out[122..126], &[0, 0, 255, 255]);
        Ok(())
    }

    #[cfg(feature = "png")]
    #[test]
    fn test_write_png() -> Result<(), png::EncodingError> {
        let img: PixelBuffer =
            ImageOwned::new_with(2, 2, |_, _| Color::new(0.0, 1.0, 0.0, 1.0));
        let mut out = Vec::new();
        img.write_png(&mut out)?;
        assert_eq!(&out[..8], &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n']);
        Ok(())
    }
}
