/// 8-bit RGBA color.
///
/// Layout: 4 bytes in r, g, b, a order, so a `&[Rgba]` can be uploaded to
/// the GPU as packed `u32`s and unpacked with `unpack4x8unorm`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// From `0xRRGGBB`
    pub const fn from_hex(rgb: u32) -> Self {
        Self::opaque((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// From unit-range channels, truncating like a canvas byte store
    pub fn from_unit(r: f32, g: f32, b: f32) -> Self {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0) as u8;
        Self::opaque(byte(r), byte(g), byte(b))
    }
}

/// Anything a grid can be drawn onto
pub trait Surface {
    /// Replace the surface contents with a `width` x `height` image whose
    /// pixel at `(x, y)` is `pixel_at(x, y)`
    fn blit(&mut self, width: usize, height: usize, pixel_at: &dyn Fn(usize, usize) -> Rgba);
}

/// CPU-side row-major image
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl PixelBuffer {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

impl Surface for PixelBuffer {
    fn blit(&mut self, width: usize, height: usize, pixel_at: &dyn Fn(usize, usize) -> Rgba) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.reserve(width * height);
        for y in 0..height {
            for x in 0..width {
                self.pixels.push(pixel_at(x, y));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_size() {
        assert_eq!(std::mem::size_of::<Rgba>(), 4);
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgba::from_hex(0x1e90ff), Rgba::opaque(0x1e, 0x90, 0xff));
    }

    #[test]
    fn test_from_unit_truncates_and_clamps() {
        assert_eq!(Rgba::from_unit(0.5, 2.0, -1.0), Rgba::opaque(127, 255, 0));
    }

    #[test]
    fn test_blit_row_major() {
        let mut buffer = PixelBuffer::default();
        buffer.blit(3, 2, &|x, y| Rgba::opaque(x as u8, y as u8, 0));
        assert_eq!(buffer.pixels().len(), 6);
        assert_eq!(buffer.pixels()[4], Rgba::opaque(1, 1, 0));
        assert_eq!(buffer.pixel(2, 1), Some(Rgba::opaque(2, 1, 0)));
        assert_eq!(buffer.pixel(3, 0), None);
        assert_eq!(buffer.as_bytes().len(), 24);
        assert_eq!(&buffer.as_bytes()[16..20], &[1, 1, 0, 255]);
    }

    #[test]
    fn test_blit_resizes() {
        let mut buffer = PixelBuffer::default();
        buffer.blit(4, 4, &|_, _| Rgba::WHITE);
        buffer.blit(2, 1, &|_, _| Rgba::BLACK);
        assert_eq!((buffer.width(), buffer.height()), (2, 1));
        assert_eq!(buffer.pixels(), &[Rgba::BLACK, Rgba::BLACK]);
    }
}
