use std::mem;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// From a `0xRRGGBB` literal.
    pub const fn hex(v: u32) -> Self {
        Self::new((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    /// Scales every channel by `factor`, saturating at 0 and 255.
    #[inline]
    pub fn scaled(self, factor: f32) -> Self {
        let f = factor.max(0.0);
        let ch = |c: u8| (c as f32 * f).round().clamp(0.0, 255.0) as u8;
        Self::new(ch(self.r), ch(self.g), ch(self.b))
    }
}

pub const BACKGROUND: Rgb = Rgb::hex(0x003C82);

/// Row-major RGB pixels, three bytes per pixel, origin top-left.
pub struct Framebuffer {
    pixels: Vec<u8>,
    width: usize,
    height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 3],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self, color: Rgb) {
        for px in self.pixels.chunks_exact_mut(3) {
            px.copy_from_slice(&[color.r, color.g, color.b]);
        }
    }

    /// Writes one pixel. Coordinates outside the buffer are ignored.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: Rgb) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let i = (y as usize * self.width + x as usize) * 3;
        self.pixels[i] = color.r;
        self.pixels[i + 1] = color.g;
        self.pixels[i + 2] = color.b;
    }

    #[cfg(test)]
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 3;
        Some(Rgb::new(
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
        ))
    }

    /// The whole frame as `width * height * 3` bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }
}

/// Two frames: the last completed one and the one being rasterized.
pub struct FrameChain {
    front: Framebuffer,
    back: Framebuffer,
}

impl FrameChain {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            front: Framebuffer::new(width, height),
            back: Framebuffer::new(width, height),
        }
    }

    /// Last completed frame, safe to hand to the display.
    #[inline]
    pub fn front(&self) -> &Framebuffer {
        &self.front
    }

    /// Frame to render into next.
    #[inline]
    pub fn back_mut(&mut self) -> &mut Framebuffer {
        &mut self.back
    }

    /// Publishes the back frame. Call only between frames.
    pub fn swap(&mut self) {
        mem::swap(&mut self.front, &mut self.back);
    }
}
