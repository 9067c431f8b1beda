use std::path::Path;

use anyhow::{Context, Result};

use crate::error::TextureError;
use crate::framebuffer::Rgb;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextureId(pub usize);

/// RGB texels, row-major, top row first.
pub struct Texture {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Texture {
    pub fn from_rgb(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::ZeroSize);
        }
        let expected = width * height * 3;
        if pixels.len() != expected {
            return Err(TextureError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Decodes any image format the `image` crate understands.
    pub fn open(path: &Path) -> Result<Self> {
        let img = image::open(path)
            .with_context(|| format!("failed to open texture {}", path.display()))?
            .to_rgb8();
        let (w, h) = (img.width() as usize, img.height() as usize);
        let texture = Self::from_rgb(w, h, img.into_raw())
            .with_context(|| format!("bad texture {}", path.display()))?;
        Ok(texture)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Tiled lookup: both coordinates wrap, negatives included.
    #[inline]
    pub fn sample(&self, u: i32, v: i32) -> Rgb {
        let x = u.rem_euclid(self.width as i32) as usize;
        let y = v.rem_euclid(self.height as i32) as usize;
        let i = (y * self.width + x) * 3;
        Rgb::new(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2])
    }

    fn generate(width: usize, height: usize, texel: impl Fn(usize, usize) -> Rgb) -> Self {
        let mut pixels = Vec::with_capacity(width * height * 3);
        for y in 0..height {
            for x in 0..width {
                let c = texel(x, y);
                pixels.extend_from_slice(&[c.r, c.g, c.b]);
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Two-colour checkerboard with square cells of `cell` texels.
    pub fn checker(size: usize, cell: usize, a: Rgb, b: Rgb) -> Self {
        let cell = cell.max(1);
        Self::generate(size.max(1), size.max(1), |x, y| {
            if (x / cell + y / cell) % 2 == 0 { a } else { b }
        })
    }

    /// Running-bond bricks, 4 rows per texture, one texel of mortar.
    pub fn bricks(size: usize, brick: Rgb, mortar: Rgb) -> Self {
        let size = size.max(4);
        let course = size / 4;
        let half = size / 2;
        Self::generate(size, size, |x, y| {
            let row = y / course;
            let offset = if row % 2 == 0 { 0 } else { half / 2 };
            let bx = (x + offset) % half;
            if y % course == 0 || bx == 0 {
                mortar
            } else {
                brick
            }
        })
    }
}

/// Owns every texture a level can reference.
#[derive(Default)]
pub struct TextureSet {
    textures: Vec<Texture>,
}

impl TextureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, texture: Texture) -> TextureId {
        self.textures.push(texture);
        TextureId(self.textures.len() - 1)
    }

    /// Swaps in `texture` at `id`, or appends if `id` is past the end.
    pub fn replace(&mut self, id: TextureId, texture: Texture) -> TextureId {
        match self.textures.get_mut(id.0) {
            Some(slot) => {
                *slot = texture;
                id
            }
            None => self.push(texture),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    #[inline]
    pub fn contains(&self, id: TextureId) -> bool {
        id.0 < self.textures.len()
    }

    /// Ids are validated when the level loads.
    #[inline]
    pub fn get(&self, id: TextureId) -> &Texture {
        &self.textures[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient() -> Texture {
        let (w, h) = (5, 3);
        let mut px = Vec::new();
        for y in 0..h {
            for x in 0..w {
                px.extend_from_slice(&[x as u8 * 10, y as u8 * 10, 0]);
            }
        }
        Texture::from_rgb(w, h, px).unwrap()
    }

    #[test]
    fn rejects_bad_dimensions() {
        assert_eq!(
            Texture::from_rgb(0, 4, vec![]).err(),
            Some(TextureError::ZeroSize)
        );
        assert_eq!(
            Texture::from_rgb(2, 2, vec![0; 11]).err(),
            Some(TextureError::SizeMismatch {
                expected: 12,
                actual: 11
            })
        );
    }

    #[test]
    fn horizontal_offsets_by_whole_widths_wrap() {
        let t = gradient();
        for k in -3..=3 {
            for u in 0..5 {
                assert_eq!(t.sample(u + 5 * k, 1), t.sample(u, 1), "u={u} k={k}");
            }
        }
    }

    #[test]
    fn vertical_wrap_and_negative_coordinates() {
        let t = gradient();
        assert_eq!(t.sample(2, 3), t.sample(2, 0));
        assert_eq!(t.sample(-1, -1), Rgb::new(40, 20, 0));
    }

    #[test]
    fn checker_alternates() {
        let a = Rgb::new(255, 0, 0);
        let b = Rgb::new(0, 0, 255);
        let t = Texture::checker(8, 4, a, b);
        assert_eq!(t.sample(0, 0), a);
        assert_eq!(t.sample(4, 0), b);
        assert_eq!(t.sample(4, 4), a);
    }

    #[test]
    fn replace_past_end_appends() {
        let mut set = TextureSet::new();
        let first = set.push(gradient());
        assert_eq!(set.replace(first, gradient()), first);
        assert_eq!(set.replace(TextureId(9), gradient()), TextureId(1));
        assert_eq!(set.len(), 2);
        assert!(set.contains(TextureId(1)));
        assert!(!set.contains(TextureId(2)));
    }
}
