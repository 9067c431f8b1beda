use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

use crate::cli::Filter;
use crate::framebuffer::Framebuffer;

/// Precomputed mapping from dest pixels to src neighbors + weights
pub struct ScaleLut {
    x0: Vec<usize>,
    x1: Vec<usize>,
    wx: Vec<u16>,
    y0: Vec<usize>,
    y1: Vec<usize>,
    wy: Vec<u16>,
}

impl ScaleLut {
    pub fn empty() -> Self {
        Self {
            x0: Vec::new(),
            x1: Vec::new(),
            wx: Vec::new(),
            y0: Vec::new(),
            y1: Vec::new(),
            wy: Vec::new(),
        }
    }

    /// Destination size the table was built for.
    pub fn dst_size(&self) -> (usize, usize) {
        (self.x0.len(), self.y0.len())
    }
}

pub fn build_scale_lut(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> ScaleLut {
    let (x0, x1, wx) = axis_lut(dst_w, src_w);
    let (y0, y1, wy) = axis_lut(dst_h, src_h);
    ScaleLut {
        x0,
        x1,
        wx,
        y0,
        y1,
        wy,
    }
}

fn axis_lut(dst: usize, src: usize) -> (Vec<usize>, Vec<usize>, Vec<u16>) {
    let mut lo = vec![0; dst];
    let mut hi = vec![0; dst];
    let mut w = vec![0; dst];
    let step = src as f32 / dst as f32;
    let last = src.saturating_sub(1) as isize;

    for d in 0..dst {
        let f = d as f32 * step;
        let lo_val = (f.floor() as isize).clamp(0, last);
        let hi_val = (lo_val + 1).clamp(0, last);
        lo[d] = lo_val as usize;
        hi[d] = hi_val as usize;
        w[d] = ((f - lo_val as f32) * 256.0).round().clamp(0.0, 256.0) as u16; // fixed-point 8.8
    }
    (lo, hi, w)
}

/// softbuffer wants 0RGB in a u32
#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    (b as u32) | ((g as u32) << 8) | ((r as u32) << 16)
}

#[inline]
fn fetch(src: &[u8], i: usize) -> u32 {
    let p = i * 3;
    pack_rgb(src[p], src[p + 1], src[p + 2])
}

#[inline]
fn lerp_color_u32(a: u32, b: u32, w256: u32) -> u32 {
    // w256 in [0, 256]; inv = 256 - w256
    let inv = 256 - w256;
    // Interpolate R and B together (00RR00BB), with mask 0x00FF00FF,
    let rb = ((a & 0x00FF00FF) * inv + (b & 0x00FF00FF) * w256) >> 8 & 0x00FF00FF;
    // Interpolate G separately (0000GG00), with mask 0x0000FF00
    let g = ((a & 0x0000FF00) * inv + (b & 0x0000FF00) * w256) >> 8 & 0x0000FF00;
    rb | g // alpha stays 0
}

pub fn blit(dst: &mut [u32], dw: usize, src: &Framebuffer, lut: &ScaleLut, filter: Filter) {
    match filter {
        Filter::Nearest => blit_nearest(dst, dw, src, lut),
        Filter::Bilinear => blit_bilinear_stretch(dst, dw, src, lut),
    }
}

/// Parallel nearest-neighbour stretch, keeps the chunky pixel look
pub fn blit_nearest(dst: &mut [u32], dw: usize, src: &Framebuffer, lut: &ScaleLut) {
    let sw = src.width();
    let bytes = src.as_bytes();
    dst.par_chunks_mut(dw).enumerate().for_each(|(y, dst_row)| {
        let row = lut.y0[y] * sw;
        for (x, out) in dst_row.iter_mut().enumerate() {
            *out = fetch(bytes, row + lut.x0[x]);
        }
    });
}

/// Parallel bilinear stretch
/// Rows are processed in parallel for cache friendly writes
pub fn blit_bilinear_stretch(dst: &mut [u32], dw: usize, src: &Framebuffer, lut: &ScaleLut) {
    let sw = src.width();
    let bytes = src.as_bytes();
    dst.par_chunks_mut(dw).enumerate().for_each(|(y, dst_row)| {
        let wy = lut.wy[y] as u32;
        let row0 = lut.y0[y] * sw;
        let row1 = lut.y1[y] * sw;

        for (x, out) in dst_row.iter_mut().enumerate() {
            let x0 = lut.x0[x];
            let x1 = lut.x1[x];
            let wx = lut.wx[x] as u32;

            // read 4 neighbors
            let c00 = fetch(bytes, row0 + x0);
            let c10 = fetch(bytes, row0 + x1);
            let c01 = fetch(bytes, row1 + x0);
            let c11 = fetch(bytes, row1 + x1);

            // horizontal lerp
            let top = lerp_color_u32(c00, c10, wx);
            let bot = lerp_color_u32(c01, c11, wx);
            // vertical lerp
            *out = lerp_color_u32(top, bot, wy);
        }
    });
}
