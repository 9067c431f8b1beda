/// Sine/cosine for every integer degree, built once at startup.
pub struct TrigTable {
    cos: [f32; 360],
    sin: [f32; 360],
}

impl TrigTable {
    pub fn new() -> Self {
        let mut cos = [0.0; 360];
        let mut sin = [0.0; 360];
        for deg in 0..360 {
            let rad = (deg as f64).to_radians();
            cos[deg] = rad.cos() as f32;
            sin[deg] = rad.sin() as f32;
        }
        Self { cos, sin }
    }

    #[inline]
    pub fn cos(&self, deg: i32) -> f32 {
        self.cos[wrap_degrees(deg) as usize]
    }

    #[inline]
    pub fn sin(&self, deg: i32) -> f32 {
        self.sin[wrap_degrees(deg) as usize]
    }
}

impl Default for TrigTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Wraps any angle into [0, 360).
#[inline]
pub fn wrap_degrees(deg: i32) -> i32 {
    deg.rem_euclid(360)
}
