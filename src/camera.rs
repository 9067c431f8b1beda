use crate::trig::TrigTable;
use crate::world::Player;

/// Minimum renderable depth in camera space.
pub const NEAR: f32 = 1.0;

/// Look offset is applied as a shear of `look * depth / LOOK_DIVISOR`.
pub const LOOK_DIVISOR: f32 = 32.0;

/// A point in camera space: `x` right, `y` depth, `z` up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CamPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Screen-space trapezoid of one wall, in raster rows counted up from the bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallSpan {
    pub x1: i32,
    pub x2: i32,
    pub b1: i32, // bottom edge at x1
    pub b2: i32, // bottom edge at x2
    pub t1: i32, // top edge at x1
    pub t2: i32, // top edge at x2
    pub clipped: bool,
}

/// View of the world from one player pose, rebuilt every frame.
pub struct Camera {
    pub pos: [f32; 2], // (x, y) position in world space
    pub eye_z: f32,
    pub look: f32,
    pub cos: f32,
    pub sin: f32,
    pub fov: f32, // projection distance in pixels
    pub half_w: f32,
    pub half_h: f32,
}

impl Camera {
    pub fn new(player: &Player, trig: &TrigTable, fov: f32, width: usize, height: usize) -> Self {
        Self {
            pos: [player.x, player.y],
            eye_z: player.z,
            look: player.look as f32,
            cos: trig.cos(player.angle),
            sin: trig.sin(player.angle),
            fov,
            half_w: (width / 2) as f32,
            half_h: (height / 2) as f32,
        }
    }

    /// Translate by the eye position, then rotate by the facing angle. Returns (x, depth).
    #[inline]
    pub fn world_to_camera(&self, p: [f32; 2]) -> [f32; 2] {
        let dx = p[0] - self.pos[0];
        let dy = p[1] - self.pos[1];
        let cx = dx * self.cos - dy * self.sin;
        let cy = dy * self.cos + dx * self.sin;
        [cx, cy]
    }

    /// Inverse of [`Camera::world_to_camera`].
    #[inline]
    pub fn camera_to_world(&self, c: [f32; 2]) -> [f32; 2] {
        let dx = c[0] * self.cos + c[1] * self.sin;
        let dy = c[1] * self.cos - c[0] * self.sin;
        [dx + self.pos[0], dy + self.pos[1]]
    }

    /// Height relative to the eye, sheared by look in proportion to depth.
    #[inline]
    pub fn camera_z(&self, world_z: f32, depth: f32) -> f32 {
        (world_z - self.eye_z) + self.look * depth / LOOK_DIVISOR
    }

    /// Screen rows the look shear moves every point by.
    #[inline]
    pub fn look_shift(&self) -> f32 {
        self.look * self.fov / LOOK_DIVISOR
    }

    /// Perspective divide. `p.y` must already be at or beyond [`NEAR`].
    #[inline]
    pub fn project(&self, p: CamPoint) -> (i32, i32) {
        let sx = p.x * self.fov / p.y + self.half_w;
        let sy = p.z * self.fov / p.y + self.half_h;
        (sx as i32, sy as i32)
    }

    /// Projects the wall `start -> end` spanning heights `bottom..top`.
    ///
    /// Returns `None` when the wall lies entirely behind the near plane
    /// or a clip degenerates.
    pub fn project_wall(
        &self,
        start: [f32; 2],
        end: [f32; 2],
        bottom: f32,
        top: f32,
    ) -> Option<WallSpan> {
        let a = self.world_to_camera(start);
        let b = self.world_to_camera(end);

        // Trivial reject: both behind near plane
        if a[1] < NEAR && b[1] < NEAR {
            return None;
        }

        let point = |c: [f32; 2], z: f32| CamPoint {
            x: c[0],
            y: c[1],
            z: self.camera_z(z, c[1]),
        };
        let (mut b0, mut b1) = (point(a, bottom), point(b, bottom));
        let (mut t0, mut t1) = (point(a, top), point(b, top));

        let clipped = b0.y < NEAR || b1.y < NEAR;
        if b0.y < NEAR {
            b0 = clip_behind(b0, b1)?;
            t0 = clip_behind(t0, t1)?;
        }
        if b1.y < NEAR {
            b1 = clip_behind(b1, b0)?;
            t1 = clip_behind(t1, t0)?;
        }

        let (x1, bo1) = self.project(b0);
        let (x2, bo2) = self.project(b1);
        let (_, to1) = self.project(t0);
        let (_, to2) = self.project(t1);
        Some(WallSpan {
            x1,
            x2,
            b1: bo1,
            b2: bo2,
            t1: to1,
            t2: to2,
            clipped,
        })
    }
}

/// Moves `behind` along the segment toward `front` until it sits on the near plane.
///
/// `None` when both points share the same depth, which leaves no crossing.
pub fn clip_behind(behind: CamPoint, front: CamPoint) -> Option<CamPoint> {
    let d = front.y - behind.y;
    if d == 0.0 {
        return None;
    }
    let s = (NEAR - behind.y) / d;
    Some(CamPoint {
        x: behind.x + s * (front.x - behind.x),
        y: NEAR,
        z: behind.z + s * (front.z - behind.z),
    })
}
