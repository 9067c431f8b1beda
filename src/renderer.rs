use std::cmp::Ordering;

use crate::camera::{Camera, WallSpan};
use crate::framebuffer::{BACKGROUND, Framebuffer, Rgb};
use crate::texture::TextureSet;
use crate::trig::TrigTable;
use crate::world::{Sector, SurfacePaint, WallPaint, World};

/// Substitute for a zero row offset when mapping rows back onto a plane.
const DEPTH_EPSILON: f32 = 1e-4;

/// Which horizontal face of a sector is in view this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Plane {
    /// Eye below the floor: the floor's underside shows.
    Floor,
    /// Eye above the ceiling: the ceiling's top shows.
    Ceiling,
}

impl Plane {
    /// `None` while the eye sits between floor and ceiling.
    pub fn facing(sector: &Sector, eye_z: f32) -> Option<Self> {
        if eye_z < sector.floor_z {
            Some(Self::Floor)
        } else if eye_z > sector.ceiling_z() {
            Some(Self::Ceiling)
        } else {
            None
        }
    }
}

/// Per-sector state rebuilt from scratch at the start of every frame.
#[derive(Clone, Copy, Debug)]
struct SectorScratch {
    distance: f32,
    surface: Option<Plane>,
}

/// Wall edge heights per screen column, produced by a sector's first pass
/// and consumed by its surface fill.
pub struct ColumnCache {
    edges: Vec<Option<i32>>,
}

impl ColumnCache {
    fn new(width: usize) -> Self {
        Self {
            edges: vec![None; width],
        }
    }

    #[inline]
    fn get(&self, x: i32) -> Option<i32> {
        self.edges.get(x as usize).copied().flatten()
    }
}

/// Counters for one rendered frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub walls: usize,
    pub clipped: usize,
    pub culled: usize,
}

/// One rasterized column of a wall span. Rows count up from the bottom.
#[derive(Clone, Copy, Debug)]
struct Column {
    x: i32,
    bottom: i32,
    top: i32,
    raw_bottom: i32,
    raw_top: i32,
}

pub struct Renderer {
    trig: TrigTable,
    fov: f32,
    scratch: Vec<SectorScratch>,
}

impl Renderer {
    pub fn new(fov: f32) -> Self {
        Self {
            trig: TrigTable::new(),
            fov,
            scratch: Vec::new(),
        }
    }

    pub fn trig(&self) -> &TrigTable {
        &self.trig
    }

    pub fn render_frame(
        &mut self,
        fb: &mut Framebuffer,
        world: &World,
        textures: &TextureSet,
    ) -> FrameStats {
        fb.clear(BACKGROUND);

        let camera = Camera::new(
            &world.player,
            &self.trig,
            self.fov,
            fb.width(),
            fb.height(),
        );

        self.scratch.clear();
        self.scratch.extend(world.sectors.iter().map(|sector| SectorScratch {
            distance: sector_distance(&camera, world, sector),
            surface: Plane::facing(sector, camera.eye_z),
        }));

        let distances: Vec<f32> = self.scratch.iter().map(|s| s.distance).collect();
        let mut stats = FrameStats::default();
        for s in depth_order(&distances) {
            draw_sector(
                fb,
                &camera,
                world,
                &world.sectors[s],
                self.scratch[s].surface,
                textures,
                &mut stats,
            );
        }
        stats
    }
}

/// Mean camera-space distance from the eye to each wall's midpoint.
fn sector_distance(camera: &Camera, world: &World, sector: &Sector) -> f32 {
    let walls = &world.walls[sector.walls.clone()];
    let total: f32 = walls
        .iter()
        .map(|w| {
            let mid = [(w.start[0] + w.end[0]) * 0.5, (w.start[1] + w.end[1]) * 0.5];
            let m = camera.world_to_camera(mid);
            m[0].hypot(m[1])
        })
        .sum();
    total / walls.len() as f32
}

/// Sector indices farthest first. Equal distances keep their input order.
pub fn depth_order(distances: &[f32]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..distances.len()).collect();
    order.sort_by(|&a, &b| {
        distances[b]
            .partial_cmp(&distances[a])
            .unwrap_or(Ordering::Equal)
    });
    order
}

/// Two passes per sector.
///
/// The first walks every wall with its endpoints swapped, which exposes the
/// sector's far faces: they are drawn, or only measured into a
/// [`ColumnCache`] when a floor or ceiling is in view. The second walks the
/// walls as stored, fills the floor/ceiling band between the cached edge and
/// the near face, then draws the near face over it.
fn draw_sector(
    fb: &mut Framebuffer,
    camera: &Camera,
    world: &World,
    sector: &Sector,
    surface: Option<Plane>,
    textures: &TextureSet,
    stats: &mut FrameStats,
) {
    let walls = &world.walls[sector.walls.clone()];
    let (bottom, top) = (sector.floor_z, sector.ceiling_z());

    let cache = match surface {
        Some(plane) => {
            let mut cache = ColumnCache::new(fb.width());
            for wall in walls {
                if let Some(span) = camera.project_wall(wall.end, wall.start, bottom, top) {
                    record_edges(&span, plane, fb.width(), fb.height(), &mut cache);
                }
            }
            Some((plane, cache))
        }
        None => {
            for wall in walls {
                if let Some(span) = camera.project_wall(wall.end, wall.start, bottom, top) {
                    draw_wall(fb, &span, &wall.paint, textures);
                }
            }
            None
        }
    };

    for wall in walls {
        let Some(span) = camera.project_wall(wall.start, wall.end, bottom, top) else {
            stats.culled += 1;
            continue;
        };
        stats.walls += 1;
        if span.clipped {
            stats.clipped += 1;
        }
        if let Some((plane, cache)) = &cache {
            fill_surface(fb, camera, &span, sector, *plane, cache, textures);
        }
        draw_wall(fb, &span, &wall.paint, textures);
    }
}

#[inline]
fn span_width(span: &WallSpan) -> f32 {
    if span.x2 == span.x1 {
        1.0
    } else {
        span.x2 as f32 - span.x1 as f32
    }
}

/// Sweeps the on-screen columns of `span`, interpolating both edges.
fn columns(span: &WallSpan, width: usize, height: usize) -> impl Iterator<Item = Column> {
    let span = *span;
    let (w, h) = (width as i32, height as i32);
    let dx = span_width(&span);
    let dyb = span.b2 as f32 - span.b1 as f32;
    let dyt = span.t2 as f32 - span.t1 as f32;

    (span.x1.clamp(0, w)..span.x2.clamp(0, w)).map(move |x| {
        let t = (x as f32 - span.x1 as f32 + 0.5) / dx;
        let y1 = (dyb * t + span.b1 as f32) as i32;
        let y2 = (dyt * t + span.t1 as f32) as i32;
        Column {
            x,
            bottom: y1.clamp(0, h),
            top: y2.clamp(0, h),
            raw_bottom: y1,
            raw_top: y2,
        }
    })
}

/// Raster rows grow upward; storage rows grow downward.
#[inline]
fn plot(fb: &mut Framebuffer, x: i32, y: i32, color: Rgb) {
    let row = fb.height() as i32 - 1 - y;
    fb.set(x, row, color);
}

#[inline]
fn shade_factor(shade: i32) -> f32 {
    (1.0 - (shade as f32 / 2.0) * 0.01).max(0.0)
}

fn record_edges(
    span: &WallSpan,
    plane: Plane,
    width: usize,
    height: usize,
    cache: &mut ColumnCache,
) {
    for col in columns(span, width, height) {
        cache.edges[col.x as usize] = Some(match plane {
            Plane::Floor => col.bottom,
            Plane::Ceiling => col.top,
        });
    }
}

fn draw_wall(fb: &mut Framebuffer, span: &WallSpan, paint: &WallPaint, textures: &TextureSet) {
    let (width, height) = (fb.width(), fb.height());
    match *paint {
        WallPaint::Color(color) => {
            for col in columns(span, width, height) {
                for y in col.bottom..col.top {
                    plot(fb, col.x, y, color);
                }
            }
        }
        WallPaint::Texture {
            id,
            u_scale,
            v_scale,
            shade,
        } => {
            let tex = textures.get(id);
            let (tw, th) = (tex.width() as f32, tex.height() as i32);
            let shade = shade_factor(shade);
            let u_step = tw * u_scale / span_width(span);

            for col in columns(span, width, height) {
                let u = ((col.x as f32 - span.x1 as f32) * u_step) as i32;
                let mut dy = col.raw_top as f32 - col.raw_bottom as f32;
                if dy == 0.0 {
                    dy = 1.0;
                }
                let v_step = th as f32 * v_scale / dy;
                for y in col.bottom..col.top {
                    let v = ((y as f32 - col.raw_bottom as f32) * v_step) as i32;
                    // Image rows run top-down, wall rows bottom-up.
                    let texel = tex.sample(u, th - 1 - v.rem_euclid(th));
                    plot(fb, col.x, y, texel.scaled(shade));
                }
            }
        }
    }
}

/// Fills the band between the cached far edge and this span's near edge.
fn fill_surface(
    fb: &mut Framebuffer,
    camera: &Camera,
    span: &WallSpan,
    sector: &Sector,
    plane: Plane,
    cache: &ColumnCache,
    textures: &TextureSet,
) {
    let (paint, plane_z) = match plane {
        Plane::Floor => (sector.floor, sector.floor_z),
        Plane::Ceiling => (sector.ceiling, sector.ceiling_z()),
    };
    let rel_z = plane_z - camera.eye_z;

    for col in columns(span, fb.width(), fb.height()) {
        let Some(cached) = cache.get(col.x) else {
            continue;
        };
        let (lo, hi) = match plane {
            Plane::Floor => (cached, col.bottom),
            Plane::Ceiling => (col.top, cached),
        };
        for y in lo..hi {
            let color = match paint {
                SurfacePaint::Color(c) => c,
                SurfacePaint::Texture { id, scale } => {
                    let p = ground_point(camera, col.x, y, rel_z);
                    let tex = textures.get(id);
                    tex.sample((p[0] * scale).floor() as i32, (p[1] * scale).floor() as i32)
                }
            };
            plot(fb, col.x, y, color);
        }
    }
}

/// World (x, y) of the point on a horizontal plane `rel_z` above the eye
/// that projects to column `x`, raster row `y`.
fn ground_point(camera: &Camera, x: i32, y: i32, rel_z: f32) -> [f32; 2] {
    let mut z = (y as f32 - camera.half_h) - camera.look_shift();
    if z == 0.0 {
        z = DEPTH_EPSILON;
    }
    let depth = camera.fov * rel_z / z;
    let lateral = (x as f32 - camera.half_w) * rel_z / z;
    camera.camera_to_world([lateral, depth])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CamPoint;
    use crate::texture::{Texture, TextureId};
    use crate::world::{LevelData, Player, RawSector, RawWall};

    const W: usize = 320;
    const H: usize = 240;
    const SOUTH: Rgb = Rgb::hex(0xFF0000);
    const EAST: Rgb = Rgb::hex(0x00FF00);
    const NORTH: Rgb = Rgb::hex(0x0000FF);
    const WEST: Rgb = Rgb::hex(0xFFFF00);
    const FLOOR: Rgb = Rgb::hex(0x404040);
    const CEILING: Rgb = Rgb::hex(0xC0C0C0);

    /// Four walls, counter-clockwise from the south-west corner.
    fn box_walls(x0: f32, y0: f32, x1: f32, y1: f32) -> Vec<RawWall> {
        let wall = |ax, ay, bx, by, c| RawWall {
            x1: ax,
            y1: ay,
            x2: bx,
            y2: by,
            paint: WallPaint::Color(c),
        };
        vec![
            wall(x0, y0, x1, y0, SOUTH),
            wall(x1, y0, x1, y1, EAST),
            wall(x1, y1, x0, y1, NORTH),
            wall(x0, y1, x0, y0, WEST),
        ]
    }

    fn box_sector(wall_start: usize) -> RawSector {
        RawSector {
            wall_start,
            wall_end: wall_start + 4,
            floor_z: 0.0,
            ceiling_z: 40.0,
            floor: SurfacePaint::Color(FLOOR),
            ceiling: SurfacePaint::Color(CEILING),
        }
    }

    fn single_box(x0: f32, y0: f32, x1: f32, y1: f32, player: Player) -> World {
        let level = LevelData {
            sectors: vec![box_sector(0)],
            walls: box_walls(x0, y0, x1, y1),
            player,
        };
        World::load(level, &TextureSet::new()).unwrap()
    }

    /// Pixel at raster row `y` (counted up from the bottom).
    fn raster(fb: &Framebuffer, x: usize, y: usize) -> Rgb {
        fb.get(x, H - 1 - y).unwrap()
    }

    fn column_colors(fb: &Framebuffer, x: usize) -> Vec<Rgb> {
        (0..H).map(|y| raster(fb, x, y)).collect()
    }

    #[test]
    fn depth_order_is_descending() {
        assert_eq!(depth_order(&[5.0, 50.0, 1.0]), vec![1, 0, 2]);
    }

    #[test]
    fn depth_order_keeps_ties_in_place() {
        assert_eq!(depth_order(&[3.0, 7.0, 3.0, 7.0]), vec![1, 3, 0, 2]);
        assert_eq!(depth_order(&[2.0, 2.0, 2.0]), vec![0, 1, 2]);
    }

    #[test]
    fn plane_follows_eye_height() {
        let sector = Sector {
            floor_z: 10.0,
            height: 30.0,
            walls: 0..4,
            floor: SurfacePaint::Color(FLOOR),
            ceiling: SurfacePaint::Color(CEILING),
        };
        assert_eq!(Plane::facing(&sector, 5.0), Some(Plane::Floor));
        assert_eq!(Plane::facing(&sector, 10.0), None);
        assert_eq!(Plane::facing(&sector, 40.0), None);
        assert_eq!(Plane::facing(&sector, 41.0), Some(Plane::Ceiling));
    }

    #[test]
    fn frontal_wall_fills_exact_rows() {
        let mut fb = Framebuffer::new(W, H);
        fb.clear(BACKGROUND);
        let span = WallSpan {
            x1: 0,
            x2: W as i32,
            b1: 0,
            b2: 0,
            t1: 100,
            t2: 100,
            clipped: false,
        };
        draw_wall(&mut fb, &span, &WallPaint::Color(SOUTH), &TextureSet::new());
        for x in 0..W {
            for y in 0..H {
                let expected = if y < 100 { SOUTH } else { BACKGROUND };
                assert_eq!(raster(&fb, x, y), expected, "column {x} row {y}");
            }
        }
    }

    #[test]
    fn columns_outside_span_are_untouched() {
        let mut fb = Framebuffer::new(W, H);
        fb.clear(BACKGROUND);
        let span = WallSpan {
            x1: -10,
            x2: 5,
            b1: -50,
            b2: -50,
            t1: 300,
            t2: 300,
            clipped: false,
        };
        draw_wall(&mut fb, &span, &WallPaint::Color(SOUTH), &TextureSet::new());
        for x in 0..W {
            let hit = column_colors(&fb, x).iter().all(|&c| c == SOUTH);
            let clear = column_colors(&fb, x).iter().all(|&c| c == BACKGROUND);
            if x < 5 {
                assert!(hit, "column {x} should be fully covered");
            } else {
                assert!(clear, "column {x} should be untouched");
            }
        }
    }

    #[test]
    fn back_facing_span_draws_nothing() {
        let mut fb = Framebuffer::new(W, H);
        fb.clear(BACKGROUND);
        let span = WallSpan {
            x1: 200,
            x2: 100,
            b1: 0,
            b2: 0,
            t1: 100,
            t2: 100,
            clipped: false,
        };
        draw_wall(&mut fb, &span, &WallPaint::Color(SOUTH), &TextureSet::new());
        assert!(fb.as_bytes().chunks(3).all(|p| p == [BACKGROUND.r, BACKGROUND.g, BACKGROUND.b]));
    }

    #[test]
    fn textured_wall_applies_shade() {
        let mut textures = TextureSet::new();
        let grey = Rgb::new(200, 200, 200);
        let id = textures.push(Texture::checker(8, 4, grey, grey));
        let mut fb = Framebuffer::new(W, H);
        let span = WallSpan {
            x1: 10,
            x2: 20,
            b1: 10,
            b2: 10,
            t1: 20,
            t2: 20,
            clipped: false,
        };
        let paint = WallPaint::Texture {
            id,
            u_scale: 1.0,
            v_scale: 1.0,
            shade: 40,
        };
        draw_wall(&mut fb, &span, &paint, &textures);
        assert_eq!(raster(&fb, 15, 15), Rgb::new(160, 160, 160));
        assert_eq!(shade_factor(400), 0.0);
    }

    #[test]
    fn textured_wall_tiles_horizontally() {
        // 4x1 strip: one texel per wall column at u_scale 1 over a 4-column span.
        let strip =
            Texture::from_rgb(4, 1, vec![10, 0, 0, 20, 0, 0, 30, 0, 0, 40, 0, 0]).unwrap();
        let mut textures = TextureSet::new();
        let id = textures.push(strip);
        let mut fb = Framebuffer::new(W, H);
        let span = WallSpan {
            x1: 0,
            x2: 4,
            b1: 0,
            b2: 0,
            t1: 2,
            t2: 2,
            clipped: false,
        };
        let paint = WallPaint::Texture {
            id,
            u_scale: 2.0,
            v_scale: 1.0,
            shade: 0,
        };
        draw_wall(&mut fb, &span, &paint, &textures);
        let reds: Vec<u8> = (0..4).map(|x| raster(&fb, x, 0).r).collect();
        assert_eq!(reds, vec![10, 30, 10, 30]);
    }

    #[test]
    fn textured_wall_tiles_vertically_upright() {
        // 1x2: red top row, blue bottom row.
        let strip = Texture::from_rgb(1, 2, vec![255, 0, 0, 0, 0, 255]).unwrap();
        let mut textures = TextureSet::new();
        let id = textures.push(strip);
        let mut fb = Framebuffer::new(W, H);
        let span = WallSpan {
            x1: 0,
            x2: 1,
            b1: 0,
            b2: 0,
            t1: 4,
            t2: 4,
            clipped: false,
        };
        let paint = WallPaint::Texture {
            id,
            u_scale: 1.0,
            v_scale: 2.0,
            shade: 0,
        };
        draw_wall(&mut fb, &span, &paint, &textures);
        let blue = Rgb::new(0, 0, 255);
        let red = Rgb::new(255, 0, 0);
        let rows: Vec<Rgb> = (0..4).map(|y| raster(&fb, 0, y)).collect();
        assert_eq!(rows, vec![blue, red, blue, red]);
    }

    #[test]
    fn ground_point_reprojects_to_its_pixel() {
        let trig = TrigTable::new();
        let player = Player::new(12.0, -30.0, 20.0, 33, 3);
        let cam = Camera::new(&player, &trig, 200.0, W, H);
        let (x, y) = (200, 40);
        let p = ground_point(&cam, x, y, -20.0);
        let c = cam.world_to_camera(p);
        let (sx, sy) = cam.project(CamPoint {
            x: c[0],
            y: c[1],
            z: cam.camera_z(0.0, c[1]),
        });
        assert!((sx - x).abs() <= 1 && (sy - y).abs() <= 1, "{sx},{sy}");
    }

    #[test]
    fn box_seen_from_front_is_not_clipped() {
        let world = single_box(0.0, 0.0, 32.0, 32.0, Player::new(16.0, -110.0, 20.0, 0, 0));
        let mut fb = Framebuffer::new(W, H);
        let stats = Renderer::new(200.0).render_frame(&mut fb, &world, &TextureSet::new());
        assert_eq!(
            stats,
            FrameStats {
                walls: 4,
                clipped: 0,
                culled: 0
            }
        );
        // Near face straddles the horizon at the centre column.
        assert_eq!(raster(&fb, W / 2, H / 2), SOUTH);
        assert_eq!(raster(&fb, 0, H / 2), BACKGROUND);
    }

    #[test]
    fn box_seen_from_centre_covers_every_column() {
        let world = single_box(-50.0, -50.0, 50.0, 50.0, Player::new(0.0, 0.0, 20.0, 0, 0));
        let mut fb = Framebuffer::new(W, H);
        let stats = Renderer::new(200.0).render_frame(&mut fb, &world, &TextureSet::new());
        for x in 0..W {
            assert!(
                column_colors(&fb, x).iter().any(|&c| c != BACKGROUND),
                "column {x} left empty"
            );
        }
        // Far wall at depth 50: rows [40, 200).
        assert_eq!(raster(&fb, W / 2, 100), NORTH);
        assert_eq!(raster(&fb, W / 2, 39), BACKGROUND);
        assert_eq!(raster(&fb, W / 2, 200), BACKGROUND);
        // Side walls cross the near plane, the wall behind is culled.
        assert_eq!(stats.clipped, 2);
        assert_eq!(stats.culled, 1);
    }

    #[test]
    fn ceiling_fill_covers_box_top() {
        let world = single_box(0.0, 0.0, 32.0, 32.0, Player::new(16.0, -110.0, 100.0, 0, 0));
        let mut fb = Framebuffer::new(W, H);
        Renderer::new(200.0).render_frame(&mut fb, &world, &TextureSet::new());

        let mut filled = 0;
        for x in 0..W {
            let col = column_colors(&fb, x);
            let has_wall = col.contains(&SOUTH);
            let ceiling_rows: Vec<usize> = (0..H).filter(|&y| col[y] == CEILING).collect();
            if !has_wall {
                assert!(ceiling_rows.is_empty(), "stray ceiling in column {x}");
                continue;
            }
            // The top face sits directly above the near wall.
            let wall_top = (0..H).filter(|&y| col[y] == SOUTH).max().unwrap();
            if let Some(&first) = ceiling_rows.first() {
                assert_eq!(first, wall_top + 1, "gap above wall in column {x}");
                filled += 1;
            }
            if (135..=185).contains(&x) {
                assert!(!ceiling_rows.is_empty(), "column {x} missing its ceiling");
            }
        }
        assert!(filled >= 51);
        // Eye above the box never sees the far faces.
        assert!(fb.as_bytes().chunks(3).all(|p| p != [NORTH.r, NORTH.g, NORTH.b]));
    }

    #[test]
    fn floor_fill_samples_floor_texture() {
        let a = Rgb::hex(0x112233);
        let b = Rgb::hex(0x445566);
        let mut textures = TextureSet::new();
        let id = textures.push(Texture::checker(8, 4, a, b));
        let mut walls = box_walls(0.0, 0.0, 32.0, 32.0);
        for w in &mut walls {
            w.paint = WallPaint::Color(SOUTH);
        }
        let mut sector = box_sector(0);
        sector.floor = SurfacePaint::Texture {
            id: TextureId(0),
            scale: 1.0,
        };
        let level = LevelData {
            sectors: vec![sector],
            walls,
            player: Player::new(16.0, -110.0, -30.0, 0, 0),
        };
        let world = World::load(level, &textures).unwrap();
        assert_eq!(id, TextureId(0));

        let mut fb = Framebuffer::new(W, H);
        Renderer::new(200.0).render_frame(&mut fb, &world, &textures);

        let mut seen = (false, false);
        for px in fb.as_bytes().chunks(3) {
            let c = Rgb::new(px[0], px[1], px[2]);
            assert!(c == a || c == b || c == SOUTH || c == BACKGROUND);
            seen.0 |= c == a;
            seen.1 |= c == b;
        }
        assert!(seen.0 && seen.1, "floor texture should tile across the band");
        // Floor underside sits directly below the near wall at the centre column.
        let col = column_colors(&fb, W / 2);
        let wall_bottom = (0..H).filter(|&y| col[y] == SOUTH).min().unwrap();
        assert!(col[wall_bottom - 1] == a || col[wall_bottom - 1] == b);
    }

    #[test]
    fn near_sector_is_painted_over_far_sector() {
        let mut walls = box_walls(0.0, 0.0, 32.0, 32.0);
        for w in &mut walls {
            w.paint = WallPaint::Color(EAST);
        }
        walls.extend(box_walls(0.0, 100.0, 32.0, 132.0));
        // Near box listed first: only the depth sort keeps it on top.
        let level = LevelData {
            sectors: vec![box_sector(0), box_sector(4)],
            walls,
            player: Player::new(16.0, -110.0, 20.0, 0, 0),
        };
        let world = World::load(level, &TextureSet::new()).unwrap();
        let mut fb = Framebuffer::new(W, H);
        Renderer::new(200.0).render_frame(&mut fb, &world, &TextureSet::new());
        assert_eq!(raster(&fb, W / 2, H / 2), EAST);
    }

    #[test]
    fn scratch_is_rebuilt_each_frame() {
        let mut world = single_box(0.0, 0.0, 32.0, 32.0, Player::new(16.0, -110.0, 100.0, 0, 0));
        let mut renderer = Renderer::new(200.0);
        let mut fb = Framebuffer::new(W, H);
        renderer.render_frame(&mut fb, &world, &TextureSet::new());
        assert!(fb.as_bytes().chunks(3).any(|p| p == [CEILING.r, CEILING.g, CEILING.b]));

        world.player.z = 20.0;
        renderer.render_frame(&mut fb, &world, &TextureSet::new());
        assert!(fb.as_bytes().chunks(3).all(|p| p != [CEILING.r, CEILING.g, CEILING.b]));
        assert_eq!(renderer.scratch.len(), 1);
        assert_eq!(renderer.scratch[0].surface, None);
    }
}
