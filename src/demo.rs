//! Built-in scene: four 32x32 boxes around the starting view.

use crate::framebuffer::Rgb;
use crate::texture::{Texture, TextureId, TextureSet};
use crate::world::{LevelData, Player, RawSector, RawWall, SurfacePaint, WallPaint};

const YELLOW: Rgb = Rgb::hex(0xFFFF00);
const GREEN: Rgb = Rgb::hex(0x00FF00);
const CYAN: Rgb = Rgb::hex(0x00FFFF);
const BROWN: Rgb = Rgb::hex(0xA06400);
const DARK_YELLOW: Rgb = Rgb::hex(0xA0A000);
const DARK_GREEN: Rgb = Rgb::hex(0x00A000);
const DARK_CYAN: Rgb = Rgb::hex(0x00A0A0);
const DARK_BROWN: Rgb = Rgb::hex(0x6E3200);

pub const BRICKS: TextureId = TextureId(0);
pub const FLAGSTONES: TextureId = TextureId(1);
pub const TILES: TextureId = TextureId(2);

/// Slots in the order `--texture` overrides them.
pub fn textures() -> TextureSet {
    let mut set = TextureSet::new();
    set.push(Texture::bricks(32, Rgb::hex(0x9C3A28), Rgb::hex(0xB8B0A0)));
    set.push(Texture::checker(16, 8, Rgb::hex(0x5A5A50), Rgb::hex(0x3C3C36)));
    set.push(Texture::checker(8, 4, Rgb::hex(0xE0E0D8), Rgb::hex(0xA8A8A0)));
    set
}

fn color(c: Rgb) -> WallPaint {
    WallPaint::Color(c)
}

fn bricks(shade: i32) -> WallPaint {
    WallPaint::Texture {
        id: BRICKS,
        u_scale: 1.0,
        v_scale: 1.0,
        shade,
    }
}

/// Counter-clockwise box walls starting at the south-west corner.
fn square(x: f32, y: f32, paints: [WallPaint; 4]) -> [RawWall; 4] {
    let s = 32.0;
    let corners = [(x, y), (x + s, y), (x + s, y + s), (x, y + s)];
    std::array::from_fn(|i| {
        let (x1, y1) = corners[i];
        let (x2, y2) = corners[(i + 1) % 4];
        RawWall {
            x1,
            y1,
            x2,
            y2,
            paint: paints[i],
        }
    })
}

pub fn level() -> LevelData {
    let boxes = [
        (0.0, 0.0, [color(YELLOW), color(DARK_YELLOW), color(YELLOW), color(DARK_YELLOW)]),
        (64.0, 0.0, [bricks(0), bricks(60), bricks(0), bricks(60)]),
        (64.0, 64.0, [color(CYAN), color(DARK_CYAN), color(CYAN), color(DARK_CYAN)]),
        (0.0, 64.0, [color(BROWN), color(DARK_BROWN), color(BROWN), color(DARK_BROWN)]),
    ];
    let walls: Vec<RawWall> = boxes
        .iter()
        .flat_map(|&(x, y, paints)| square(x, y, paints))
        .collect();

    let surfaces = [
        (SurfacePaint::Color(DARK_GREEN), SurfacePaint::Color(GREEN)),
        (
            SurfacePaint::Texture {
                id: FLAGSTONES,
                scale: 1.0,
            },
            SurfacePaint::Texture {
                id: TILES,
                scale: 0.5,
            },
        ),
        (SurfacePaint::Color(DARK_CYAN), SurfacePaint::Color(CYAN)),
        (SurfacePaint::Color(DARK_BROWN), SurfacePaint::Color(BROWN)),
    ];
    let sectors = surfaces
        .iter()
        .enumerate()
        .map(|(i, &(floor, ceiling))| RawSector {
            wall_start: i * 4,
            wall_end: i * 4 + 4,
            floor_z: 0.0,
            ceiling_z: 40.0,
            floor,
            ceiling,
        })
        .collect();

    LevelData {
        sectors,
        walls,
        player: Player::new(70.0, -110.0, 20.0, 0, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::World;

    #[test]
    fn builtin_level_loads() {
        let world = World::load(level(), &textures()).unwrap();
        assert_eq!(world.sectors.len(), 4);
        assert_eq!(world.walls.len(), 16);
        assert_eq!(world.sectors[3].walls, 12..16);
        assert_eq!(world.walls[5].start, [96.0, 0.0]);
        assert_eq!(world.walls[5].end, [96.0, 32.0]);
    }

    #[test]
    fn boxes_are_closed_loops() {
        let world = World::load(level(), &textures()).unwrap();
        for sector in &world.sectors {
            let walls = &world.walls[sector.walls.clone()];
            for (i, w) in walls.iter().enumerate() {
                assert_eq!(w.end, walls[(i + 1) % walls.len()].start);
            }
        }
    }
}
