use std::ops::Range;

use crate::error::LevelError;
use crate::framebuffer::Rgb;
use crate::texture::{TextureId, TextureSet};
use crate::trig::wrap_degrees;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32, // forward axis of the floor plan
    pub z: f32, // eye height
    pub angle: i32, // degrees, [0, 360)
    pub look: i32,
}

impl Player {
    pub fn new(x: f32, y: f32, z: f32, angle: i32, look: i32) -> Self {
        Self {
            x,
            y,
            z,
            angle: wrap_degrees(angle),
            look,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WallPaint {
    Color(Rgb),
    Texture {
        id: TextureId,
        u_scale: f32,
        v_scale: f32,
        shade: i32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfacePaint {
    Color(Rgb),
    /// `scale` is texels per world unit.
    Texture { id: TextureId, scale: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wall {
    pub start: [f32; 2], // (x, y) start point in world space
    pub end: [f32; 2],   // (x, y) end point in world space
    pub paint: WallPaint,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sector {
    pub floor_z: f32,
    pub height: f32, // ceiling above floor_z, never negative
    pub walls: Range<usize>,
    pub floor: SurfacePaint,
    pub ceiling: SurfacePaint,
}

impl Sector {
    #[inline]
    pub fn ceiling_z(&self) -> f32 {
        self.floor_z + self.height
    }
}

/// One sector row as the level loader hands it over.
#[derive(Clone, Copy, Debug)]
pub struct RawSector {
    pub wall_start: usize,
    pub wall_end: usize,
    pub floor_z: f32,
    pub ceiling_z: f32, // absolute
    pub floor: SurfacePaint,
    pub ceiling: SurfacePaint,
}

/// One wall row as the level loader hands it over.
#[derive(Clone, Copy, Debug)]
pub struct RawWall {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub paint: WallPaint,
}

pub struct LevelData {
    pub sectors: Vec<RawSector>,
    pub walls: Vec<RawWall>,
    pub player: Player,
}

/// Validated level. Render code trusts every index in here.
pub struct World {
    pub sectors: Vec<Sector>,
    pub walls: Vec<Wall>,
    pub player: Player,
}

impl World {
    pub fn load(level: LevelData, textures: &TextureSet) -> Result<Self, LevelError> {
        if level.sectors.is_empty() {
            return Err(LevelError::Empty);
        }
        let wall_count = level.walls.len();

        for (i, s) in level.sectors.iter().enumerate() {
            if s.wall_start >= s.wall_end {
                return Err(LevelError::EmptyWallRange {
                    sector: i,
                    start: s.wall_start,
                    end: s.wall_end,
                });
            }
            if s.wall_end > wall_count {
                return Err(LevelError::WallRangeOutOfBounds {
                    sector: i,
                    end: s.wall_end,
                    walls: wall_count,
                });
            }
            if s.ceiling_z < s.floor_z {
                return Err(LevelError::InvertedSector {
                    sector: i,
                    floor: s.floor_z,
                    ceiling: s.ceiling_z,
                });
            }
            check_surface(&s.floor, textures)?;
            check_surface(&s.ceiling, textures)?;
        }

        // Ranges must tile 0..wall_count exactly, in any sector order.
        let mut ranges: Vec<Range<usize>> = level
            .sectors
            .iter()
            .map(|s| s.wall_start..s.wall_end)
            .collect();
        ranges.sort_by_key(|r| r.start);
        let mut next = 0;
        for r in &ranges {
            if r.start != next {
                return Err(LevelError::WallRangesNotPartition { wall: next.min(r.start) });
            }
            next = r.end;
        }
        if next != wall_count {
            return Err(LevelError::WallRangesNotPartition { wall: next });
        }

        for w in &level.walls {
            if let WallPaint::Texture { id, .. } = w.paint {
                check_texture(id, textures)?;
            }
        }

        let sectors = level
            .sectors
            .iter()
            .map(|s| Sector {
                floor_z: s.floor_z,
                height: s.ceiling_z - s.floor_z,
                walls: s.wall_start..s.wall_end,
                floor: s.floor,
                ceiling: s.ceiling,
            })
            .collect();
        let walls = level
            .walls
            .iter()
            .map(|w| Wall {
                start: [w.x1, w.y1],
                end: [w.x2, w.y2],
                paint: w.paint,
            })
            .collect();

        Ok(Self {
            sectors,
            walls,
            player: Player::new(
                level.player.x,
                level.player.y,
                level.player.z,
                level.player.angle,
                level.player.look,
            ),
        })
    }
}

fn check_surface(paint: &SurfacePaint, textures: &TextureSet) -> Result<(), LevelError> {
    match *paint {
        SurfacePaint::Texture { id, .. } => check_texture(id, textures),
        SurfacePaint::Color(_) => Ok(()),
    }
}

fn check_texture(id: TextureId, textures: &TextureSet) -> Result<(), LevelError> {
    if textures.contains(id) {
        Ok(())
    } else {
        Err(LevelError::UnknownTexture {
            id: id.0,
            textures: textures.len(),
        })
    }
}
