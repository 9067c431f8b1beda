use std::fmt;

/// Reasons a level is rejected at load time.
#[derive(Debug, Clone, PartialEq)]
pub enum LevelError {
    /// A sector's wall range is empty or reversed.
    EmptyWallRange { sector: usize, start: usize, end: usize },
    /// A sector's wall range runs past the wall table.
    WallRangeOutOfBounds { sector: usize, end: usize, walls: usize },
    /// Sector wall ranges overlap, leave a gap, or miss walls.
    WallRangesNotPartition { wall: usize },
    /// Ceiling below floor.
    InvertedSector { sector: usize, floor: f32, ceiling: f32 },
    /// A wall or sector names a texture the provider does not have.
    UnknownTexture { id: usize, textures: usize },
    /// No sectors at all.
    Empty,
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyWallRange { sector, start, end } => {
                write!(f, "sector {sector} has an empty wall range {start}..{end}")
            }
            Self::WallRangeOutOfBounds { sector, end, walls } => write!(
                f,
                "sector {sector} wall range ends at {end} but only {walls} walls exist"
            ),
            Self::WallRangesNotPartition { wall } => write!(
                f,
                "sector wall ranges do not partition the wall table (at wall {wall})"
            ),
            Self::InvertedSector {
                sector,
                floor,
                ceiling,
            } => write!(
                f,
                "sector {sector} ceiling {ceiling} is below its floor {floor}"
            ),
            Self::UnknownTexture { id, textures } => {
                write!(f, "texture {id} requested but only {textures} are loaded")
            }
            Self::Empty => write!(f, "level has no sectors"),
        }
    }
}

impl std::error::Error for LevelError {}

/// Reasons a texture cannot be built from raw pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureError {
    /// Width or height is zero.
    ZeroSize,
    /// Pixel data does not hold exactly `width * height * 3` bytes.
    SizeMismatch { expected: usize, actual: usize },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSize => write!(f, "texture has zero width or height"),
            Self::SizeMismatch { expected, actual } => write!(
                f,
                "texture data is {actual} bytes, expected {expected}"
            ),
        }
    }
}

impl std::error::Error for TextureError {}
