use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, ValueEnum};

pub const DEFAULT_WIDTH: u32 = 320;
pub const DEFAULT_HEIGHT: u32 = 240;
pub const DEFAULT_SCALE: u32 = 2;
pub const DEFAULT_FOV: f32 = 200.0;
pub const DEFAULT_TICK_RATE: u32 = 35;

/// How the internal frame is stretched onto the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Filter {
    Nearest,
    Bilinear,
}

/// Software 2.5D sector renderer.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Internal framebuffer width in pixels.
    #[arg(
        long,
        value_name = "PIXELS",
        default_value_t = DEFAULT_WIDTH,
        value_parser = clap::value_parser!(u32).range(16..=4096)
    )]
    pub width: u32,
    /// Internal framebuffer height in pixels.
    #[arg(
        long,
        value_name = "PIXELS",
        default_value_t = DEFAULT_HEIGHT,
        value_parser = clap::value_parser!(u32).range(16..=4096)
    )]
    pub height: u32,
    /// Initial window size as a multiple of the framebuffer.
    #[arg(
        long,
        default_value_t = DEFAULT_SCALE,
        value_parser = clap::value_parser!(u32).range(1..=8)
    )]
    pub scale: u32,
    /// Projection distance: larger values narrow the view.
    #[arg(long, default_value_t = DEFAULT_FOV)]
    pub fov: f32,
    /// Simulation ticks per second.
    #[arg(
        long,
        value_name = "HZ",
        default_value_t = DEFAULT_TICK_RATE,
        value_parser = clap::value_parser!(u32).range(1..=240)
    )]
    pub tick_rate: u32,
    /// Filter used when stretching the frame to the window.
    #[arg(long, value_enum, default_value_t = Filter::Nearest)]
    pub filter: Filter,
    /// Image file replacing the next built-in texture slot (repeatable).
    #[arg(long = "texture", value_name = "PATH")]
    pub textures: Vec<PathBuf>,
    /// Render a single frame to this PNG file and exit.
    #[arg(long, value_name = "PATH")]
    pub screenshot: Option<PathBuf>,
    /// Starting pose as X,Y,Z,ANGLE,LOOK instead of the level's own.
    #[arg(long, value_name = "X,Y,Z,ANGLE,LOOK", allow_hyphen_values = true)]
    pub pose: Option<Pose>,
}

/// Player pose parsed from the command line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub angle: i32,
    pub look: i32,
}

impl FromStr for Pose {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = value.split(',').map(str::trim).collect();
        let [x, y, z, angle, look] = parts[..] else {
            return Err("expected format X,Y,Z,ANGLE,LOOK".to_string());
        };
        let coord = |s: &str| match s.parse::<f32>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(format!("invalid coordinate '{s}'")),
        };
        let whole = |s: &str| {
            s.parse::<i32>()
                .map_err(|_| format!("invalid whole number '{s}'"))
        };
        Ok(Self {
            x: coord(x)?,
            y: coord(y)?,
            z: coord(z)?,
            angle: whole(angle)?,
            look: whole(look)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_built_in_buffer() {
        let cli = Cli::try_parse_from(["sector_raster"]).unwrap();
        assert_eq!((cli.width, cli.height, cli.scale), (320, 240, 2));
        assert_eq!(cli.tick_rate, 35);
        assert_eq!(cli.filter, Filter::Nearest);
        assert!(cli.textures.is_empty());
        assert!(cli.screenshot.is_none());
        assert!(cli.pose.is_none());
    }

    #[test]
    fn parses_overrides() {
        let cli = Cli::try_parse_from([
            "sector_raster",
            "--width",
            "640",
            "--filter",
            "bilinear",
            "--texture",
            "a.png",
            "--texture",
            "b.png",
            "--screenshot",
            "out.png",
            "--pose",
            "-16,-110.5,20,90,-2",
        ])
        .unwrap();
        assert_eq!(cli.width, 640);
        assert_eq!(cli.filter, Filter::Bilinear);
        assert_eq!(cli.textures, vec![PathBuf::from("a.png"), PathBuf::from("b.png")]);
        assert_eq!(cli.screenshot, Some(PathBuf::from("out.png")));
        assert_eq!(
            cli.pose,
            Some(Pose {
                x: -16.0,
                y: -110.5,
                z: 20.0,
                angle: 90,
                look: -2
            })
        );
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(Cli::try_parse_from(["sector_raster", "--width", "8"]).is_err());
        assert!(Cli::try_parse_from(["sector_raster", "--tick-rate", "0"]).is_err());
        assert!(Cli::try_parse_from(["sector_raster", "--pose", "1,2,3"]).is_err());
        assert!(Cli::try_parse_from(["sector_raster", "--pose", "1,2,3,4.5,0"]).is_err());
    }

    #[test]
    fn rejects_non_finite_pose() {
        assert!("nan,0,0,0,0".parse::<Pose>().is_err());
        assert!("0,inf,0,0,0".parse::<Pose>().is_err());
        assert!("0,0,-inf,0,0".parse::<Pose>().is_err());
    }
}
