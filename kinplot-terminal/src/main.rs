/// kinplot terminal demo - helicity angles of a semileptonic decay
///
/// Draws the two decay planes of B -> D* mu nu with the angles theta_D,
/// theta_l and chi, prints the diagram and optionally saves it.
///
/// Usage: kinplot-terminal [-v] [output.txt]
use anyhow::{Context, Result};
use clap::Parser;
use kinplot_core::prelude::*;
use kinplot_core::Axes3;
use kinplot_terminal::print_scene;
use std::io;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

const THETA_D: f64 = 70.0;
const THETA_L: f64 = 80.0;
const CHI: f64 = 60.0;

/// Draw the B -> D* mu nu helicity diagram in the terminal
#[derive(Parser, Debug)]
#[command(name = "kinplot-terminal", version)]
struct Args {
    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Also save the diagram as plain text to this file
    output: Option<PathBuf>,
}

fn decay_plane(
    color: &str,
    forward: Direction,
    labels: [&str; 3],
    theta: f64,
    radii: &[f64],
    arc_turn: f64,
) -> kinplot_core::Result<Compound> {
    let sign = if forward == Direction::X { 1.0 } else { -1.0 };
    Ok(compound![
        Plane::new(PlaneOrientation::Xy)
            .with("color", color)
            .with("alpha", 0.3)
            .scale(0.7 * XAXIS + YAXIS + 0.7 * ZAXIS)?,
        compound![
            Arrow::new(forward).with("color", "k"),
            Text::new(labels[0], at(sign * 1.1 * XAXIS))?.with("color", "k"),
        ]
        .rotate(&ZAXIS, theta),
        compound![
            Arrow::new(forward).with("color", "k"),
            Text::new(labels[1], at(sign * 1.2 * XAXIS))?.with("color", "k"),
        ]
        .rotate(&ZAXIS, 180.0 + theta),
        Angle::new(PlaneOrientation::Xy, theta, radii)?
            .with("color", "k")
            .rotate(&ZAXIS, arc_turn),
        Text::new(labels[2], at(0.4 * XAXIS))?
            .with("color", "k")
            .rotate(&ZAXIS, arc_turn + theta / 2.0),
        Point::new().with("marker", "o").with("color", color),
    ])
}

fn scene() -> kinplot_core::Result<Compound> {
    let hadron_side = decay_plane("r", Direction::X, ["D0", "pi+", "thD"], THETA_D, &[0.25, 0.28], 0.0)?;
    let lepton_side = decay_plane(
        "b",
        Direction::NegX,
        ["mu+", "nu", "thL"],
        THETA_L,
        &[0.24, 0.28, 0.32],
        180.0,
    )?;

    Ok(compound![
        hadron_side.shift(&(0.7 * XAXIS)),
        lepton_side.rotate(&XAXIS, CHI).shift(&(-0.7 * XAXIS)),
        Line::new(Direction::X)
            .with("color", "k")
            .with("linestyle", "--")
            .shift(&(-0.5 * XAXIS))
            .scale(4.0)?,
        Angle::new(PlaneOrientation::Yz, CHI, 0.5)?.with("color", "k"),
        Text::new("chi", at(0.7 * YAXIS))?
            .with("color", "k")
            .rotate(&XAXIS, CHI / 2.0),
        Point::new().with("marker", "o"),
    ])
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_max_level(level)
            .with_writer(io::stderr)
            .finish(),
    )?;

    let scene = scene().context("failed to build scene")?;
    info!(elements = scene.len(), "built helicity diagram");

    let surface = print_scene(&scene, Axes3::cube(1.0))?;

    if let Some(path) = args.output {
        surface
            .save(&path)
            .with_context(|| format!("failed to save {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_args() {
        let args = Args::try_parse_from(["kinplot-terminal", "-v", "out.txt"]).unwrap();
        assert!(args.verbose);
        assert_eq!(args.output, Some(PathBuf::from("out.txt")));

        let args = Args::try_parse_from(["kinplot-terminal"]).unwrap();
        assert!(!args.verbose);
        assert_eq!(args.output, None);
    }

    #[test]
    fn test_flags_are_not_output_paths() {
        let err = Args::try_parse_from(["kinplot-terminal", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(Args::try_parse_from(["kinplot-terminal", "--bogus"]).is_err());
        assert!(Args::try_parse_from(["kinplot-terminal", "a.txt", "b.txt"]).is_err());
    }

    #[test]
    fn test_scene_builds() {
        let scene = scene().unwrap();
        assert!(!scene.is_empty());
    }
}
