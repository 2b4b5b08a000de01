/// Example: helicity angles of B+ -> D*- Ds+ pi+ written as SVG
///
/// Usage: cargo run --example decay_planes -- [output.svg]
use kinplot_core::prelude::*;
use kinplot_core::{Axes3, Camera};
use kinplot_svg::SvgSurface;
use std::env;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

const THETA_DS: f64 = 70.0;
const THETA_D: f64 = 80.0;
const CHI: f64 = 60.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder().with_max_level(Level::INFO).finish(),
    )?;

    let output = env::args().nth(1).unwrap_or_else(|| "decay_planes.svg".to_string());
    let flatten = 0.7 * XAXIS + YAXIS + 0.7 * ZAXIS;

    let ds_plane = compound![
        Plane::new(PlaneOrientation::Xy).with("color", "r").with("alpha", 0.3).scale(flatten)?,
        compound![
            Arrow::new(Direction::X).with("color", "k"),
            Text::new("Ds+", at(1.05 * XAXIS))?.with("color", "k"),
        ]
        .rotate(&ZAXIS, THETA_DS),
        compound![
            Arrow::new(Direction::X).with("color", "k"),
            Text::new("pi+", at(1.25 * XAXIS))?.with("color", "k"),
        ]
        .rotate(&ZAXIS, 180.0 + THETA_DS),
        Angle::new(PlaneOrientation::Xy, THETA_DS, [0.25, 0.28])?.with("color", "k"),
        Text::new("θ(Ds)", at(0.35 * XAXIS))?.with("color", "k").rotate(&ZAXIS, 0.4 * THETA_DS),
        Point::new().with("marker", "o").with("color", "r"),
    ];

    let d_plane = compound![
        Plane::new(PlaneOrientation::Xy).with("color", "b").with("alpha", 0.3).scale(flatten)?,
        compound![
            Arrow::new(Direction::NegX).with("color", "k"),
            Text::new("D0bar", at(-1.3 * XAXIS))?.with("color", "k"),
        ]
        .rotate(&ZAXIS, THETA_D),
        compound![
            Arrow::new(Direction::NegX).with("color", "k"),
            Text::new("pi-", at(-1.1 * XAXIS))?.with("color", "k"),
        ]
        .rotate(&ZAXIS, 180.0 + THETA_D),
        Angle::new(PlaneOrientation::Xy, THETA_D, [0.24, 0.28, 0.32])?
            .with("color", "k")
            .rotate(&ZAXIS, 180.0),
        Text::new("θ(D)", at(0.7 * XAXIS))?.with("color", "k").rotate(&ZAXIS, 180.0 + THETA_D / 2.0),
        Point::new().with("marker", "o").with("color", "b"),
    ];

    let scene = compound![
        ds_plane.shift(&(0.7 * XAXIS)),
        d_plane.rotate(&XAXIS, CHI).shift(&(-0.7 * XAXIS)),
        Line::new(Direction::X)
            .with("color", "k")
            .with("linestyle", "--")
            .with("linewidth", 1.0)
            .shift(&(-0.5 * XAXIS))
            .scale(3.6)?,
        Angle::new(PlaneOrientation::Yz, CHI, 0.5)?.with("color", "k"),
        Text::new("φ", at(0.6 * YAXIS))?.with("color", "k").rotate(&XAXIS, 0.7 * CHI),
        Point::new().with("marker", "o").with("color", "g"),
        Arrow::new(Direction::X).with("color", "k").scale(0.7)?,
        Arrow::new(Direction::NegX).with("color", "k").scale(0.7)?,
        Text::new("D*-", at(-0.6 * XAXIS + 0.1 * ZAXIS))?.with("color", "k"),
        Text::new("T++", at(0.5 * XAXIS + 0.1 * ZAXIS))?.with("color", "k"),
        Text::new("B+", at(-0.2 * ZAXIS - 0.2 * YAXIS))?.with("color", "k"),
    ];

    let scale = 0.9;
    let axes = Axes3::new((-1.3 * scale, 1.3 * scale), (-scale, scale), (-scale, scale));
    let mut surface = SvgSurface::with_view(310, 310, Camera::new(310, 310), axes);
    scene.draw(&mut surface)?;
    surface.save(&output)?;
    info!(path = %output, "done");
    Ok(())
}
