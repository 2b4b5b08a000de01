/// Terminal output for kinplot diagrams
use crossterm::terminal;
use kinplot_core::{Axes3, Camera, Shape};
use std::io::{self, stdout, Write};
use thiserror::Error;
use tracing::info;

pub mod renderer;

pub use renderer::{cell_camera, AsciiSurface, BACKGROUND, CELL_ASPECT};

#[derive(Error, Debug)]
pub enum TerminalError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("draw error: {0}")]
    Draw(#[from] kinplot_core::Error),
}

/// Size used when the terminal size cannot be queried (e.g. piped output)
pub const FALLBACK_SIZE: (usize, usize) = (100, 40);

/// Draw a scene onto a fresh surface of the given size
pub fn rasterize<S: Shape>(
    scene: &S,
    width: usize,
    height: usize,
    camera: Option<Camera>,
    axes: Axes3,
) -> kinplot_core::Result<AsciiSurface> {
    let camera = camera.unwrap_or_else(|| cell_camera(width, height));
    let mut surface = AsciiSurface::with_view(width, height, camera, axes);
    scene.draw(&mut surface)?;
    Ok(surface)
}

/// Draw a scene at the terminal size and print it to stdout
pub fn print_scene<S: Shape>(scene: &S, axes: Axes3) -> Result<AsciiSurface, TerminalError> {
    let (width, height) = match terminal::size() {
        // Leave a row for the prompt
        Ok((w, h)) if w > 0 && h > 1 => (w as usize, h as usize - 1),
        _ => FALLBACK_SIZE,
    };
    info!(width, height, "rendering to terminal");

    let surface = rasterize(scene, width, height, None, axes)?;
    let mut stdout = stdout();
    surface.write_to(&mut stdout)?;
    stdout.flush()?;
    Ok(surface)
}
