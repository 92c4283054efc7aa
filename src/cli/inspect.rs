//! Inspect command: check a PNG against the style palette.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::{FlockError, Result};
use crate::output::{display_path, plural};
use crate::render::decode_indexed;
use crate::types::{Colour, Palette};

use super::Context;

/// Report the palette and colours of a PNG
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// PNG file to inspect
    #[arg(required = true)]
    pub file: PathBuf,
}

/// What a PNG contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection {
    pub width: u32,
    pub height: u32,
    /// Entries in the PNG's PLTE chunk.
    pub palette_len: usize,
    /// Distinct pixel colours, most common first.
    pub colours: Vec<(Colour, usize)>,
}

impl Inspection {
    /// Colours not present in `palette`.
    pub fn foreign_colours<'a>(&'a self, palette: &'a Palette) -> impl Iterator<Item = Colour> + 'a {
        self.colours
            .iter()
            .map(|(c, _)| *c)
            .filter(move |c| !palette.contains(*c))
    }
}

/// Decode a palette-mode PNG and count its pixel colours.
pub fn inspect(path: &Path) -> Result<Inspection> {
    let bytes = fs::read(path).map_err(|e| FlockError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read PNG: {}", e),
    })?;

    let indexed = decode_indexed(&bytes)?;

    let img = image::load_from_memory(&bytes)
        .map_err(|e| FlockError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .to_rgb8();

    let mut counts: HashMap<Colour, usize> = HashMap::new();
    for pixel in img.pixels() {
        let [r, g, b] = pixel.0;
        *counts.entry(Colour::rgb(r, g, b)).or_insert(0) += 1;
    }

    // Most common first, ties by colour for stable output
    let mut colours: Vec<(Colour, usize)> = counts.into_iter().collect();
    colours.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    Ok(Inspection {
        width: img.width(),
        height: img.height(),
        palette_len: indexed.palette().len(),
        colours,
    })
}

pub fn run(args: InspectArgs, ctx: &Context) -> Result<()> {
    let path = &args.file;
    let display = display_path(path);

    let inspection = inspect(path)?;
    let style = ctx.load_style()?;

    ctx.printer.status(
        "Inspected",
        &format!(
            "{} ({}x{}, indexed, {} in PLTE)",
            display,
            inspection.width,
            inspection.height,
            plural(inspection.palette_len, "entry", "entries")
        ),
    );

    for (colour, count) in &inspection.colours {
        let marker = if style.palette().contains(*colour) { "" } else { "  (not in palette)" };
        eprintln!("  {} {:>5}{}", ctx.printer.swatch(*colour), count, marker);
    }

    if let Some(colour) = inspection.foreign_colours(style.palette()).next() {
        return Err(FlockError::PaletteMismatch {
            colour: colour.to_string(),
            location: display,
        });
    }

    ctx.printer.status(
        "Matched",
        &format!("{} against the style palette", plural(inspection.colours.len(), "colour", "colours")),
    );
    Ok(())
}
