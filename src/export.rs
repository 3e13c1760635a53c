//! Non-interactive output of a comparison.
//!
//! Writes the two rows in blocks of a fixed width, each block headed by its
//! position range, followed by a one-line summary. Colors are emitted as
//! ANSI escapes through crossterm; without color a marker line flags the
//! mismatching columns instead.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor};

use crate::compare::{ColumnPair, Comparison, Paint};

/// Default number of columns per block.
pub const DEFAULT_WIDTH: usize = 60;

/// Output settings.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
    /// Columns per block
    pub width: usize,
    /// Emit ANSI colors
    pub color: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            color: true,
        }
    }
}

/// Writes the comparison of two labeled rows.
pub fn write_comparison<W: Write>(
    out: &mut W,
    labels: [&str; 2],
    columns: &[ColumnPair],
    options: &PrintOptions,
) -> io::Result<()> {
    let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 2;
    let width = options.width.max(1);

    for (block_idx, block) in columns.chunks(width).enumerate() {
        let start = block_idx * width;
        if block_idx > 0 {
            writeln!(out)?;
        }
        writeln!(
            out,
            "{:<lw$}{}-{}",
            "",
            start + 1,
            start + block.len(),
            lw = label_width
        )?;

        write!(out, "{:<lw$}", labels[0], lw = label_width)?;
        write_top_row(out, block, options.color)?;
        writeln!(out)?;

        write!(out, "{:<lw$}", labels[1], lw = label_width)?;
        write_bottom_row(out, block, options.color)?;
        writeln!(out)?;

        if !options.color {
            let markers: String = block
                .iter()
                .map(|c| if c.is_mismatch() { '*' } else { ' ' })
                .collect();
            writeln!(out, "{:<lw$}{}", "", markers.trim_end(), lw = label_width)?;
        }
    }

    let summary = Comparison::of(columns);
    writeln!(out)?;
    writeln!(
        out,
        "Length: {} | Mismatches: {} | Identity: {:.1}%",
        summary.length,
        summary.mismatches,
        summary.identity()
    )?;
    Ok(())
}

fn write_top_row<W: Write>(out: &mut W, block: &[ColumnPair], color: bool) -> io::Result<()> {
    if !color {
        let row: String = block.iter().map(|c| c.top.residue).collect();
        return write!(out, "{}", row);
    }
    for column in block {
        queue!(
            out,
            SetBackgroundColor(column.top.color.into()),
            SetForegroundColor(Color::Black),
            Print(column.top.residue)
        )?;
    }
    queue!(out, ResetColor)
}

fn write_bottom_row<W: Write>(out: &mut W, block: &[ColumnPair], color: bool) -> io::Result<()> {
    if !color {
        let row: String = block.iter().map(|c| c.bottom.residue).collect();
        return write!(out, "{}", row);
    }
    for column in block {
        match column.bottom.background {
            Paint::Solid(rgb) => queue!(
                out,
                SetBackgroundColor(rgb.into()),
                SetAttribute(Attribute::Bold)
            )?,
            Paint::Transparent => queue!(out, SetBackgroundColor(Color::Reset))?,
        }
        queue!(
            out,
            SetForegroundColor(column.bottom.text.into()),
            Print(column.bottom.residue),
            SetAttribute(Attribute::Reset)
        )?;
    }
    queue!(out, ResetColor)
}
