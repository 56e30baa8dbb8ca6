#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Plain-text persistence for level grids.
//!
//! A level is stored as one line per row and one glyph per cell, with no
//! header. Readers must already know the target dimensions: importing merges
//! the file into an existing grid, so short or missing lines leave the
//! corresponding cells untouched and overlong lines are truncated.

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use ghost_maze_core::{Cell, CellCoord, Grid};
use log::debug;
use thiserror::Error;

/// Failures raised while moving levels to and from text.
#[derive(Debug, Error)]
pub enum LevelIoError {
    /// The level file could not be opened.
    #[error("failed to open level file {}", path.display())]
    Open {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The level file or its directory could not be created.
    #[error("failed to create level file {}", path.display())]
    Create {
        /// File or directory that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The level file could not be read.
    #[error("failed to read level file {}", path.display())]
    Read {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The level could not be written.
    #[error("failed to write level file {}", path.display())]
    Write {
        /// File being written.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A glyph inside the target area is not a known cell code.
    #[error("unknown glyph {glyph:?} at line {line}, column {column}")]
    UnknownGlyph {
        /// Offending character.
        glyph: char,
        /// One-based line number.
        line: usize,
        /// One-based character position within the line.
        column: usize,
    },
}

/// Summary of a completed import.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Lines that contributed at least one cell.
    pub rows_read: u32,
    /// Cells overwritten by the import.
    pub cells_written: usize,
}

/// Writes `grid` as newline-terminated rows of glyphs.
pub fn write_grid<W: Write>(grid: &Grid, writer: &mut W) -> io::Result<()> {
    writer.write_all(export_to_string(grid).as_bytes())
}

/// Renders `grid` in the text format.
#[must_use]
pub fn export_to_string(grid: &Grid) -> String {
    let capacity = grid.len() + grid.rows() as usize;
    let mut text = String::with_capacity(capacity);
    for row in 0..grid.rows() {
        text.extend(grid.row(row).unwrap_or_default().iter().map(|cell| cell.glyph()));
        text.push('\n');
    }
    text
}

/// Parses a glyph of a finished level. Corridor markers only exist while a
/// half-grid is being carved, so they are not accepted here.
fn level_cell(glyph: char) -> Option<Cell> {
    Cell::from_glyph(glyph).filter(|cell| *cell != Cell::Corridor)
}

/// Merges `text` into `grid`.
///
/// Every glyph inside the grid's bounds is parsed before any cell changes, so
/// a failed import leaves the grid as it was.
pub fn import_str(grid: &mut Grid, text: &str) -> Result<ImportReport, LevelIoError> {
    let mut updates = Vec::new();
    let mut rows_read = 0;

    for (row, line) in (0..grid.rows()).zip(text.lines()) {
        let before = updates.len();
        for (column, glyph) in (0..grid.columns()).zip(line.chars()) {
            let cell = level_cell(glyph).ok_or(LevelIoError::UnknownGlyph {
                glyph,
                line: row as usize + 1,
                column: column as usize + 1,
            })?;
            updates.push((CellCoord::new(row, column), cell));
        }
        if updates.len() > before {
            rows_read += 1;
        }
    }

    let report = ImportReport {
        rows_read,
        cells_written: updates.len(),
    };
    for (coord, cell) in updates {
        grid.set(coord, cell);
    }
    Ok(report)
}

/// Writes `grid` to `path`, creating missing parent directories.
pub fn export_path(grid: &Grid, path: impl AsRef<Path>) -> Result<(), LevelIoError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| LevelIoError::Create {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let file = File::create(path).map_err(|source| LevelIoError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    write_grid(grid, &mut writer)
        .and_then(|()| writer.flush())
        .map_err(|source| LevelIoError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(
        "exported {}x{} level to {}",
        grid.rows(),
        grid.columns(),
        path.display()
    );
    Ok(())
}

/// Merges the level stored at `path` into `grid`.
pub fn import_path(grid: &mut Grid, path: impl AsRef<Path>) -> Result<ImportReport, LevelIoError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LevelIoError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let text = io::read_to_string(file).map_err(|source| LevelIoError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let report = import_str(grid, &text)?;
    debug!(
        "imported {} row(s) from {}",
        report.rows_read,
        path.display()
    );
    Ok(report)
}
