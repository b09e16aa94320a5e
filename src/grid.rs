use crate::error::{MapError, MismatchStage, Result};

/// Row-major `height x width` grid of cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TileGrid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> TileGrid<T> {
    /// Columns per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at column `x`, row `y`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y * self.width + x)
    }

    /// Row `y`, left to right.
    pub fn row(&self, y: usize) -> Option<&[T]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.cells[start..start + self.width])
    }

    /// Rows top to bottom. A zero-width grid yields `height` empty rows.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.height).filter_map(move |y| self.row(y))
    }

    /// Cells in row-major order.
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }
}

/// Number of cells in a `width x height` layer.
pub(crate) fn cell_count(width: usize, height: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .ok_or_else(|| MapError::InvalidArgument {
            name: "width * height",
            reason: format!("{width} x {height} overflows the addressable cell count"),
        })
}

/// Lays `ids` into a `width x height` grid, `ids[y * width + x]` landing at `(x, y)`.
///
/// The sequence must hold exactly one value per cell; otherwise this fails
/// with [`MapError::SizeMismatch`] at the [`MismatchStage::Cells`] stage.
pub fn assemble<T>(ids: Vec<T>, width: usize, height: usize, layer: &str) -> Result<TileGrid<T>> {
    let expected = cell_count(width, height)?;
    if ids.len() != expected {
        return Err(MapError::SizeMismatch {
            stage: MismatchStage::Cells,
            layer: layer.to_owned(),
            expected,
            actual: ids.len(),
        });
    }
    Ok(TileGrid {
        width,
        height,
        cells: ids,
    })
}
