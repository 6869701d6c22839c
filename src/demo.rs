/* ************************************************************************ **
** This file is part of tmtx, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! The 4x4 scenario: fill a matrix, then scale, shift, and combine it.

use tmtx_matrix::{Matrix, Layout, Order, RowMajor, ColumnMajor};

use std::fmt;
use std::str::FromStr;

pub const DIM: usize = 4;

/// The result matrices are always reported in row-major order,
/// whatever layout the computation used.
pub type Square = Matrix<f32, DIM, DIM, RowMajor>;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LayoutChoice { Rows, Columns }

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown layout {0:?} (expected 'rows' or 'columns')")]
pub struct UnknownLayout(pub String);

impl FromStr for LayoutChoice {
    type Err = UnknownLayout;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rows" | "row-major" => Ok(LayoutChoice::Rows),
            "columns" | "column-major" => Ok(LayoutChoice::Columns),
            _ => Err(UnknownLayout(s.to_string())),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Settings {
    /// Value written into every cell before anything else happens.
    pub fill: f32,
    pub scalar: f32,
    pub layout: LayoutChoice,
}

impl Default for Settings {
    fn default() -> Self {
        Settings { fill: 1.0, scalar: 10.0, layout: LayoutChoice::Rows }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub order: Order,
    pub scalar: f32,
    /// `m`
    pub initial: Square,
    /// `m * s`
    pub scaled: Square,
    /// `m + s`
    pub shifted: Square,
    /// `(m * s) + (m + s)`
    pub combined: Square,
    /// `m - s`
    pub lowered: Square,
    /// `m - (m - s)`
    pub restored: Square,
    /// Column 0 of `m`, read through a strided view.
    pub first_column: [f32; DIM],
    /// Byte stride of that view.
    pub column_stride: usize,
}

pub fn run(settings: &Settings) -> Report {
    match settings.layout {
        LayoutChoice::Rows => run_with::<RowMajor>(settings),
        LayoutChoice::Columns => run_with::<ColumnMajor>(settings),
    }
}

fn run_with<L: Layout>(settings: &Settings) -> Report {
    let &Settings { fill, scalar, layout: _ } = settings;

    let mut m = Matrix::<f32, DIM, DIM, L>::default();
    for r in 0..DIM {
        m.row_view_mut(r).fill(fill);
    }
    info!("filled a {}x{} {:?} matrix with {}", DIM, DIM, m.order(), fill);

    let scaled = &m * scalar;
    let shifted = &m + scalar;
    trace!("m * {} = {}", scalar, scaled);
    trace!("m + {} = {}", scalar, shifted);

    let combined = &scaled + &shifted;
    let lowered = &m - scalar;
    let restored = &m - &lowered;
    trace!("(m * s) + (m + s) = {}", combined);
    trace!("m - (m - s) = {}", restored);

    let column = m.column_view(0);
    let column_stride = column.stride();
    let first_column = column.to_array();

    Report {
        order: m.order(),
        scalar,
        initial: m.to_layout(),
        scaled: scaled.to_layout(),
        shifted: shifted.to_layout(),
        combined: combined.to_layout(),
        lowered: lowered.to_layout(),
        restored: restored.to_layout(),
        first_column,
        column_stride,
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.scalar;
        writeln!(f, "layout: {:?}", self.order)?;
        writeln!(f, "m = {}", self.initial)?;
        writeln!(f, "m * {} = {}", s, self.scaled)?;
        writeln!(f, "m + {} = {}", s, self.shifted)?;
        writeln!(f, "(m * {0}) + (m + {0}) = {1}", s, self.combined)?;
        writeln!(f, "m - {} = {}", s, self.lowered)?;
        writeln!(f, "m - (m - {}) = {}", s, self.restored)?;
        write!(f, "column 0 (stride {} bytes) = {:?}", self.column_stride, self.first_column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn every(x: f32) -> Square { Square::from_fn(|_, _| x) }

    #[test]
    fn default_scenario() {
        for &layout in &[LayoutChoice::Rows, LayoutChoice::Columns] {
            let report = run(&Settings { layout, ..Settings::default() });
            assert_eq!(report.initial, every(1.0));
            assert_eq!(report.scaled, every(10.0));
            assert_eq!(report.shifted, every(11.0));
            assert_eq!(report.combined, every(21.0));
            assert_eq!(report.lowered, every(-9.0));
            assert_eq!(report.restored, every(10.0));
            assert_eq!(report.first_column, [1.0; DIM]);
        }
    }

    #[test]
    fn column_stride_depends_on_layout() {
        let f = std::mem::size_of::<f32>();
        let rows = run(&Settings { layout: LayoutChoice::Rows, ..Settings::default() });
        let cols = run(&Settings { layout: LayoutChoice::Columns, ..Settings::default() });
        assert_eq!((rows.order, rows.column_stride), (Order::RowMajor, DIM * f));
        assert_eq!((cols.order, cols.column_stride), (Order::ColumnMajor, f));
    }

    #[test]
    fn custom_fill_and_scalar() {
        let report = run(&Settings { fill: 2.0, scalar: 3.0, layout: LayoutChoice::Columns });
        assert_eq!(report.scaled, every(6.0));
        assert_eq!(report.shifted, every(5.0));
        assert_eq!(report.combined, every(11.0));
        assert_eq!(report.lowered, every(-1.0));
        assert_eq!(report.restored, every(3.0));
    }

    #[test]
    fn parse_layout() {
        assert_eq!("rows".parse(), Ok(LayoutChoice::Rows));
        assert_eq!("column-major".parse(), Ok(LayoutChoice::Columns));
        assert_eq!("diagonal".parse::<LayoutChoice>(), Err(UnknownLayout("diagonal".into())));
    }
}
