/* ************************************************************************ **
** This file is part of tmtx, and is licensed under EITHER the MIT license  **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! A matrix serializes as a sequence of its rows, whatever the layout,
//! so that data written from one layout can be read back into the other.

use crate::layout::Layout;
use crate::types::Matrix;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use tmtx_array_view::FixedStridedView;

struct SerRow<'a, T, const C: usize>(FixedStridedView<'a, T, C>);

impl<'a, T: Serialize, const C: usize> Serialize for SerRow<'a, T, C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

impl<T: Serialize, const R: usize, const C: usize, L: Layout> Serialize for Matrix<T, R, C, L> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.row_views().map(SerRow))
    }
}

impl<'de, T, const R: usize, const C: usize, L: Layout> Deserialize<'de> for Matrix<T, R, C, L>
where T: Deserialize<'de> + Clone,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<Vec<T>>::deserialize(deserializer)?;

        let expected = format!("{} rows of {} elements", R, C);
        if rows.len() != R {
            return Err(de::Error::invalid_length(rows.len(), &expected.as_str()));
        }
        if let Some(row) = rows.iter().find(|row| row.len() != C) {
            return Err(de::Error::invalid_length(row.len(), &expected.as_str()));
        }
        Ok(Matrix::from_fn(|r, c| rows[r][c].clone()))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Matrix, ColumnMajor, RowMatrix, ColumnMatrix};

    #[test]
    fn rows_regardless_of_layout() {
        let m = ColumnMatrix::<i32, 2, 3>::from_fn(|r, c| (10 * r + c) as i32);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "[[0,1,2],[10,11,12]]");

        let back: RowMatrix<i32, 2, 3> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
        let again: Matrix<i32, 2, 3, ColumnMajor> = serde_json::from_str(&json).unwrap();
        assert_eq!(again.as_flat(), m.as_flat());
    }

    #[test]
    fn shape_is_validated() {
        assert!(serde_json::from_str::<RowMatrix<f64, 2, 2>>("[[1.0, 2.0]]").is_err());
        assert!(serde_json::from_str::<RowMatrix<f64, 2, 2>>("[[1.0, 2.0], [3.0]]").is_err());
        assert!(serde_json::from_str::<RowMatrix<f64, 2, 2>>("[[1.0, 2.0], [3.0, 4.0]]").is_ok());
    }

    #[test]
    fn xy_fields() {
        let p = crate::Xy::new(1u8, 2);
        assert_eq!(serde_json::to_string(&p).unwrap(), r#"{"x":1,"y":2}"#);
    }
}
