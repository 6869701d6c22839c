#[macro_use]
extern crate tmtx_assert_close;

use rand::Rng;
use std::mem::{size_of, align_of};
use tmtx_matrix::{Matrix, Layout, RowMajor, ColumnMajor, RowMatrix, ColumnMatrix};

fn random_ints<L: Layout, const R: usize, const C: usize>(rng: &mut impl Rng) -> Matrix<i32, R, C, L> {
    Matrix::from_fn(|_, _| rng.gen_range(-1000, 1000))
}

fn random_floats<L: Layout, const R: usize, const C: usize>(rng: &mut impl Rng) -> Matrix<f64, R, C, L> {
    Matrix::from_fn(|_, _| rng.gen_range(-100.0, 100.0))
}

#[test]
fn no_padding_for_any_shape() {
    macro_rules! check {
        ($($T:ty: [$($R:literal x $C:literal),*];)*) => {$($(
            assert_eq!(size_of::<Matrix<$T, $R, $C, RowMajor>>(), size_of::<$T>() * $R * $C);
            assert_eq!(size_of::<Matrix<$T, $R, $C, ColumnMajor>>(), size_of::<$T>() * $R * $C);
            assert_eq!(align_of::<Matrix<$T, $R, $C, ColumnMajor>>(), align_of::<$T>());
        )*)*};
    }
    check!{
        u8: [1 x 1, 3 x 7, 0 x 4];
        i16: [2 x 2, 5 x 1];
        f32: [4 x 4, 1 x 2, 3 x 3];
        f64: [2 x 9, 6 x 6];
        (u8, u16): [2 x 3];
    }
}

#[test]
fn scaling_is_per_cell() {
    let mut rng = rand::thread_rng();
    for _ in 0..50 {
        let m = random_floats::<ColumnMajor, 3, 5>(&mut rng);
        let s = rng.gen_range(-10.0, 10.0);
        let scaled = m * s;
        for (r, c) in (0..3).flat_map(|r| (0..5).map(move |c| (r, c))) {
            assert_eq!(scaled[(r, c)], m[(r, c)] * s);
        }
    }
}

#[test]
fn shifting_round_trips_for_signed() {
    let mut rng = rand::thread_rng();
    for _ in 0..50 {
        let m = random_ints::<RowMajor, 4, 3>(&mut rng);
        let s = rng.gen_range(-1000, 1000);
        assert_eq!((m + s) - s, m);

        let f = random_floats::<ColumnMajor, 2, 2>(&mut rng);
        let t = rng.gen_range(-1.0, 1.0);
        let back = (f + t) - t;
        assert_close!(abs=1e-12, back.as_flat(), f.as_flat());
    }
}

#[test]
fn matrix_sum_is_per_cell() {
    let mut rng = rand::thread_rng();
    for _ in 0..50 {
        let a = random_ints::<RowMajor, 3, 3>(&mut rng);
        let b = random_ints::<ColumnMajor, 3, 3>(&mut rng);
        let sum = a + b;
        let diff = &a - &b;
        for r in 0..3 {
            for c in 0..3 {
                assert_eq!(sum[(r, c)], a[(r, c)] + b[(r, c)]);
                assert_eq!(diff[(r, c)], a[(r, c)] - b[(r, c)]);
            }
        }
    }
}

#[test]
fn scalar_add_is_layout_independent() {
    let mut rng = rand::thread_rng();
    for _ in 0..50 {
        let rows = random_floats::<RowMajor, 4, 2>(&mut rng);
        let cols = rows.to_layout::<ColumnMajor>();
        let s = rng.gen_range(-5.0, 5.0);

        let by_rows = rows + s;
        let by_cols = cols + s;
        assert_eq!(by_rows, by_cols);
        assert_eq!(by_rows, s + rows);
        assert_ne!(by_rows.as_flat(), by_cols.as_flat());
    }
}

#[test]
fn column_view_reads_strided_cells() {
    const C: usize = 5;
    let rows = RowMatrix::<usize, 4, C>::from_fn(|i, j| i * C + j);
    let cols = ColumnMatrix::<usize, 4, C>::from_fn(|i, j| i * C + j);
    for j in 0..C {
        for i in 0..4 {
            assert_eq!(rows.column_view(j)[i], i * C + j);
            assert_eq!(cols.column_view(j)[i], i * C + j);
            assert_eq!(cols.row_view(i)[j], i * C + j);
        }
    }
}

#[test]
fn four_by_four_scenario() {
    scenario::<RowMajor>();
    scenario::<ColumnMajor>();

    fn scenario<L: Layout>() {
        let mut m = Matrix::<f32, 4, 4, L>::default();
        for r in 0..4 {
            m.row_view_mut(r).fill(1.0);
        }
        let every = |x: f32| Matrix::<f32, 4, 4>::from_fn(|_, _| x);

        // `m` isn't Copy for an arbitrary layout, so everything goes through references
        assert_eq!(&m * 10.0, every(10.0));
        assert_eq!(&m + 10.0, every(11.0));
        assert_eq!((&m * 10.0) + (&m + 10.0), every(21.0));
        assert_eq!(&m - 10.0, every(-9.0));
        assert_eq!(&m - (&m - 10.0), every(10.0));
        assert_eq!(m, every(1.0));
    }
}

#[test]
fn views_can_be_shared_across_threads() {
    let m = ColumnMatrix::<u64, 3, 3>::from_fn(|r, c| (r * 3 + c) as u64);
    let view = m.row_view(1);
    let total = std::thread::scope(|s| s.spawn(move || view.iter().sum::<u64>()).join().unwrap());
    assert_eq!(total, 3 + 4 + 5);
}
