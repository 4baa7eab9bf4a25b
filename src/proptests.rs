//! Property-based tests for matrix algebra.

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use proptest::prelude::*;

    use crate::dense_matrix::DenseMatrix;
    use crate::io::read_from;
    use crate::parallel::{parallel_inverse, ParallelConfig};

    // Strategy for generating a matrix of the given shape with bounded
    // entries.
    fn matrix(num_rows: usize, num_cols: usize) -> impl Strategy<Value = DenseMatrix> {
        proptest::collection::vec(-100.0f64..100.0, num_rows * num_cols)
            .prop_map(move |data| DenseMatrix::from_vec(num_rows, num_cols, data))
    }

    // Strategy for generating a matrix of any small shape.
    fn any_matrix() -> impl Strategy<Value = DenseMatrix> {
        (1usize..6, 1usize..6).prop_flat_map(|(r, c)| matrix(r, c))
    }

    // Strategy for generating two matrices of the same shape.
    fn matrix_pair() -> impl Strategy<Value = (DenseMatrix, DenseMatrix)> {
        (1usize..6, 1usize..6).prop_flat_map(|(r, c)| (matrix(r, c), matrix(r, c)))
    }

    // Strategy for generating a strictly diagonally dominant square matrix,
    // which the no-pivoting elimination always accepts.
    fn dominant_matrix() -> impl Strategy<Value = DenseMatrix> {
        (1usize..6).prop_flat_map(|n| {
            proptest::collection::vec(-10.0f64..10.0, n * n).prop_map(move |mut data| {
                for i in 0..n {
                    let row_sum: f64 = data[i * n..(i + 1) * n].iter().map(|v| v.abs()).sum();
                    data[i * n + i] = row_sum + 1.0;
                }
                DenseMatrix::from_vec(n, n, data)
            })
        })
    }

    fn max_abs_diff(a: &DenseMatrix, b: &DenseMatrix) -> f64 {
        a.as_slice()
            .iter()
            .zip(b.as_slice().iter())
            .map(|(x, y)| (x - y).abs())
            .fold(0.0, f64::max)
    }

    proptest! {
        #[test]
        fn transpose_involution(m in any_matrix()) {
            prop_assert_eq!(m.transpose().transpose(), m);
        }

        #[test]
        fn add_then_sub_round_trips((a, b) in matrix_pair()) {
            let round_trip = &(&a + &b) - &b;
            prop_assert!(max_abs_diff(&round_trip, &a) <= 1e-9);
        }

        #[test]
        fn add_commutes((a, b) in matrix_pair()) {
            prop_assert_eq!(&a + &b, &b + &a);
        }

        #[test]
        fn transpose_of_product(
            (a, b) in (1usize..5, 1usize..5, 1usize..5)
                .prop_flat_map(|(r, k, c)| (matrix(r, k), matrix(k, c)))
        ) {
            let left = a.mm(&b).unwrap().transpose();
            let right = b.transpose().mm(&a.transpose()).unwrap();
            prop_assert!(max_abs_diff(&left, &right) <= 1e-9);
        }

        #[test]
        fn dominant_matrices_pass_the_dominance_check(m in dominant_matrix()) {
            prop_assert!(m.is_diagonally_dominant());
        }

        #[test]
        fn inverse_right_multiplies_to_identity(m in dominant_matrix()) {
            let inv = m.inverse().unwrap();
            let product = m.mm(&inv).unwrap();
            let identity = DenseMatrix::identity(m.num_rows());
            prop_assert!(max_abs_diff(&product, &identity) <= 1e-6);
        }

        #[test]
        fn parallel_inverse_matches_sequential(m in dominant_matrix()) {
            let config = ParallelConfig {
                parallel_threshold: 1,
                ..ParallelConfig::default()
            };
            let sequential = m.inverse().unwrap();
            let parallel = parallel_inverse(&m, &config).unwrap();
            prop_assert!(max_abs_diff(&parallel, &sequential) <= 1e-12);
        }

        #[test]
        fn flat_buffer_round_trips(m in any_matrix()) {
            let buffer = m.to_flat_buffer().unwrap();
            prop_assert_eq!(DenseMatrix::from_flat_buffer(&buffer).unwrap(), m);
        }

        #[test]
        fn csv_round_trips_exactly(
            (rows, cols, cells) in (1usize..6, 1usize..6)
                .prop_flat_map(|(r, c)| {
                    (Just(r), Just(c), proptest::collection::vec(-1000i32..1000, r * c))
                })
        ) {
            let m = DenseMatrix::from_vec(
                rows,
                cols,
                cells.into_iter().map(f64::from).collect(),
            );
            let mut rendered = String::new();
            for i in 0..rows {
                let line = m
                    .row(i)
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                rendered.push_str(&line);
                rendered.push('\n');
            }
            prop_assert_eq!(read_from(Cursor::new(rendered)).unwrap(), m);
        }
    }
}
