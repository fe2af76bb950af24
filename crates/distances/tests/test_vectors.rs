use rand::prelude::*;

use emd_distances::vectors::{euclidean, euclidean_sq, manhattan};

fn l1(x: &[u8], y: &[u8]) -> f64 {
    x.iter()
        .zip(y.iter())
        .fold(0., |acc, (&a, &b)| acc + (f64::from(a) - f64::from(b)).abs())
}

fn l2_sq(x: &[u8], y: &[u8]) -> f64 {
    x.iter()
        .zip(y.iter())
        .fold(0., |acc, (&a, &b)| acc + (f64::from(a) - f64::from(b)).powi(2))
}

#[test]
fn lp_u8() {
    let mut rng = StdRng::seed_from_u64(42);
    let data = (0..20)
        .map(|_| (0..28 * 28).map(|_| rng.gen::<u8>()).collect::<Vec<_>>())
        .collect::<Vec<_>>();

    for x in &data {
        for y in &data {
            let expected = l1(x, y);
            let actual = manhattan(x, y);
            assert!(
                (expected - actual).abs() <= f64::EPSILON,
                "Manhattan: expected: {expected}, actual: {actual}"
            );

            let expected = l2_sq(x, y);
            let actual = euclidean_sq(x, y);
            assert!(
                (expected - actual).abs() <= f64::EPSILON,
                "Euclidean squared: expected: {expected}, actual: {actual}"
            );

            let expected = expected.sqrt();
            let actual = euclidean(x, y);
            assert!(
                (expected - actual).abs() <= 1e-9,
                "Euclidean: expected: {expected}, actual: {actual}"
            );
        }
    }
}

#[test]
fn single_pixel_deltas() {
    let query = vec![0_u8; 28 * 28];
    for delta in [1_u8, 17, 255] {
        let mut other = query.clone();
        other[400] = delta;
        assert!((manhattan(&query, &other) - f64::from(delta)).abs() <= f64::EPSILON);
        assert!((manhattan(&other, &query) - f64::from(delta)).abs() <= f64::EPSILON);
    }
}

#[test]
fn float_images() {
    let x = vec![0.5_f32, 0.25, 1.0];
    let y = vec![0.0_f32, 0.75, 1.0];
    assert!((manhattan(&x, &y) - 1.0).abs() <= f64::EPSILON);
}

#[test]
fn signed_extremes() {
    let x = vec![i16::MIN, 0, i16::MAX];
    let y = vec![i16::MAX, 0, i16::MIN];
    assert!((manhattan(&x, &y) - 131_070.0).abs() <= f64::EPSILON);

    let x = vec![i32::MIN];
    let y = vec![i32::MAX];
    assert!((manhattan(&x, &y) - 4_294_967_295.0).abs() <= f64::EPSILON);
}
