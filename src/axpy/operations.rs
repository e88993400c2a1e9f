//! CPU реализации AXPY и проверка результатов

use rayon::prelude::*;

/// Абсолютная погрешность сравнения с эталоном
pub const EPS: f64 = 1e-5;

/// Скаляр, для которого определены все варианты AXPY
pub trait AxpyScalar: Copy + Send + Sync + 'static {
    /// Имя точки входа GPU-ядра
    const GPU_KERNEL: &'static str;

    fn from_f64(value: f64) -> Self;
    fn mad(a: Self, x: Self, y: Self) -> Self;
    fn abs_diff(lhs: Self, rhs: Self) -> f64;
}

impl AxpyScalar for f32 {
    const GPU_KERNEL: &'static str = "saxpy_gpu";

    fn from_f64(value: f64) -> Self {
        value as f32
    }

    fn mad(a: Self, x: Self, y: Self) -> Self {
        y + a * x
    }

    fn abs_diff(lhs: Self, rhs: Self) -> f64 {
        (lhs - rhs).abs() as f64
    }
}

impl AxpyScalar for f64 {
    const GPU_KERNEL: &'static str = "daxpy_gpu";

    fn from_f64(value: f64) -> Self {
        value
    }

    fn mad(a: Self, x: Self, y: Self) -> Self {
        y + a * x
    }

    fn abs_diff(lhs: Self, rhs: Self) -> f64 {
        (lhs - rhs).abs()
    }
}

/// Последовательный AXPY: y[i*incy] += a * x[i*incx]
pub fn axpy_seq<T: AxpyScalar>(n: usize, a: T, x: &[T], incx: usize, y: &mut [T], incy: usize) {
    assert!(x.len() >= n * incx && y.len() >= n * incy);
    for i in 0..n {
        y[i * incy] = T::mad(a, x[i * incx], y[i * incy]);
    }
}

/// Многопоточный AXPY. Каждый элемент y пишется ровно одной итерацией,
/// поэтому разбиение по incy-блокам свободно от гонок.
pub fn axpy_par<T: AxpyScalar>(n: usize, a: T, x: &[T], incx: usize, y: &mut [T], incy: usize) {
    assert!(incy > 0 && x.len() >= n * incx && y.len() >= n * incy);
    y[..n * incy]
        .par_chunks_exact_mut(incy)
        .enumerate()
        .for_each(|(i, chunk)| chunk[0] = T::mad(a, x[i * incx], chunk[0]));
}

/// Поэлементное сравнение с эталоном с фиксированной абсолютной погрешностью
pub fn validate<T: AxpyScalar>(actual: &[T], reference: &[T]) -> bool {
    actual.len() == reference.len()
        && actual
            .par_iter()
            .zip(reference.par_iter())
            .all(|(lhs, rhs)| T::abs_diff(*lhs, *rhs) <= EPS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(len: usize) -> Vec<f32> {
        (0..len).map(|i| 0.1 * (i % 10) as f32).collect()
    }

    #[test]
    fn seq_respects_strides() {
        let n = 4;
        let (incx, incy) = (3, 2);
        let x: Vec<f32> = (0..n * incx).map(|i| i as f32).collect();
        let mut y = vec![1.0f32; n * incy];
        axpy_seq(n, 2.0, &x, incx, &mut y, incy);
        // y[2k] = 1 + 2 * x[3k], нечетные индексы не тронуты
        assert_eq!(y, vec![1.0, 1.0, 7.0, 1.0, 13.0, 1.0, 19.0, 1.0]);
    }

    #[test]
    fn par_matches_seq() {
        let n = 1000;
        let (incx, incy) = (3, 2);
        let x = pattern(n * incx);
        let mut y_seq = pattern(n * incy);
        let mut y_par = y_seq.clone();
        axpy_seq(n, 0.3, &x, incx, &mut y_seq, incy);
        axpy_par(n, 0.3, &x, incx, &mut y_par, incy);
        assert_eq!(y_seq, y_par);
        assert!(validate(&y_par, &y_seq));
    }

    #[test]
    fn unit_strides() {
        let n = 16;
        let x = vec![1.0f64; n];
        let mut y = vec![0.5f64; n];
        axpy_par(n, 0.25, &x, 1, &mut y, 1);
        assert!(y.iter().all(|&v| (v - 0.75).abs() < 1e-12));
    }

    #[test]
    fn validate_tolerance_boundary() {
        let reference = vec![1.0f32; 8];
        let mut within = reference.clone();
        within[3] += 5e-6;
        assert!(validate(&within, &reference));

        let mut outside = reference.clone();
        outside[3] += 2e-5;
        assert!(!validate(&outside, &reference));
    }

    #[test]
    fn validate_rejects_length_mismatch() {
        assert!(!validate(&[1.0f32, 2.0], &[1.0f32]));
    }
}
