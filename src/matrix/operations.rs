//! CPU реализации умножения матриц и проверка результатов

use super::types::Matrix;
use indicatif::ProgressBar;
use rayon::prelude::*;

/// Последовательное умножение, эталон для всех остальных вариантов
pub fn multiply_seq(a: &Matrix, b: &Matrix) -> Matrix {
    assert_eq!(a.width, b.height);
    let mut res = Matrix::new(b.width, a.height);
    let progress = ProgressBar::new(a.height as u64);
    for i in 0..a.height {
        for j in 0..b.width {
            let mut sum = 0i32;
            for k in 0..a.width {
                sum += a.data[i * a.width + k] * b.data[k * b.width + j];
            }
            res.data[i * res.width + j] = sum;
        }
        progress.inc(1);
    }
    progress.finish_and_clear();
    res
}

/// Многопоточное умножение: каждая строка результата считается
/// ровно одним потоком
pub fn multiply_par(a: &Matrix, b: &Matrix) -> Matrix {
    assert_eq!(a.width, b.height);
    let mut res = Matrix::new(b.width, a.height);
    let width = res.width;
    res.data.par_chunks_exact_mut(width).enumerate().for_each(|(i, row)| {
        for (j, out) in row.iter_mut().enumerate() {
            let mut sum = 0i32;
            for k in 0..a.width {
                sum += a.data[i * a.width + k] * b.data[k * b.width + j];
            }
            *out = sum;
        }
    });
    res
}

/// Точное целочисленное сравнение с эталоном. Расхождение не фатально:
/// печатается сообщение с именем варианта, выполнение продолжается.
pub fn validate_results(name: &str, actual: &Matrix, reference: &Matrix) -> bool {
    let ok = actual.width == reference.width
        && actual.height == reference.height
        && actual
            .data
            .par_iter()
            .zip(reference.data.par_iter())
            .all(|(lhs, rhs)| lhs == rhs);
    if !ok {
        println!("ОШИБКА: '{}' неверный результат!", name);
    }
    ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seq_known_product() {
        // (2x3) * (3x2)
        let a = Matrix { width: 3, height: 2, data: vec![1, 2, 3, 4, 5, 6] };
        let b = Matrix { width: 2, height: 3, data: vec![7, 8, 9, 10, 11, 12] };
        let res = multiply_seq(&a, &b);
        assert_eq!(res.width, 2);
        assert_eq!(res.height, 2);
        assert_eq!(res.data, vec![58, 64, 139, 154]);
        assert_eq!(res.at(1, 0), 139);
    }

    #[test]
    fn seq_identity() {
        let a = Matrix::random(4, 4);
        let mut id = Matrix::new(4, 4);
        for i in 0..4 {
            id.data[i * 4 + i] = 1;
        }
        assert_eq!(multiply_seq(&a, &id), a);
    }

    #[test]
    fn par_matches_seq() {
        let a = Matrix::random(48, 32);
        let b = Matrix::random(16, 48);
        let seq = multiply_seq(&a, &b);
        let par = multiply_par(&a, &b);
        assert!(validate_results("par", &par, &seq));
        assert_eq!(seq, par);
    }

    #[test]
    fn validate_detects_mismatch() {
        let reference = Matrix::random(8, 8);
        let mut actual = reference.clone();
        actual.data[17] += 1;
        assert!(!validate_results("broken", &actual, &reference));
    }

    #[test]
    fn validate_rejects_dimension_mismatch() {
        let reference = Matrix::new(4, 4);
        let actual = Matrix::new(4, 5);
        assert!(!validate_results("shape", &actual, &reference));
    }
}
