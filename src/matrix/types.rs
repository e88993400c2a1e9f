//! Тип матрицы

use rand::Rng;

/// Целочисленная матрица в плоском row-major представлении
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    pub width: usize,
    pub height: usize,
    pub data: Vec<i32>,
}

impl Matrix {
    /// Нулевая матрица заданных размеров
    pub fn new(width: usize, height: usize) -> Self {
        Matrix { width, height, data: vec![0; width * height] }
    }

    /// Матрица со случайными элементами из диапазона 0..100
    pub fn random(width: usize, height: usize) -> Self {
        let mut rng = rand::thread_rng();
        let data = (0..width * height).map(|_| rng.gen_range(0..100)).collect();
        Matrix { width, height, data }
    }

    pub fn at(&self, row: usize, col: usize) -> i32 {
        self.data[row * self.width + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_zeroed() {
        let m = Matrix::new(3, 2);
        assert_eq!(m.data.len(), 6);
        assert!(m.data.iter().all(|&v| v == 0));
    }

    #[test]
    fn random_stays_in_range() {
        let m = Matrix::random(16, 16);
        assert!(m.data.iter().all(|&v| (0..100).contains(&v)));
    }
}
