//! Модуль для работы с матрицами
//!
//! Предоставляет:
//! - Тип матрицы в плоском row-major представлении
//! - Последовательное и многопоточное умножение
//! - GPU-ускоренные реализации на буферах и изображениях

pub mod gpu;
mod operations;
mod types;

pub use gpu::{multiply_gpu_buffers, multiply_gpu_images, BLOCK_SIZE};
pub use operations::{multiply_par, multiply_seq, validate_results};
pub use types::Matrix;

/// Путь к исходнику GPU-ядер относительно рабочего каталога
pub const KERNEL_PATH: &str = "kernels/matrix_multiply.cl";
