//! AXPY: y := a*x + y над векторами с шагами incx/incy
//!
//! Предоставляет последовательную, многопоточную и GPU реализации
//! и проверку результата относительно последовательного эталона.

pub mod gpu;
mod operations;

pub use gpu::axpy_gpu;
pub use operations::{axpy_par, axpy_seq, validate, AxpyScalar, EPS};

/// Путь к исходнику GPU-ядер относительно рабочего каталога
pub const KERNEL_PATH: &str = "kernels/axpy.cl";
