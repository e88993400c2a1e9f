//! GPU реализация AXPY

use super::{AxpyScalar, KERNEL_PATH};
use crate::opencl::error::ClError;
use crate::opencl::session::Session;
use crate::opencl::types::{CL_DEVICE_TYPE_GPU, CL_MEM_READ_ONLY, CL_MEM_READ_WRITE};
use std::path::Path;

/// Размер рабочей группы для одномерных ядер
pub const WORK_GROUP_SIZE: usize = 256;

/// AXPY на первом GPU первой платформы.
///
/// Глобальный размер округляется вверх до степени двойки, лишние
/// work-item'ы отсекаются проверкой границ внутри ядра.
pub fn axpy_gpu<T: AxpyScalar>(
    n: usize,
    a: T,
    x: &[T],
    incx: usize,
    y: &mut [T],
    incy: usize,
) -> Result<(), ClError> {
    assert!(x.len() >= n * incx && y.len() >= n * incy);
    let global_work_size = (n * incy).next_power_of_two();
    // обе величины - степени двойки, локальный размер всегда делит глобальный
    let local_work_size = WORK_GROUP_SIZE.min(global_work_size);

    let session = Session::create(CL_DEVICE_TYPE_GPU)?;

    let x_buffer = session.create_buffer::<T>(CL_MEM_READ_ONLY, x.len())?;
    let y_buffer = session.create_buffer::<T>(CL_MEM_READ_WRITE, y.len())?;
    let transfers = [session.write_buffer(&x_buffer, x)?, session.write_buffer(&y_buffer, y)?];

    let program = session.build_program(Path::new(KERNEL_PATH))?;
    let kernel = program.kernel(T::GPU_KERNEL)?;

    kernel.set_arg_scalar(0, &(n as i32))?;
    kernel.set_arg_scalar(1, &a)?;
    kernel.set_arg_buffer(2, &x_buffer)?;
    kernel.set_arg_scalar(3, &(incx as i32))?;
    kernel.set_arg_buffer(4, &y_buffer)?;
    kernel.set_arg_scalar(5, &(incy as i32))?;

    session.enqueue_kernel_1d(&kernel, global_work_size, local_work_size, &transfers)?;
    session.finish()?;
    session.read_buffer(&y_buffer, y)?;
    Ok(())
}
