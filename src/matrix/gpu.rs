//! GPU реализации умножения матриц

use super::types::Matrix;
use super::KERNEL_PATH;
use crate::opencl::error::ClError;
use crate::opencl::session::Session;
use crate::opencl::types::{CL_DEVICE_TYPE_GPU, CL_MEM_READ_ONLY, CL_MEM_WRITE_ONLY};
use std::path::Path;
use std::time::Instant;

/// Размер тайла: выходное пространство разбивается на блоки 16x16
pub const BLOCK_SIZE: usize = 16;

fn assert_block_aligned(a: &Matrix, b: &Matrix) {
    assert_eq!(a.width, b.height);
    assert!(
        a.width % BLOCK_SIZE == 0 && a.height % BLOCK_SIZE == 0 && b.width % BLOCK_SIZE == 0,
        "размеры матриц должны быть кратны {}",
        BLOCK_SIZE
    );
}

/// Умножение на GPU через буферы; вариант ядра выбирается именем
/// точки входа (`matrix_multiply_naive` или `matrix_multiply_optimized`)
pub fn multiply_gpu_buffers(a: &Matrix, b: &Matrix, kernel_name: &str) -> Result<Matrix, ClError> {
    assert_block_aligned(a, b);
    let mut res = Matrix::new(b.width, a.height);

    let session = Session::create(CL_DEVICE_TYPE_GPU)?;

    let a_buffer = session.create_buffer::<i32>(CL_MEM_READ_ONLY, a.data.len())?;
    let b_buffer = session.create_buffer::<i32>(CL_MEM_READ_ONLY, b.data.len())?;
    let res_buffer = session.create_buffer::<i32>(CL_MEM_WRITE_ONLY, res.data.len())?;
    let transfers =
        [session.write_buffer(&a_buffer, &a.data)?, session.write_buffer(&b_buffer, &b.data)?];

    let program = session.build_program(Path::new(KERNEL_PATH))?;
    let kernel = program.kernel(kernel_name)?;

    kernel.set_arg_buffer(0, &a_buffer)?;
    kernel.set_arg_buffer(1, &b_buffer)?;
    kernel.set_arg_buffer(2, &res_buffer)?;
    kernel.set_arg_scalar(3, &(a.width as i32))?;
    kernel.set_arg_scalar(4, &(b.width as i32))?;

    let global = [res.width, res.height];
    let local = [BLOCK_SIZE, BLOCK_SIZE];

    println!("Запуск ядра {}", kernel_name);
    let start = Instant::now();
    session.enqueue_kernel_2d(&kernel, global, local, &transfers)?;
    session.finish()?;
    println!("Время выполнения ядра: {:.6} с", start.elapsed().as_secs_f64());

    session.read_buffer(&res_buffer, &mut res.data)?;
    Ok(res)
}

/// Умножение на GPU через двумерные изображения
pub fn multiply_gpu_images(a: &Matrix, b: &Matrix) -> Result<Matrix, ClError> {
    assert_block_aligned(a, b);
    let mut res = Matrix::new(b.width, a.height);

    let session = Session::create(CL_DEVICE_TYPE_GPU)?;

    let a_image = session.create_image_i32(CL_MEM_READ_ONLY, a.width, a.height)?;
    let b_image = session.create_image_i32(CL_MEM_READ_ONLY, b.width, b.height)?;
    let res_image = session.create_image_i32(CL_MEM_WRITE_ONLY, res.width, res.height)?;
    let transfers =
        [session.write_image(&a_image, &a.data)?, session.write_image(&b_image, &b.data)?];

    let program = session.build_program(Path::new(KERNEL_PATH))?;
    let kernel = program.kernel("matrix_multiply_images")?;

    kernel.set_arg_image(0, &a_image)?;
    kernel.set_arg_image(1, &b_image)?;
    kernel.set_arg_image(2, &res_image)?;
    kernel.set_arg_scalar(3, &(a.width as i32))?;

    let global = [res.width, res.height];
    let local = [BLOCK_SIZE, BLOCK_SIZE];

    println!("Запуск ядра matrix_multiply_images");
    let start = Instant::now();
    session.enqueue_kernel_2d(&kernel, global, local, &transfers)?;
    session.finish()?;
    println!("Время выполнения ядра: {:.6} с", start.elapsed().as_secs_f64());

    session.read_image(&res_image, &mut res.data)?;
    Ok(res)
}
