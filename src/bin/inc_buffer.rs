//! Минимальный запуск ядра: инкремент буфера и печать результата

use anyhow::Result;
use opencl_bench::opencl::types::{CL_DEVICE_TYPE_ALL, CL_MEM_READ_WRITE};
use opencl_bench::Session;
use std::path::Path;

const KERNEL_PATH: &str = "kernels/inc_buffer.cl";

fn main() -> Result<()> {
    let session = Session::create(CL_DEVICE_TYPE_ALL)?;
    let program = session.build_program(Path::new(KERNEL_PATH))?;
    let kernel = program.kernel("inc_buffer")?;

    // буфер размером в одну рабочую группу ядра
    let work_group_size = kernel.work_group_size(session.device())?;
    let mut buffer = vec![0u32; work_group_size];

    let device_buffer = session.create_buffer::<u32>(CL_MEM_READ_WRITE, buffer.len())?;
    let transfer = session.write_buffer(&device_buffer, &buffer)?;
    kernel.set_arg_buffer(0, &device_buffer)?;
    session.enqueue_kernel_1d(&kernel, work_group_size, work_group_size, &[transfer])?;
    session.finish()?;
    session.read_buffer(&device_buffer, &mut buffer)?;

    print!("Буфер:");
    for value in &buffer {
        print!(" {}", value);
    }
    println!();
    Ok(())
}
