//! Перечисление платформ и устройств OpenCL

use anyhow::Result;
use opencl_bench::opencl::session;
use opencl_bench::opencl::types::CL_DEVICE_TYPE_ALL;

fn main() -> Result<()> {
    for platform in session::platforms()? {
        println!("Платформа: {}", session::platform_name(platform)?);
        for device in session::devices(platform, CL_DEVICE_TYPE_ALL)? {
            println!("Устройство: {}", session::device_name(device)?);
        }
    }
    Ok(())
}
