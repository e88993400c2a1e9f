//! Сессия устройства OpenCL
//!
//! Единая точка для повторяющейся последовательности: выбор платформы и
//! устройства, создание контекста и очереди команд, компиляция программы,
//! буферы/изображения и запуск ядер. Все обертки освобождают свои нативные
//! объекты в `Drop`, в том числе на путях с ошибкой.

use super::bindings::*;
use super::error::ClError;
use super::types::*;
use super::utils::to_c_string;
use crate::{cl_check, cl_create};
use std::ffi::c_void;
use std::marker::PhantomData;
use std::mem::size_of;
use std::path::Path;
use std::ptr;

/// Возвращает все платформы; ошибка `NoPlatform`, если их нет
pub fn platforms() -> Result<Vec<cl_platform_id>, ClError> {
    let mut count: cl_uint = 0;
    cl_check!(clGetPlatformIDs(0, ptr::null_mut(), &mut count))?;
    if count == 0 {
        return Err(ClError::NoPlatform);
    }
    let mut ids = vec![ptr::null_mut(); count as usize];
    cl_check!(clGetPlatformIDs(count, ids.as_mut_ptr(), ptr::null_mut()))?;
    Ok(ids)
}

/// Возвращает устройства заданного типа на платформе; ошибка `NoDevice`, если их нет
pub fn devices(
    platform: cl_platform_id,
    device_type: cl_device_type,
) -> Result<Vec<cl_device_id>, ClError> {
    let mut count: cl_uint = 0;
    let code = unsafe { clGetDeviceIDs(platform, device_type, 0, ptr::null_mut(), &mut count) };
    if code == CL_DEVICE_NOT_FOUND || (code == CL_SUCCESS && count == 0) {
        return Err(ClError::NoDevice);
    }
    if code != CL_SUCCESS {
        return Err(ClError::Api { call: "clGetDeviceIDs", code });
    }
    let mut ids = vec![ptr::null_mut(); count as usize];
    cl_check!(clGetDeviceIDs(platform, device_type, count, ids.as_mut_ptr(), ptr::null_mut()))?;
    Ok(ids)
}

/// Имя платформы
pub fn platform_name(platform: cl_platform_id) -> Result<String, ClError> {
    let mut size = 0usize;
    cl_check!(clGetPlatformInfo(platform, CL_PLATFORM_NAME, 0, ptr::null_mut(), &mut size))?;
    let mut bytes = vec![0u8; size];
    cl_check!(clGetPlatformInfo(
        platform,
        CL_PLATFORM_NAME,
        size,
        bytes.as_mut_ptr() as *mut c_void,
        ptr::null_mut()
    ))?;
    Ok(String::from_utf8_lossy(&bytes).trim_end_matches('\0').to_string())
}

/// Имя устройства
pub fn device_name(device: cl_device_id) -> Result<String, ClError> {
    let mut size = 0usize;
    cl_check!(clGetDeviceInfo(device, CL_DEVICE_NAME, 0, ptr::null_mut(), &mut size))?;
    let mut bytes = vec![0u8; size];
    cl_check!(clGetDeviceInfo(
        device,
        CL_DEVICE_NAME,
        size,
        bytes.as_mut_ptr() as *mut c_void,
        ptr::null_mut()
    ))?;
    Ok(String::from_utf8_lossy(&bytes).trim_end_matches('\0').to_string())
}

/// Контекст и очередь команд первого устройства заданного типа
/// на первой платформе
pub struct Session {
    device: cl_device_id,
    context: cl_context,
    queue: cl_command_queue,
}

impl Session {
    pub fn create(device_type: cl_device_type) -> Result<Self, ClError> {
        let platform = platforms()?[0];
        let device = devices(platform, device_type)?[0];
        let context = cl_create!(clCreateContext(ptr::null(), 1, &device, None, ptr::null_mut()))?;
        let queue = match cl_create!(clCreateCommandQueue(context, device, 0)) {
            Ok(queue) => queue,
            Err(err) => {
                unsafe { clReleaseContext(context) };
                return Err(err);
            }
        };
        Ok(Session { device, context, queue })
    }

    pub fn device(&self) -> cl_device_id {
        self.device
    }

    /// Читает исходник ядра из файла и компилирует его для устройства сессии.
    /// Исходник читается заново при каждом вызове, без кеширования.
    /// При неудачной сборке лог компилятора попадает в `ClError::Build`.
    pub fn build_program(&self, path: &Path) -> Result<Program, ClError> {
        let source = std::fs::read_to_string(path)
            .map_err(|source| ClError::Io { path: path.to_path_buf(), source })?;
        let src_ptr = source.as_ptr() as *const i8;
        let src_len = source.len();
        let program =
            cl_create!(clCreateProgramWithSource(self.context, 1, &src_ptr, &src_len))?;
        let code = unsafe {
            clBuildProgram(program, 1, &self.device, ptr::null(), None, ptr::null_mut())
        };
        if code != CL_SUCCESS {
            let log = self.build_log(program).unwrap_or_default();
            unsafe { clReleaseProgram(program) };
            return Err(ClError::Build { log });
        }
        Ok(Program { raw: program })
    }

    fn build_log(&self, program: cl_program) -> Result<String, ClError> {
        let mut size = 0usize;
        cl_check!(clGetProgramBuildInfo(
            program,
            self.device,
            CL_PROGRAM_BUILD_LOG,
            0,
            ptr::null_mut(),
            &mut size
        ))?;
        let mut bytes = vec![0u8; size];
        cl_check!(clGetProgramBuildInfo(
            program,
            self.device,
            CL_PROGRAM_BUILD_LOG,
            size,
            bytes.as_mut_ptr() as *mut c_void,
            ptr::null_mut()
        ))?;
        Ok(String::from_utf8_lossy(&bytes).trim_end_matches('\0').to_string())
    }

    /// Буфер устройства на `len` элементов типа `T`
    pub fn create_buffer<T>(&self, flags: cl_mem_flags, len: usize) -> Result<Buffer<T>, ClError> {
        let raw = cl_create!(clCreateBuffer(
            self.context,
            flags,
            len * size_of::<T>(),
            ptr::null_mut()
        ))?;
        Ok(Buffer { raw, len, _marker: PhantomData })
    }

    /// Двумерное изображение с одним каналом `CL_SIGNED_INT32`
    pub fn create_image_i32(
        &self,
        flags: cl_mem_flags,
        width: usize,
        height: usize,
    ) -> Result<Image2d, ClError> {
        let format = cl_image_format {
            image_channel_order: CL_R,
            image_channel_data_type: CL_SIGNED_INT32,
        };
        let raw = cl_create!(clCreateImage2D(
            self.context,
            flags,
            &format,
            width,
            height,
            0,
            ptr::null_mut()
        ))?;
        Ok(Image2d { raw, width, height })
    }

    /// Неблокирующая запись в буфер; возвращает событие завершения
    pub fn write_buffer<T>(&self, buffer: &Buffer<T>, data: &[T]) -> Result<Event, ClError> {
        assert_eq!(data.len(), buffer.len);
        let mut event = ptr::null_mut();
        cl_check!(clEnqueueWriteBuffer(
            self.queue,
            buffer.raw,
            CL_FALSE,
            0,
            data.len() * size_of::<T>(),
            data.as_ptr() as *const c_void,
            0,
            ptr::null(),
            &mut event
        ))?;
        Ok(Event { raw: event })
    }

    /// Блокирующее чтение буфера в память хоста
    pub fn read_buffer<T>(&self, buffer: &Buffer<T>, out: &mut [T]) -> Result<(), ClError> {
        assert_eq!(out.len(), buffer.len);
        cl_check!(clEnqueueReadBuffer(
            self.queue,
            buffer.raw,
            CL_TRUE,
            0,
            out.len() * size_of::<T>(),
            out.as_mut_ptr() as *mut c_void,
            0,
            ptr::null(),
            ptr::null_mut()
        ))
    }

    /// Неблокирующая запись изображения; возвращает событие завершения
    pub fn write_image(&self, image: &Image2d, data: &[i32]) -> Result<Event, ClError> {
        assert_eq!(data.len(), image.width * image.height);
        let origin = [0usize; 3];
        let region = [image.width, image.height, 1];
        let mut event = ptr::null_mut();
        cl_check!(clEnqueueWriteImage(
            self.queue,
            image.raw,
            CL_FALSE,
            origin.as_ptr(),
            region.as_ptr(),
            0,
            0,
            data.as_ptr() as *const c_void,
            0,
            ptr::null(),
            &mut event
        ))?;
        Ok(Event { raw: event })
    }

    /// Блокирующее чтение изображения в память хоста
    pub fn read_image(&self, image: &Image2d, out: &mut [i32]) -> Result<(), ClError> {
        assert_eq!(out.len(), image.width * image.height);
        let origin = [0usize; 3];
        let region = [image.width, image.height, 1];
        cl_check!(clEnqueueReadImage(
            self.queue,
            image.raw,
            CL_TRUE,
            origin.as_ptr(),
            region.as_ptr(),
            0,
            0,
            out.as_mut_ptr() as *mut c_void,
            0,
            ptr::null(),
            ptr::null_mut()
        ))
    }

    /// Запуск одномерного ядра, ожидающего события `wait`
    pub fn enqueue_kernel_1d(
        &self,
        kernel: &Kernel,
        global: usize,
        local: usize,
        wait: &[Event],
    ) -> Result<(), ClError> {
        self.enqueue(kernel, 1, &[global], &[local], wait)
    }

    /// Запуск двумерного ядра, ожидающего события `wait`
    pub fn enqueue_kernel_2d(
        &self,
        kernel: &Kernel,
        global: [usize; 2],
        local: [usize; 2],
        wait: &[Event],
    ) -> Result<(), ClError> {
        self.enqueue(kernel, 2, &global, &local, wait)
    }

    fn enqueue(
        &self,
        kernel: &Kernel,
        work_dim: u32,
        global: &[usize],
        local: &[usize],
        wait: &[Event],
    ) -> Result<(), ClError> {
        let events: Vec<cl_event> = wait.iter().map(|e| e.raw).collect();
        let (num_events, events_ptr) = if events.is_empty() {
            (0, ptr::null())
        } else {
            (events.len() as u32, events.as_ptr())
        };
        cl_check!(clEnqueueNDRangeKernel(
            self.queue,
            kernel.raw,
            work_dim,
            ptr::null(),
            global.as_ptr(),
            local.as_ptr(),
            num_events,
            events_ptr,
            ptr::null_mut()
        ))
    }

    /// Блокирует до полного опустошения очереди команд
    pub fn finish(&self) -> Result<(), ClError> {
        cl_check!(clFinish(self.queue))
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        unsafe {
            clReleaseCommandQueue(self.queue);
            clReleaseContext(self.context);
        }
    }
}

/// Скомпилированная программа
pub struct Program {
    raw: cl_program,
}

impl Program {
    /// Создает ядро по имени точки входа
    pub fn kernel(&self, name: &str) -> Result<Kernel, ClError> {
        let c_name = to_c_string(name);
        let raw = cl_create!(clCreateKernel(self.raw, c_name.as_ptr()))?;
        Ok(Kernel { raw })
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe { clReleaseProgram(self.raw) };
    }
}

/// Ядро с позиционной привязкой аргументов
pub struct Kernel {
    raw: cl_kernel,
}

impl Kernel {
    pub fn set_arg_buffer<T>(&self, index: u32, buffer: &Buffer<T>) -> Result<(), ClError> {
        cl_check!(clSetKernelArg(
            self.raw,
            index,
            size_of::<cl_mem>(),
            &buffer.raw as *const cl_mem as *const c_void
        ))
    }

    pub fn set_arg_image(&self, index: u32, image: &Image2d) -> Result<(), ClError> {
        cl_check!(clSetKernelArg(
            self.raw,
            index,
            size_of::<cl_mem>(),
            &image.raw as *const cl_mem as *const c_void
        ))
    }

    pub fn set_arg_scalar<T: Copy>(&self, index: u32, value: &T) -> Result<(), ClError> {
        cl_check!(clSetKernelArg(
            self.raw,
            index,
            size_of::<T>(),
            value as *const T as *const c_void
        ))
    }

    /// Максимальный размер рабочей группы ядра на устройстве
    pub fn work_group_size(&self, device: cl_device_id) -> Result<usize, ClError> {
        let mut size = 0usize;
        cl_check!(clGetKernelWorkGroupInfo(
            self.raw,
            device,
            CL_KERNEL_WORK_GROUP_SIZE,
            size_of::<usize>(),
            &mut size as *mut usize as *mut c_void,
            ptr::null_mut()
        ))?;
        Ok(size)
    }
}

impl Drop for Kernel {
    fn drop(&mut self) {
        unsafe { clReleaseKernel(self.raw) };
    }
}

/// Типизированный буфер устройства
pub struct Buffer<T> {
    raw: cl_mem,
    len: usize,
    _marker: PhantomData<T>,
}

impl<T> Drop for Buffer<T> {
    fn drop(&mut self) {
        unsafe { clReleaseMemObject(self.raw) };
    }
}

/// Двумерное изображение устройства
pub struct Image2d {
    raw: cl_mem,
    width: usize,
    height: usize,
}

impl Drop for Image2d {
    fn drop(&mut self) {
        unsafe { clReleaseMemObject(self.raw) };
    }
}

/// Событие завершения асинхронной операции
pub struct Event {
    raw: cl_event,
}

impl Drop for Event {
    fn drop(&mut self) {
        unsafe { clReleaseEvent(self.raw) };
    }
}
