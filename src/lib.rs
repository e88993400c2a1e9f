//! Сравнение последовательных, многопоточных и OpenCL реализаций
//! двух вычислительных ядер: AXPY и умножения матриц

pub mod axpy;
pub mod matrix;
pub mod opencl;
pub mod utils;

// Реэкспортируем макросы на уровень крейта
#[macro_use]
mod macros {
    /// Макрос для обработки кодов возврата OpenCL
    #[macro_export]
    macro_rules! cl_check {
        ($func:ident($($arg:expr),* $(,)?)) => {{
            let code = unsafe { $crate::opencl::bindings::$func($($arg),*) };
            if code != $crate::opencl::types::CL_SUCCESS {
                Err($crate::opencl::error::ClError::Api { call: stringify!($func), code })
            } else {
                Ok(())
            }
        }};
    }

    /// Макрос для вызовов OpenCL, создающих объект: добавляет выходной
    /// параметр с кодом ошибки и проверяет указатель на null
    #[macro_export]
    macro_rules! cl_create {
        ($func:ident($($arg:expr),* $(,)?)) => {{
            let mut err: $crate::opencl::types::cl_int = $crate::opencl::types::CL_SUCCESS;
            let obj = unsafe { $crate::opencl::bindings::$func($($arg,)* &mut err) };
            if obj.is_null() {
                Err($crate::opencl::error::ClError::Api { call: stringify!($func), code: err })
            } else {
                Ok(obj)
            }
        }};
    }
}

// Реэкспорт основных типов для удобства
pub use opencl::error::ClError;
pub use opencl::session::Session;
