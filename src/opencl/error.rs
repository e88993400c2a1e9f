//! Ошибки OpenCL слоя

use super::types::cl_int;
use std::path::PathBuf;
use thiserror::Error;

/// Ошибка работы с OpenCL
///
/// Ошибки окружения (`NoPlatform`, `NoDevice`) отделены от ошибок отдельных
/// вызовов API, чтобы вызывающая сторона могла решить, что делать дальше.
#[derive(Debug, Error)]
pub enum ClError {
    #[error("платформы OpenCL не найдены")]
    NoPlatform,

    #[error("устройства OpenCL запрошенного типа не найдены")]
    NoDevice,

    #[error("{call} завершился с кодом {code}")]
    Api { call: &'static str, code: cl_int },

    #[error("ошибка компиляции программы:\n{log}")]
    Build { log: String },

    #[error("не удалось прочитать исходник ядра {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_names_call_and_code() {
        let err = ClError::Api { call: "clFinish", code: -36 };
        let text = err.to_string();
        assert!(text.contains("clFinish"));
        assert!(text.contains("-36"));
    }

    #[test]
    fn build_error_carries_log() {
        let err = ClError::Build { log: "error: expected ';'".into() };
        assert!(err.to_string().contains("expected ';'"));
    }
}
