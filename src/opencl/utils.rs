//! Вспомогательные функции для OpenCL

/// Преобразует строку в null-terminated массив байт для C
pub fn to_c_string(s: &str) -> Vec<i8> {
    let mut result: Vec<i8> = s.bytes().map(|b| b as i8).collect();
    result.push(0);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_terminator() {
        let c = to_c_string("inc_buffer");
        assert_eq!(c.len(), "inc_buffer".len() + 1);
        assert_eq!(*c.last().unwrap(), 0);
        assert_eq!(c[0], b'i' as i8);
    }
}
