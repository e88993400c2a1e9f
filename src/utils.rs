//! Вспомогательные функции и утилиты

use std::time::{Duration, Instant};

/// Измеряет время выполнения функции
pub fn measure_time<F, T>(f: F) -> (T, Duration)
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let result = f();
    let duration = start.elapsed();
    (result, duration)
}

/// Запускает функцию `times` раз, печатая время каждого запуска.
/// Возвращает значение последнего запуска и все замеры; статистика
/// не агрегируется, каждая итерация печатается отдельно.
pub fn bench<R>(name: &str, times: usize, mut f: impl FnMut() -> R) -> (R, Vec<Duration>) {
    assert!(times > 0);
    let mut durations = Vec::with_capacity(times);
    let mut last = None;
    for i in 1..=times {
        println!("Запуск {}:{}", name, i);
        let (value, duration) = measure_time(&mut f);
        println!("{}:{} время выполнения: {:.6} с", name, i, duration.as_secs_f64());
        durations.push(duration);
        last = Some(value);
    }
    (last.unwrap(), durations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_time_returns_value() {
        let (value, duration) = measure_time(|| 2 + 2);
        assert_eq!(value, 4);
        assert!(duration <= Duration::from_secs(1));
    }

    #[test]
    fn bench_runs_requested_number_of_times() {
        let mut calls = 0;
        let (last, durations) = bench("test", 3, || {
            calls += 1;
            calls
        });
        assert_eq!(calls, 3);
        assert_eq!(last, 3);
        assert_eq!(durations.len(), 3);
    }
}
