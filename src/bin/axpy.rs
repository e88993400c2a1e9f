//! Тест производительности AXPY: последовательная, многопоточная
//! и GPU реализации для одинарной и двойной точности

use anyhow::Result;
use opencl_bench::axpy::{self, AxpyScalar};
use opencl_bench::utils::bench;
use prettytable::{row, Table};
use std::time::Duration;

const N_F32: usize = 52_000_000;
const N_F64: usize = 20_000_000;
const INCX: usize = 3;
const INCY: usize = 2;
const A: f64 = 0.3;

fn fill<T: AxpyScalar>(buffer: &mut [T]) {
    for (i, value) in buffer.iter_mut().enumerate() {
        *value = T::from_f64(0.1 * (i % 10) as f64);
    }
}

fn seconds(durations: &[Duration]) -> f64 {
    durations[0].as_secs_f64()
}

fn report_mismatch(name: &str) {
    println!("ОШИБКА: '{}' неверный результат!", name);
}

fn run_case<T: AxpyScalar>(n: usize, names: [&str; 3], table: &mut Table) -> Result<()> {
    let a = T::from_f64(A);
    let mut x = vec![T::from_f64(0.0); n * INCX];
    let mut y = vec![T::from_f64(0.0); n * INCY];

    fill(&mut x);
    fill(&mut y);
    let (_, seq_times) = bench(names[0], 1, || axpy::axpy_seq(n, a, &x, INCX, &mut y, INCY));
    let reference = y.clone();

    fill(&mut x);
    fill(&mut y);
    let (_, par_times) = bench(names[1], 1, || axpy::axpy_par(n, a, &x, INCX, &mut y, INCY));
    if !axpy::validate(&y, &reference) {
        report_mismatch(names[1]);
    }

    fill(&mut x);
    fill(&mut y);
    let (gpu_result, gpu_times) =
        bench(names[2], 1, || axpy::axpy_gpu(n, a, &x, INCX, &mut y, INCY));
    gpu_result?;
    if !axpy::validate(&y, &reference) {
        report_mismatch(names[2]);
    }

    let seq = seconds(&seq_times);
    for (name, times) in [(names[0], &seq_times), (names[1], &par_times), (names[2], &gpu_times)] {
        let elapsed = seconds(times);
        table.add_row(row![
            name,
            format!("{:.6}", elapsed),
            format!("{:.2}", seq / elapsed)
        ]);
    }
    Ok(())
}

fn main() -> Result<()> {
    println!("Сравнение реализаций AXPY");
    println!("n = {} (f32), n = {} (f64), incx = {}, incy = {}, a = {}", N_F32, N_F64, INCX, INCY, A);

    let mut table = Table::new();
    table.add_row(row!["Вариант", "Время, с", "Ускорение"]);
    run_case::<f32>(N_F32, ["saxpy", "saxpy_par", "saxpy_gpu"], &mut table)?;
    run_case::<f64>(N_F64, ["daxpy", "daxpy_par", "daxpy_gpu"], &mut table)?;

    println!("\nИтоговая статистика:");
    table.printstd();
    Ok(())
}
