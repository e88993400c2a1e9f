//! Тест производительности умножения матриц: последовательная,
//! многопоточная и три GPU реализации (буферы, буферы с тайлами,
//! изображения), каждая проверяется относительно последовательной

use anyhow::Result;
use opencl_bench::matrix::{self, Matrix, BLOCK_SIZE};
use opencl_bench::utils::bench;
use prettytable::{row, Table};
use std::time::Duration;

const N: usize = 800;
const M: usize = 640;
const TIMES: usize = 3;

fn separator() {
    println!("------------------------------------------------");
}

fn best(durations: &[Duration]) -> f64 {
    durations.iter().min().copied().unwrap_or_default().as_secs_f64()
}

fn main() -> Result<()> {
    assert!(N % BLOCK_SIZE == 0 && M % BLOCK_SIZE == 0);

    // A: M строк на N столбцов, B: N строк на M столбцов
    let a = Matrix::random(N, M);
    let b = Matrix::random(M, N);
    println!(
        "Умножение матриц {}x{} и {}x{}, {} запусков каждого варианта",
        a.height, a.width, b.height, b.width, TIMES
    );

    separator();
    let (seq, seq_times) = bench("seq", TIMES, || matrix::multiply_seq(&a, &b));

    separator();
    let (par, par_times) = bench("par", TIMES, || matrix::multiply_par(&a, &b));
    matrix::validate_results("par", &par, &seq);

    separator();
    let (naive, naive_times) =
        bench("gpu_naive", TIMES, || matrix::multiply_gpu_buffers(&a, &b, "matrix_multiply_naive"));
    matrix::validate_results("gpu_naive", &naive?, &seq);

    separator();
    let (optimized, optimized_times) = bench("gpu_optimized", TIMES, || {
        matrix::multiply_gpu_buffers(&a, &b, "matrix_multiply_optimized")
    });
    matrix::validate_results("gpu_optimized", &optimized?, &seq);

    separator();
    let (images, images_times) =
        bench("gpu_images", TIMES, || matrix::multiply_gpu_images(&a, &b));
    matrix::validate_results("gpu_images", &images?, &seq);

    separator();
    let seq_best = best(&seq_times);
    let mut table = Table::new();
    table.add_row(row!["Вариант", "Лучшее время, с", "Ускорение"]);
    for (name, times) in [
        ("seq", &seq_times),
        ("par", &par_times),
        ("gpu_naive", &naive_times),
        ("gpu_optimized", &optimized_times),
        ("gpu_images", &images_times),
    ] {
        let elapsed = best(times);
        table.add_row(row![name, format!("{:.6}", elapsed), format!("{:.2}", seq_best / elapsed)]);
    }
    println!("Итоговая статистика:");
    table.printstd();
    Ok(())
}
