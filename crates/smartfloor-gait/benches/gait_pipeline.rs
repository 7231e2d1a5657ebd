//! Benchmarks for the gait pipeline hot paths.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use smartfloor_core::Timestamp;
use smartfloor_gait::{cop, GaitAnalysis, GaitConfig};
use smartfloor_grid::{
    Denoiser, FloorConfig, FloorRecording, SensorRow, BOARD_HEIGHT, BOARD_WIDTH,
    DEFAULT_BOARD_ORDER, SENSORS_PER_BOARD, SENSOR_LAYOUT,
};

/// A synthetic stepping walk: dwell on alternating-side plants with quick
/// transfers, plus a small sway to keep the series aperiodic.
fn blob_center(t: f64) -> Option<(f64, f64)> {
    if t < 0.6 {
        return None;
    }
    let u = t - 0.6;
    let period = 0.64;
    let dwell = 0.48;
    let i = (u / period).floor() as usize;
    if i >= 5 {
        return None;
    }
    let phase = u - i as f64 * period;
    let side = if i % 2 == 0 { -1.2 } else { 1.2 };
    let x = 2.0 + i as f64 * 2.0;
    let pos = if phase <= dwell {
        (x, 4.0 + side)
    } else {
        let w = (phase - dwell) / (period - dwell);
        (x + w * w * 2.0, 4.0 + side * (1.0 - 2.0 * w * w))
    };
    Some((
        pos.0 + 0.03 * (7.37 * t).sin(),
        pos.1 + 0.03 * (5.93 * t).sin(),
    ))
}

fn synth_recording() -> FloorRecording {
    let mut rows = Vec::new();
    for (b, &board) in DEFAULT_BOARD_ORDER.iter().enumerate() {
        let mut t_ms = b as i64 * 7;
        while t_ms <= 4_500 {
            let center = blob_center(t_ms as f64 / 1_000.0);
            let mut readings = vec![0u16; SENSORS_PER_BOARD];
            for (r, layout_row) in SENSOR_LAYOUT.iter().enumerate() {
                let y = BOARD_HEIGHT - 1 - r;
                for (c, &sensor) in layout_row.iter().enumerate() {
                    let gx = (b * BOARD_WIDTH + c) as f64;
                    let mut value = 10.0;
                    if let Some((cx, cy)) = center {
                        let d2 = (gx - cx).powi(2) + (y as f64 - cy).powi(2);
                        value += 400.0 * (-d2 / 1.28).exp();
                    }
                    readings[sensor] = value.round() as u16;
                }
            }
            rows.push(SensorRow::new(board, Timestamp::from_millis(t_ms), readings));
            t_ms += 40;
        }
    }
    FloorRecording::from_rows("bench", &rows, &FloorConfig::default()).unwrap()
}

fn benchmark_denoise(c: &mut Criterion) {
    let recording = synth_recording();
    let denoiser = Denoiser::default();

    c.bench_function("denoise_grid", |b| {
        b.iter(|| denoiser.denoise(black_box(recording.samples()), recording.noise()))
    });
}

fn benchmark_cop(c: &mut Criterion) {
    let recording = synth_recording();

    c.bench_function("cop_series", |b| {
        b.iter(|| cop::cop_series(black_box(recording.pressure())))
    });
}

fn benchmark_footstep_detection(c: &mut Criterion) {
    let recording = synth_recording();

    c.bench_function("footstep_detection", |b| {
        b.iter_batched(
            || GaitAnalysis::new(recording.clone(), GaitConfig::new(5.0)),
            |analysis| analysis.footsteps().len(),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    benchmark_denoise,
    benchmark_cop,
    benchmark_footstep_detection
);
criterion_main!(benches);
