//! Conversion throughput for the rotation engine.
//!
//! Every operation is O(1); these numbers exist to catch accidental allocation or
//! branching regressions in the hot conversions:
//! - Euler ↔ quaternion
//! - quaternion ↔ matrix (all four Shepperd branches)
//! - chain folding and mapping resolution
//! - matrix validation and orthonormalization

use std::hint::black_box;

use apex_rotations::io::decode_chain;
use apex_rotations::rotation::{
    Axis, AxisMapping, EulerAngles, InputValidator, Quaternion, RotationMatrix, compute_chain,
};
use criterion::{Criterion, criterion_group, criterion_main};

fn bench_euler(c: &mut Criterion) {
    let euler = EulerAngles::new(30.0, -45.0, 120.0);
    let q = euler.to_quaternion();

    c.bench_function("euler_to_quaternion", |b| {
        b.iter(|| black_box(black_box(euler).to_quaternion()))
    });
    c.bench_function("quaternion_to_euler", |b| {
        b.iter(|| black_box(black_box(q).to_euler_angles()))
    });
}

fn bench_matrix(c: &mut Criterion) {
    // One input per Shepperd branch: trace, m00, m11, m22
    let branches: [(&str, Quaternion); 4] = [
        ("trace", EulerAngles::new(10.0, 20.0, 30.0).to_quaternion()),
        ("m00", Axis::X.quaternion(170.0)),
        ("m11", Axis::Y.quaternion(170.0)),
        ("m22", Axis::Z.quaternion(170.0)),
    ];

    let mut group = c.benchmark_group("matrix_to_quaternion");
    for (name, q) in branches {
        let m = q.to_rotation_matrix();
        group.bench_function(name, |b| b.iter(|| black_box(black_box(m).to_quaternion())));
    }
    group.finish();

    let q = branches[0].1;
    c.bench_function("quaternion_to_matrix", |b| {
        b.iter(|| black_box(RotationMatrix::from_quaternion(black_box(&q))))
    });
}

fn bench_composition(c: &mut Criterion) {
    let chain = decode_chain("x.90_y.-45_z.30_x.12.5_y.80_z.-170");
    let steps = chain.steps().to_vec();
    c.bench_function("compute_chain_6_steps", |b| {
        b.iter(|| black_box(compute_chain(black_box(&steps))))
    });

    let mapping = AxisMapping::identity()
        .apply_ninety_degree_step(Axis::X, true)
        .apply_ninety_degree_step(Axis::Z, false);
    c.bench_function("mapping_to_quaternion", |b| {
        b.iter(|| black_box(black_box(mapping).to_quaternion()))
    });
    c.bench_function("mapping_ninety_degree_step", |b| {
        b.iter(|| black_box(black_box(mapping).apply_ninety_degree_step(Axis::Y, true)))
    });
}

fn bench_validation(c: &mut Criterion) {
    let validator = InputValidator::new();
    let skewed =
        RotationMatrix::from_rows([[1.0, 0.2, 0.0], [0.05, 1.0, 0.0], [0.0, 0.1, 0.98]]);

    c.bench_function("validate_matrix", |b| {
        b.iter(|| black_box(validator.validate_matrix(black_box(&skewed))))
    });
    c.bench_function("orthonormalize_matrix", |b| {
        b.iter(|| black_box(validator.orthonormalize_matrix(black_box(&skewed))))
    });
}

criterion_group!(
    benches,
    bench_euler,
    bench_matrix,
    bench_composition,
    bench_validation
);
criterion_main!(benches);
