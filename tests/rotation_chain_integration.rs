//! Integration tests for chain composition, conversions and the chain encoding
//!
//! Covers:
//! - world-frame composition order
//! - Euler, matrix and axis-angle round trips on random input
//! - chain text round trips through `RotationSource`

use apex_rotations::io::{decode_chain, encode_chain};
use apex_rotations::rotation::{
    Axis, AxisAngle, EulerAngles, Quaternion, RotationChain, RotationResult, RotationSource,
    compute_chain,
};

use rotation_test_utils::*;

#[test]
fn test_chain_equals_left_fold_of_elementals() {
    for _ in 0..SAMPLES {
        let steps = random_chain(6);
        let expected = steps
            .iter()
            .fold(Quaternion::identity(), |accum, step| {
                step.axis.quaternion(step.angle_deg) * accum
            });
        assert_same_rotation(&expected, &compute_chain(&steps), TOLERANCE);
    }
}

#[test]
fn test_chain_is_world_frame() {
    // Rotating about world X then world Z sends +Y to +Z, not to -X
    let q = compute_chain(&decode_chain("x.90_z.90").into_steps());
    let image = q.transform_vector(&Axis::Y.unit_vector());
    assert!((image - Axis::Z.unit_vector()).norm() < TOLERANCE, "got {image}");
}

#[test]
fn test_xyz_chain_matches_euler() {
    for _ in 0..SAMPLES {
        let e = random_euler();
        let text = format!("x.{}_y.{}_z.{}", e.roll, e.pitch, e.yaw);
        let chain = decode_chain(&text);
        assert_eq!(chain.len(), 3);
        assert_same_rotation(&e.to_quaternion(), &chain.to_quaternion(), TOLERANCE);
    }
}

#[test]
fn test_euler_roundtrip_random() {
    for _ in 0..SAMPLES {
        let e = random_euler();
        let back = e.to_quaternion().to_euler_angles();
        assert!((e.roll - back.roll).abs() < TOLERANCE, "{e} -> {back}");
        assert!((e.pitch - back.pitch).abs() < TOLERANCE, "{e} -> {back}");
        assert!((e.yaw - back.yaw).abs() < TOLERANCE, "{e} -> {back}");
    }
}

#[test]
fn test_matrix_roundtrip_random() {
    for _ in 0..SAMPLES {
        let m = random_rotation_matrix();
        let back = m.to_quaternion().to_rotation_matrix();
        assert_matrix_close(&m, &back, TOLERANCE);
    }
}

#[test]
fn test_axis_angle_roundtrip_random() {
    for _ in 0..SAMPLES {
        let q = Quaternion::random();
        let AxisAngle { axis, angle_deg } = q.to_axis_angle();
        assert!((0.0..=180.0 + TOLERANCE).contains(&angle_deg));
        let back = AxisAngle::new(axis[0], axis[1], axis[2], angle_deg).to_quaternion();
        assert_same_rotation(&q, &back, TOLERANCE);
    }
}

#[test]
fn test_gimbal_lock_preserves_rotation() {
    // Pairs whose quaternion reaches |2(wy - zx)| >= 1 at both ±90° pitch
    for (roll, yaw) in [(-160.0, -170.0), (-40.0, 15.0), (179.0, -179.0), (60.0, -110.0)] {
        for pitch in [90.0, -90.0] {
            let q = EulerAngles::new(roll, pitch, yaw).to_quaternion();
            let e = q.to_euler_angles();
            assert_eq!(e.pitch, pitch);
            assert_eq!(e.yaw, 0.0);
            assert_same_rotation(&q, &e.to_quaternion(), TOLERANCE);
        }
    }
}

#[test]
fn test_encoded_chain_resolves_identically() {
    for _ in 0..20 {
        let steps = random_chain(5);
        let decoded = decode_chain(&encode_chain(&steps));

        let original = RotationSource::Chain(steps).resolve().unwrap();
        let restored = RotationSource::Chain(decoded.into_steps()).resolve().unwrap();
        assert_eq!(original, restored);
    }
}

#[test]
fn test_edited_chain_recomputes() {
    let mut chain = RotationChain::new();
    let first = chain.push(Axis::X, 90.0).unwrap();
    let second = chain.push(Axis::Y, 90.0).unwrap();

    let before = RotationResult::from_quaternion(chain.to_quaternion());

    chain.set_angle(second, 0.0).unwrap();
    let after = RotationResult::from_quaternion(chain.to_quaternion());
    assert!((after.euler.roll - 90.0).abs() < TOLERANCE);
    assert_ne!(before, after);

    chain.remove(first).unwrap();
    chain.remove(second).unwrap();
    assert_eq!(chain.to_quaternion(), Quaternion::identity());
}

#[test]
fn test_result_serializes_to_json() {
    let result = RotationSource::Chain(decode_chain("z.90").into_steps())
        .resolve()
        .unwrap();
    let json = serde_json::to_value(result).unwrap();

    assert!(json["quaternion"]["w"].is_f64());
    assert!((json["euler"]["yaw"].as_f64().unwrap() - 90.0).abs() < TOLERANCE);
    assert_eq!(json["matrix"].as_array().map(|rows| rows.len()), Some(3));

    let back: RotationResult = serde_json::from_value(json).unwrap();
    assert_same_rotation(&result.quaternion, &back.quaternion, TOLERANCE);
    assert_matrix_close(&result.matrix, &back.matrix, TOLERANCE);
    assert!((back.euler.yaw - result.euler.yaw).abs() < TOLERANCE);
    assert!((back.euler.roll - result.euler.roll).abs() < TOLERANCE);
    assert!((back.euler.pitch - result.euler.pitch).abs() < TOLERANCE);
}
