use super::*;

#[test]
fn lcg_matches_minimal_standard_sequence() {
    let mut rng = Lcg::new(1);
    assert_eq!(rng.next_u32(), 16_807);
    assert_eq!(rng.next_u32(), 282_475_249);
    assert_eq!(rng.next_u32(), 1_622_650_073);
}

#[test]
fn zero_seed_is_remapped() {
    let mut a = Lcg::new(0);
    let mut b = Lcg::new(1);
    let mut c = Lcg::new(2_147_483_647);
    for _ in 0..5 {
        let v = a.next_u32();
        assert_eq!(v, b.next_u32());
        assert_eq!(v, c.next_u32());
    }
}

#[test]
fn samples_stay_in_unit_interval() {
    let mut rng = Lcg::new(987_654);
    for _ in 0..10_000 {
        let v = rng.next_f64_01();
        assert!((0.0..1.0).contains(&v));
    }
}

#[test]
fn same_seed_reproduces_descriptors() {
    let a = generate_particles(42, 64, 120.0);
    let b = generate_particles(42, 64, 120.0);
    assert_eq!(a, b);
    assert_eq!(a.len(), 64);
}

#[test]
fn different_seed_changes_descriptors() {
    let a = generate_particles(42, 64, 120.0);
    let b = generate_particles(43, 64, 120.0);
    assert_ne!(a, b);
}

#[test]
fn descriptors_respect_ranges() {
    for p in generate_particles(7, 500, 80.0) {
        let d = (p.offset_x * p.offset_x + p.offset_y * p.offset_y).sqrt();
        assert!(d <= 80.0 + 1e-9);
        assert!((0.0..std::f64::consts::TAU).contains(&p.phase));
        assert!((0.5..2.5).contains(&p.speed));
    }
}

#[test]
fn zero_or_invalid_spread_collapses_offsets() {
    for spread in [0.0, -5.0, f64::NAN] {
        for p in generate_particles(9, 10, spread) {
            assert_eq!(p.offset_x, 0.0);
            assert_eq!(p.offset_y, 0.0);
        }
    }
}

#[test]
fn layer_seed_is_stable_and_in_range() {
    assert_eq!(particle_seed_for(3), particle_seed_for(3));
    assert_ne!(particle_seed_for(3), particle_seed_for(4));
    for id in 0..100 {
        let s = particle_seed_for(id);
        assert!((1..2_147_483_647).contains(&s));
    }
}
