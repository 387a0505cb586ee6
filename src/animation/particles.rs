use crate::foundation::math::Fnv1a64;

const LCG_MODULUS: u64 = 2_147_483_647;
const LCG_MULTIPLIER: u64 = 16_807;

/// Park-Miller minimal-standard linear congruential generator.
///
/// `s = (s * 16807) mod 2147483647`. The state never reaches zero.
#[derive(Clone, Copy, Debug)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    /// Seed the generator; seeds congruent to zero are mapped to 1.
    pub fn new(seed: u64) -> Self {
        let s = seed % LCG_MODULUS;
        Self {
            state: if s == 0 { 1 } else { s },
        }
    }

    /// Advance and return the raw state in `[1, 2^31 - 2]`.
    pub fn next_u32(&mut self) -> u32 {
        self.state = (self.state * LCG_MULTIPLIER) % LCG_MODULUS;
        self.state as u32
    }

    /// Advance and return a uniform sample in `[0, 1)`.
    pub fn next_f64_01(&mut self) -> f64 {
        f64::from(self.next_u32() - 1) / ((LCG_MODULUS - 1) as f64)
    }
}

/// Per-particle motion parameters, re-derived on every render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleDescriptor {
    /// Horizontal rest offset from the layer anchor.
    pub offset_x: f64,
    /// Vertical rest offset from the layer anchor.
    pub offset_y: f64,
    /// Phase in radians, `[0, 2pi)`.
    pub phase: f64,
    /// Speed multiplier in `[0.5, 2.5)`.
    pub speed: f64,
}

/// Generate `count` descriptors from `seed`, with rest offsets within `spread` of the anchor.
///
/// Four draws per particle, in order: angle, distance, phase, speed.
pub fn generate_particles(seed: u64, count: usize, spread: f64) -> Vec<ParticleDescriptor> {
    let spread = if spread.is_finite() { spread.max(0.0) } else { 0.0 };
    let mut rng = Lcg::new(seed);
    (0..count)
        .map(|_| {
            let angle = rng.next_f64_01() * std::f64::consts::TAU;
            let distance = rng.next_f64_01() * spread;
            let phase = rng.next_f64_01() * std::f64::consts::TAU;
            let speed = 0.5 + rng.next_f64_01() * 2.0;
            ParticleDescriptor {
                offset_x: angle.cos() * distance,
                offset_y: angle.sin() * distance,
                phase,
                speed,
            }
        })
        .collect()
}

/// Derive the particle seed for a layer from its id.
///
/// Computed once when the layer enters a document and stored on the layer.
pub fn particle_seed_for(layer_id: u64) -> u64 {
    let mut h = Fnv1a64::new_default();
    h.write_bytes(b"kineo.particles");
    h.write_u64(layer_id);
    let s = h.finish() % LCG_MODULUS;
    if s == 0 { 1 } else { s }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/particles.rs"]
mod tests;
