use noise::NoiseFn;

const AMPL_DECAY: f64 = 0.5;

/// Sums `octaves` layers of `f`, each at twice the frequency of the previous one and half
/// its amplitude. The sum is divided by the total amplitude, so a source in
/// `[-1, 1]` stays in `[-1, 1]`.
pub struct Multi<F: NoiseFn<f64, 2>> {
    f: F,
    octaves: u8,
    freq: f64,
}
impl<F: NoiseFn<f64, 2>> Multi<F> {
    pub fn new(f: F, octaves: u8, freq: f64) -> Self {
        Self { f, octaves: octaves.max(1), freq }
    }
}
impl<F: NoiseFn<f64, 2>> NoiseFn<f64, 2> for Multi<F> {
    fn get(&self, point: [f64; 2]) -> f64 {
        let mut ret = 0f64;
        let mut total_ampl = 0f64;

        let mut freq = self.freq;
        let mut ampl = 1.0;
        for _ in 0..self.octaves {
            let point = [point[0] * freq, point[1] * freq];
            ret += self.f.get(point) * ampl;
            total_ampl += ampl;

            freq *= 2.0;
            ampl *= AMPL_DECAY;
        }

        ret / total_ampl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noise::{Constant, Perlin};

    #[test]
    fn constant_source_is_not_amplified() {
        let multi = Multi::new(Constant::new(0.8), 6, 1.0);
        assert!((multi.get([0.3, 0.7]) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn perlin_layers_follow_the_seed() {
        let a = Multi::new(Perlin::new(7), 4, 4.0);
        let b = Multi::new(Perlin::new(7), 4, 4.0);
        let c = Multi::new(Perlin::new(8), 4, 4.0);
        let points: Vec<[f64; 2]> = (0..50).map(|i| [i as f64 / 53.0, 1.0 - i as f64 / 47.0]).collect();
        assert!(points.iter().all(|p| a.get(*p) == b.get(*p)));
        assert!(points.iter().any(|p| a.get(*p) != c.get(*p)));
    }
}
