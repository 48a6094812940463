use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

/// Additive white Gaussian noise at a signal-to-noise ratio
#[derive(Clone, Debug, serde::Deserialize)]
pub struct NoiseConfig {
    pub seed: Option<u64>,
    pub snr_db: f64,
}

impl NoiseConfig {
    pub fn new(snr_db: f64) -> Self {
        Self { seed: None, snr_db }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

pub fn signal_power(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    signal.iter().map(|&x| x * x).sum::<f64>() / signal.len() as f64
}

/// Add Gaussian noise scaled to `config.snr_db` below the signal power
pub fn apply_noise(signal: &mut [f64], config: &NoiseConfig) {
    let sig_power = signal_power(signal);
    if sig_power == 0.0 {
        return;
    }

    let noise_std = (sig_power / 10.0_f64.powf(config.snr_db / 10.0)).sqrt();
    let Ok(normal) = Normal::new(0.0, noise_std) else {
        log::warn!("Skipping noise: invalid standard deviation {}", noise_std);
        return;
    };

    let mut rng = create_rng(config.seed);
    for sample in signal.iter_mut() {
        *sample += normal.sample(&mut rng);
    }
}
