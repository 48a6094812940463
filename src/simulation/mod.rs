mod noise;
mod signal;

pub use noise::{NoiseConfig, apply_noise, signal_power};
pub use signal::{Tone, generate_tones, to_pcm};
