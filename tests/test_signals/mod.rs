pub mod generate;

#[allow(unused_imports)]
pub use generate::{dc_signal, rms, sine_pcm, two_tone_pcm};
