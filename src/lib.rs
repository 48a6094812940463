pub mod audio;
pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod error;
pub mod processing;
pub mod signal_processing;
pub mod wav;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use audio::{AudioBuffer, FilteredBuffer};
pub use config::{ClipMode, FilterSpec, WavfirConfig};
pub use error::{FilterError, Result};
pub use processing::{FilterResult, LowpassProcessor, process_audio};
pub use wav::{read_wav, write_wav};
