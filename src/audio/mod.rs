pub mod buffer;

pub use buffer::{AudioBuffer, FilteredBuffer, quantize_sample};
