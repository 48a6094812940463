pub mod filtfilt;
pub mod fir_core;
pub mod fir_design;
pub mod kaiser;
pub mod response;

pub use filtfilt::filtfilt;
pub use fir_core::FirFilterCore;
pub use fir_design::FirLowpass;
pub use kaiser::{KaiserEstimate, kaiser_beta, kaiser_order, kaiser_window};
pub use response::{ResponsePoint, amplitude_response};
