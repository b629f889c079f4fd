mod channels;
pub mod errors;
mod measurements;
mod source;
pub mod utils;

pub use channels::{InterceptionOutcome, apply_channel_noise, apply_interception};
pub use measurements::{MeasurementOutcome, measure, measure_bit, receive};
pub use source::{Basis, generate_bases, generate_bits};
