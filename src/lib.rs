mod config;
mod core;
pub mod protocols;
mod sampler;

pub use crate::config::SimulationConfig;
pub use crate::core::{
    Basis, InterceptionOutcome, MeasurementOutcome, apply_channel_noise, apply_interception,
    errors, generate_bases, generate_bits, measure, measure_bit, receive, utils,
};
pub use crate::protocols::bb84::{BB84Result, expected_qber, run as run_simulation};
pub use crate::protocols::estimation::{SampleSplit, estimate_error};
pub use crate::protocols::reconciliation::{Reconciliation, reconcile, reconcile_in_place};
pub use crate::protocols::sifting::{SiftedKey, sift};
pub use crate::sampler::{CurvePoint, Sampler, SweepSummary, summarize};
