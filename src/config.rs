use crate::core::errors::{ParameterError, validate_fraction, validate_prob};

/// Parameters of a single BB84 run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfig {
    /// Number of bits Alice sends.
    pub total_bits: usize,
    /// Requested number of sifted bits disclosed for error estimation.
    pub sample_size: usize,
    /// Whether the eavesdropper is on the line.
    pub eavesdropper: bool,
    /// Fraction of bits the eavesdropper intercepts when active.
    pub intercept_fraction: f64,
    /// Bit-flip probability of the channel.
    pub channel_error: f64,
    /// Number of reconciliation blocks.
    pub reconciliation_blocks: usize,
    /// Seed for a reproducible run.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            total_bits: 20_000,
            sample_size: 8_000,
            eavesdropper: false,
            intercept_fraction: 1.0,
            channel_error: 0.0,
            reconciliation_blocks: 10,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn new(total_bits: usize, sample_size: usize) -> Self {
        Self {
            total_bits,
            sample_size,
            ..Self::default()
        }
    }

    /// Puts an eavesdropper on the line intercepting `fraction` of the bits.
    pub fn with_eavesdropper(mut self, fraction: f64) -> Self {
        self.eavesdropper = true;
        self.intercept_fraction = fraction;
        self
    }

    pub fn with_channel_error(mut self, p: f64) -> Self {
        self.channel_error = p;
        self
    }

    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    pub fn with_blocks(mut self, blocks: usize) -> Self {
        self.reconciliation_blocks = blocks;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks every parameter against its domain.
    pub fn validate(&self) -> Result<(), ParameterError> {
        validate_fraction(self.intercept_fraction)?;
        validate_prob(self.channel_error)?;
        if self.reconciliation_blocks == 0 {
            return Err(ParameterError::ZeroBlocks);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.eavesdropper);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn builder_sets_fields() {
        let config = SimulationConfig::new(1_000, 100)
            .with_eavesdropper(0.5)
            .with_channel_error(0.02)
            .with_blocks(4)
            .with_seed(42);
        assert_eq!(config.total_bits, 1_000);
        assert_eq!(config.sample_size, 100);
        assert!(config.eavesdropper);
        assert_eq!(config.intercept_fraction, 0.5);
        assert_eq!(config.channel_error, 0.02);
        assert_eq!(config.reconciliation_blocks, 4);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let base = SimulationConfig::new(10, 2);
        assert_eq!(
            base.clone().with_channel_error(-0.1).validate(),
            Err(ParameterError::InvalidProbability(-0.1))
        );
        assert_eq!(
            base.clone().with_eavesdropper(1.1).validate(),
            Err(ParameterError::InvalidFraction(1.1))
        );
        assert_eq!(
            base.with_blocks(0).validate(),
            Err(ParameterError::ZeroBlocks)
        );
    }
}
