use qkdsim::{
    Basis, Sampler, SimulationConfig, generate_bases, generate_bits, run_simulation,
};
use rand::{SeedableRng, rngs::StdRng};

#[test]
fn small_clean_run_matches_rederived_mask() {
    for seed in 0..20 {
        let config = SimulationConfig::new(8, 2).with_seed(seed);
        let result = run_simulation(&config).unwrap();

        // Same draw order as the run: Alice bits, Alice bases, then Bob's bases.
        let mut rng = StdRng::seed_from_u64(seed);
        let _alice_bits = generate_bits(&mut rng, 8);
        let alice_bases: Vec<Basis> = generate_bases(&mut rng, 8);
        let bob_bases: Vec<Basis> = generate_bases(&mut rng, 8);
        let agreeing = alice_bases
            .iter()
            .zip(&bob_bases)
            .filter(|(a, b)| a == b)
            .count();

        assert_eq!(result.sifted_length, agreeing, "seed {seed}");
        if result.sample_size > 0 {
            assert_eq!(result.error_estimate, Some(0.0), "seed {seed}");
        } else {
            assert_eq!(result.error_estimate, None, "seed {seed}");
        }
    }
}

#[test]
fn clean_channel_keys_are_identical() {
    for seed in 0..10 {
        let config = SimulationConfig::new(1_000, 100).with_seed(seed);
        let result = run_simulation(&config).unwrap();
        assert_eq!(result.sifted_errors, 0);
        assert_eq!(result.raw_qber, Some(0.0));
    }
}

#[test]
fn full_intercept_resend_shows_quarter_error() {
    let config = SimulationConfig::new(1_000, 100)
        .with_eavesdropper(1.0)
        .with_seed(2024);
    let summary = Sampler::new(config, 200).run().unwrap();

    assert_eq!(summary.undefined_estimates, 0);
    let mean = summary.mean_estimate.unwrap();
    assert!((0.20..=0.30).contains(&mean), "mean estimate = {mean}");
    let raw = summary.mean_raw_qber.unwrap();
    assert!((0.23..=0.27).contains(&raw), "mean raw qber = {raw}");
}

#[test]
fn estimate_tracks_channel_noise() {
    let config = SimulationConfig::new(4_000, 1_000)
        .with_channel_error(0.1)
        .with_seed(77);
    let summary = Sampler::new(config, 50).run().unwrap();

    let mean = summary.mean_estimate.unwrap();
    assert!((mean - 0.1).abs() < 0.01, "mean estimate = {mean}");
}

#[test]
fn partial_interception_follows_theory() {
    let config = SimulationConfig::new(2_000, 500).with_seed(31);
    let curve = Sampler::new(config, 40)
        .intercept_curve(&[0.0, 0.5, 1.0])
        .unwrap();

    assert_eq!(curve.len(), 3);
    for point in &curve {
        let mean = point.summary.mean_estimate.unwrap();
        assert!(
            (mean - point.expected_qber).abs() < 0.03,
            "fraction {}: mean {} vs expected {}",
            point.intercept_fraction,
            mean,
            point.expected_qber
        );
    }
    assert_eq!(curve[0].summary.mean_estimate, Some(0.0));
}

#[test]
fn reconciliation_lowers_the_error_rate() {
    let config = SimulationConfig::new(20_000, 1_000)
        .with_channel_error(0.02)
        .with_blocks(450)
        .with_seed(8);
    let summary = Sampler::new(config, 5).run().unwrap();

    let raw = summary.mean_raw_qber.unwrap();
    let residual = summary.mean_residual_error_rate.unwrap();
    assert!(residual < raw / 2.0, "raw {raw}, residual {residual}");
    assert!(residual > 0.0, "even-count blocks should leave some errors");
}
