//! Proptest strategies for chunk-boundary testing.

use proptest::{
    collection::vec,
    prelude::{Strategy, any},
    test_runner::{Config as ProptestConfig, RngAlgorithm, TestRng, TestRunner},
};

/// Runner with a fixed seed so failures reproduce across machines.
#[must_use]
pub fn deterministic_runner(cases: u32) -> TestRunner {
    let config = ProptestConfig {
        cases,
        ..ProptestConfig::default()
    };
    let rng = TestRng::deterministic_rng(RngAlgorithm::ChaCha);
    TestRunner::new_with_rng(config, rng)
}

/// Up to `max_points` cut offsets within `0..=len`.
pub fn split_points(len: usize, max_points: usize) -> impl Strategy<Value = Vec<usize>> {
    vec(0..=len, 0..=max_points)
}

/// Sequences of line payloads that never contain `\n` or `\r`.
pub fn line_payloads(max_len: usize, max_lines: usize) -> impl Strategy<Value = Vec<Vec<u8>>> {
    let byte = any::<u8>().prop_filter("line terminator", |b| *b != b'\n' && *b != b'\r');
    vec(vec(byte, 0..=max_len), 0..=max_lines)
}
