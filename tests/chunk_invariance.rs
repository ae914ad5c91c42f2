//! Generated checks that chunk boundaries never change decoded output.

use bytes::Bytes;
use proptest::{
    collection::vec,
    prelude::{Strategy, any},
    prop_assert_eq,
    test_runner::TestCaseError,
};
use replayframe::{
    LineDecoder,
    ReplayConfig,
    codec::examples::{HotlineDecoder, LengthPrefixedDecoder},
};
use replayframe_testing::{
    decode_chunks,
    decode_whole,
    deterministic_runner,
    line_payloads,
    split_at_points,
    split_points,
};
use rstest::rstest;

fn fail(err: impl std::fmt::Display) -> TestCaseError { TestCaseError::fail(err.to_string()) }

#[rstest]
#[case(16, 96)]
#[case(128, 64)]
fn line_output_is_independent_of_chunking(#[case] max_len: usize, #[case] cases: u32) {
    let mut runner = deterministic_runner(cases);
    let strategy = line_payloads(max_len, 12).prop_flat_map(|lines| {
        let wire: Vec<u8> = lines
            .iter()
            .flat_map(|line| line.iter().copied().chain([b'\n']))
            .collect();
        let len = wire.len();
        (
            proptest::strategy::Just(lines),
            proptest::strategy::Just(wire),
            split_points(len, 16),
        )
    });

    runner
        .run(&strategy, |(lines, wire, points)| {
            let whole = decode_whole(LineDecoder::new, &wire).map_err(fail)?;
            let chunked = decode_chunks(
                LineDecoder::new(),
                ReplayConfig::default(),
                split_at_points(&wire, &points),
            )
            .map_err(fail)?;

            let expected: Vec<Bytes> = lines.into_iter().map(Bytes::from).collect();
            prop_assert_eq!(&whole, &expected);
            prop_assert_eq!(chunked, expected);
            Ok(())
        })
        .expect("line decoding should not depend on chunk boundaries");
}

#[test]
fn length_prefixed_output_is_independent_of_chunking() {
    let mut runner = deterministic_runner(128);
    let strategy = vec(vec(any::<u8>(), 0..64), 1..8).prop_flat_map(|bodies| {
        let wire: Vec<u8> = bodies
            .iter()
            .flat_map(|body| {
                let length = u16::try_from(body.len()).expect("short body");
                length.to_be_bytes().into_iter().chain(body.iter().copied())
            })
            .collect();
        let len = wire.len();
        (
            proptest::strategy::Just(bodies),
            proptest::strategy::Just(wire),
            split_points(len, 24),
        )
    });

    runner
        .run(&strategy, |(bodies, wire, points)| {
            let decoded = decode_chunks(
                LengthPrefixedDecoder::new(64),
                ReplayConfig::default(),
                split_at_points(&wire, &points),
            )
            .map_err(fail)?;
            let expected: Vec<Bytes> = bodies.into_iter().map(Bytes::from).collect();
            prop_assert_eq!(decoded, expected);
            Ok(())
        })
        .expect("length-prefixed decoding should not depend on chunk boundaries");
}

#[test]
fn truncated_hotline_frame_is_dropped_at_any_cut() {
    let mut runner = deterministic_runner(64);
    let strategy = (vec(any::<u8>(), 1..32), any::<u32>()).prop_flat_map(|(payload, id)| {
        let mut wire = Vec::new();
        let size = u32::try_from(payload.len()).expect("short payload");
        for field in [size, size + 20, id] {
            wire.extend_from_slice(&field.to_be_bytes());
        }
        wire.extend_from_slice(&[0; 8]);
        wire.extend_from_slice(&payload);
        let len = wire.len();
        (proptest::strategy::Just(wire), 0..len)
    });

    runner
        .run(&strategy, |(wire, cut)| {
            let decoded = decode_chunks(
                HotlineDecoder::new(64),
                ReplayConfig::default(),
                [&wire[..cut]],
            )
            .map_err(fail)?;
            prop_assert_eq!(decoded.len(), 0);
            Ok(())
        })
        .expect("a truncated frame should be discarded without a fault");
}
