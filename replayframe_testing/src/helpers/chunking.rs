//! Split input into chunks and feed it through a [`DecoderEmbedder`].

use replayframe::{DecoderEmbedder, ReplayConfig, ReplayDecoder, ReplayError};

/// Split `input` into consecutive chunks of at most `size` bytes.
///
/// # Panics
///
/// Panics if `size` is zero.
#[must_use]
pub fn split_every(input: &[u8], size: usize) -> Vec<&[u8]> { input.chunks(size).collect() }

/// Split `input` at the given offsets.
///
/// Offsets are sorted, clamped to the input length and deduplicated, so any
/// generated list of points yields a valid partition. Empty chunks are never
/// produced.
#[must_use]
pub fn split_at_points<'a>(input: &'a [u8], points: &[usize]) -> Vec<&'a [u8]> {
    let mut cuts: Vec<usize> = points.iter().map(|&p| p.min(input.len())).collect();
    cuts.sort_unstable();
    cuts.dedup();

    let mut chunks = Vec::with_capacity(cuts.len() + 1);
    let mut start = 0;
    for cut in cuts {
        if cut > start {
            chunks.push(&input[start..cut]);
            start = cut;
        }
    }
    if start < input.len() {
        chunks.push(&input[start..]);
    }
    chunks
}

/// Offer every chunk in order, finish the stream and return all messages.
///
/// # Errors
///
/// Returns the first terminal fault reported by the driver.
pub fn decode_chunks<D, I, C>(
    decoder: D,
    config: ReplayConfig,
    chunks: I,
) -> Result<Vec<D::Item>, ReplayError<D::Error>>
where
    D: ReplayDecoder,
    I: IntoIterator<Item = C>,
    C: AsRef<[u8]>,
{
    let mut embedder = DecoderEmbedder::with_config(decoder, config);
    for chunk in chunks {
        embedder.offer(chunk)?;
    }
    embedder.finish()?;
    Ok(embedder.drain().collect())
}

/// Decode `input` offered as a single chunk.
///
/// # Errors
///
/// Returns the first terminal fault reported by the driver.
pub fn decode_whole<D, F>(make: F, input: &[u8]) -> Result<Vec<D::Item>, ReplayError<D::Error>>
where
    D: ReplayDecoder,
    F: FnOnce() -> D,
{
    decode_chunks(make(), ReplayConfig::default(), [input])
}

/// Decode `input` offered one byte at a time.
///
/// # Errors
///
/// Returns the first terminal fault reported by the driver.
pub fn decode_bytewise<D, F>(make: F, input: &[u8]) -> Result<Vec<D::Item>, ReplayError<D::Error>>
where
    D: ReplayDecoder,
    F: FnOnce() -> D,
{
    decode_chunks(make(), ReplayConfig::default(), split_every(input, 1))
}
