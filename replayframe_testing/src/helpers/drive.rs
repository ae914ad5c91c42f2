//! Drive a [`ReplayCodec`] over an in-memory duplex stream.

use futures::StreamExt;
use replayframe::{ReplayConfig, ReplayDecoder, ReplayError, codec::framed_read};
use tokio::io::{AsyncWriteExt, duplex};

const DEFAULT_CAPACITY: usize = 64;

/// Write each chunk to one half of a `tokio::io::duplex` stream, close it,
/// and collect everything a `FramedRead` yields on the other half.
///
/// The writer flushes every chunk separately, so the reader observes the
/// same fragmentation a slow peer would produce. A terminal fault ends the
/// stream and is the last element returned.
///
/// ```rust
/// use replayframe::LineDecoder;
/// use replayframe_testing::drive_with_chunks;
///
/// # async fn demo() {
/// let lines = drive_with_chunks(LineDecoder::new(), vec![b"a".to_vec(), b"b\n".to_vec()]).await;
/// assert_eq!(lines.len(), 1);
/// # }
/// ```
pub async fn drive_with_chunks<D>(
    decoder: D,
    chunks: Vec<Vec<u8>>,
) -> Vec<Result<D::Item, ReplayError<D::Error>>>
where
    D: ReplayDecoder,
{
    drive_with_chunks_config(decoder, ReplayConfig::default(), chunks, DEFAULT_CAPACITY).await
}

/// As [`drive_with_chunks`], with explicit limits and duplex capacity.
///
/// # Panics
///
/// Panics if writing to the in-memory stream fails.
pub async fn drive_with_chunks_config<D>(
    decoder: D,
    config: ReplayConfig,
    chunks: Vec<Vec<u8>>,
    capacity: usize,
) -> Vec<Result<D::Item, ReplayError<D::Error>>>
where
    D: ReplayDecoder,
{
    let (mut client, server) = duplex(capacity);

    let writer = async move {
        for chunk in &chunks {
            if client.write_all(chunk).await.is_err() {
                // Reader stopped after a fault.
                return;
            }
            tokio::task::yield_now().await;
        }
        client.shutdown().await.expect("shutdown duplex writer");
    };
    let reader = framed_read(server, decoder, config).collect::<Vec<_>>();

    let ((), decoded) = tokio::join!(writer, reader);
    decoded
}
