//! Line echo server demonstrating `replayframe` over TCP.
//!
//! Each accepted connection gets its own [`ReplayCodec`] wrapping a
//! [`LineDecoder`]; decoded lines are written back followed by `\n`.

mod cli;

use std::io;

use clap::Parser;
use futures::StreamExt;
use replayframe::{LineDecoder, ReplayConfig, codec::framed_read};
use tokio::{
    io::AsyncWriteExt,
    net::{TcpListener, TcpStream},
};

#[tokio::main]
async fn main() -> io::Result<()> {
    // Enable structured logging for the demo server.
    // Applications embedding the library should install their own subscriber.
    tracing_subscriber::fmt::init();

    let cli = cli::Cli::parse();
    let config = ReplayConfig::default().max_buffered_bytes(cli.max_buffered);
    let decoder = match cli.max_line {
        Some(max) => LineDecoder::new().max_length(max),
        None => LineDecoder::new(),
    };

    let listener = TcpListener::bind(cli.bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                return Ok(());
            }
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(pair) => pair,
                    Err(e) => {
                        log::warn!("accept error: error={e:?}");
                        continue;
                    }
                };
                let decoder = decoder.clone();
                let config = config.clone();
                tokio::spawn(async move {
                    if let Err(e) = echo_lines(stream, decoder, config).await {
                        log::warn!("connection closed with error: peer={peer}, error={e}");
                    }
                });
            }
        }
    }
}

async fn echo_lines(stream: TcpStream, decoder: LineDecoder, config: ReplayConfig) -> io::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut lines = framed_read(reader, decoder, config);
    while let Some(line) = lines.next().await {
        let line = line?;
        writer.write_all(&line).await?;
        writer.write_all(b"\n").await?;
    }
    writer.shutdown().await
}
