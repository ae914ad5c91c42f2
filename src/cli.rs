//! Command line interface for the replayframe line echo server.

use std::net::SocketAddr;

use clap::Parser;

/// Command line arguments for the `replayframe` binary.
#[derive(Debug, Parser)]
#[command(
    name = "replayframe",
    version,
    about = "Echo newline-delimited lines decoded by a replaying decoder"
)]
pub struct Cli {
    /// Address to listen on.
    #[arg(short, long, default_value = "127.0.0.1:7878")]
    pub bind: SocketAddr,

    /// Longest accepted line in bytes; longer lines close the connection.
    #[arg(long)]
    pub max_line: Option<usize>,

    /// Maximum undecoded bytes buffered per connection.
    #[arg(long, default_value_t = replayframe::config::DEFAULT_BUFFER_LIMIT)]
    pub max_buffered: usize,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Cli;

    #[test]
    fn defaults_to_loopback() {
        let cli = Cli::parse_from(["replayframe"]);
        assert_eq!(cli.bind.to_string(), "127.0.0.1:7878");
        assert_eq!(cli.max_line, None);
    }

    #[test]
    fn parses_limits() {
        let cli = Cli::parse_from([
            "replayframe",
            "--bind",
            "0.0.0.0:9000",
            "--max-line",
            "80",
            "--max-buffered",
            "4096",
        ]);
        assert_eq!(cli.bind.port(), 9000);
        assert_eq!(cli.max_line, Some(80));
        assert_eq!(cli.max_buffered, 4096);
    }
}
