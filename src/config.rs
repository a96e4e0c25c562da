use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Per-region latency statistics over a fixed telemetry file.
#[derive(Debug, Parser)]
#[command(name = "region-latency", version)]
pub struct Cli {
    #[command(flatten)]
    pub serve: ServeArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write a deterministic demo telemetry file and exit
    Generate(GenerateArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// JSON array of {region, latency_ms, uptime_pct}
    #[arg(long, env = "TELEMETRY_FILE", default_value = "q-vercel-latency.json")]
    pub data_file: PathBuf,

    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Default tracing filter level; RUST_LOG overrides it
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Exit at start-up when the telemetry file cannot be loaded
    #[arg(long, env = "REQUIRE_DATA")]
    pub require_data: bool,
}

#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    #[arg(long, default_value = "q-vercel-latency.json")]
    pub out: PathBuf,

    #[arg(long, default_value_t = 12)]
    pub records_per_region: usize,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["region-latency"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.serve.bind.port(), 3000);
        assert!(!cli.serve.require_data);
    }

    #[test]
    fn generate_subcommand() {
        let cli = Cli::try_parse_from([
            "region-latency",
            "generate",
            "--out",
            "demo.json",
            "--seed",
            "7",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Generate(args)) => {
                assert_eq!(args.out, PathBuf::from("demo.json"));
                assert_eq!(args.seed, 7);
                assert_eq!(args.records_per_region, 12);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_bind_address() {
        assert!(Cli::try_parse_from(["region-latency", "--bind", "nowhere"]).is_err());
    }
}
