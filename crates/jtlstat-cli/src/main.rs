use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use jtlstat_cli::{default_output, default_results_dir, run, Config};

#[derive(Parser)]
#[command(name = "jtlstat")]
#[command(version, about = "Summarise JMeter-style result logs into a performance report")]
struct Cli {
    /// Directory holding the `*.jtl` result files
    #[arg(long, env = "JTLSTAT_RESULTS_DIR", default_value_os_t = default_results_dir())]
    results_dir: PathBuf,

    /// Report to write; a `.json` extension selects JSON, anything else Markdown
    #[arg(short, long, env = "JTLSTAT_OUTPUT", default_value_os_t = default_output())]
    output: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::new(cli.results_dir, cli.output);
    match run(&config).await {
        Ok(batch) => {
            if !batch.failed.is_empty() {
                tracing::warn!(
                    "{} result file(s) could not be parsed and were left out",
                    batch.failed.len()
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose {
        "jtlstat=debug,jtlstat_cli=debug,jtlstat_core=debug"
    } else {
        "jtlstat=info,jtlstat_cli=info,jtlstat_core=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
