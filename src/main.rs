use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use js_inspector::InspectConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "js-inspector", version, about = "Check JavaScript sources for convention issues")]
struct Cli {
    #[arg(default_value = ".", help = "Root folder, inspected before the extra folders")]
    root: PathBuf,
    #[arg(
        long = "folder",
        value_delimiter = ',',
        help = "Folders under the root to inspect after it [default: js,server]"
    )]
    folders: Vec<String>,
    #[arg(long, help = "Inspect only the root folder")]
    no_folders: bool,
    #[arg(long, default_value = "js", help = "Source file extension, without the dot")]
    extension: String,
    #[arg(long = "skip", value_delimiter = ',', help = "Extra file stems to skip")]
    skip: Vec<String>,
}

impl Cli {
    fn config(&self) -> InspectConfig {
        let mut config = InspectConfig::tcec();
        config.extension = self.extension.trim_start_matches('.').to_string();
        config.skip_sources.extend(self.skip.iter().cloned());
        if self.no_folders {
            config.folders.clear();
        } else if !self.folders.is_empty() {
            config.folders = self.folders.clone();
        }
        config
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let start = Instant::now();
    let config = cli.config();
    match js_inspector::run(&config, &cli.root) {
        Ok(()) => {
            tracing::info!(elapsed_secs = start.elapsed().as_secs_f64(), "inspection done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
