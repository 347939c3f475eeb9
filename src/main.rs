use clap::Parser;

use graphql_doctor::analysis::analyze;
use graphql_doctor::config::{BaselineSource, Config};
use graphql_doctor::fetch::FileFetcher;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Baseline schema file
    baseline: String,
    /// Candidate schema file
    candidate: String,
}

async fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let fetcher = FileFetcher::new(".");
    let mut config = Config::new();
    config.insert(
        cli.candidate,
        BaselineSource {
            reference: String::new(),
            schema_path: cli.baseline,
        },
    );

    let mut breaking = false;
    for result in analyze(&fetcher, &config, "").await {
        let analysis = result?;
        if analysis.identical {
            println!("{}: no changes", analysis.schema_path);
            continue;
        }
        for annotation in &analysis.annotations {
            println!(
                "{}:{} [{}] {}",
                annotation.path, annotation.start_line, annotation.annotation_level, annotation.title
            );
        }
        breaking |= analysis.breaking;
    }

    Ok(breaking)
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(false) => {}
        Ok(true) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    }
}
