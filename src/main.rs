/*!
 * Command-line interface for dirbook
 */

use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::error;

use dirbook::config::{Args, Config};
use dirbook::logging::init_tracing;
use dirbook::report::{Reporter, RunReport};
use dirbook::{Assembler, MarkdownWriter, Result, Scanner};

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        clap_complete::generate(shell, &mut Args::command(), "dirbook", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    if let Err(e) = init_tracing(args.verbose) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let config = Config::from_args(args);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(config: &Config) -> Result<()> {
    // Validate configuration before any work begins
    config.validate()?;

    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len} ({percent}%)")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    progress.set_prefix("📊 Processing");
    progress.set_message(format!(
        "📂 Scanning directory: {}",
        config.target_dir.display()
    ));

    let start_time = Instant::now();

    let entries = Scanner::new(config).scan()?;
    let assembler = Assembler::new(config, Arc::new(progress.clone()));
    let document = assembler.assemble(&entries);

    MarkdownWriter::new(config.clone()).write(&document)?;

    let duration = start_time.elapsed();
    progress.finish_and_clear();

    let report = RunReport::new(
        config.output_file.display().to_string(),
        duration,
        document.stats,
    );
    Reporter::new().print_report(&report);

    Ok(())
}
