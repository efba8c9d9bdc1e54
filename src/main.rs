use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use ginkgo2issues::{Config, GithubSink, publish_all, scan, title_case};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
	/// Path to the ginkgo test source file to scan
	path: PathBuf,
	/// TOML config with the [github] endpoint and credentials
	#[arg(short, long, env = "GINKGO2ISSUES_CONFIG")]
	config: PathBuf,
	/// Print the would-be issues instead of POSTing them
	#[arg(long)]
	dry_run: bool,
}

fn main() -> Result<()> {
	color_eyre::install()?;
	tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

	let cli = Cli::parse();
	let config = Config::read(&cli.config)?;

	let content = std::fs::read_to_string(&cli.path)?;
	let issues = scan(&content);
	tracing::info!("extracted {} issue(s) from {:?}", issues.len(), cli.path);

	if cli.dry_run {
		for record in issues.iter() {
			println!("# {}\n{}", title_case(&record.title), record.body);
		}
		return Ok(());
	}

	let sink = GithubSink::new(&config.github)?;
	let failures = publish_all(&sink, &issues);
	if failures > 0 {
		tracing::error!("{failures} of {} issue(s) failed to publish", issues.len());
		std::process::exit(1);
	}
	Ok(())
}
