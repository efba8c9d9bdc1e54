use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub github: GithubConfig,
}

/// Connection settings for the issue tracker. Passed explicitly into the
/// publisher at construction, never held as process-wide state.
#[derive(Debug, Deserialize)]
pub struct GithubConfig {
	/// Repo API base, e.g. `https://api.github.com/repos/OWNER/REPO`
	pub endpoint: String,
	pub username: String,
	pub token: String,
}

impl Config {
	pub fn read(path: &Path) -> Result<Self> {
		let config_str = std::fs::read_to_string(path).wrap_err_with(|| format!("Failed to read config file at {path:?}"))?;

		let config: Config = toml::from_str(&config_str).wrap_err("The config file is not correctly formatted TOML\nand/or\n is missing some of the required fields")?;

		Ok(config)
	}
}
