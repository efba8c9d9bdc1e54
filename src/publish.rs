//! Issue publishing: one `POST {endpoint}/issues` per extracted record.

use std::time::Duration;

use color_eyre::eyre::{Result, bail};
use serde::Serialize;
use tracing::{error, info};

use crate::{config::GithubConfig, extract::IssueMap};

/// Payload for the create-issue call. Exactly these two fields.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct NewIssue {
	pub title: String,
	pub body: String,
}

/// Create-issue operations behind a trait so tests can count calls without a
/// network.
pub trait IssueSink {
	fn create_issue(&self, issue: &NewIssue) -> Result<()>;
}

/// Real sink: GitHub REST API with basic auth.
pub struct GithubSink {
	client: reqwest::blocking::Client,
	endpoint: String,
	username: String,
	token: String,
}

impl GithubSink {
	pub fn new(config: &GithubConfig) -> Result<Self> {
		let client = reqwest::blocking::Client::builder().timeout(Duration::from_secs(30)).build()?;
		Ok(Self {
			client,
			endpoint: config.endpoint.trim_end_matches('/').to_string(),
			username: config.username.clone(),
			token: config.token.clone(),
		})
	}
}

impl IssueSink for GithubSink {
	fn create_issue(&self, issue: &NewIssue) -> Result<()> {
		let res = self
			.client
			.post(format!("{}/issues", self.endpoint))
			.header("User-Agent", "ginkgo2issues")
			.basic_auth(&self.username, Some(&self.token))
			.json(issue)
			.send()?;

		if !res.status().is_success() {
			let status = res.status();
			let body = res.text().unwrap_or_default();
			bail!("create issue failed: {status} - {body}");
		}
		Ok(())
	}
}

/// Uppercase the first letter of every whitespace-separated word.
pub fn title_case(s: &str) -> String {
	s.split_whitespace()
		.map(|word| {
			let mut chars = word.chars();
			match chars.next() {
				Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
				None => String::new(),
			}
		})
		.collect::<Vec<String>>()
		.join(" ")
}

/// Publish every record as one create-issue call. A failed call is logged and
/// the remaining records still go out. Returns the number of failed publishes.
pub fn publish_all(sink: &dyn IssueSink, issues: &IssueMap) -> usize {
	let mut failures = 0;
	for record in issues.iter() {
		let issue = NewIssue {
			title: title_case(&record.title),
			body: record.body.clone(),
		};
		match sink.create_issue(&issue) {
			Ok(()) => info!("created issue: {}", issue.title),
			Err(e) => {
				error!("failed to create issue {:?}: {e}", issue.title);
				failures += 1;
			}
		}
	}
	failures
}
