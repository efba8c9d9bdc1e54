pub mod config;
pub mod extract;
pub mod normalize;
pub mod publish;

pub use config::{Config, GithubConfig};
pub use extract::{BODY_MARKER, ExtractError, IssueMap, IssueRecord, TITLE_MARKER, scan};
pub use publish::{GithubSink, IssueSink, NewIssue, publish_all, title_case};
