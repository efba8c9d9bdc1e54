//! Line extraction: scan a ginkgo test source file and group normalized
//! `ginkgo.By` fragments under their nearest preceding `ginkgo.It` title.

use tracing::warn;

use crate::normalize::{normalize, tokenize};

/// Marker identifying a body line. Substring containment, not anchored.
pub const BODY_MARKER: &str = "ginkgo.By";
/// Marker identifying a title line. Substring containment, not anchored.
pub const TITLE_MARKER: &str = "ginkgo.It";

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
	#[error("line {line_no} matched a marker but contains no double-quoted text: {line:?}")]
	MalformedLine { line_no: usize, line: String },
}

/// One extracted issue: a normalized title and its accumulated body text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IssueRecord {
	pub title: String,
	pub body: String,
}

/// Title -> body mapping with unique keys and first-seen insertion order.
/// Vec-backed with linear title lookup; inputs are single source files.
#[derive(Debug, Default)]
pub struct IssueMap {
	records: Vec<IssueRecord>,
}

impl IssueMap {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a title. A repeated title keeps its existing record and body.
	fn insert_title(&mut self, title: &str) {
		if !self.records.iter().any(|r| r.title == title) {
			self.records.push(IssueRecord {
				title: title.to_string(),
				body: String::new(),
			});
		}
	}

	/// Append a fragment plus a line break to the given title's body.
	/// No-op if the title was never registered.
	fn append_body(&mut self, title: &str, fragment: &str) {
		if let Some(record) = self.records.iter_mut().find(|r| r.title == title) {
			record.body.push_str(fragment);
			record.body.push('\n');
		}
	}

	pub fn iter(&self) -> impl Iterator<Item = &IssueRecord> {
		self.records.iter()
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	pub fn get(&self, title: &str) -> Option<&IssueRecord> {
		self.records.iter().find(|r| r.title == title)
	}
}

/// First maximal substring enclosed in a pair of double quotes.
fn quoted(line: &str) -> Option<&str> {
	let start = line.find('"')? + 1;
	let end = line.rfind('"')?;
	(end > start - 1).then(|| &line[start..end])
}

fn fragment(line: &str, line_no: usize) -> Result<String, ExtractError> {
	let text = quoted(line).ok_or_else(|| ExtractError::MalformedLine {
		line_no,
		line: line.to_string(),
	})?;
	Ok(normalize(tokenize(text)))
}

/// Scan file content line by line and build the title -> body mapping.
///
/// Body marker is tested first, then title marker, both unconditionally: a
/// line containing both performs both actions. Body fragments seen before any
/// title are computed and discarded. Marker lines without quoted text are
/// skipped with a warning rather than aborting the scan.
pub fn scan(content: &str) -> IssueMap {
	let mut issues = IssueMap::new();
	let mut title: Option<String> = None;

	for (idx, line) in content.lines().enumerate() {
		let line_no = idx + 1;

		if line.contains(BODY_MARKER) {
			match fragment(line, line_no) {
				Ok(item) =>
					if let Some(title) = &title {
						issues.append_body(title, &item);
					},
				Err(e) => warn!("skipping body line: {e}"),
			}
		}
		if line.contains(TITLE_MARKER) {
			match fragment(line, line_no) {
				Ok(item) => {
					issues.insert_title(&item);
					title = Some(item);
				}
				Err(e) => warn!("skipping title line: {e}"),
			}
		}
	}

	issues
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn quoted_takes_maximal_span() {
		assert_eq!(quoted(r#"ginkgo.By("Creating the Service")"#), Some("Creating the Service"));
		assert_eq!(quoted(r#"a "b" c "d" e"#), Some(r#"b" c "d"#));
		assert_eq!(quoted("no quotes here"), None);
		assert_eq!(quoted(r#"lone " quote"#), None);
		assert_eq!(quoted(r#""""#), Some(""));
	}

	#[test]
	fn body_line_before_any_title_is_discarded() {
		let issues = scan(r#"ginkgo.By("Creating the Service")"#);
		assert!(issues.is_empty());
	}

	#[test]
	fn title_then_body_accumulates_one_record() {
		let content = "ginkgo.It(\"should create a ClusterIP Service\")\nginkgo.By(\"Checking the Service\")\n";
		let issues = scan(content);
		assert_eq!(issues.len(), 1);

		let record = issues.get("should create a clusterip service").expect("title should be registered");
		assert_eq!(record.body, "check the service\n");
	}

	#[test]
	fn duplicate_titles_share_one_record() {
		let content = "ginkgo.It(\"should work\")\n\
			ginkgo.By(\"first step\")\n\
			ginkgo.It(\"should work\")\n\
			ginkgo.By(\"second step\")\n";
		let issues = scan(content);
		assert_eq!(issues.len(), 1);

		let record = issues.get("should work").unwrap();
		assert_eq!(record.body, "first step\nsecond step\n");
	}

	#[test]
	fn non_marker_lines_change_nothing() {
		let content = "func TestService(t *testing.T) {\n\tframework.Logf(\"hello\")\n}\n";
		let issues = scan(content);
		assert!(issues.is_empty());
	}

	#[test]
	fn malformed_marker_line_is_skipped() {
		let content = "ginkgo.It(\"should survive\")\nginkgo.By(someVariable)\nginkgo.By(\"real step\")\n";
		let issues = scan(content);
		assert_eq!(issues.len(), 1);
		assert_eq!(issues.get("should survive").unwrap().body, "real step\n");
	}

	#[test]
	fn records_keep_first_seen_order() {
		let content = "ginkgo.It(\"zeta case\")\nginkgo.It(\"alpha case\")\n";
		let issues = scan(content);
		let titles: Vec<&str> = issues.iter().map(|r| r.title.as_str()).collect();
		assert_eq!(titles, vec!["zeta case", "alpha case"]);
	}
}
