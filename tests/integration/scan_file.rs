//! End-to-end scan of an on-disk ginkgo test file, plus the publish path
//! against an in-memory sink.

use std::{io::Write, sync::Mutex};

use color_eyre::eyre::Result;
use ginkgo2issues::{IssueSink, NewIssue, publish_all, scan};

const SERVICE_TEST_GO: &str = r#"
package network

var _ = common.SIGDescribe("Services", func() {
	f := framework.NewDefaultFramework("services")

	ginkgo.It("should create a ClusterIP Service", func(ctx context.Context) {
		ginkgo.By("Creating the Service")
		svc, err := jig.CreateTCPService(ctx, nil)
		framework.ExpectNoError(err)

		ginkgo.By("Checking the Service")
		err = jig.CheckServiceReachability(ctx, svc, pod)
		framework.ExpectNoError(err)
	})

	ginkgo.It("should be able to change the type of a Service", func(ctx context.Context) {
		ginkgo.By("Changing the Service to NodePort")
		svc, err := jig.UpdateService(ctx, update)
		framework.ExpectNoError(err)
	})
})
"#;

#[test]
fn scans_a_realistic_service_test_file() -> Result<()> {
	let mut file = tempfile::NamedTempFile::new()?;
	file.write_all(SERVICE_TEST_GO.as_bytes())?;

	let content = std::fs::read_to_string(file.path())?;
	let issues = scan(&content);

	assert_eq!(issues.len(), 2);

	let first = issues.get("should create a clusterip service").expect("first It-block should be a record");
	assert_eq!(first.body, "create the service\ncheck the service\n");

	let second = issues.get("should be able to change the type of a service").expect("second It-block should be a record");
	assert_eq!(second.body, "change the service to nodeport\n");

	Ok(())
}

struct CountingSink {
	calls: Mutex<Vec<NewIssue>>,
}

impl IssueSink for CountingSink {
	fn create_issue(&self, issue: &NewIssue) -> Result<()> {
		self.calls.lock().unwrap().push(issue.clone());
		Ok(())
	}
}

#[test]
fn publishes_one_issue_per_it_block() {
	let issues = scan(SERVICE_TEST_GO);
	let sink = CountingSink { calls: Mutex::new(Vec::new()) };

	let failures = publish_all(&sink, &issues);
	assert_eq!(failures, 0);

	let calls = sink.calls.lock().unwrap();
	assert_eq!(calls.len(), 2);
	assert_eq!(calls[0].title, "Should Create A Clusterip Service");
	assert!(calls[1].body.ends_with('\n'));
}
