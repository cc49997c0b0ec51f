//! BDD step definitions for the entrypoint lifecycle.
//!
//! These steps map scenarios in `tests/features/entrypoint_lifecycle.feature`
//! onto launcher runs against a scripted connector in a private sandbox.

use std::process::ExitCode;

use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use super::support::{
    CATALOG_JSON, CheckOutcome, Outcome, Sandbox, ScriptedConnector, launch_in, record,
};

struct World {
    sandbox: Sandbox,
    config: Option<Utf8PathBuf>,
    catalog: Option<Utf8PathBuf>,
    check: CheckOutcome,
    records: usize,
    fail_after: Option<usize>,
    outcome: Option<Outcome>,
    calls: Vec<&'static str>,
}

impl World {
    fn run(&mut self, args: &[&str]) {
        let mut connector = ScriptedConnector::new(self.sandbox.workspace_root())
            .with_check(self.check.clone())
            .with_records((0..self.records).map(|id| record("users", id)).collect());
        if let Some(emitted) = self.fail_after {
            connector = connector.failing_read_after(emitted);
        }
        self.outcome = Some(launch_in(&self.sandbox, &connector, args));
        self.calls = connector.observations().calls;
    }

    fn outcome(&self) -> &Outcome {
        self.outcome.as_ref().expect("the launcher should have run")
    }

    fn config(&self) -> &str {
        self.config.as_ref().expect("config file prepared").as_str()
    }

    fn catalog(&self) -> &str {
        self.catalog.as_ref().expect("catalog file prepared").as_str()
    }
}

#[fixture]
fn world() -> World {
    World {
        sandbox: Sandbox::new(),
        config: None,
        catalog: None,
        check: CheckOutcome::default(),
        records: 0,
        fail_after: None,
        outcome: None,
        calls: Vec::new(),
    }
}

#[given("a config file containing {content}")]
fn given_config_file(world: &mut World, content: String) {
    world.config = Some(world.sandbox.write("cfg.json", content.trim()));
}

#[given("a configured catalog")]
fn given_catalog(world: &mut World) {
    world.catalog = Some(world.sandbox.write("catalog.json", CATALOG_JSON));
}

#[given("a connector whose check succeeds")]
fn given_check_succeeds(world: &mut World) {
    world.check = CheckOutcome::Succeeded;
}

#[given("a connector whose check fails with {reason}")]
fn given_check_fails(world: &mut World, reason: String) {
    world.check = CheckOutcome::Failed(reason.trim_matches('"').to_owned());
}

#[given("a connector that reads {count} records")]
fn given_records(world: &mut World, count: usize) {
    world.records = count;
}

#[given("the read fails after {count} records")]
fn given_read_failure(world: &mut World, count: usize) {
    world.fail_after = Some(count);
}

#[when("the operator runs check with the config file")]
fn when_check(world: &mut World) {
    let config = world.config().to_owned();
    world.run(&["check", "--config", &config]);
}

#[when("the operator runs check without options")]
fn when_check_without_options(world: &mut World) {
    world.run(&["check"]);
}

#[when("the operator runs read with the config file and catalog")]
fn when_read(world: &mut World) {
    let config = world.config().to_owned();
    let catalog = world.catalog().to_owned();
    world.run(&["read", "--config", &config, "--catalog", &catalog]);
}

#[then("the process exits with code {status}")]
fn then_exit_code(world: &mut World, status: u8) {
    assert_eq!(world.outcome().exit, ExitCode::from(status));
}

#[then("stdout is {expected}")]
fn then_stdout_is(world: &mut World, expected: String) {
    let stdout = &world.outcome().stdout;
    assert_eq!(stdout.trim_end_matches('\n'), expected.trim());
}

#[then("stdout contains {snippet}")]
fn then_stdout_contains(world: &mut World, snippet: String) {
    let snippet = snippet.trim_matches('"');
    let stdout = &world.outcome().stdout;
    assert!(stdout.contains(snippet), "stdout {stdout:?} did not contain {snippet:?}");
}

#[then("stdout has {count} lines")]
fn then_stdout_lines(world: &mut World, count: usize) {
    assert_eq!(world.outcome().lines().len(), count);
}

#[then("stderr contains {snippet}")]
fn then_stderr_contains(world: &mut World, snippet: String) {
    let needle = snippet.trim_matches('"');
    let stderr = &world.outcome().stderr;
    assert!(stderr.contains(needle), "stderr {stderr:?} did not contain {needle:?}");
}

#[then("no workspace remains")]
fn then_no_workspace(world: &mut World) {
    assert_eq!(world.sandbox.live_workspaces(), 0);
}

#[then("the connector was never called")]
fn then_connector_idle(world: &mut World) {
    assert!(world.calls.is_empty(), "unexpected calls {:?}", world.calls);
}

#[scenario(path = "tests/features/entrypoint_lifecycle.feature")]
fn entrypoint_lifecycle(world: World) {
    let _ = world;
}
