//! Test support for entrypoint coverage.
//!
//! Supplies a scripted connector that records what it observed, a sandbox
//! holding input files and a private workspace root, and a log capture
//! writer so step definitions and unit tests stay focused on assertions.

use std::cell::{Cell, RefCell};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::rc::Rc;
use std::sync::{Arc, Mutex, PoisonError};

use camino::Utf8PathBuf;
use serde_json::json;
use sluice_connector::{Connector, ConnectorError, ConnectorState, MessageStream};
use sluice_protocol::{
    Catalog, ConfiguredCatalog, ConnectionStatus, ConnectorSpecification, ProtocolMessage,
    RecordMessage, StateMessage, Stream,
};
use tempfile::TempDir;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::{Entrypoint, launch_entrypoint};

// ---------------------------------------------------------------------------
// Scripted connector
// ---------------------------------------------------------------------------

/// How the scripted connector answers `check`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) enum CheckOutcome {
    #[default]
    Succeeded,
    Failed(String),
    Errors(String),
}

/// What the scripted connector saw during one invocation.
#[derive(Debug, Default, Clone)]
pub(super) struct Observations {
    pub calls: Vec<&'static str>,
    pub live_workspaces: Vec<usize>,
    pub configs: Vec<serde_json::Value>,
    pub states: Vec<ConnectorState>,
}

pub(super) struct ScriptedConnector {
    workspace_root: PathBuf,
    check: CheckOutcome,
    records: Vec<ProtocolMessage>,
    fail_read_after: Option<usize>,
    fail_spec: bool,
    pulled: Rc<Cell<usize>>,
    observed: RefCell<Observations>,
}

impl ScriptedConnector {
    pub(super) fn new(workspace_root: &Path) -> Self {
        Self {
            workspace_root: workspace_root.to_path_buf(),
            check: CheckOutcome::default(),
            records: Vec::new(),
            fail_read_after: None,
            fail_spec: false,
            pulled: Rc::new(Cell::new(0)),
            observed: RefCell::new(Observations::default()),
        }
    }

    pub(super) fn with_check(mut self, outcome: CheckOutcome) -> Self {
        self.check = outcome;
        self
    }

    pub(super) fn with_records(mut self, records: Vec<ProtocolMessage>) -> Self {
        self.records = records;
        self
    }

    pub(super) fn failing_read_after(mut self, emitted: usize) -> Self {
        self.fail_read_after = Some(emitted);
        self
    }

    pub(super) fn failing_spec(mut self) -> Self {
        self.fail_spec = true;
        self
    }

    pub(super) fn observations(&self) -> Observations {
        self.observed.borrow().clone()
    }

    pub(super) fn pulled(&self) -> usize {
        self.pulled.get()
    }

    fn observe(&self, call: &'static str) {
        let live = count_entries(&self.workspace_root);
        let mut observed = self.observed.borrow_mut();
        observed.calls.push(call);
        observed.live_workspaces.push(live);
    }
}

impl Connector for ScriptedConnector {
    fn spec(&self) -> Result<ConnectorSpecification, ConnectorError> {
        self.observe("spec");
        if self.fail_spec {
            return Err(ConnectorError::failed("specification unavailable"));
        }
        Ok(ConnectorSpecification::new(json!({
            "type": "object",
            "required": ["user"],
            "properties": {"user": {"type": "string"}}
        }))
        .with_documentation_url("https://example.com/docs"))
    }

    fn configure(
        &self,
        raw_config: serde_json::Value,
        workspace: &Path,
    ) -> Result<serde_json::Value, ConnectorError> {
        self.observe("configure");
        assert!(workspace.is_dir(), "workspace exists during configure");
        assert!(workspace.starts_with(&self.workspace_root));
        self.observed.borrow_mut().configs.push(raw_config.clone());
        Ok(raw_config)
    }

    fn check(&self, _config: &serde_json::Value) -> Result<ConnectionStatus, ConnectorError> {
        self.observe("check");
        match &self.check {
            CheckOutcome::Succeeded => Ok(ConnectionStatus::succeeded()),
            CheckOutcome::Failed(reason) => Ok(ConnectionStatus::failed(reason.clone())),
            CheckOutcome::Errors(reason) => Err(ConnectorError::failed(reason.clone())),
        }
    }

    fn discover(&self, _config: &serde_json::Value) -> Result<Catalog, ConnectorError> {
        self.observe("discover");
        Ok(Catalog::new(vec![Stream::new(
            "users",
            json!({"type": "object"}),
        )]))
    }

    fn read(
        &self,
        _config: serde_json::Value,
        _catalog: ConfiguredCatalog,
        state: ConnectorState,
    ) -> Result<MessageStream<'_>, ConnectorError> {
        self.observe("read");
        self.observed.borrow_mut().states.push(state);
        let pulled = Rc::clone(&self.pulled);
        let emitted = self.fail_read_after.unwrap_or(self.records.len());
        let failure = self
            .fail_read_after
            .map(|_| Err(ConnectorError::failed("source went away")));
        let stream = self
            .records
            .iter()
            .take(emitted)
            .cloned()
            .map(Ok)
            .chain(failure)
            .inspect(move |_| pulled.set(pulled.get() + 1));
        Ok(Box::new(stream))
    }
}

fn count_entries(dir: &Path) -> usize {
    fs::read_dir(dir).map_or(0, Iterator::count)
}

pub(super) fn record(stream: &str, id: usize) -> ProtocolMessage {
    RecordMessage::new(stream, json!({"id": id}), 1_700_000_000_000).into()
}

pub(super) fn state(cursor: usize) -> ProtocolMessage {
    StateMessage::new(json!({"cursor": cursor})).into()
}

// ---------------------------------------------------------------------------
// Sandbox
// ---------------------------------------------------------------------------

/// Input files plus a private workspace root for one test.
pub(super) struct Sandbox {
    inputs: TempDir,
    workspaces: TempDir,
}

impl Sandbox {
    pub(super) fn new() -> Self {
        Self {
            inputs: TempDir::new().expect("inputs dir"),
            workspaces: TempDir::new().expect("workspace root"),
        }
    }

    pub(super) fn workspace_root(&self) -> &Path {
        self.workspaces.path()
    }

    pub(super) fn workspace_root_utf8(&self) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(self.workspaces.path().to_path_buf())
            .expect("utf-8 workspace root")
    }

    pub(super) fn write(&self, name: &str, content: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::from_path_buf(self.inputs.path().join(name))
            .expect("utf-8 input path");
        fs::write(&path, content).expect("write input file");
        path
    }

    pub(super) fn input(&self, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(self.inputs.path().join(name)).expect("utf-8 input path")
    }

    pub(super) fn live_workspaces(&self) -> usize {
        count_entries(self.workspaces.path())
    }
}

pub(super) const CATALOG_JSON: &str = r#"{"streams":[{"stream":{"name":"users","json_schema":{}},"sync_mode":"incremental","destination_sync_mode":"append"}]}"#;

/// Output of one launcher run.
pub(super) struct Outcome {
    pub exit: ExitCode,
    pub stdout: String,
    pub stderr: String,
}

impl Outcome {
    pub(super) fn lines(&self) -> Vec<&str> {
        self.stdout.lines().collect()
    }
}

pub(super) fn launch_in(sandbox: &Sandbox, connector: &dyn Connector, args: &[&str]) -> Outcome {
    let root = sandbox.workspace_root_utf8();
    let entrypoint = Entrypoint::new(connector).with_workspace_root(&root);
    let argv: Vec<OsString> = std::iter::once("sluice")
        .chain(args.iter().copied())
        .map(OsString::from)
        .collect();
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let exit = launch_entrypoint(entrypoint, argv, &mut stdout, &mut stderr);
    Outcome {
        exit,
        stdout: String::from_utf8(stdout).expect("stdout utf8"),
        stderr: String::from_utf8(stderr).expect("stderr utf8"),
    }
}

// ---------------------------------------------------------------------------
// Log capture
// ---------------------------------------------------------------------------

/// Shared in-memory sink for formatted tracing output.
#[derive(Clone, Default)]
pub(super) struct LogCapture {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// Installs a thread-local subscriber writing into this capture.
    pub(super) fn install(&self) -> DefaultGuard {
        let layer = fmt::layer()
            .with_writer(self.clone())
            .with_ansi(false)
            .without_time();
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new("sluice_entrypoint=debug"))
            .with(layer);
        tracing::subscriber::set_default(subscriber)
    }

    pub(super) fn contents(&self) -> String {
        let bytes = self.bytes.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Returns the captured lines mentioning `needle`.
    pub(super) fn lines_containing(&self, needle: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains(needle))
            .map(str::to_owned)
            .collect()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
