//! Default Sluice connector binary.
//!
//! Ships with an empty registry, so unless a connector crate builds its own
//! binary around [`sluice_entrypoint::main_with_registry`], every operation
//! reports that it is not implemented.

use std::process::ExitCode;

use sluice_connector::ConnectorRegistry;

fn main() -> ExitCode {
    sluice_entrypoint::main_with_registry(&ConnectorRegistry::new())
}
