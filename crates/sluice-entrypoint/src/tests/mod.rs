//! Tests for the entrypoint runner and launcher.

mod behaviour;
mod support;
