//! CLI tests for the `repofetch` binary
//!
//! Every test runs the binary with an isolated `REPOFETCH_HOME` whose
//! config points GitHub (archives and API) at a local mock server.

mod common;
mod config;
mod contributors;
mod download;
