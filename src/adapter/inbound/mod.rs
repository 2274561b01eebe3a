//! Inbound adapters (driving side): the HTTP surface and the CLI.

pub mod cli;
pub mod web;
