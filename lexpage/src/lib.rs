//! Internal API of the `lexpage` binary, exposed for integration tests.
pub mod cli;
pub mod commands;
