//! External representations: the remote order service payloads and the
//! server configuration.

pub mod config;
pub mod order;
