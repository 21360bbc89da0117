//! Connect to SSH hosts discovered via DNS SRV records.
//!
//! Looks up `_ssh._tcp.<hostname>`, picks the preferred record and hands its
//! target and port to the system `ssh` client. When no record exists, the
//! plain hostname and the default SSH port are used instead.

pub mod launch;
pub mod log;
pub mod resolve;
