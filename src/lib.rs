//! sessiond - session garbage-collection daemon.
//!
//! Library surface for the session store, factory, and background collector.
//! Request-handling code embeds the store/factory pair; the binary wires them
//! to the collector daemon.

pub mod config;
pub mod daemon_log;
pub mod session_gc;
pub mod sessiond_paths;
