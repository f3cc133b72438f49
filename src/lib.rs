//! Community Cases - deadline and lifecycle engine for community justice
//! officials.
//!
//! Cases receive a sequential `PREFIX-YYYY-MM-NNNN` number, a statutory
//! deadline frozen at registration, at most one extension, and move from
//! `in_progress` to a terminal state. Every mutation is written together with
//! its audit entry.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
