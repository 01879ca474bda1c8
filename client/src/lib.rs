//! TicketsMaster Client - command-line ticketing client.
//!
//! This crate provides the client component of TicketsMaster:
//! - A typed HTTP client for the server's REST API ([`api`])
//! - An explicit session-state controller with defined refresh points and a
//!   demo/offline fallback mode ([`state`])
//! - Text renderings of the event and admin views ([`render`])
//! - A persisted session file standing in for browser local storage
//!   ([`session_file`])
//!
//! # Architecture
//!
//! Every command is a single awaited round trip: call the API, feed the
//! outcome into the session's transition function, render the result. When
//! the server is unreachable the session degrades to a fixed demo data set
//! and demo credentials so the client stays interactive offline.

pub mod api;
pub mod config;
pub mod demo;
pub mod error;
pub mod render;
pub mod session_file;
pub mod state;
pub mod types;
