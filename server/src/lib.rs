//! TicketsMaster Server - Event ticketing REST API.
//!
//! This crate provides the server component of TicketsMaster, responsible
//! for:
//! - Authenticating users and admins (argon2 passwords, 24h bearer tokens)
//! - Event CRUD over a MongoDB document store
//! - Admin user management
//! - Seeding default data on startup
//!
//! # Architecture
//!
//! Request handling is a plain request/response pipeline: axum routes call
//! into the [`store::Store`] trait, each operation a single document-store
//! call. Admin routes are gated by middleware that re-reads the caller's
//! current role from the store on every request.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod seed;
pub mod store;
pub mod types;
