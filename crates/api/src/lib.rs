//! Autolot API library.
//!
//! Customers, their cars, and the users allowed to manage them, served as a
//! JSON API behind HTTP Basic authentication. The binary in `main.rs` only
//! wires configuration, telemetry, and the listener around [`routes::app`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
