//! Muzeum - visitor and curator client for the Muzeum Września 1939 REST API
//!
//! This library provides the session, HTTP client and services behind the
//! `muzeum` command-line tool.

pub mod cli;
pub mod client;
pub mod config;
pub mod models;
pub mod services;
pub mod session;
