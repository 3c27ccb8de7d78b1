//! Alertdesk Client Library
//!
//! Session authentication and the alert list controller for the anomaly
//! alerting dashboard. The binary in `main.rs` is a thin front end over
//! these modules.

pub mod auth;
pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod pagination;
pub mod services;
