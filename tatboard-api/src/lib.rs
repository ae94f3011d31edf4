//! # Tatboard API Server Library
//!
//! This library provides the core functionality for the Tatboard API
//! server: a REST backend for project/task/user management backed by
//! MongoDB.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
