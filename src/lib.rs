//! # Transflow
//!
//! `transflow` is a thin HTTP façade over the [Appwrite](https://appwrite.io)
//! account API. It exposes signup, signin, and signout endpoints, translating
//! each request into calls against Appwrite and mapping the outcome into a
//! JSON response plus a session cookie.
//!
//! Identity storage, password hashing, and session persistence live entirely
//! in Appwrite; this service holds no state beyond its startup configuration.
//! The session secret travels to the browser as a cookie and is never
//! persisted or logged here.
//!
//! ## Layout
//!
//! - [`cli`]: argument/environment parsing, settings, logging setup.
//! - [`appwrite`]: the [`appwrite::AccountProvider`] capability trait and the
//!   reqwest-backed client that talks to Appwrite.
//! - [`api`]: the axum router and request handlers.

pub mod api;
pub mod appwrite;
pub mod cli;

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
