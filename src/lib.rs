//! GitSage dashboard client
//!
//! Client-side helpers for the GitSage web dashboard: JSON API calls,
//! periodic environment status polling and transient notifications, wired
//! together by the [`service::GitSage`] service object.

pub mod cli;
pub mod client;
pub mod config;
pub mod logging;
pub mod notify;
pub mod service;
pub mod status;
