//! HTTP client layer — `AnalyticsHttp`.

pub mod client;

pub use client::AnalyticsHttp;
