//! HTTP request handlers.

pub mod articles;
