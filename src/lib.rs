//! scrawl — a minimal server-rendered article CRUD app.
//!
//! The reusable piece is the [`render`] module: a multi-template HTML
//! renderer that discovers page templates under a directory tree at
//! startup, compiles each one together with a shared layout, and serves
//! renders by logical name. In debug mode it recompiles templates from
//! disk on every request so edits show up without a restart.
//!
//! Everything else is thin glue: axum handlers doing one database
//! operation each, backed by a MongoDB collection of articles.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod render;
pub mod store;
pub mod web;
