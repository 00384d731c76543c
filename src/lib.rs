//! Tere Verde - read-only catalog API for the Circuito Verde parks
//!
//! Parks, trails, events, news and opening hours served as JSON over HTTP,
//! with an OpenAPI document generated from the handlers.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
