// src/lib.rs
pub mod config;
pub mod errors;
pub mod harness;
pub mod encoder;
pub mod executor;
pub mod classifier;
pub mod grader;
pub mod models;
pub mod database;
pub mod banner;
pub mod api;
