// src/lib.rs

//! Show notifier library.
//!
//! Polls a concert archive for new shows and announces each one through a
//! topic-based push notification service.

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
