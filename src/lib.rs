// src/lib.rs

//! jobsweep: careers-site job listing crawler.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
