//! Cache module for storing API responses to disk
//!
//! This module provides a single-slot cache manager: one JSON file per key,
//! overwritten on every write and read back as a best-effort fallback when the
//! upstream API is unavailable.

mod manager;

pub use manager::CacheManager;
