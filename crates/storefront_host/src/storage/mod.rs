//! Durable storage contracts and lightweight test adapters.

pub mod kv;
