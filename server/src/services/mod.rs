// artisan_market/src/services/mod.rs

pub mod identity;
pub mod memory_store;
pub mod pg_store;
pub mod store;
