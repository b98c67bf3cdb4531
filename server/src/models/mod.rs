// artisan_market/src/models/mod.rs

pub mod user;
