// artisan_market/src/web/handlers/mod.rs

pub mod auth_handlers;
pub mod catalog_handlers;
pub mod product_handlers;
