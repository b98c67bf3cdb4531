// artisan_market/src/web/mod.rs

pub mod cors;
pub mod extractors;
pub mod handlers;
pub mod routes;

#[cfg(test)]
mod tests;

pub use cors::cors_policy;
pub use routes::configure_app_routes;
