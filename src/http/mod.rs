mod handlers;
pub mod models;
pub mod routes;
