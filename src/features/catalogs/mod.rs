//! Metadata catalogs: universities, departments, subjects per department and
//! the fixed semester list.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod stores;

pub use services::CatalogService;
