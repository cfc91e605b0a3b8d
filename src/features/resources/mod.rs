//! Shared academic resources: upload, review, AI enrichment and browsing.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/resources` | Approved resources (public) |
//! | POST | `/api/resources` | Upload a resource for review |
//! | GET | `/api/resources/mine` | Own uploads, any status |
//! | GET | `/api/resources/browse` | Role-aware list |
//! | GET | `/api/resources/{id}` | Detail view |
//! | POST | `/api/resources/{id}/ask` | Question about an approved resource |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod stores;
pub mod workers;

pub use routes::ResourceState;
