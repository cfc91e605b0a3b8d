//! User directory.
//!
//! Entries are keyed by the token subject and created on the first
//! authenticated request.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/users/me` | Current directory entry |
//! | PATCH | `/api/users/me` | Update name, university, department |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod stores;

pub use services::UserService;
