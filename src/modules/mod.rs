//! Infrastructure adapters for external services: blob storage and the AI
//! completion endpoint.

pub mod ai;
pub mod storage;
