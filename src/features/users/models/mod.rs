mod user;

pub use user::{ProfileUpdate, User, UserRole};
