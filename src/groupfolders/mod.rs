//! Group folders resource family

pub mod client;
pub mod types;

pub use client::GroupFoldersClient;
pub use types::{ListFoldersQuery, Permissions};
