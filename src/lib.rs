pub mod cache;
pub mod config;
pub mod error;
pub mod fields;
pub mod handler;
pub mod message;
pub mod push;
pub mod store;
pub mod translation;
