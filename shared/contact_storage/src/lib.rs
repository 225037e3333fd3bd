//! Contact storage for the contacts backend
//!
//! This crate holds the key-value store abstraction (with `DynamoDB` and in-memory
//! implementations), the table initializer run at startup and the contact record service.

pub mod contact;
pub mod store;
pub mod table;
