//! Course catalog service — library crate for integration testing.
//!
//! Course CRUD handlers publish entity-change events onto a
//! [`notification::NotificationQueue`], which a polling endpoint drains.

pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod notification;
pub mod state;
pub mod store;
