//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **image_host**: HTTP upload of profile images
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod image_host;
pub mod persistence;
