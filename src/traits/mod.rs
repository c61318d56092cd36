//! Trait definitions for App Store Connect operations.
//!
//! Each attribute type implements the traits its endpoints support, so the
//! generic envelope and fetch code stay shared.

mod get;
mod list;
mod update;

pub use get::Get;
pub use list::List;
pub use update::Update;
