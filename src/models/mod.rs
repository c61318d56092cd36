//! App Store Connect attribute types and endpoint families.

mod app;
mod beta_group;
mod beta_tester;
mod build;
mod device;
mod review;

pub use app::*;
pub use beta_group::*;
pub use beta_tester::*;
pub use build::*;
pub use device::*;
pub use review::*;
