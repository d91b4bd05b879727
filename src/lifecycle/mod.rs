//! Round and life lifecycle: when damage is recorded, shown and cleared

pub mod controller;
pub mod permissions;

pub use controller::{GameRules, HurtEvent, LifecycleController, SharedController};
pub use permissions::PermissionToken;
