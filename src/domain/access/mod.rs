//! Access module - roles, actors and the role permission gate.

mod gate;
mod role;

pub use gate::{PermissionDenied, RolePermissionGate, ViewScope};
pub use role::{Action, Actor, Role};
