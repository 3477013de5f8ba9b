//! RolePermissionGate - the single capability table for booking actions.

use thiserror::Error;

use super::{Action, Actor, Role};
use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::ProviderId;

use Action::*;
use BookingStatus::*;

const PROVIDER_STAFF_ACTIONS: &[Action] = &[ViewOwnBookings, AdvanceStatus, UploadResults];

/// (role, allowed actions). Anything absent is denied.
const CAPABILITIES: &[(Role, &[Action])] = &[
    (
        Role::Admin,
        &[
            ViewAllBookings,
            AssignProvider,
            UnassignProvider,
            AdvanceStatus,
            DeleteBooking,
            ViewStatistics,
            ManageCatalog,
            ManageUsers,
            ManageSubAdmins,
            ManageInquiries,
        ],
    ),
    (Role::SubAdmin, &[ViewAllBookings, AssignProvider, AdvanceStatus]),
    (Role::Clinic, PROVIDER_STAFF_ACTIONS),
    (Role::LabTechnician, PROVIDER_STAFF_ACTIONS),
    (Role::Anonymous, &[]),
];

/// (role, from, to) status edges each role may trigger via `advance_status`.
const STATUS_EDGES: &[(Role, BookingStatus, BookingStatus)] = &[
    (Role::Admin, Pending, Confirmed),
    (Role::Admin, Pending, Cancelled),
    (Role::Admin, Confirmed, SampleCollected),
    (Role::Admin, Confirmed, Cancelled),
    (Role::Admin, SampleCollected, ResultsReady),
    (Role::Admin, SampleCollected, Cancelled),
    (Role::Admin, ResultsReady, Completed),
    (Role::SubAdmin, Pending, Confirmed),
    (Role::SubAdmin, ResultsReady, Completed),
    (Role::Clinic, Confirmed, SampleCollected),
    (Role::Clinic, SampleCollected, ResultsReady),
    (Role::LabTechnician, Confirmed, SampleCollected),
    (Role::LabTechnician, SampleCollected, ResultsReady),
];

/// Denial from the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Role '{role}' may not {action}")]
pub struct PermissionDenied {
    pub role: Role,
    pub action: Action,
}

/// Which bookings an actor may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewScope {
    All,
    OwnProvider(ProviderId),
    Nothing,
}

/// Decides allow/deny for (actor, action, booking). Fails closed.
#[derive(Debug, Clone, Copy, Default)]
pub struct RolePermissionGate;

impl RolePermissionGate {
    pub fn new() -> Self {
        Self
    }

    /// Pure table lookup.
    pub fn allows(&self, role: Role, action: Action) -> bool {
        CAPABILITIES
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, actions)| actions.contains(&action))
            .unwrap_or(false)
    }

    /// Capability check without a booking in hand.
    pub fn require(&self, actor: &Actor, action: Action) -> Result<(), PermissionDenied> {
        if self.allows(actor.role, action) {
            Ok(())
        } else {
            Err(self.denied(actor, action))
        }
    }

    /// Capability plus scope: provider staff may only act on bookings
    /// assigned to their own provider.
    pub fn check(&self, actor: &Actor, action: Action, booking: &Booking) -> Result<(), PermissionDenied> {
        self.require(actor, action)?;
        if self.in_scope(actor, booking) {
            Ok(())
        } else {
            Err(self.denied(actor, action))
        }
    }

    /// Whether the role may move a booking along this particular edge.
    pub fn permits_edge(&self, role: Role, from: BookingStatus, to: BookingStatus) -> bool {
        STATUS_EDGES
            .iter()
            .any(|(r, f, t)| *r == role && *f == from && *t == to)
    }

    pub fn view_scope(&self, actor: &Actor) -> ViewScope {
        if self.allows(actor.role, ViewAllBookings) {
            return ViewScope::All;
        }
        match actor.provider_id {
            Some(provider_id) if self.allows(actor.role, ViewOwnBookings) => {
                ViewScope::OwnProvider(provider_id)
            }
            _ => ViewScope::Nothing,
        }
    }

    pub fn can_view(&self, actor: &Actor, booking: &Booking) -> bool {
        match self.view_scope(actor) {
            ViewScope::All => true,
            ViewScope::OwnProvider(provider_id) => booking.provider_id() == Some(provider_id),
            ViewScope::Nothing => false,
        }
    }

    fn in_scope(&self, actor: &Actor, booking: &Booking) -> bool {
        if !actor.role.is_provider_staff() {
            return true;
        }
        match (actor.provider_id, booking.provider_id()) {
            (Some(own), Some(assigned)) => own == assigned,
            _ => false,
        }
    }

    fn denied(&self, actor: &Actor, action: Action) -> PermissionDenied {
        PermissionDenied {
            role: actor.role,
            action,
        }
    }
}
