//! Roles, actions and the acting principal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{ProviderId, UserId, ValidationError};

/// Who is acting. Patients are anonymous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    SubAdmin,
    Clinic,
    LabTechnician,
    Anonymous,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::SubAdmin => "sub_admin",
            Role::Clinic => "clinic",
            Role::LabTechnician => "lab_technician",
            Role::Anonymous => "anonymous",
        }
    }

    /// Provider-side roles are bound to one provider and see only its bookings.
    pub fn is_provider_staff(&self) -> bool {
        matches!(self, Role::Clinic | Role::LabTechnician)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "sub_admin" => Ok(Role::SubAdmin),
            "clinic" => Ok(Role::Clinic),
            "lab_technician" => Ok(Role::LabTechnician),
            "anonymous" => Ok(Role::Anonymous),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

/// Capabilities the gate decides on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    ViewOwnBookings,
    ViewAllBookings,
    AssignProvider,
    UnassignProvider,
    AdvanceStatus,
    UploadResults,
    DeleteBooking,
    ViewStatistics,
    ManageCatalog,
    ManageUsers,
    ManageSubAdmins,
    ManageInquiries,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::ViewOwnBookings => "view_own_bookings",
            Action::ViewAllBookings => "view_all_bookings",
            Action::AssignProvider => "assign_provider",
            Action::UnassignProvider => "unassign_provider",
            Action::AdvanceStatus => "advance_status",
            Action::UploadResults => "upload_results",
            Action::DeleteBooking => "delete_booking",
            Action::ViewStatistics => "view_statistics",
            Action::ManageCatalog => "manage_catalog",
            Action::ManageUsers => "manage_users",
            Action::ManageSubAdmins => "manage_sub_admins",
            Action::ManageInquiries => "manage_inquiries",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The principal behind a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub role: Role,
    pub user_id: Option<UserId>,
    /// Set for clinic and lab technician staff.
    pub provider_id: Option<ProviderId>,
}

impl Actor {
    pub fn anonymous() -> Self {
        Self {
            role: Role::Anonymous,
            user_id: None,
            provider_id: None,
        }
    }

    pub fn admin(user_id: UserId) -> Self {
        Self {
            role: Role::Admin,
            user_id: Some(user_id),
            provider_id: None,
        }
    }

    pub fn sub_admin(user_id: UserId) -> Self {
        Self {
            role: Role::SubAdmin,
            user_id: Some(user_id),
            provider_id: None,
        }
    }

    /// Clinic or lab technician staff bound to a provider.
    pub fn provider_staff(role: Role, user_id: UserId, provider_id: ProviderId) -> Self {
        Self {
            role,
            user_id: Some(user_id),
            provider_id: Some(provider_id),
        }
    }

    /// Identifier recorded on events and logs.
    pub fn audit_id(&self) -> String {
        self.user_id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_else(|| self.role.to_string())
    }
}
