//! First-admin registration policy gate
//!
//! The first account registered in a deployment is the administrator that
//! creates every later user. The gate keeps the registration form closed
//! until the deployment's admin-existence status is known, and closes it
//! for the admin role once an administrator exists. A closed gate rejects
//! submissions locally; the auth collaborator is never invoked for them.

mod errors;

pub use errors::GateError;

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::{
    Result,
    session::SessionManager,
    transport::{AuthApi, RegistrationData},
    validation::ValidationErrorSet,
};

/// Role a registration can be submitted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Client,
}

/// Whether the deployment already has an administrator.
///
/// Starts `Unknown` while the existence query is pending; the gate stays
/// closed until it resolves, so the form can never momentarily allow a
/// submit it should not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminPresence {
    #[default]
    Unknown,
    Present,
    Absent,
}

/// Why the gate currently rejects submissions.
///
/// Variants are listed in precedence order; [`RegistrationGate::closed_reason`]
/// reports the first one that applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateClosedReason {
    /// The admin-existence query has not resolved yet.
    Checking,
    /// The client role is selected; only the first administrator may
    /// self-register.
    RegistrationDisabledForClients,
    /// An administrator already exists.
    AdminAlreadyRegistered,
}

impl fmt::Display for GateClosedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            GateClosedReason::Checking => "Verificando el estado del registro…",
            GateClosedReason::RegistrationDisabledForClients => {
                "El registro de usuarios está deshabilitado. Contacta a tu administrador."
            }
            GateClosedReason::AdminAlreadyRegistered => "Ya existe un administrador registrado.",
        };
        f.write_str(message)
    }
}

struct GateInternal {
    api: Arc<dyn AuthApi>,
    state: Mutex<GateState>,
}

struct GateState {
    admin_presence: AdminPresence,
    selected_role: Role,
}

/// Policy gate deciding whether the registration form may submit.
///
/// Cheap-to-clone handle; all clones share the same state.
#[derive(Clone)]
pub struct RegistrationGate {
    inner: Arc<GateInternal>,
}

impl RegistrationGate {
    /// Gate with the admin-existence status still unknown and the admin
    /// role preselected for the bootstrap flow.
    pub fn new(api: Arc<dyn AuthApi>) -> Self {
        Self {
            inner: Arc::new(GateInternal {
                api,
                state: Mutex::new(GateState {
                    admin_presence: AdminPresence::Unknown,
                    selected_role: Role::Admin,
                }),
            }),
        }
    }

    /// Resolves the admin-existence status against the collaborator.
    ///
    /// When an administrator exists, the selected role is forced to
    /// `Client`. A failed query leaves the status `Unknown` (gate closed
    /// with reason `Checking`) and can be retried. This query does not
    /// participate in the session manager's busy flag and may resolve at
    /// any time.
    pub async fn refresh_admin_presence(&self) -> Result<AdminPresence> {
        match self.inner.api.check_admin_exists().await {
            Ok(true) => {
                let mut state = self.inner.state.lock().unwrap();
                state.admin_presence = AdminPresence::Present;
                state.selected_role = Role::Client;
                tracing::debug!("administrator already registered, forcing client role");
                Ok(AdminPresence::Present)
            }
            Ok(false) => {
                self.inner.state.lock().unwrap().admin_presence = AdminPresence::Absent;
                tracing::debug!("no administrator registered yet");
                Ok(AdminPresence::Absent)
            }
            Err(err) => {
                tracing::warn!(%err, "admin-existence query failed, gate stays closed");
                Err(err.into())
            }
        }
    }

    /// Current admin-existence status.
    pub fn admin_presence(&self) -> AdminPresence {
        self.inner.state.lock().unwrap().admin_presence
    }

    /// Currently selected registration role.
    pub fn selected_role(&self) -> Role {
        self.inner.state.lock().unwrap().selected_role
    }

    /// Selects the role to register.
    ///
    /// Selecting `Admin` while an administrator exists is allowed — the
    /// gate then closes with [`GateClosedReason::AdminAlreadyRegistered`].
    pub fn select_role(&self, role: Role) {
        self.inner.state.lock().unwrap().selected_role = role;
    }

    /// Why the gate is closed, or `None` when it is open.
    ///
    /// Reasons are evaluated in precedence order: pending check, client
    /// role selected, administrator already present.
    pub fn closed_reason(&self) -> Option<GateClosedReason> {
        let state = self.inner.state.lock().unwrap();
        match (state.admin_presence, state.selected_role) {
            (AdminPresence::Unknown, _) => Some(GateClosedReason::Checking),
            (_, Role::Client) => Some(GateClosedReason::RegistrationDisabledForClients),
            (AdminPresence::Present, Role::Admin) => {
                Some(GateClosedReason::AdminAlreadyRegistered)
            }
            (AdminPresence::Absent, Role::Admin) => None,
        }
    }

    /// Whether a submit would currently be accepted.
    pub fn can_submit(&self, errors: &ValidationErrorSet, session: &SessionManager) -> bool {
        self.closed_reason().is_none() && errors.is_empty() && !session.is_loading()
    }

    /// Submits the registration through `session` if the gate allows it.
    ///
    /// A closed gate or pending validation errors reject locally: the auth
    /// collaborator is never invoked, the per-field error set is untouched,
    /// and the session's status message keeps whatever it held.
    pub async fn submit(
        &self,
        session: &SessionManager,
        errors: &ValidationErrorSet,
        data: RegistrationData,
    ) -> Result<()> {
        if let Some(reason) = self.closed_reason() {
            tracing::debug!(%reason, "registration submit rejected by policy gate");
            return Err(GateError::Closed { reason }.into());
        }
        if !errors.is_empty() {
            return Err(GateError::ValidationPending {
                fields: errors.len(),
            }
            .into());
        }
        session.register(data).await
    }
}

impl fmt::Debug for RegistrationGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock().unwrap();
        f.debug_struct("RegistrationGate")
            .field("api", &"<dyn AuthApi>")
            .field("admin_presence", &state.admin_presence)
            .field("selected_role", &state.selected_role)
            .finish()
    }
}
