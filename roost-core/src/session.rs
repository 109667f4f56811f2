use roost_shared::Masked;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Guest,
    Host,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::Host => "host",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "guest" => Ok(Role::Guest),
            "host" => Ok(Role::Host),
            "admin" => Ok(Role::Admin),
            other => Err(CoreError::ValidationError(format!("Unknown role: {}", other))),
        }
    }
}

/// The signed-in user, as asserted by the external auth provider.
///
/// Passed explicitly to every service call through a [`SessionHandle`]; there
/// is no ambient "current user".
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub uid: String,
    pub email: Option<Masked<String>>,
    pub display_name: Option<String>,
    pub role: Role,
}

pub type SessionHandle = Arc<Session>;

impl Session {
    pub fn new(uid: impl Into<String>, role: Role) -> Self {
        Self {
            uid: uid.into(),
            email: None,
            display_name: None,
            role,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(Masked(email.into()));
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn into_handle(self) -> SessionHandle {
        Arc::new(self)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn require_role(&self, allowed: &[Role]) -> CoreResult<()> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(CoreError::ForbiddenError(format!(
                "{} accounts cannot perform this action",
                self.role
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_role() {
        let host = Session::new("host-1", Role::Host);
        assert!(host.require_role(&[Role::Host, Role::Admin]).is_ok());
        assert!(matches!(
            host.require_role(&[Role::Admin]),
            Err(CoreError::ForbiddenError(_))
        ));
    }

    #[test]
    fn test_email_is_masked_in_debug() {
        let session = Session::new("guest-1", Role::Guest).with_email("ana@example.com");
        let debug = format!("{:?}", session);
        assert!(!debug.contains("ana@example.com"));
        assert_eq!(session.email.as_ref().map(|e| e.expose().as_str()), Some("ana@example.com"));
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert!("superuser".parse::<Role>().is_err());
    }
}
