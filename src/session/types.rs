use crate::gateway::GatewayUser;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// The logged-in user as the client knows them. Read-only: the gateway
/// creates and owns the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl Identity {
    /// Display name comes from the signup `full_name`, falling back to the
    /// local part of the email address.
    #[must_use]
    pub fn from_gateway(user: &GatewayUser) -> Self {
        let name = user
            .user_metadata
            .full_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map_or_else(|| email_local_part(&user.email), ToString::to_string);

        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name,
        }
    }
}

fn email_local_part(email: &str) -> String {
    email.split('@').next().unwrap_or_default().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anonymous => write!(f, "anonymous"),
            Self::Authenticated => write!(f, "authenticated"),
        }
    }
}

/// Identity and token travel together, so a session is authenticated exactly
/// when both are present.
#[derive(Debug, Default)]
pub struct Session {
    current: Option<(Identity, SecretString)>,
}

impl Session {
    #[must_use]
    pub fn authenticated(identity: Identity, token: SecretString) -> Self {
        Self {
            current: Some((identity, token)),
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        if self.is_authenticated() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.current.as_ref().map(|(identity, _)| identity)
    }

    #[must_use]
    pub fn token(&self) -> Option<&SecretString> {
        self.current.as_ref().map(|(_, token)| token)
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::UserMetadata;
    use secrecy::ExposeSecret;
    use serde_json::Map;

    fn user(email: &str, full_name: Option<&str>) -> GatewayUser {
        GatewayUser {
            id: "8d1c".to_string(),
            email: email.to_string(),
            user_metadata: UserMetadata {
                full_name: full_name.map(ToString::to_string),
            },
            extra: Map::new(),
        }
    }

    #[test]
    fn name_from_full_name() {
        let identity = Identity::from_gateway(&user("jane@x.com", Some("Jane Doe")));
        assert_eq!(identity.name, "Jane Doe");
        assert_eq!(identity.id, "8d1c");
    }

    #[test]
    fn name_falls_back_to_email_local_part() {
        assert_eq!(Identity::from_gateway(&user("jane@x.com", None)).name, "jane");
        assert_eq!(
            Identity::from_gateway(&user("jane@x.com", Some("  "))).name,
            "jane"
        );
    }

    #[test]
    fn session_state_follows_credentials() {
        let mut session = Session::default();
        assert_eq!(session.state(), SessionState::Anonymous);
        assert!(session.identity().is_none());
        assert!(session.token().is_none());

        session = Session::authenticated(
            Identity::from_gateway(&user("jane@x.com", None)),
            SecretString::from("tok"),
        );
        assert_eq!(session.state(), SessionState::Authenticated);
        assert_eq!(session.token().map(|t| t.expose_secret()), Some("tok"));

        session.clear();
        assert_eq!(session.state(), SessionState::Anonymous);
    }
}
