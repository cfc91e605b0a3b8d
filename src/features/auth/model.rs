use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identity asserted by a validated bearer token.
///
/// Carries only what the token proves. Role and affiliation live in the
/// user directory and are resolved per request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl AuthenticatedUser {
    /// Display name for a first-time user: the token's name claim, else the
    /// email local part, else "Anonymous".
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            return name.to_string();
        }

        self.email
            .as_deref()
            .and_then(|email| email.split('@').next())
            .map(str::trim)
            .filter(|local| !local.is_empty())
            .unwrap_or("Anonymous")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: Option<&str>, name: Option<&str>) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "sub-1".to_string(),
            email: email.map(String::from),
            name: name.map(String::from),
        }
    }

    #[test]
    fn test_display_name_prefers_name_claim() {
        assert_eq!(
            user(Some("amira@campus.edu"), Some("Amira K")).display_name(),
            "Amira K"
        );
    }

    #[test]
    fn test_display_name_uses_email_local_part() {
        assert_eq!(user(Some("amira@campus.edu"), None).display_name(), "amira");
        assert_eq!(user(Some("amira@campus.edu"), Some("  ")).display_name(), "amira");
    }

    #[test]
    fn test_display_name_falls_back_to_anonymous() {
        assert_eq!(user(None, None).display_name(), "Anonymous");
        assert_eq!(user(Some("@campus.edu"), None).display_name(), "Anonymous");
    }
}
