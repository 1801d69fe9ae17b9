use crate::core::domain::error::ValidationError;
use std::fmt;

/// A PVE API token: the owning user (`user@realm`), the token id and its secret.
///
/// The token is attached to every upstream call as
/// `Authorization: PVEAPIToken=<user>!<token_name>=<secret>`; there is no
/// session to renew.
#[derive(Clone, PartialEq, Eq)]
pub struct ProxmoxApiToken {
    user: String,
    token_name: String,
    secret: String,
}

impl ProxmoxApiToken {
    /// Creates a new token without validation.
    pub(crate) fn new_unchecked(user: String, token_name: String, secret: String) -> Self {
        Self {
            user,
            token_name,
            secret,
        }
    }

    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    #[must_use]
    pub fn token_name(&self) -> &str {
        &self.token_name
    }

    /// Formats the token as the value of an `Authorization` header.
    #[must_use]
    pub fn as_authorization_header(&self) -> String {
        format!(
            "PVEAPIToken={}!{}={}",
            self.user, self.token_name, self.secret
        )
    }
}

impl fmt::Debug for ProxmoxApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxmoxApiToken")
            .field("user", &self.user)
            .field("token_name", &self.token_name)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Validates the three parts of an API token.
pub(crate) fn validate_api_token(
    user: &str,
    token_name: &str,
    secret: &str,
) -> Result<(), ValidationError> {
    let Some((name, realm)) = user.split_once('@') else {
        return Err(ValidationError::Format(format!(
            "Token user '{}' must have the form user@realm",
            user
        )));
    };
    if name.is_empty() || realm.is_empty() || realm.contains('@') {
        return Err(ValidationError::Format(format!(
            "Token user '{}' must have the form user@realm",
            user
        )));
    }
    let allowed_user = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.');
    if !name.chars().all(allowed_user) || !realm.chars().all(allowed_user) {
        return Err(ValidationError::Format(
            "Token user contains invalid characters. Allowed: alphanumeric, -, _, .".to_string(),
        ));
    }

    if token_name.is_empty() {
        return Err(ValidationError::Field {
            field: "token_name".to_string(),
            message: "Token name cannot be empty".to_string(),
        });
    }
    let starts_with_letter = token_name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic());
    let allowed_token = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_');
    if !starts_with_letter || !token_name.chars().all(allowed_token) {
        return Err(ValidationError::Format(
            "Token name must start with a letter and contain only alphanumeric, -, _".to_string(),
        ));
    }

    if secret.is_empty() {
        return Err(ValidationError::Field {
            field: "token_value".to_string(),
            message: "Token secret cannot be empty".to_string(),
        });
    }
    if secret.chars().any(char::is_whitespace) {
        return Err(ValidationError::Format(
            "Token secret cannot contain whitespace".to_string(),
        ));
    }
    Ok(())
}
