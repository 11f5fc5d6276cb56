use std::env;

pub const TOKEN_ENV: &str = "PLACEMENT_INTAKE_TOKEN";
pub const NAME_ENV: &str = "PLACEMENT_INTAKE_NAME";
pub const EMAIL_ENV: &str = "PLACEMENT_INTAKE_EMAIL";

/// Signed-in subject supplied by the external identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub token: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Identity {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            name: None,
            email: None,
        }
    }

    pub fn with_profile(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.name = Some(name.into()).filter(|value: &String| !value.trim().is_empty());
        self.email = Some(email.into()).filter(|value: &String| !value.trim().is_empty());
        self
    }
}

/// Collaborator that knows whether someone is signed in.
pub trait IdentityProvider {
    fn identity(&self) -> Option<Identity>;
}

/// Reads the identity handed over by the surrounding environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvIdentity;

impl IdentityProvider for EnvIdentity {
    fn identity(&self) -> Option<Identity> {
        let token = non_empty_var(TOKEN_ENV)?;
        Some(Identity {
            token,
            name: non_empty_var(NAME_ENV),
            email: non_empty_var(EMAIL_ENV),
        })
    }
}

/// Fixed identity, or none at all.
#[derive(Debug, Default, Clone)]
pub struct StaticIdentity(pub Option<Identity>);

impl IdentityProvider for StaticIdentity {
    fn identity(&self) -> Option<Identity> {
        self.0.clone()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
