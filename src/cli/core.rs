//! Command context and error plumbing shared by every subcommand.

use std::io;

use crate::config::{Config, ConfigManager};
use crate::errors::IntakeError;
use crate::intake::identity::{Identity, IdentityProvider};
use crate::transport::{ApiClient, HttpTransport, TransportError};
use crate::utils::clock::Clock;

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("Sign in first: set PLACEMENT_INTAKE_TOKEN to your session token.")]
    NotSignedIn,
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
}

impl From<TransportError> for CommandError {
    fn from(err: TransportError) -> Self {
        CommandError::Intake(IntakeError::Transport(err))
    }
}

impl CommandError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            CommandError::InvalidArguments(_) => 2,
            CommandError::NotSignedIn | CommandError::Intake(IntakeError::Unauthenticated) => 3,
            CommandError::Intake(IntakeError::Validation(_)) => 4,
            CommandError::Intake(IntakeError::Transport(_)) => 5,
            _ => 1,
        }
    }
}

/// Everything a command needs: settings, the signed-in identity and a clock.
pub struct CommandContext {
    pub config_manager: ConfigManager,
    pub config: Config,
    pub identity: Option<Identity>,
    pub clock: Box<dyn Clock>,
}

impl CommandContext {
    pub fn new(
        config_manager: ConfigManager,
        identity_provider: &dyn IdentityProvider,
        clock: Box<dyn Clock>,
    ) -> Result<Self, CommandError> {
        let config = config_manager.load()?.with_env_overrides();
        let identity = identity_provider.identity();
        tracing::debug!(
            api = %config.api_base_url,
            signed_in = identity.is_some(),
            "command context ready"
        );
        Ok(Self {
            config_manager,
            config,
            identity,
            clock,
        })
    }

    pub fn require_identity(&self) -> Result<&Identity, CommandError> {
        self.identity.as_ref().ok_or(CommandError::NotSignedIn)
    }

    pub fn api_client(&self) -> Result<ApiClient<HttpTransport>, CommandError> {
        let transport = HttpTransport::from_config(&self.config)?;
        Ok(ApiClient::new(transport, self.identity.clone()))
    }
}
