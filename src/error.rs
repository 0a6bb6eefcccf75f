//! Error taxonomy for a single bot command invocation.
//!
//! Terminal variants end the invocation with one reply. `ItemTransport` and
//! `ReportEdit` are contained at item granularity and never abort a batch.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BotError {
    #[error("user is not registered")]
    NotRegistered,

    #[error("user is banned")]
    Banned,

    #[error("command requires a premium plan")]
    PlanRestricted,

    #[error("no API token saved for this user")]
    MissingCredential,

    #[error("no valid targets found in message")]
    EmptyBatch,

    #[error("batch exceeds {max} targets")]
    BatchTooLarge { max: usize },

    #[error("check transport failed: {0}")]
    ItemTransport(String),

    #[error("report edit failed: {0}")]
    ReportEdit(String),

    #[error("command is restricted to administrators")]
    AdminOnly,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Generic(String),
}

impl BotError {
    /// Text sent back to the chat when this error ends an invocation.
    pub fn user_message(&self) -> String {
        match self {
            BotError::NotRegistered => {
                "You are not registered. Send /register first.".to_string()
            }
            BotError::Banned => "You are banned from using this bot.".to_string(),
            BotError::PlanRestricted => {
                "This command is only available on the premium plan.".to_string()
            }
            BotError::MissingCredential => {
                "No API token saved. Use /token <your-token> first.".to_string()
            }
            BotError::EmptyBatch => {
                "No valid targets found. Format: host|port|/path|expected_status".to_string()
            }
            BotError::BatchTooLarge { max } => format!("At most {max} targets per check."),
            BotError::ItemTransport(msg) => format!("Check failed: {msg}"),
            BotError::ReportEdit(msg) => format!("Could not update report: {msg}"),
            BotError::AdminOnly => "This command is restricted to administrators.".to_string(),
            BotError::InvalidArgument(msg) => msg.clone(),
            BotError::Generic(_) => "Something went wrong, please try again later.".to_string(),
        }
    }

    /// Whether this error ends the invocation instead of a single item.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, BotError::ItemTransport(_) | BotError::ReportEdit(_))
    }
}

impl From<anyhow::Error> for BotError {
    fn from(err: anyhow::Error) -> Self {
        BotError::Generic(format!("{err:#}"))
    }
}
