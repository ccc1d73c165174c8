//! Inbound operator commands.
//!
//! The host hands the service a raw text argument such as `toggle:3`;
//! this module turns it into an [`AirlockCommand`] and an airlock number.

use crate::error::CommandError;

/// Commands an operator or automation can send to one airlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirlockCommand {
    /// Switch to whichever side the airlock is not currently favouring.
    Toggle,
    /// Request inside access.
    OpenInner,
    /// Request outside access.
    OpenOuter,
}

impl AirlockCommand {
    pub fn verb(self) -> &'static str {
        match self {
            Self::Toggle => "toggle",
            Self::OpenInner => "inner",
            Self::OpenOuter => "outer",
        }
    }
}

/// Parse `{toggle|inner|outer}:{number}`, case-insensitive, surrounding
/// whitespace ignored.
///
/// `exists` reports whether a complete airlock has the given number; it is
/// consulted after the number parses and before the verb is checked.
pub fn parse_command(
    argument: &str,
    exists: impl Fn(u32) -> bool,
) -> Result<(AirlockCommand, u32), CommandError> {
    let normalized = argument.trim().to_lowercase();
    let mut parts = normalized.split(':');
    let (Some(verb), Some(number), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CommandError::Malformed);
    };

    let number = number
        .parse::<u32>()
        .map_err(|_| CommandError::NotANumber)?;
    if !exists(number) {
        return Err(CommandError::UnknownAirlock(number));
    }

    let command = match verb {
        "toggle" => AirlockCommand::Toggle,
        "inner" => AirlockCommand::OpenInner,
        "outer" => AirlockCommand::OpenOuter,
        other => return Err(CommandError::UnknownVerb(other.to_owned())),
    };

    Ok((command, number))
}
