use std::fmt::Display;

use crate::models::SelectedFile;

/// Input that must be present before a chat can be submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    File,
    UserName,
    FriendName,
}

impl Field {
    /// Prompt shown to the user when this field is missing
    pub fn prompt(&self) -> &'static str {
        match self {
            Field::File => "Please select a chat history file.",
            Field::UserName => "Please enter your name.",
            Field::FriendName => "Please enter your friend's name.",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::File => write!(f, "file"),
            Field::UserName => write!(f, "user_name"),
            Field::FriendName => write!(f, "friend_name"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    Ok,
    MissingField(Field),
}

impl ValidationOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, ValidationOutcome::Ok)
    }
}

/// Checks the submission inputs in a fixed order and reports the first gap
///
/// The order (file, then user name, then friend name) decides which warning
/// the user sees first.
pub fn validate(
    user_name: &str,
    friend_name: &str,
    file: Option<&SelectedFile>,
) -> ValidationOutcome {
    if file.is_none() {
        return ValidationOutcome::MissingField(Field::File);
    }
    if user_name.trim().is_empty() {
        return ValidationOutcome::MissingField(Field::UserName);
    }
    if friend_name.trim().is_empty() {
        return ValidationOutcome::MissingField(Field::FriendName);
    }
    ValidationOutcome::Ok
}
