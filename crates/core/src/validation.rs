//! Input validation constants and helpers shared by request schemas.

use validator::ValidationErrors;

/// Usernames shorter than this are rejected at registration.
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Whether `username` satisfies the minimum length, counted in characters.
pub fn is_valid_username(username: &str) -> bool {
    username.chars().count() >= MIN_USERNAME_LENGTH
}

/// Flatten [`ValidationErrors`] into a single human-readable message.
///
/// Fields are ordered by name so the message is stable across runs.
/// Errors without an explicit message fall back to `"<field> is invalid"`.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<(String, _)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| (field.to_string(), errs))
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let messages: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => message.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();

    if messages.is_empty() {
        "Invalid input".to_string()
    } else {
        messages.join("; ")
    }
}
