//! Helpers for the GitHub Actions runtime surface

/// Reads an action input the way the runner delivers it: through an
/// `INPUT_` prefixed environment variable, name uppercased with spaces
/// replaced by underscores. Values are trimmed; an empty value counts
/// as absent.
pub fn action_input(name: &str) -> Option<String> {
    let key = format!("INPUT_{}", name.replace(' ', "_").to_uppercase());
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Emits a workflow `error` command so the failure shows up in the run
/// annotations as well as the step log.
pub fn issue_error(message: &str) {
    println!("::error::{}", escape_data(message));
}

/// Workflow command payloads require '%', CR and LF to be escaped.
fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
