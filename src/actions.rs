//! GitHub Actions workflow commands.
//!
//! When the generator runs as an action step, a fatal error is also emitted
//! as an `::error::` workflow command so it shows up as an annotation on the
//! run summary.

/// Whether the process runs inside a GitHub Actions job
pub fn running_in_github_actions() -> bool {
    std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true")
}

/// `::error::<message>` with the message escaped for a single line
pub fn error_annotation(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
