use crate::error::{Error, Result};

const HOST_MARKER: &str = "github.com/";

/// Turns a profile URL or bare handle into a handle.
///
/// Inputs containing `github.com/` yield their last path segment; anything
/// else is used as-is after trimming. Character sets are not checked, a bad
/// handle surfaces later as a failed profile fetch.
pub fn extract_handle(input: &str) -> Result<String> {
    let trimmed = input.trim();

    let handle = if trimmed.contains(HOST_MARKER) {
        trimmed
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
    } else {
        trimmed
    };

    if handle.is_empty() {
        return Err(Error::InvalidInput(format!(
            "no GitHub handle found in {:?}",
            input
        )));
    }

    Ok(handle.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_handle_is_trimmed() {
        assert_eq!(extract_handle("  octocat \n").unwrap(), "octocat");
    }

    #[test]
    fn profile_url_yields_last_segment() {
        assert_eq!(extract_handle("https://github.com/octocat").unwrap(), "octocat");
        assert_eq!(extract_handle("https://github.com/octocat/").unwrap(), "octocat");
        assert_eq!(extract_handle("github.com/rust-lang").unwrap(), "rust-lang");
    }

    #[test]
    fn nested_path_keeps_final_segment() {
        assert_eq!(
            extract_handle("https://github.com/octocat/hello-world").unwrap(),
            "hello-world"
        );
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(extract_handle("   "), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn bare_host_url_passes_through_unvalidated() {
        assert_eq!(extract_handle("https://github.com/").unwrap(), "github.com");
    }
}
