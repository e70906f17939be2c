use crate::ConfigError;
use std::path::Path;

/// Parses a newline-delimited domain list
///
/// Lines are trimmed; blank lines and `#` comments are skipped.
pub fn parse_targets(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Reads a domain list file
pub fn load_targets(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_targets(&content))
}

/// Resolves the seed domains from the command line
///
/// A single `domain` takes precedence over `list`. Having neither, or a list
/// with no usable lines, is an error.
pub fn collect_targets(
    domain: Option<&str>,
    list: Option<&Path>,
) -> Result<Vec<String>, ConfigError> {
    let targets = match (domain.map(str::trim), list) {
        (Some(domain), _) if !domain.is_empty() => vec![domain.to_string()],
        (_, Some(path)) => load_targets(path)?,
        _ => Vec::new(),
    };

    if targets.is_empty() {
        return Err(ConfigError::NoTargets);
    }

    Ok(targets)
}
