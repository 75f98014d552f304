use anyhow::{Result, bail};

/// Longest tag accepted by [`validate_tags`]
pub const MAX_TAG_LENGTH: usize = 50;

/// Split a comma- and/or whitespace-separated tag string
///
/// Empty entries are dropped and duplicates removed, keeping the first
/// occurrence's position.
///
/// # Examples
///
/// ```
/// use contextkeeper::utils::parse_tags;
///
/// assert_eq!(parse_tags("bug, urgent bug,,ui"), vec!["bug", "urgent", "ui"]);
/// assert!(parse_tags("  ").is_empty());
/// ```
pub fn parse_tags(input: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();

    for tag in input.split(|c: char| c == ',' || c.is_whitespace()) {
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }

    tags
}

/// Check every tag is non-empty, at most 50 characters, and only uses
/// ASCII letters, digits, `_` and `-`
pub fn validate_tags(tags: &[String]) -> Result<()> {
    for tag in tags {
        if tag.is_empty() {
            bail!("tag cannot be empty");
        }
        if tag.chars().count() > MAX_TAG_LENGTH {
            bail!("tag too long: '{}' (maximum {} characters)", tag, MAX_TAG_LENGTH);
        }
        if !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            bail!(
                "invalid tag format: '{}' (only letters, digits, underscores, and hyphens)",
                tag
            );
        }
    }

    Ok(())
}
