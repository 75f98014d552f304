use std::env;
use std::fs;
use std::process::Command;

use anyhow::{Context, Result, bail};

// Tried in order after $EDITOR, $VISUAL and the configured editor
const FALLBACK_EDITORS: &[&str] = &["vim", "vi", "nano"];

/// Open `initial` in an external editor and return the saved text
///
/// The editor is chosen from `$EDITOR`, `$VISUAL`, the `preferred` editor from
/// config, then common fallbacks. Editor commands may carry arguments
/// (`code --wait`).
pub fn open_editor(initial: &str, preferred: Option<&str>) -> Result<String> {
    let editor = detect_editor(preferred).context("No suitable editor found (set $EDITOR)")?;

    let temp_path = env::temp_dir().join(format!("contextkeeper-{}.md", crate::utils::generate_id()));
    fs::write(&temp_path, initial)
        .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

    let result = run_editor(&editor, &temp_path);
    let content = result.and_then(|()| {
        fs::read_to_string(&temp_path)
            .with_context(|| format!("Failed to read editor result: {}", temp_path.display()))
    });
    let _ = fs::remove_file(&temp_path);

    content
}

fn run_editor(editor: &str, path: &std::path::Path) -> Result<()> {
    let mut parts = editor.split_whitespace();
    let program = parts.next().context("Editor command is empty")?;

    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .with_context(|| format!("Failed to launch editor: {}", editor))?;

    if !status.success() {
        bail!("Editor exited with {}", status);
    }
    Ok(())
}

fn detect_editor(preferred: Option<&str>) -> Option<String> {
    detect_editor_internal(
        env::var("EDITOR").ok().as_deref(),
        env::var("VISUAL").ok().as_deref(),
        preferred,
    )
}

pub(crate) fn detect_editor_internal(
    editor_env: Option<&str>,
    visual_env: Option<&str>,
    preferred: Option<&str>,
) -> Option<String> {
    [editor_env, visual_env, preferred]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|e| !e.is_empty())
        .map(str::to_string)
        .or_else(|| FALLBACK_EDITORS.iter().find(|e| is_on_path(e)).map(|e| e.to_string()))
}

fn is_on_path(program: &str) -> bool {
    env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).any(|dir| dir.join(program).is_file()))
        .unwrap_or(false)
}
