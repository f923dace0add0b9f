//! External editor integration for `config --edit`.

use anyhow::{Result, anyhow};
use std::env;
use std::path::Path;
use std::process::Command;

/// Opens a file in the user's preferred editor.
///
/// Editor priority:
/// 1) `$VISUAL`
/// 2) `$EDITOR`
/// 3) `nvim`
/// 4) `vim`
/// 5) `vi`
pub fn edit_file_with_system_editor(path: &Path) -> Result<()> {
    for command in editor_candidates() {
        let mut parts = command.split_whitespace();
        let Some(program) = parts.next() else {
            continue;
        };

        match Command::new(program).args(parts).arg(path).status() {
            Ok(status) if status.success() => return Ok(()),
            Ok(status) => {
                return Err(anyhow!(
                    "editor `{command}` exited with status {}",
                    status
                        .code()
                        .map(|code| code.to_string())
                        .unwrap_or_else(|| "unknown".to_owned())
                ));
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
            Err(err) => return Err(anyhow!("failed to launch editor `{command}`: {err}")),
        }
    }

    Err(anyhow!(
        "no editor found (tried $VISUAL, $EDITOR, nvim, vim, vi)"
    ))
}

fn editor_candidates() -> Vec<String> {
    let mut candidates: Vec<String> = ["VISUAL", "EDITOR"]
        .into_iter()
        .filter_map(env::var_os)
        .map(|value| value.to_string_lossy().trim().to_owned())
        .filter(|value| !value.is_empty())
        .collect();
    candidates.extend(["nvim".to_owned(), "vim".to_owned(), "vi".to_owned()]);
    candidates
}
