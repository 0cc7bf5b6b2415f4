//! Locating external tools on PATH

use std::path::PathBuf;

use which::which;

use crate::error::hints;

/// Resolve a program to an executable path
///
/// Falls back to the bare name when the lookup fails so the spawn error
/// reports what was actually attempted. On Windows this also finds wrapper
/// scripts such as `npm.cmd` that a plain spawn would miss.
pub fn resolve_program(program: &str) -> PathBuf {
    which(program).unwrap_or_else(|_| PathBuf::from(program))
}

/// Check if a command exists in PATH
pub fn command_exists(program: &str) -> bool {
    which(program).is_ok()
}

/// Get installation hint for a tool
pub fn get_tool_hint(program: &str) -> &'static str {
    let name = program
        .rsplit(&['/', '\\'][..])
        .next()
        .unwrap_or(program)
        .trim_end_matches(".exe")
        .trim_end_matches(".cmd");

    match name {
        "npm" => hints::npm(),
        "dotnet" => hints::dotnet(),
        _ => "Install this tool and ensure it's in your PATH",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_program_falls_back_to_name() {
        let resolved = resolve_program("definitely-not-a-real-program-9f3a");
        assert_eq!(resolved, PathBuf::from("definitely-not-a-real-program-9f3a"));
        assert!(!command_exists("definitely-not-a-real-program-9f3a"));
    }

    #[test]
    fn test_tool_hints() {
        assert!(get_tool_hint("npm").contains("nodejs.org"));
        assert!(get_tool_hint("/usr/bin/dotnet").contains("dotnet"));
        assert!(get_tool_hint("C:\\tools\\npm.cmd").contains("nodejs.org"));
        assert!(get_tool_hint("yarn").contains("PATH"));
    }
}
