//! Output clean-up for interactive sessions and build tools

/// Prompt printed by GHCi before every evaluated line
pub const GHCI_PROMPT: &str = "ghci>";
/// Line GHCi prints when its input ends
pub const GHCI_FAREWELL: &str = "Leaving GHCi.\n";

/// Reduce a piped GHCi session to what the program itself printed: prompts,
/// the banner line and the farewell line are removed.
pub fn strip_ghci_session(raw: &str) -> String {
    let without_prompts = raw.replace(GHCI_PROMPT, "");
    let without_banner = match without_prompts.split_once('\n') {
        Some((_banner, rest)) => rest,
        None => without_prompts.as_str(),
    };
    without_banner.replace(GHCI_FAREWELL, "")
}

/// Whether a build-tool output line marks the end of the build log
fn is_build_marker(line: &str) -> bool {
    line.contains("Linking") || line == "Up to date"
}

/// Keep only the lines after the build log of `cabal run` / `stack run`.
/// Output without a marker line is returned untouched.
pub fn strip_build_preamble(raw: &str) -> String {
    let lines: Vec<&str> = raw.lines().collect();
    match lines.iter().position(|line| is_build_marker(line)) {
        Some(index) => lines[index + 1..].join("\n"),
        None => raw.to_string(),
    }
}
