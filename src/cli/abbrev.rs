// Command abbreviation matching for the podtrack CLI

/// Top-level commands
pub const TOP_LEVEL_COMMANDS: &[&str] = &[
    "login", "logout", "status", "goals", "starred", "progress", "pods", "check", "whoami",
];

/// Find a unique command for the given prefix (case-insensitive)
///
/// Exact matches win over prefix matches. Returns `Err(matches)` when the
/// prefix is ambiguous, `Err(empty)` when nothing matches.
pub fn find_unique_command<'a>(prefix: &str, commands: &'a [&str]) -> Result<&'a str, Vec<&'a str>> {
    let prefix_lower = prefix.to_lowercase();
    if let Some(exact) = commands.iter().find(|cmd| cmd.to_lowercase() == prefix_lower) {
        return Ok(*exact);
    }

    let matches: Vec<&str> = commands
        .iter()
        .filter(|cmd| cmd.to_lowercase().starts_with(&prefix_lower))
        .copied()
        .collect();

    if matches.len() == 1 {
        Ok(matches[0])
    } else {
        Err(matches)
    }
}

/// Expand an abbreviated command in first position
///
/// Flags and unknown words pass through untouched so clap can report them.
pub fn expand_command_abbreviations(mut args: Vec<String>) -> Result<Vec<String>, String> {
    let Some(first) = args.first() else {
        return Ok(args);
    };
    if first.starts_with('-') {
        return Ok(args);
    }

    match find_unique_command(first, TOP_LEVEL_COMMANDS) {
        Ok(full_cmd) => {
            args[0] = full_cmd.to_string();
            Ok(args)
        }
        Err(matches) if matches.is_empty() => Ok(args),
        Err(matches) => Err(format!(
            "Ambiguous command '{}'. Did you mean one of: {}?",
            first,
            matches.join(", ")
        )),
    }
}
