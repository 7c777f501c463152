use crate::error::Error;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened, why, and how to fix it.
/// Designed to be readable by both humans and LLM agents.
pub fn render_error(e: &Error) -> String {
    match e {
        Error::CorpusNotFound { path } => format!("\
# Error: Corpus Not Found

`{}` is not a directory.

## Fix

Pass the corpus root as the first argument:

    anchorstat analyze docs/
", path.display()),

        Error::DuplicateAnchor { first, id, second } => format!("\
# Error: Duplicate Anchor

The identifier `{id}` is declared in both `{}` and `{}`.

Anchor identifiers must be unique across the whole corpus; the analysis
cannot classify references against an ambiguous anchor map.

## Fix

Rename one of the two `{{#{id}}}` declarations and update its links.
", first.display(), second.display()),

        Error::Io(e) => format!("\
# Error: I/O

{e}
"),

        Error::TomlDe(e) => format!("\
# Error: Invalid TOML

{e}

## Fix

Check `.anchorstat.toml` for syntax errors.
"),
    }
}
