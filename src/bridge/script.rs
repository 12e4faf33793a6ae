//! AppleScript generation for Terminal.app.
//!
//! Every value spliced into a script goes through [`applescript_quote`] or
//! [`shell_escape`] first; window identifiers are digits-only by
//! construction ([`WindowId`]), so the `window id N` slot needs no quoting.

use std::path::Path;

use crate::domain::{TitleStyle, WindowId};

/// Field separator in the list-windows reply (ASCII unit separator).
///
/// Window titles can contain commas and colons but not control characters,
/// so a record line always splits into exactly two fields.
pub const FIELD_SEP: char = '\u{1f}';

/// Quote a string as an AppleScript string literal.
///
/// Backslashes are doubled, double quotes escaped, and newlines turned into
/// `\n`/`\r` escapes (an AppleScript literal cannot span lines).
pub fn applescript_quote(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r");
    format!("\"{escaped}\"")
}

/// Escape a string as a single-quoted shell word.
pub fn shell_escape(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

/// Script that opens a new window at `folder`, titles it, and returns the
/// new window's id as text.
///
/// The folder passes through two quoting layers: it is single-quoted for
/// the shell `cd`, and the whole `cd` command then becomes an AppleScript
/// string literal.
pub fn create_window(name: &str, folder: &str, style: TitleStyle) -> String {
    let cd_command = format!("cd {}", shell_escape(folder));
    let title = match style {
        TitleStyle::Plain => name.to_string(),
        TitleStyle::Bracketed => {
            let segment = Path::new(folder)
                .file_name()
                .map(|segment| segment.to_string_lossy().into_owned())
                .unwrap_or_else(|| folder.to_string());
            format!("[{name}] {segment}")
        }
    };

    format!(
        "tell application \"Terminal\"\n\
         \tactivate\n\
         \tdo script {cd}\n\
         \tset newWindowID to id of front window\n\
         \tset custom title of front window to {title}\n\
         \treturn newWindowID as string\n\
         end tell",
        cd = applescript_quote(&cd_command),
        title = applescript_quote(&title),
    )
}

/// Script that returns one `<id><US><title>` record per line for every open
/// window, falling back to `Terminal <id>` when no custom title is set.
pub fn list_windows() -> String {
    "tell application \"Terminal\"\n\
     \tset sep to character id 31\n\
     \tset out to \"\"\n\
     \trepeat with w in windows\n\
     \t\tset windowID to id of w as string\n\
     \t\ttry\n\
     \t\t\tset windowTitle to custom title of w\n\
     \t\ton error\n\
     \t\t\tset windowTitle to \"Terminal \" & windowID\n\
     \t\tend try\n\
     \t\tif out is \"\" then\n\
     \t\t\tset out to windowID & sep & windowTitle\n\
     \t\telse\n\
     \t\t\tset out to out & linefeed & windowID & sep & windowTitle\n\
     \t\tend if\n\
     \tend repeat\n\
     \treturn out\n\
     end tell"
        .to_string()
}

pub fn focus_window(id: &WindowId) -> String {
    format!(
        "tell application \"Terminal\"\n\
         \tactivate\n\
         \tset frontmost of window id {id} to true\n\
         end tell",
        id = id.as_str(),
    )
}

pub fn rename_window(id: &WindowId, title: &str) -> String {
    format!(
        "tell application \"Terminal\"\n\
         \tset custom title of window id {id} to {title}\n\
         end tell",
        id = id.as_str(),
        title = applescript_quote(title),
    )
}

pub fn close_window(id: &WindowId) -> String {
    format!(
        "tell application \"Terminal\"\n\
         \tclose window id {id}\n\
         end tell",
        id = id.as_str(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_escapes_backslashes_and_quotes() {
        assert_eq!(applescript_quote("plain"), "\"plain\"");
        assert_eq!(applescript_quote("a\"b"), "\"a\\\"b\"");
        assert_eq!(applescript_quote("a\\b"), "\"a\\\\b\"");
        assert_eq!(applescript_quote("a\nb"), "\"a\\nb\"");
    }

    #[test]
    fn shell_escape_handles_single_quotes() {
        assert_eq!(shell_escape("hello"), "'hello'");
        assert_eq!(shell_escape("it's"), "'it'\\''s'");
    }

    #[test]
    fn create_script_quotes_the_folder_for_the_shell() {
        let script = create_window("Docs", "/Users/x/My Documents", TitleStyle::Plain);
        assert!(script.contains("do script \"cd '/Users/x/My Documents'\""));
        assert!(script.contains("set custom title of front window to \"Docs\""));
        assert!(script.contains("return newWindowID as string"));
    }

    #[test]
    fn create_script_neutralizes_quote_injection() {
        // A name trying to break out of the title literal stays inside it
        let script = create_window("x\" & quit & \"", "/tmp", TitleStyle::Plain);
        assert!(script.contains("\"x\\\" & quit & \\\"\""));
        assert!(!script.contains("to \"x\" & quit"));
    }

    #[test]
    fn bracketed_title_appends_last_folder_segment() {
        let script = create_window("API", "/Users/x/src/backend", TitleStyle::Bracketed);
        assert!(script.contains("set custom title of front window to \"[API] backend\""));
    }

    #[test]
    fn targeted_scripts_splice_bare_numeric_ids() {
        let id = WindowId::new("4821").unwrap();
        assert!(focus_window(&id).contains("set frontmost of window id 4821 to true"));
        assert!(close_window(&id).contains("close window id 4821"));
        assert!(rename_window(&id, "New").contains("set custom title of window id 4821 to \"New\""));
    }

    #[test]
    fn list_script_uses_unit_separator_and_fallback_title() {
        let script = list_windows();
        assert!(script.contains("character id 31"));
        assert!(script.contains("\"Terminal \" & windowID"));
    }
}
