// src/core/path_resolver.rs

//! String processing for the free-form command field of a menu item.
//!
//! Menu files were written for Windows, so `\` is the only directory separator
//! recognized here and `C:` style drive prefixes count as a directory.

use thiserror::Error;

/// A command line that cannot be split.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ResolveError {
    /// The option split point does not fall inside the trimmed command line. This
    /// happens when the path token was cut at a `/`, or when trailing whitespace
    /// pushed the split point past the end of the trimmed text.
    #[error("Could not locate the options in command line '{0}'.")]
    OptionsOutOfRange(String),
}

/// Where the options start, measured in the untrimmed command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cut {
    /// The whole command line is the path token.
    Whole,
    At(usize),
    /// The token was truncated at a `/` and the split point was lost with it.
    Lost,
}

/// Splits a command line into its leading path token and the trailing options.
///
/// # Logic:
/// - `"path with spaces" opts` and `'path' opts` take the quoted text as the token.
/// - Otherwise the token ends at the first space.
/// - A token containing `/` is cut before the first `/`. The option split point is
///   then unrecoverable and the call fails with [`ResolveError::OptionsOutOfRange`].
/// - The options are the trimmed command line from the split point, with leading
///   whitespace removed. No delimiter means no options.
pub fn split_command_and_options(command_line: &str) -> Result<(String, String), ResolveError> {
    let (token, cut) = scan(command_line);
    let options = options_from_cut(command_line, cut)?;
    Ok((token, options))
}

/// The path token alone. Never fails, even when the options cannot be located.
pub fn path_token(command_line: &str) -> String {
    scan(command_line).0
}

fn scan(command_line: &str) -> (String, Cut) {
    let (mut token, mut cut) = if let Some((token, end)) = quoted(command_line, '"') {
        (token, Cut::At(end))
    } else if let Some((token, end)) = quoted(command_line, '\'') {
        (token, Cut::At(end))
    } else if let Some((head, _)) = command_line.split_once(' ') {
        (head.to_string(), Cut::At(head.len() + 1))
    } else {
        (command_line.to_string(), Cut::Whole)
    };

    let trimmed = token.trim();
    if let Some((head, _)) = trimmed.split_once('/') {
        token = head.to_string();
        // The split point is looked up again in the truncated token, which has no
        // `/` left, so it is lost.
        cut = Cut::Lost;
    }

    (token, cut)
}

/// Returns the text between a leading `quote` and the next one, plus the byte
/// offset just past the closing quote.
fn quoted(command_line: &str, quote: char) -> Option<(String, usize)> {
    let rest = command_line.strip_prefix(quote)?;
    let (inner, _) = rest.split_once(quote)?;
    let width = quote.len_utf8();
    Some((inner.to_string(), width + inner.len() + width))
}

fn options_from_cut(command_line: &str, cut: Cut) -> Result<String, ResolveError> {
    match cut {
        Cut::Whole | Cut::At(0) => Ok(String::new()),
        Cut::At(position) => command_line
            .trim()
            .get(position..)
            .map(|options| options.trim_start().to_string())
            .ok_or_else(|| ResolveError::OptionsOutOfRange(command_line.to_string())),
        Cut::Lost => Err(ResolveError::OptionsOutOfRange(command_line.to_string())),
    }
}

/// Splits a full path into its directory and file name.
///
/// The trimmed path is scanned from the end; the first character (index 0) is never
/// a split point. A `\` splits around itself; a `:` (drive root) stays with the
/// directory. Without either, the whole path is the file name.
pub fn split_path_and_file(full_path: &str) -> (String, String) {
    let path = full_path.trim();

    for (index, ch) in path.char_indices().rev() {
        if index == 0 {
            break;
        }
        if ch != '\\' && ch != ':' {
            continue;
        }
        let (directory, rest) = path.split_at(index);
        let file_name = rest.get(ch.len_utf8()..).unwrap_or_default();
        return if ch == ':' {
            (format!("{directory}:"), file_name.to_string())
        } else {
            (directory.to_string(), file_name.to_string())
        };
    }

    (String::new(), path.to_string())
}

/// Wraps `path` in double quotes if it contains a space.
pub fn quote_if_needed(path: &str) -> String {
    if path.contains(' ') {
        format!("\"{}\"", path)
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(command_line: &str) -> (String, String) {
        split_command_and_options(command_line).unwrap()
    }

    // --- `split_command_and_options` Tests ---

    #[test]
    fn test_double_quoted_path_with_options() {
        let (token, options) = split(r#""C:\Program Files\app.exe" -x -y"#);
        assert_eq!(token, r"C:\Program Files\app.exe");
        assert_eq!(options, "-x -y");
    }

    #[test]
    fn test_single_quoted_path() {
        let (token, options) = split(r"'C:\My Tools\run.bat' --fast");
        assert_eq!(token, r"C:\My Tools\run.bat");
        assert_eq!(options, "--fast");
    }

    #[test]
    fn test_unquoted_path_with_argument() {
        assert_eq!(split("app.exe arg1"), ("app.exe".to_string(), "arg1".to_string()));
    }

    #[test]
    fn test_bare_path_has_no_options() {
        assert_eq!(split("app.exe"), ("app.exe".to_string(), String::new()));
    }

    #[test]
    fn test_unterminated_quote_falls_back_to_space_split() {
        let (token, options) = split(r#""C:\app.exe -x"#);
        assert_eq!(token, r#""C:\app.exe"#);
        assert_eq!(options, "-x");
    }

    #[test]
    fn test_quoted_path_without_options() {
        assert_eq!(split(r#""C:\a b\x.exe""#), (r"C:\a b\x.exe".to_string(), String::new()));
    }

    #[test]
    fn test_slash_truncates_token_and_loses_options() {
        assert_eq!(path_token("app.exe/silent now"), "app.exe");
        assert_eq!(
            split_command_and_options("app.exe/silent now"),
            Err(ResolveError::OptionsOutOfRange("app.exe/silent now".to_string()))
        );
    }

    #[test]
    fn test_trailing_space_pushes_split_past_trimmed_end() {
        assert!(split_command_and_options("app.exe ").is_err());
        assert_eq!(path_token("app.exe "), "app.exe");
    }

    #[test]
    fn test_leading_space_yields_empty_token() {
        let (token, options) = split(" app.exe x");
        assert_eq!(token, "");
        assert_eq!(options, "pp.exe x");
    }

    // --- `split_path_and_file` Tests ---

    #[test]
    fn test_split_on_backslash() {
        assert_eq!(
            split_path_and_file(r"C:\tools\app.exe"),
            (r"C:\tools".to_string(), "app.exe".to_string())
        );
    }

    #[test]
    fn test_split_on_drive_colon() {
        assert_eq!(
            split_path_and_file("C:app.exe"),
            ("C:".to_string(), "app.exe".to_string())
        );
    }

    #[test]
    fn test_split_without_directory() {
        assert_eq!(split_path_and_file("app.exe"), (String::new(), "app.exe".to_string()));
    }

    #[test]
    fn test_split_ignores_separator_at_index_zero() {
        assert_eq!(split_path_and_file(r"\app.exe"), (String::new(), r"\app.exe".to_string()));
    }

    #[test]
    fn test_split_drive_root() {
        assert_eq!(
            split_path_and_file(r"C:\app.exe"),
            ("C:".to_string(), "app.exe".to_string())
        );
    }

    #[test]
    fn test_split_trims_input() {
        assert_eq!(
            split_path_and_file("  D:\\x\\y.txt  "),
            ("D:\\x".to_string(), "y.txt".to_string())
        );
    }

    // --- `quote_if_needed` Tests ---

    #[test]
    fn test_quote_if_needed() {
        assert_eq!(quote_if_needed(r"C:\a b\x.exe"), r#""C:\a b\x.exe""#);
        assert_eq!(quote_if_needed(r"C:\ab\x.exe"), r"C:\ab\x.exe");
    }
}
