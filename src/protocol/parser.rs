//! Viewer command parser.
//!
//! Parses lines typed at the viewer prompt into structured `Command`
//! variants that the main loop dispatches on.

use log::warn;

/// A parsed viewer command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the manuals and their variations.
    Manuals,

    /// Load a variation: `select <manual> [variation]`. Both may be given by
    /// name or 1-based number; the variation defaults to the first one.
    Select {
        manual: String,
        variation: Option<String>,
    },

    /// Step one move forward.
    Next,

    /// Step one move back.
    Prev,

    /// Jump to the position after `index` moves.
    Jump { index: i64 },

    /// Stop autoplay and return to the initial layout.
    Reset,

    /// Start autoplay, or pause it if running.
    Play,

    /// Stop autoplay.
    Pause,

    /// Print the current board.
    Board,

    /// Print the active move list.
    Moves,

    /// Print the position string for the current board.
    Fen,

    /// Write a manual as JSON: `export <manual> [dir]`.
    Export { manual: String, dir: Option<String> },

    /// Load a manual from a JSON file: `import <path>`.
    Import { path: String },

    /// Query the analysis service with the current position.
    Analyze,

    /// Exit the viewer.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines, unknown commands and malformed
/// arguments; the latter two are logged.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();

    match tokens[0] {
        "manuals" | "list" => Some(Command::Manuals),
        "next" | "n" => Some(Command::Next),
        "prev" | "p" => Some(Command::Prev),
        "reset" => Some(Command::Reset),
        "play" => Some(Command::Play),
        "pause" => Some(Command::Pause),
        "board" => Some(Command::Board),
        "moves" => Some(Command::Moves),
        "fen" => Some(Command::Fen),
        "analyze" => Some(Command::Analyze),
        "quit" | "exit" => Some(Command::Quit),

        "select" => parse_select(&tokens),
        "jump" => parse_jump(&tokens),
        "export" => parse_export(&tokens),
        "import" => parse_import(trimmed),

        other => {
            warn!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `select <manual> [variation...]`.
fn parse_select(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        warn!("malformed select: expected 'select <manual> [variation]'");
        return None;
    }
    let variation = if tokens.len() > 2 {
        Some(tokens[2..].join(" "))
    } else {
        None
    };
    Some(Command::Select {
        manual: tokens[1].to_string(),
        variation,
    })
}

/// Parses `jump <index>`.
fn parse_jump(tokens: &[&str]) -> Option<Command> {
    let Some(arg) = tokens.get(1) else {
        warn!("malformed jump: expected 'jump <index>'");
        return None;
    };
    match arg.parse::<i64>() {
        Ok(index) => Some(Command::Jump { index }),
        Err(_) => {
            warn!("invalid jump index: '{}'", arg);
            None
        }
    }
}

/// Parses `export <manual> [dir]`.
fn parse_export(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        warn!("malformed export: expected 'export <manual> [dir]'");
        return None;
    }
    Some(Command::Export {
        manual: tokens[1].to_string(),
        dir: tokens.get(2).map(|d| d.to_string()),
    })
}

/// Parses `import <path>`. The path is the rest of the line so it may
/// contain spaces.
fn parse_import(trimmed: &str) -> Option<Command> {
    let path = trimmed["import".len()..].trim();
    if path.is_empty() {
        warn!("malformed import: expected 'import <path>'");
        return None;
    }
    Some(Command::Import {
        path: path.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_commands() {
        assert_eq!(parse_command("next"), Some(Command::Next));
        assert_eq!(parse_command("  prev  "), Some(Command::Prev));
        assert_eq!(parse_command("play"), Some(Command::Play));
        assert_eq!(parse_command("pause"), Some(Command::Pause));
        assert_eq!(parse_command("reset"), Some(Command::Reset));
        assert_eq!(parse_command("fen"), Some(Command::Fen));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
        assert_eq!(parse_command("manuals"), Some(Command::Manuals));
    }

    #[test]
    fn parse_empty_and_unknown() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("   "), None);
        assert_eq!(parse_command("castle"), None);
    }

    #[test]
    fn parse_select_with_and_without_variation() {
        assert_eq!(
            parse_command("select 橘中秘"),
            Some(Command::Select {
                manual: "橘中秘".to_string(),
                variation: None,
            })
        );
        assert_eq!(
            parse_command("select 2 顺炮局 (当头炮对顺手炮)"),
            Some(Command::Select {
                manual: "2".to_string(),
                variation: Some("顺炮局 (当头炮对顺手炮)".to_string()),
            })
        );
        assert_eq!(parse_command("select"), None);
    }

    #[test]
    fn parse_jump_index() {
        assert_eq!(parse_command("jump 4"), Some(Command::Jump { index: 4 }));
        assert_eq!(parse_command("jump -1"), Some(Command::Jump { index: -1 }));
        assert_eq!(parse_command("jump"), None);
        assert_eq!(parse_command("jump four"), None);
    }

    #[test]
    fn parse_export_and_import() {
        assert_eq!(
            parse_command("export 1 /tmp/out"),
            Some(Command::Export {
                manual: "1".to_string(),
                dir: Some("/tmp/out".to_string()),
            })
        );
        assert_eq!(
            parse_command("import /tmp/my manual.json"),
            Some(Command::Import {
                path: "/tmp/my manual.json".to_string(),
            })
        );
        assert_eq!(parse_command("import"), None);
        assert_eq!(parse_command("export"), None);
    }
}
