// DevFinder - app/command.rs
//
// Interactive command parsing. Each input line is one user event that maps
// onto exactly one state controller operation (or a read-only query).

use crate::app::state::AppState;
use crate::core::model::MatchMode;
use crate::util::error::CommandError;

/// A parsed interactive command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the search text (empty clears it).
    Search(String),

    /// Select or deselect a tag.
    SetTag { tag: String, active: bool },

    /// Flip a tag.
    ToggleTag(String),

    /// Switch match mode.
    Mode(MatchMode),

    /// Re-print the current result.
    Show,

    /// List catalog tags and their state.
    Tags,

    Help,
    Quit,
}

/// Help text listing all commands.
pub const HELP_TEXT: &str = "\
Commands:
  search <text>      filter by name (accents, case and spaces ignored)
  search             clear the name filter
  tag <id> on|off    select or deselect a language
  toggle <id>        flip a language
  mode any|all       any = at least one language, all = exactly the selected set
  show               print the current result
  tags               list languages, their logos and whether they are selected
  help               show this text
  quit               exit";

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "search" | "s" => Command::Search(rest.to_string()),
        "tag" | "t" => {
            let mut args = rest.split_whitespace();
            let tag = args.next().ok_or(CommandError::MissingArgument {
                command: "tag",
                argument: "<id>",
            })?;
            let state = args.next().ok_or(CommandError::MissingArgument {
                command: "tag",
                argument: "on|off",
            })?;
            let active = match state.to_lowercase().as_str() {
                "on" | "true" | "1" => true,
                "off" | "false" | "0" => false,
                _ => {
                    return Err(CommandError::InvalidArgument {
                        command: "tag",
                        value: state.to_string(),
                        expected: "on or off",
                    })
                }
            };
            if let Some(extra) = args.next() {
                return Err(CommandError::InvalidArgument {
                    command: "tag",
                    value: extra.to_string(),
                    expected: "nothing after on|off",
                });
            }
            Command::SetTag {
                tag: tag.to_string(),
                active,
            }
        }
        "toggle" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "toggle",
                    argument: "<id>",
                });
            }
            let mut args = rest.split_whitespace();
            let tag = args.next().unwrap_or(rest);
            if let Some(extra) = args.next() {
                return Err(CommandError::InvalidArgument {
                    command: "toggle",
                    value: extra.to_string(),
                    expected: "a single tag id",
                });
            }
            Command::ToggleTag(tag.to_string())
        }
        "mode" | "m" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "mode",
                    argument: "any|all",
                });
            }
            let mode = rest
                .parse::<MatchMode>()
                .map_err(|_| CommandError::InvalidArgument {
                    command: "mode",
                    value: rest.to_string(),
                    expected: "any or all",
                })?;
            Command::Mode(mode)
        }
        "show" | "ls" => Command::Show,
        "tags" => Command::Tags,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => {
            return Err(CommandError::Unknown {
                command: other.to_string(),
            })
        }
    };

    Ok(Some(command))
}

/// Run a filter-mutating command against the controller.
///
/// Read-only commands (show, tags, help, quit) are left to the caller and
/// return false.
pub fn apply_command(state: &mut AppState, command: &Command) -> bool {
    match command {
        Command::Search(text) => state.set_search_term(text),
        Command::SetTag { tag, active } => state.set_active_tag(tag, *active),
        Command::ToggleTag(tag) => {
            state.toggle_tag(tag);
        }
        Command::Mode(mode) => state.set_match_mode(*mode),
        Command::Show | Command::Tags | Command::Help | Command::Quit => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::load_builtin_catalog;
    use crate::core::model::FilterParameters;

    #[test]
    fn test_blank_line() {
        assert_eq!(parse_command("   ").unwrap(), None);
    }

    #[test]
    fn test_search_keeps_inner_text() {
        assert_eq!(
            parse_command("search  Ana Índio ").unwrap(),
            Some(Command::Search("Ana Índio".to_string()))
        );
        assert_eq!(
            parse_command("search").unwrap(),
            Some(Command::Search(String::new()))
        );
    }

    #[test]
    fn test_tag_on_off() {
        assert_eq!(
            parse_command("tag Java off").unwrap(),
            Some(Command::SetTag {
                tag: "Java".to_string(),
                active: false
            })
        );
        assert!(matches!(
            parse_command("tag java maybe"),
            Err(CommandError::InvalidArgument { command: "tag", .. })
        ));
        assert!(matches!(
            parse_command("tag java"),
            Err(CommandError::MissingArgument { argument: "on|off", .. })
        ));
    }

    #[test]
    fn test_trailing_arguments_rejected() {
        assert_eq!(
            parse_command("tag java on extra"),
            Err(CommandError::InvalidArgument {
                command: "tag",
                value: "extra".to_string(),
                expected: "nothing after on|off",
            })
        );
        assert!(matches!(
            parse_command("toggle java python"),
            Err(CommandError::InvalidArgument { command: "toggle", .. })
        ));
        assert_eq!(
            parse_command("toggle  java ").unwrap(),
            Some(Command::ToggleTag("java".to_string()))
        );
    }

    #[test]
    fn test_mode() {
        assert_eq!(
            parse_command("MODE all").unwrap(),
            Some(Command::Mode(MatchMode::All))
        );
        assert!(parse_command("mode some").is_err());
        assert!(parse_command("mode").is_err());
    }

    #[test]
    fn test_unknown() {
        assert_eq!(
            parse_command("frobnicate now"),
            Err(CommandError::Unknown {
                command: "frobnicate".to_string()
            })
        );
    }

    #[test]
    fn test_apply_command_drives_state() {
        let mut state = AppState::new(load_builtin_catalog(), FilterParameters::default());
        state.on_dataset_loaded(Vec::new());

        assert!(apply_command(&mut state, &Command::ToggleTag("go".to_string())));
        assert!(state.is_tag_active("go"));
        assert!(apply_command(&mut state, &Command::Mode(MatchMode::All)));
        assert_eq!(state.filter().match_mode, MatchMode::All);
        assert!(!apply_command(&mut state, &Command::Show));
        assert!(!apply_command(&mut state, &Command::Quit));
    }
}
