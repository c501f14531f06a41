//! Line commands for the interactive front-end.

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit the search form with this input (may be blank).
    Search(String),
    /// Click the n-th history entry (1-based, as displayed).
    Open(usize),
    /// Click the delete control of the n-th history entry.
    Delete(usize),
    History,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  search <city>   look up weather (a bare city name works too)
  open <n>        show weather for history entry n
  delete <n>      remove history entry n
  history         show search history
  help            show this help
  quit            exit
";

/// Parse a line. Anything that isn't a known command is a search.
///
/// # Errors
/// Returns a message if `open`/`delete` lack a valid entry number.
pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "search" => Ok(Command::Search(rest.to_string())),
        "open" => parse_index(rest).map(Command::Open),
        "delete" | "del" | "rm" => parse_index(rest).map(Command::Delete),
        "history" if rest.is_empty() => Ok(Command::History),
        "help" | "?" if rest.is_empty() => Ok(Command::Help),
        "quit" | "exit" | "q" if rest.is_empty() => Ok(Command::Quit),
        _ => Ok(Command::Search(line.to_string())),
    }
}

fn parse_index(arg: &str) -> Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(format!("Expected a history entry number, got {:?}", arg)),
    }
}
