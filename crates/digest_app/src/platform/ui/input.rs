/// A line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Submit(String),
    /// 1-based history position, as displayed.
    Open(usize),
    Copy(usize),
    Show,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let unknown = || Command::Unknown(line.to_string());
    match (word.to_ascii_lowercase().as_str(), rest) {
        ("submit", url) => Command::Submit(url.to_string()),
        ("open", n) => parse_position(n).map_or_else(unknown, Command::Open),
        ("copy", n) => parse_position(n).map_or_else(unknown, Command::Copy),
        ("show" | "history", "") => Command::Show,
        ("help" | "?", "") => Command::Help,
        ("quit" | "exit" | "q", "") => Command::Quit,
        // Anything else is handed to URL validation as-is.
        _ => Command::Submit(line.to_string()),
    }
}

fn parse_position(text: &str) -> Option<usize> {
    text.parse::<usize>().ok().filter(|n| *n > 0)
}
