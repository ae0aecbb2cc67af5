use crate::command::Command;
use crate::error::ParseError;
use crate::model::Timing;

const DEADLINE_DELIMITER: &str = "/by";
const EVENT_DELIMITER: &str = "/at";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Exit,
    List,
    Find,
    Done,
    Delete,
    Todo,
    Deadline,
    Event,
}

impl Verb {
    pub const ALL: [Verb; 8] = [
        Verb::Exit,
        Verb::List,
        Verb::Find,
        Verb::Done,
        Verb::Delete,
        Verb::Todo,
        Verb::Deadline,
        Verb::Event,
    ];

    /// Case-sensitive lookup of the leading token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "EXIT" | "BYE" => Some(Self::Exit),
            "LIST" => Some(Self::List),
            "FIND" => Some(Self::Find),
            "DONE" => Some(Self::Done),
            "DELETE" => Some(Self::Delete),
            "TODO" => Some(Self::Todo),
            "DEADLINE" => Some(Self::Deadline),
            "EVENT" => Some(Self::Event),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Exit => "EXIT",
            Self::List => "LIST",
            Self::Find => "FIND",
            Self::Done => "DONE",
            Self::Delete => "DELETE",
            Self::Todo => "TODO",
            Self::Deadline => "DEADLINE",
            Self::Event => "EVENT",
        }
    }

    pub fn usage(self) -> &'static str {
        match self {
            Self::Exit => "EXIT",
            Self::List => "LIST",
            Self::Find => "FIND <phrase>",
            Self::Done => "DONE <n>",
            Self::Delete => "DELETE <n>",
            Self::Todo => "TODO <description>",
            Self::Deadline => "DEADLINE <description> /by <timing>",
            Self::Event => "EVENT <description> /at <timing>",
        }
    }
}

/// Turns one raw input line into a [`Command`].
///
/// Tokens are runs of non-whitespace; the first one selects the verb and the
/// rest are validated per verb. Pure: nothing outside the return value changes.
pub fn parse(raw_line: &str) -> Result<Command, ParseError> {
    let tokens: Vec<&str> = raw_line.split_whitespace().collect();
    let (first, args) = tokens.split_first().ok_or(ParseError::UnknownCommand)?;
    let verb = Verb::from_token(first).ok_or(ParseError::UnknownCommand)?;

    match verb {
        Verb::Exit => {
            expect_no_arguments(first, args)?;
            Ok(Command::Exit)
        }
        Verb::List => {
            expect_no_arguments(first, args)?;
            Ok(Command::ListAll)
        }
        Verb::Find => Ok(Command::Find {
            phrase: non_empty_text(args)?,
        }),
        Verb::Done => Ok(Command::MarkDone {
            index: parse_index(first, args)?,
        }),
        Verb::Delete => Ok(Command::Delete {
            index: parse_index(first, args)?,
        }),
        Verb::Todo => Ok(Command::AddTodo {
            description: non_empty_text(args)?,
        }),
        Verb::Deadline => {
            let (description, by) = split_timed(verb, args, DEADLINE_DELIMITER)?;
            Ok(Command::AddDeadline { description, by })
        }
        Verb::Event => {
            let (description, at) = split_timed(verb, args, EVENT_DELIMITER)?;
            Ok(Command::AddEvent { description, at })
        }
    }
}

/// `typed` is the verb as the user wrote it, so `BYE now` names `BYE`.
fn expect_no_arguments(typed: &str, args: &[&str]) -> Result<(), ParseError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(ParseError::ExtraneousArguments {
            verb: typed.to_string(),
        })
    }
}

fn parse_index(typed: &str, args: &[&str]) -> Result<i64, ParseError> {
    match args {
        [] => Err(ParseError::NotANumber),
        [token] => token.parse().map_err(|_| ParseError::NotANumber),
        _ => Err(ParseError::ExtraneousArguments {
            verb: typed.to_string(),
        }),
    }
}

fn non_empty_text(args: &[&str]) -> Result<String, ParseError> {
    if args.is_empty() {
        return Err(ParseError::EmptyDescription);
    }
    Ok(args.join(" "))
}

// Only the first delimiter splits; any later copy belongs to the timing.
fn split_timed(
    verb: Verb,
    args: &[&str],
    delimiter: &'static str,
) -> Result<(String, Timing), ParseError> {
    let position = args
        .iter()
        .position(|token| *token == delimiter)
        .ok_or(ParseError::MissingDelimiter {
            delimiter,
            usage: verb.usage(),
        })?;

    let description = non_empty_text(&args[..position])?;
    let timing_tokens = &args[position + 1..];
    if timing_tokens.is_empty() {
        return Err(ParseError::BadTiming);
    }
    let timing = Timing::parse(&timing_tokens.join(" "))?;

    Ok((description, timing))
}
