use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    InvalidInput(String),
    InvalidData(String),
    Io(String),
}

impl AppError {
    pub fn invalid_input<M: Into<String>>(message: M) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_data<M: Into<String>>(message: M) -> Self {
        Self::InvalidData(message.into())
    }

    pub fn io<M: Into<String>>(message: M) -> Self {
        Self::Io(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::InvalidData(_) => "invalid_data",
            Self::Io(_) => "io_error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput(message) => message,
            Self::InvalidData(message) => message,
            Self::Io(message) => message,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code(), self.message())
    }
}

impl std::error::Error for AppError {}

/// Rejection of a raw input line. Never touches the task list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("I'm sorry, but I don't know what that means")]
    UnknownCommand,
    #[error("there shouldn't be anything following '{verb}'")]
    ExtraneousArguments { verb: String },
    #[error("the task number you gave me wasn't a valid number, or you didn't give me one at all")]
    NotANumber,
    #[error("the description of a task cannot be empty")]
    EmptyDescription,
    #[error("missing '{delimiter}' in command, use '{usage}'")]
    MissingDelimiter {
        delimiter: &'static str,
        usage: &'static str,
    },
    #[error("the format of the timing is invalid, enter it as D/M/YYYY HHMM")]
    BadTiming,
}

/// A well-formed command that cannot be applied to the current list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("task {index} isn't within your current list of {len} tasks")]
    IndexOutOfRange { index: i64, len: usize },
    #[error("task {index} was already marked as done")]
    AlreadyDone { index: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("malformed task line: {0}")]
    Malformed(String),
}

impl DecodeError {
    pub fn malformed<M: Into<String>>(reason: M) -> Self {
        Self::Malformed(reason.into())
    }
}

impl From<ParseError> for AppError {
    fn from(err: ParseError) -> Self {
        AppError::invalid_input(err.to_string())
    }
}

impl From<DispatchError> for AppError {
    fn from(err: DispatchError) -> Self {
        AppError::invalid_input(err.to_string())
    }
}

impl From<DecodeError> for AppError {
    fn from(err: DecodeError) -> Self {
        AppError::invalid_data(err.to_string())
    }
}
