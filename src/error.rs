//! Top-level error type unifying every pipeline phase's error behind a
//! single `Display` the binary can print as one line to standard error.

use std::fmt::{self, Display};

use crate::cse::RuntimeError;
use crate::lexer::{LexicalError, TokenizeError};
use crate::parser::SyntaxError;
use crate::standardizer::StandardizeError;

#[derive(Debug)]
pub enum RpalError {
    Io(std::io::Error),
    Tokenize(TokenizeError),
    Lexical(LexicalError),
    Syntax(SyntaxError),
    Standardize(StandardizeError),
    Runtime(RuntimeError),
}

impl Display for RpalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "[IO Error]: {e}"),
            Self::Tokenize(e) => Display::fmt(e, f),
            Self::Lexical(e) => Display::fmt(e, f),
            Self::Syntax(e) => Display::fmt(e, f),
            Self::Standardize(e) => Display::fmt(e, f),
            Self::Runtime(e) => Display::fmt(e, f),
        }
    }
}

impl std::error::Error for RpalError {}

impl From<std::io::Error> for RpalError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<TokenizeError> for RpalError {
    fn from(e: TokenizeError) -> Self {
        Self::Tokenize(e)
    }
}

impl From<LexicalError> for RpalError {
    fn from(e: LexicalError) -> Self {
        Self::Lexical(e)
    }
}

impl From<SyntaxError> for RpalError {
    fn from(e: SyntaxError) -> Self {
        Self::Syntax(e)
    }
}

impl From<StandardizeError> for RpalError {
    fn from(e: StandardizeError) -> Self {
        Self::Standardize(e)
    }
}

impl From<RuntimeError> for RpalError {
    fn from(e: RuntimeError) -> Self {
        Self::Runtime(e)
    }
}
