//! Character stream -> token stream, and the screener pass that turns a raw
//! token stream into the filtered stream the parser consumes.

mod screener;

pub use screener::{screen, LexicalError};

use std::fmt::{self, Display};
use std::iter::Peekable;
use std::str::Chars;

use log::trace;

use crate::token::{Line, Token, TokenKind};

/// Raised by the lexer itself for lexical problems that cannot be recovered
/// from by continuing to scan: an unterminated string literal, a digit run
/// immediately followed by a letter, or a character that starts no known
/// token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizeError {
    pub content: String,
    pub line: Line,
}

impl Display for TokenizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Tokenization Error on line {}]: Invalid token '{}'",
            self.line, self.content
        )
    }
}

impl std::error::Error for TokenizeError {}

pub type TokenizeResult<T> = Result<T, TokenizeError>;

/// One-pass lexer over the raw source text.
pub struct Lexer<'a> {
    tokens: Vec<Token>,
    iterator: Peekable<Chars<'a>>,
    line: Line,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            tokens: vec![],
            iterator: source.chars().peekable(),
            line: 1,
        }
    }

    /// Tokenize the entire source, returning the raw (unscreened) token
    /// stream, including `Delete`-kind tokens for whitespace and comments.
    pub fn lex(mut self) -> TokenizeResult<Vec<Token>> {
        while let Some(&next) = self.peek() {
            match next {
                c if c.is_whitespace() => self.lex_whitespace(),
                '/' if self.peek_at(1) == Some('/') => self.lex_comment(),
                c if c.is_ascii_alphabetic() => self.lex_identifier(),
                c if c.is_ascii_digit() => self.lex_number()?,
                '\'' => self.lex_string()?,
                _ => self.lex_operator()?,
            }
        }
        Ok(self.tokens)
    }

    fn peek(&mut self) -> Option<&char> {
        self.iterator.peek()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.iterator.clone().nth(offset)
    }

    fn advance(&mut self) -> Option<char> {
        let next = self.iterator.next();
        if next == Some('\n') {
            self.line += 1;
        }
        next
    }

    fn push(&mut self, content: impl Into<String>, kind: TokenKind, line: Line) {
        let token = Token::new(content, kind, line);
        trace!("lexed {:?}", token);
        self.tokens.push(token);
    }

    fn lex_whitespace(&mut self) {
        let line = self.line;
        let mut content = String::new();
        while let Some(&c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            content.push(c);
            self.advance();
        }
        self.push(content, TokenKind::Delete, line);
    }

    fn lex_comment(&mut self) {
        let line = self.line;
        let mut content = String::new();
        content.push(self.advance().unwrap());
        content.push(self.advance().unwrap());
        while let Some(&c) = self.peek() {
            if c == '\n' {
                break;
            }
            content.push(c);
            self.advance();
        }
        self.push(content, TokenKind::Delete, line);
    }

    fn lex_identifier(&mut self) {
        let line = self.line;
        let mut content = String::new();
        while let Some(&c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                content.push(c);
                self.advance();
            } else {
                break;
            }
        }
        self.push(content, TokenKind::Identifier, line);
    }

    fn lex_number(&mut self) -> TokenizeResult<()> {
        let line = self.line;
        let mut content = String::new();
        while let Some(&c) = self.peek() {
            if c.is_ascii_digit() {
                content.push(c);
                self.advance();
            } else {
                break;
            }
        }
        if let Some(&c) = self.peek() {
            if c.is_ascii_alphabetic() {
                content.push(c);
                self.advance();
                return Err(TokenizeError { content, line });
            }
        }
        self.push(content, TokenKind::Integer, line);
        Ok(())
    }

    fn lex_string(&mut self) -> TokenizeResult<()> {
        let line = self.line;
        let mut content = String::new();
        content.push(self.advance().unwrap()); // opening quote
        loop {
            match self.peek() {
                None => return Err(TokenizeError {
                    content: "unterminated string literal".to_owned(),
                    line,
                }),
                Some(&'\'') => {
                    content.push(self.advance().unwrap());
                    break;
                }
                Some(_) => content.push(self.advance().unwrap()),
            }
        }
        self.push(content, TokenKind::Str, line);
        Ok(())
    }

    fn lex_operator(&mut self) -> TokenizeResult<()> {
        const SINGLE: &str = "+-*/=@&|:;,.()[]";
        let line = self.line;
        let first = *self.peek().unwrap();
        let two_char: String = [first, self.peek_at(1).unwrap_or('\0')].iter().collect();

        if two_char == "**" || two_char == "->" {
            self.advance();
            self.advance();
            self.push(two_char, TokenKind::Operator, line);
            return Ok(());
        }

        if SINGLE.contains(first) {
            self.advance();
            self.push(first.to_string(), TokenKind::Operator, line);
            return Ok(());
        }

        Err(TokenizeError {
            content: first.to_string(),
            line,
        })
    }
}

/// Convenience wrapper: lex then screen in one call.
pub fn tokenize(source: &str) -> Result<Vec<Token>, crate::error::RpalError> {
    let raw = Lexer::new(source).lex()?;
    let screened = screen(raw)?;
    Ok(screened)
}

/// Lex and screen, panicking on any lexical error. Used by downstream
/// pipeline-stage unit tests (parser, standardizer, cse) that want a token
/// stream without threading `RpalError` through every test.
#[cfg(test)]
pub(crate) fn tokenize_raw_for_tests(source: &str) -> Vec<Token> {
    let raw = Lexer::new(source).lex().expect("lex should succeed");
    screen(raw).expect("screen should succeed")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lexes_identifier() {
        let tokens = Lexer::new("letter").lex().unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].content, "letter");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
    }

    #[test]
    fn rejects_non_ascii_identifier_continuation() {
        let err = Lexer::new("résumé").lex().unwrap_err();
        assert_eq!(err.content, "é");
    }

    #[test]
    fn lexes_integer() {
        let tokens = Lexer::new("1337").lex().unwrap();
        assert_eq!(tokens[0].content, "1337");
        assert_eq!(tokens[0].kind, TokenKind::Integer);
    }

    #[test]
    fn rejects_digit_letter_merge() {
        let err = Lexer::new("123abc").lex().unwrap_err();
        assert_eq!(err.content, "123a");
    }

    #[test]
    fn lexes_string_with_embedded_newline() {
        let tokens = Lexer::new("'hi\nthere'").lex().unwrap();
        assert_eq!(tokens[0].content, "'hi\nthere'");
    }

    #[test]
    fn rejects_unterminated_string() {
        assert!(Lexer::new("'oops").lex().is_err());
    }

    #[test]
    fn recognizes_two_char_operators_before_one_char() {
        let tokens = Lexer::new("-> - **  *").lex().unwrap();
        let contents: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind != TokenKind::Delete)
            .map(|t| t.content.as_str())
            .collect();
        assert_eq!(contents, vec!["->", "-", "**", "*"]);
    }

    #[test]
    fn comment_runs_to_end_of_line() {
        let tokens = Lexer::new("x // a comment\ny").lex().unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Identifier,
                TokenKind::Delete,
                TokenKind::Delete,
                TokenKind::Delete,
                TokenKind::Identifier,
            ]
        );
    }

    #[test]
    fn tracks_line_numbers_across_newlines() {
        let tokens = Lexer::new("a\nb\n\nc").lex().unwrap();
        let idents: Vec<_> = tokens
            .into_iter()
            .filter(|t| t.kind == TokenKind::Identifier)
            .collect();
        assert_eq!(idents[0].line, 1);
        assert_eq!(idents[1].line, 2);
        assert_eq!(idents[2].line, 4);
    }
}
