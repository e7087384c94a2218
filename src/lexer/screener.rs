//! The screener: drops `Delete` tokens, promotes reserved-word identifiers
//! to keywords, and rejects any `Invalid`-kind token it finds.

use std::fmt::{self, Display};

use log::debug;

use crate::token::{Line, Token, TokenKind, KEYWORDS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalError {
    pub content: String,
    pub line: Line,
}

impl Display for LexicalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Lexical Error on line {}]: Invalid token '{}'",
            self.line, self.content
        )
    }
}

impl std::error::Error for LexicalError {}

/// Filter the raw token stream: drop `Delete` tokens, promote reserved
/// identifiers to `Keyword`, and surface the first `Invalid` token (if any)
/// as a [`LexicalError`].
pub fn screen(tokens: Vec<Token>) -> Result<Vec<Token>, LexicalError> {
    let mut filtered = Vec::with_capacity(tokens.len());

    for mut token in tokens {
        match token.kind {
            TokenKind::Invalid => {
                return Err(LexicalError {
                    content: token.content,
                    line: token.line,
                });
            }
            TokenKind::Delete => continue,
            TokenKind::Identifier if KEYWORDS.contains(&token.content.as_str()) => {
                token.kind = TokenKind::Keyword;
                filtered.push(token);
            }
            _ => filtered.push(token),
        }
    }

    debug!("screened down to {} tokens", filtered.len());
    Ok(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_delete_tokens() {
        let tokens = vec![
            Token::new("  ", TokenKind::Delete, 1),
            Token::new("x", TokenKind::Identifier, 1),
        ];
        let out = screen(tokens).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].content, "x");
    }

    #[test]
    fn promotes_reserved_words() {
        let tokens = vec![Token::new("let", TokenKind::Identifier, 1)];
        let out = screen(tokens).unwrap();
        assert_eq!(out[0].kind, TokenKind::Keyword);
    }

    #[test]
    fn leaves_comparison_spellings_as_keywords_after_promotion() {
        let tokens = vec![Token::new("gr", TokenKind::Identifier, 3)];
        let out = screen(tokens).unwrap();
        assert_eq!(out[0].kind, TokenKind::Keyword);
        assert_eq!(out[0].line, 3);
    }

    #[test]
    fn rejects_invalid_tokens() {
        let tokens = vec![Token::new("#", TokenKind::Invalid, 7)];
        let err = screen(tokens).unwrap_err();
        assert_eq!(err.line, 7);
    }
}
