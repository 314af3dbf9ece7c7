//! Lexical Analyzer for the Ember Scripting Language
//!
//! Converts raw source text into a flat token stream terminated by a single
//! `Eof` token. Scanning errors (an unrecognized character, an unterminated
//! string) do not abort the scan: they are collected alongside whatever
//! valid tokens surround them, so `tokenize` mode can report every lexical
//! error in a file in one pass rather than stopping at the first one.
//!
//! Operates over a `Vec<char>` source buffer scanned with `advance`/
//! `peek`/`peek_next`, with maximal-munch one/two-character operators
//! (`!`/`!=`, `=`/`==`, `<`/`<=`, `>`/`>=`) plus string literals and `//`
//! comments.

use crate::error::EmberError;
use crate::token::{Literal, Token, TokenKind};

pub struct Scanner {
    source: Vec<char>,
    position: usize,
    line: usize,
}

impl Scanner {
    pub fn new(source: &str) -> Self {
        Scanner { source: source.chars().collect(), position: 0, line: 1 }
    }

    /// Scans the entire source, returning the tokens that scanned cleanly
    /// (always ending in `Eof`) alongside any errors encountered along the way.
    pub fn scan_tokens(&mut self) -> (Vec<Token>, Vec<EmberError>) {
        let mut tokens = Vec::new();
        let mut errors = Vec::new();

        while !self.is_at_end() {
            match self.next_token() {
                Ok(Some(token)) => tokens.push(token),
                Ok(None) => {}
                Err(err) => errors.push(err),
            }
        }

        tokens.push(Token::eof(self.line));
        (tokens, errors)
    }

    /// Scans one token. Returns `Ok(None)` for input that produces no token
    /// (whitespace, comments) so the caller's loop just continues.
    fn next_token(&mut self) -> Result<Option<Token>, EmberError> {
        let c = self.advance();
        let line = self.line;

        match c {
            '\n' => {
                self.line += 1;
                Ok(None)
            }
            ' ' | '\r' | '\t' => Ok(None),
            '(' => Ok(Some(Token::new(TokenKind::LeftParen, "(", None, line))),
            ')' => Ok(Some(Token::new(TokenKind::RightParen, ")", None, line))),
            '{' => Ok(Some(Token::new(TokenKind::LeftBrace, "{", None, line))),
            '}' => Ok(Some(Token::new(TokenKind::RightBrace, "}", None, line))),
            ',' => Ok(Some(Token::new(TokenKind::Comma, ",", None, line))),
            '.' => Ok(Some(Token::new(TokenKind::Dot, ".", None, line))),
            '-' => Ok(Some(Token::new(TokenKind::Minus, "-", None, line))),
            '+' => Ok(Some(Token::new(TokenKind::Plus, "+", None, line))),
            ';' => Ok(Some(Token::new(TokenKind::Semicolon, ";", None, line))),
            '*' => Ok(Some(Token::new(TokenKind::Star, "*", None, line))),
            '/' => {
                if self.peek() == '/' {
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                    Ok(None)
                } else {
                    Ok(Some(Token::new(TokenKind::Slash, "/", None, line)))
                }
            }
            '!' => Ok(Some(self.two_char(line, '=', TokenKind::BangEqual, TokenKind::Bang))),
            '=' => Ok(Some(self.two_char(line, '=', TokenKind::EqualEqual, TokenKind::Equal))),
            '<' => Ok(Some(self.two_char(line, '=', TokenKind::LessEqual, TokenKind::Less))),
            '>' => Ok(Some(self.two_char(line, '=', TokenKind::GreaterEqual, TokenKind::Greater))),
            '"' => self.string(line).map(Some),
            c if c.is_ascii_digit() => Ok(Some(self.number(line))),
            c if is_identifier_start(c) => Ok(Some(self.identifier_or_keyword(c, line))),
            other => Err(EmberError::lex(format!("Unexpected character: {}", other), line)),
        }
    }

    /// Consumes `expected` if it follows, producing `two` or falling back to `one`.
    fn two_char(&mut self, line: usize, expected: char, two: TokenKind, one: TokenKind) -> Token {
        if self.peek() == expected {
            self.advance();
            let lexeme: String = [self.previous_char(1), self.previous_char(0)].iter().collect();
            Token::new(two, lexeme, None, line)
        } else {
            Token::new(one, self.previous_char(0).to_string(), None, line)
        }
    }

    fn string(&mut self, start_line: usize) -> Result<Token, EmberError> {
        let mut value = String::new();
        while self.peek() != '"' && !self.is_at_end() {
            if self.peek() == '\n' {
                self.line += 1;
            }
            value.push(self.advance());
        }

        if self.is_at_end() {
            return Err(EmberError::lex("Unterminated string.", start_line));
        }

        self.advance(); // closing quote
        let lexeme = format!("\"{}\"", value);
        Ok(Token::new(TokenKind::String, lexeme, Some(Literal::Str(value)), start_line))
    }

    fn number(&mut self, line: usize) -> Token {
        let start = self.position - 1;
        while self.peek().is_ascii_digit() {
            self.advance();
        }
        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance();
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }
        let lexeme: String = self.source[start..self.position].iter().collect();
        let value: f64 = lexeme.parse().expect("number scan always produces valid float text");
        Token::new(TokenKind::Number, lexeme, Some(Literal::Number(value)), line)
    }

    fn identifier_or_keyword(&mut self, first: char, line: usize) -> Token {
        let mut lexeme = String::from(first);
        while is_identifier_continue(self.peek()) {
            lexeme.push(self.advance());
        }
        let kind = TokenKind::keyword(&lexeme).unwrap_or(TokenKind::Identifier);
        Token::new(kind, lexeme, None, line)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.position];
        self.position += 1;
        c
    }

    fn peek(&self) -> char {
        self.source.get(self.position).copied().unwrap_or('\0')
    }

    fn peek_next(&self) -> char {
        self.source.get(self.position + 1).copied().unwrap_or('\0')
    }

    /// The character `back` positions before the current one; `back == 0` is
    /// the character just consumed by `advance`.
    fn previous_char(&self, back: usize) -> char {
        self.source[self.position - 1 - back]
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let (tokens, errors) = Scanner::new(source).scan_tokens();
        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
        tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn single_and_double_char_operators() {
        assert_eq!(kinds("!= == <= >= ! = < >"), vec![
            TokenKind::BangEqual, TokenKind::EqualEqual, TokenKind::LessEqual,
            TokenKind::GreaterEqual, TokenKind::Bang, TokenKind::Equal,
            TokenKind::Less, TokenKind::Greater, TokenKind::Eof,
        ]);
    }

    #[test]
    fn number_literal_carries_value() {
        let (tokens, _) = Scanner::new("42.5").scan_tokens();
        assert_eq!(tokens[0].literal, Some(Literal::Number(42.5)));
    }

    #[test]
    fn unterminated_string_is_collected_as_error() {
        let (_, errors) = Scanner::new("\"abc").scan_tokens();
        assert_eq!(errors, vec![EmberError::lex("Unterminated string.", 1)]);
    }

    #[test]
    fn unexpected_character_does_not_stop_the_scan() {
        let (tokens, errors) = Scanner::new("@ +").scan_tokens();
        assert_eq!(errors, vec![EmberError::lex("Unexpected character: @", 1)]);
        assert_eq!(tokens.iter().map(|t| t.kind).collect::<Vec<_>>(), vec![TokenKind::Plus, TokenKind::Eof]);
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(kinds("// comment\n+"), vec![TokenKind::Plus, TokenKind::Eof]);
    }

    #[test]
    fn keywords_vs_identifiers() {
        assert_eq!(kinds("and orchard"), vec![TokenKind::And, TokenKind::Identifier, TokenKind::Eof]);
    }
}
