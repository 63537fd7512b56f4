//! SPICE netlist lexer.

use crate::error::{Error, Result};

/// Token types for SPICE netlists.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Element or keyword name (R1, DC, PULSE, vdd, ...).
    Name(String),
    /// Numeric value with optional suffix (1k, 4.7u, -5, ...).
    Value(String),
    /// Dot command without the leading dot, uppercased (.tran -> "TRAN").
    Command(String),
    /// Equal sign for model parameters.
    Equals,
    /// Opening parenthesis.
    LParen,
    /// Closing parenthesis.
    RParen,
    /// Comma separator.
    Comma,
    /// End of line.
    Eol,
    /// End of file.
    Eof,
}

/// A token with its source location.
#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub line: usize,
    pub column: usize,
}

/// Lexer for SPICE netlists.
///
/// `*` starts a full-line comment, `;` an inline comment, and a leading
/// `+` continues the previous line.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    line: usize,
    column: usize,
    at_line_start: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
            line: 1,
            column: 1,
            at_line_start: true,
        }
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Result<SpannedToken> {
        self.skip_whitespace();

        let line = self.line;
        let column = self.column;
        let spanned = |token| SpannedToken {
            token,
            line,
            column,
        };

        match self.peek_char() {
            None => Ok(spanned(Token::Eof)),
            Some('\n') => {
                self.advance();
                self.line += 1;
                self.column = 1;
                self.at_line_start = true;
                Ok(spanned(Token::Eol))
            }
            Some('*') if self.at_line_start => {
                // Comment line - skip to end
                self.skip_to_eol();
                self.next_token()
            }
            Some(';') => {
                // Inline comment - skip to end
                self.skip_to_eol();
                self.next_token()
            }
            Some('.') => {
                self.advance();
                let cmd = self.read_identifier();
                self.at_line_start = false;
                Ok(spanned(Token::Command(cmd.to_uppercase())))
            }
            Some('=') => {
                self.advance();
                Ok(spanned(Token::Equals))
            }
            Some('(') => {
                self.advance();
                Ok(spanned(Token::LParen))
            }
            Some(')') => {
                self.advance();
                Ok(spanned(Token::RParen))
            }
            Some(',') => {
                self.advance();
                Ok(spanned(Token::Comma))
            }
            Some('+') if self.at_line_start => {
                // Continuation line - treat as whitespace and continue
                self.advance();
                self.at_line_start = false;
                self.next_token()
            }
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                let ident = self.read_identifier();
                self.at_line_start = false;
                Ok(spanned(Token::Name(ident)))
            }
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' => {
                let value = self.read_value();
                self.at_line_start = false;
                Ok(spanned(Token::Value(value)))
            }
            Some(c) => Err(Error::ParseError {
                line,
                message: format!("unexpected character: '{}'", c),
            }),
        }
    }

    /// Tokenize the entire input.
    pub fn tokenize(mut self) -> Result<Vec<SpannedToken>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.token == Token::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn advance(&mut self) -> Option<char> {
        match self.chars.next() {
            Some((_, c)) => {
                self.column += 1;
                Some(c)
            }
            None => None,
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c == ' ' || c == '\t' || c == '\r' {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn skip_to_eol(&mut self) {
        while let Some(c) = self.peek_char() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut ident = String::new();
        while let Some(c) = self.peek_char() {
            if c.is_ascii_alphanumeric() || c == '_' {
                ident.push(c);
                self.advance();
            } else {
                break;
            }
        }
        ident
    }

    fn read_value(&mut self) -> String {
        let mut value = String::new();

        // Optional sign
        if matches!(self.peek_char(), Some('-') | Some('+')) {
            if let Some(c) = self.advance() {
                value.push(c);
            }
        }

        // Digits and decimal point
        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() || c == '.' {
                value.push(c);
                self.advance();
            } else {
                break;
            }
        }

        // Exponent
        if matches!(self.peek_char(), Some('e') | Some('E')) {
            if let Some(c) = self.advance() {
                value.push(c);
            }
            if matches!(self.peek_char(), Some('-') | Some('+')) {
                if let Some(c) = self.advance() {
                    value.push(c);
                }
            }
            while let Some(c) = self.peek_char() {
                if c.is_ascii_digit() {
                    value.push(c);
                    self.advance();
                } else {
                    break;
                }
            }
        }

        // SI suffix and trailing dimension letters (k, MEG, uF, ...)
        while let Some(c) = self.peek_char() {
            if c.is_ascii_alphabetic() {
                value.push(c);
                self.advance();
            } else {
                break;
            }
        }

        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_resistor() {
        let tokens = Lexer::new("R1 1 0 1k").tokenize().unwrap();

        assert_eq!(tokens.len(), 5); // R1, 1, 0, 1k, Eof
        assert_eq!(tokens[0].token, Token::Name("R1".into()));
        // Node numbers are lexed as Value tokens (start with digit)
        assert_eq!(tokens[1].token, Token::Value("1".into()));
        assert_eq!(tokens[2].token, Token::Value("0".into()));
        assert_eq!(tokens[3].token, Token::Value("1k".into()));
        assert_eq!(tokens[4].token, Token::Eof);
    }

    #[test]
    fn test_comment_lines() {
        let tokens = Lexer::new("* header comment\nR1 1 0 1k ; inline\n")
            .tokenize()
            .unwrap();

        assert!(tokens.iter().any(|t| t.token == Token::Name("R1".into())));
        assert!(!tokens
            .iter()
            .any(|t| t.token == Token::Name("header".into())));
        assert!(!tokens
            .iter()
            .any(|t| t.token == Token::Name("inline".into())));
    }

    #[test]
    fn test_dot_command_uppercased() {
        let tokens = Lexer::new(".tran 1u 1m").tokenize().unwrap();
        assert_eq!(tokens[0].token, Token::Command("TRAN".into()));
    }

    #[test]
    fn test_continuation() {
        let tokens = Lexer::new("R1 1\n+ 0 1k").tokenize().unwrap();

        let words: Vec<_> = tokens
            .iter()
            .filter_map(|t| match &t.token {
                Token::Name(n) => Some(n.clone()),
                Token::Value(v) => Some(v.clone()),
                _ => None,
            })
            .collect();

        assert_eq!(words, vec!["R1", "1", "0", "1k"]);
    }

    #[test]
    fn test_negative_and_scientific_values() {
        let tokens = Lexer::new("V1 1 0 -5 C1 1 0 1e-12").tokenize().unwrap();
        assert!(tokens.iter().any(|t| t.token == Token::Value("-5".into())));
        assert!(tokens
            .iter()
            .any(|t| t.token == Token::Value("1e-12".into())));
    }

    #[test]
    fn test_model_parameter_syntax() {
        let tokens = Lexer::new(".model sw1 SW(Ron=1 Roff=1MEG)")
            .tokenize()
            .unwrap();

        assert_eq!(tokens[0].token, Token::Command("MODEL".into()));
        assert!(tokens.iter().any(|t| t.token == Token::Equals));
        assert!(tokens.iter().any(|t| t.token == Token::LParen));
        assert!(tokens
            .iter()
            .any(|t| t.token == Token::Value("1MEG".into())));
    }

    #[test]
    fn test_name_casing_preserved() {
        let tokens = Lexer::new("R1 nOdE1 0 1k").tokenize().unwrap();
        assert_eq!(tokens[1].token, Token::Name("nOdE1".into()));
    }
}
