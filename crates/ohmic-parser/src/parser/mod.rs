//! SPICE netlist parser.

use std::collections::HashMap;

use ohmic_core::NodeId;
use ohmic_core::units::parse_value;
use ohmic_devices::{Circuit, DiodeModel, SwitchModel};

use crate::error::{Error, Result};
use crate::lexer::{Lexer, SpannedToken, Token};

mod commands;
mod elements;

/// Parse a SPICE netlist into a finalized [`Circuit`].
///
/// The first line is the circuit title. Models are scanned in a first
/// pass so element lines may reference `.MODEL` definitions that appear
/// later in the file.
pub fn parse(input: &str) -> Result<Circuit> {
    let tokens = Lexer::new(input).tokenize()?;
    Parser::new(&tokens).parse_all()
}

/// A model definition from a `.MODEL` command, keyed by lowercase name.
#[derive(Debug, Clone)]
pub(crate) enum ModelDefinition {
    Switch(SwitchModel),
    Diode(DiodeModel),
}

/// Parser state.
pub(crate) struct Parser<'a> {
    tokens: &'a [SpannedToken],
    pos: usize,
    pub(crate) circuit: Circuit,
    pub(crate) models: HashMap<String, ModelDefinition>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [SpannedToken]) -> Self {
        Self {
            tokens,
            pos: 0,
            circuit: Circuit::new(),
            models: HashMap::new(),
        }
    }

    fn parse_all(mut self) -> Result<Circuit> {
        self.circuit.title = self.parse_title();

        // Pass 1: scan for .MODEL commands so elements can reference
        // models defined later in the file.
        let saved_pos = self.pos;
        while !self.is_at_end() {
            self.skip_eol();
            if self.is_at_end() {
                break;
            }
            match self.peek().clone() {
                Token::Command(cmd) if cmd == "MODEL" => {
                    self.advance();
                    self.parse_model_command()?;
                }
                Token::Command(cmd) if cmd == "END" => break,
                _ => self.skip_to_eol(),
            }
        }
        self.pos = saved_pos;

        // Pass 2: elements and commands.
        while !self.is_at_end() {
            self.skip_eol();
            if self.is_at_end() {
                break;
            }
            match self.peek().clone() {
                Token::Command(cmd) => {
                    if cmd == "END" {
                        break;
                    }
                    self.advance();
                    self.parse_command(&cmd)?;
                }
                Token::Name(name) => {
                    self.parse_element(&name)?;
                }
                Token::Eof => break,
                _ => {
                    let line = self.current_line();
                    return Err(Error::ParseError {
                        line,
                        message: format!("unexpected token: {:?}", self.peek()),
                    });
                }
            }
        }

        self.circuit.finalize();
        Ok(self.circuit)
    }

    /// Collect the first line verbatim as the title.
    fn parse_title(&mut self) -> Option<String> {
        let mut parts = Vec::new();
        while !self.is_at_end() {
            match self.peek() {
                Token::Eol | Token::Eof => break,
                Token::Name(n) => {
                    parts.push(n.clone());
                    self.advance();
                }
                Token::Value(v) => {
                    parts.push(v.clone());
                    self.advance();
                }
                _ => {
                    self.advance();
                }
            }
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    // Token helpers

    pub(crate) fn peek(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .map(|t| &t.token)
            .unwrap_or(&Token::Eof)
    }

    pub(crate) fn current_line(&self) -> usize {
        self.tokens.get(self.pos).map(|t| t.line).unwrap_or(0)
    }

    pub(crate) fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek(), Token::Eof)
    }

    pub(crate) fn skip_eol(&mut self) {
        while matches!(self.peek(), Token::Eol) {
            self.advance();
        }
    }

    pub(crate) fn skip_to_eol(&mut self) {
        while !matches!(self.peek(), Token::Eol | Token::Eof) {
            self.advance();
        }
        if matches!(self.peek(), Token::Eol) {
            self.advance();
        }
    }

    pub(crate) fn at_eol(&self) -> bool {
        matches!(self.peek(), Token::Eol | Token::Eof)
    }

    /// Consume a name-like token (identifier or raw value text).
    pub(crate) fn expect_name(&mut self) -> Result<String> {
        let line = self.current_line();
        match self.peek() {
            Token::Name(n) => {
                let n = n.clone();
                self.advance();
                Ok(n)
            }
            Token::Value(v) => {
                let v = v.clone();
                self.advance();
                Ok(v)
            }
            other => Err(Error::ParseError {
                line,
                message: format!("expected name, found {:?}", other),
            }),
        }
    }

    /// Consume a node token, interning it into the circuit's node index.
    pub(crate) fn expect_node(&mut self) -> Result<NodeId> {
        let name = self.expect_name()?;
        Ok(self.circuit.nodes.intern(&name))
    }

    /// Consume a numeric token with optional SI suffix.
    pub(crate) fn expect_value(&mut self) -> Result<f64> {
        let text = self.expect_name()?;
        parse_value(&text).ok_or(Error::InvalidValue(text))
    }

    /// Consume a numeric token if the next token parses as one.
    pub(crate) fn try_value(&mut self) -> Option<f64> {
        let text = match self.peek() {
            Token::Name(n) => n.clone(),
            Token::Value(v) => v.clone(),
            _ => return None,
        };
        match parse_value(&text) {
            Some(v) => {
                self.advance();
                Some(v)
            }
            None => None,
        }
    }

    /// Look up a model by case-insensitive name.
    pub(crate) fn resolve_model(&self, name: &str) -> Result<&ModelDefinition> {
        self.models
            .get(&name.to_lowercase())
            .ok_or_else(|| Error::UnknownModel(name.to_string()))
    }
}
