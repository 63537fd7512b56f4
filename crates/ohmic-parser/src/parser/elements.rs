//! Element-line parsing: R, C, L, V, S, D.

use ohmic_devices::{Capacitor, Diode, Inductor, Resistor, Switch, VoltageSource, Waveform};

use crate::error::{Error, Result};
use crate::lexer::Token;

use super::{ModelDefinition, Parser};

impl Parser<'_> {
    /// Parse one element line, dispatched on the first letter of the
    /// instance name.
    pub(crate) fn parse_element(&mut self, name: &str) -> Result<()> {
        let kind = name
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or(' ');
        self.advance(); // consume the instance name

        match kind {
            'R' => {
                let n1 = self.expect_node()?;
                let n2 = self.expect_node()?;
                let value = self.expect_value()?;
                self.circuit.resistors.push(Resistor::new(name, n1, n2, value));
            }
            'C' => {
                let n1 = self.expect_node()?;
                let n2 = self.expect_node()?;
                let value = self.expect_value()?;
                self.circuit
                    .capacitors
                    .push(Capacitor::new(name, n1, n2, value));
            }
            'L' => {
                let n1 = self.expect_node()?;
                let n2 = self.expect_node()?;
                let value = self.expect_value()?;
                self.circuit
                    .inductors
                    .push(Inductor::new(name, n1, n2, value));
            }
            'V' => self.parse_vsource(name)?,
            'S' => {
                let n1 = self.expect_node()?;
                let n2 = self.expect_node()?;
                let nc1 = self.expect_node()?;
                let nc2 = self.expect_node()?;
                let model_name = self.expect_name()?;
                let line = self.current_line();
                let model = match self.resolve_model(&model_name)? {
                    ModelDefinition::Switch(m) => m.clone(),
                    ModelDefinition::Diode(_) => {
                        return Err(Error::ParseError {
                            line,
                            message: format!("model '{}' is not a switch model", model_name),
                        });
                    }
                };
                self.circuit
                    .switches
                    .push(Switch::new(name, n1, n2, nc1, nc2, model));
            }
            'D' => {
                let n1 = self.expect_node()?;
                let n2 = self.expect_node()?;
                let model_name = self.expect_name()?;
                let line = self.current_line();
                let model = match self.resolve_model(&model_name)? {
                    ModelDefinition::Diode(m) => m.clone(),
                    ModelDefinition::Switch(_) => {
                        return Err(Error::ParseError {
                            line,
                            message: format!("model '{}' is not a diode model", model_name),
                        });
                    }
                };
                self.circuit.diodes.push(Diode::new(name, n1, n2, model));
            }
            _ => return Err(Error::UnknownElement(name.to_string())),
        }

        self.skip_to_eol();
        Ok(())
    }

    /// Parse the tail of a voltage-source line:
    /// `[DC v | v] [AC mag [phase]] [PULSE(...)] [PWL(...)]`.
    fn parse_vsource(&mut self, name: &str) -> Result<()> {
        let node_pos = self.expect_node()?;
        let node_neg = self.expect_node()?;
        let mut source = VoltageSource::new(name, node_pos, node_neg, 0.0);

        while !self.at_eol() {
            let line = self.current_line();
            match self.peek().clone() {
                Token::Name(kw) => match kw.to_uppercase().as_str() {
                    "DC" => {
                        self.advance();
                        source.dc = self.expect_value()?;
                    }
                    "AC" => {
                        self.advance();
                        source.ac_mag = self.expect_value()?;
                        if let Some(phase) = self.try_value() {
                            source.ac_phase_deg = phase;
                        }
                    }
                    "PULSE" => {
                        self.advance();
                        source.waveform = Some(self.parse_pulse_args()?);
                    }
                    "PWL" => {
                        self.advance();
                        source.waveform = Some(self.parse_pwl_args()?);
                    }
                    other => {
                        return Err(Error::ParseError {
                            line,
                            message: format!("unexpected token in source line: {}", other),
                        });
                    }
                },
                Token::Value(_) => {
                    source.dc = self.expect_value()?;
                }
                other => {
                    return Err(Error::ParseError {
                        line,
                        message: format!("unexpected token in source line: {:?}", other),
                    });
                }
            }
        }

        self.circuit.vsources.push(source);
        self.skip_to_eol();
        Ok(())
    }

    /// PULSE(V1 V2 TD TR TF PW PER [NCYCLES]); omitted parameters are 0.
    fn parse_pulse_args(&mut self) -> Result<Waveform> {
        let line = self.current_line();
        let values = self.paren_values()?;
        if values.len() < 2 || values.len() > 8 {
            return Err(Error::ParseError {
                line,
                message: format!("PULSE takes 2 to 8 parameters, found {}", values.len()),
            });
        }

        let p = |i: usize| values.get(i).copied().unwrap_or(0.0);
        Ok(Waveform::Pulse {
            v1: p(0),
            v2: p(1),
            td: p(2),
            tr: p(3),
            tf: p(4),
            pw: p(5),
            per: p(6),
            ncycles: if values.len() == 8 {
                Some(values[7] as u64)
            } else {
                None
            },
        })
    }

    /// PWL(T1 V1 T2 V2 ...).
    fn parse_pwl_args(&mut self) -> Result<Waveform> {
        let line = self.current_line();
        let values = self.paren_values()?;
        if values.is_empty() || values.len() % 2 != 0 {
            return Err(Error::ParseError {
                line,
                message: "PWL takes time/value pairs".to_string(),
            });
        }

        let points = values.chunks_exact(2).map(|c| (c[0], c[1])).collect();
        Ok(Waveform::Pwl { points })
    }

    /// A parenthesized, comma-or-space separated list of numeric values.
    fn paren_values(&mut self) -> Result<Vec<f64>> {
        let line = self.current_line();
        if !matches!(self.peek(), Token::LParen) {
            return Err(Error::ParseError {
                line,
                message: "expected '('".to_string(),
            });
        }
        self.advance();

        let mut values = Vec::new();
        loop {
            match self.peek() {
                Token::RParen => {
                    self.advance();
                    break;
                }
                Token::Comma => {
                    self.advance();
                }
                Token::Eol | Token::Eof => {
                    return Err(Error::ParseError {
                        line,
                        message: "unterminated argument list".to_string(),
                    });
                }
                _ => values.push(self.expect_value()?),
            }
        }
        Ok(values)
    }
}
