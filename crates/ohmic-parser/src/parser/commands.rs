//! Dot-command parsing: .MODEL, .AC, .TRAN, .PRINT.

use std::collections::HashMap;

use ohmic_devices::{AcSweep, AcSweepMode, DiodeModel, SwitchModel, TranSweep};

use crate::error::{Error, Result};
use crate::lexer::Token;

use super::{ModelDefinition, Parser};

impl Parser<'_> {
    /// Dispatch a dot command (already consumed). Unrecognized commands
    /// are skipped.
    pub(crate) fn parse_command(&mut self, cmd: &str) -> Result<()> {
        match cmd {
            // Models were collected in the first pass.
            "MODEL" => {
                self.skip_to_eol();
                Ok(())
            }
            "AC" => self.parse_ac_command(),
            "TRAN" => self.parse_tran_command(),
            "PRINT" => self.parse_print_command(),
            _ => {
                self.skip_to_eol();
                Ok(())
            }
        }
    }

    /// `.MODEL name SW|VSWITCH|D (param=value ...)`.
    pub(crate) fn parse_model_command(&mut self) -> Result<()> {
        let line = self.current_line();
        let name = self.expect_name()?.to_lowercase();
        let kind = self.expect_name()?.to_uppercase();
        let params = self.param_list()?;

        let definition = match kind.as_str() {
            "SW" | "VSWITCH" => {
                let mut model = SwitchModel::default();
                if let Some(&ron) = params.get("RON") {
                    model.ron = ron;
                }
                if let Some(&roff) = params.get("ROFF") {
                    model.roff = roff;
                }
                if params.contains_key("VT") || params.contains_key("VH") {
                    let vt = params.get("VT").copied().unwrap_or(0.0);
                    let vh = params.get("VH").copied().unwrap_or(0.0);
                    let thresholds = SwitchModel::from_thresholds(vt, vh);
                    model.von = thresholds.von;
                    model.voff = thresholds.voff;
                } else {
                    if let Some(&von) = params.get("VON") {
                        model.von = von;
                    }
                    if let Some(&voff) = params.get("VOFF") {
                        model.voff = voff;
                    }
                }
                ModelDefinition::Switch(model)
            }
            "D" => {
                let mut model = DiodeModel::default();
                if let Some(&is_sat) = params.get("IS") {
                    model.is_sat = is_sat;
                }
                if let Some(&n) = params.get("N") {
                    model.emission = n;
                }
                ModelDefinition::Diode(model)
            }
            other => {
                return Err(Error::ParseError {
                    line,
                    message: format!("unknown model type: {}", other),
                });
            }
        };

        self.models.insert(name, definition);
        self.skip_to_eol();
        Ok(())
    }

    /// `.AC DEC|LIN n fstart fstop`.
    fn parse_ac_command(&mut self) -> Result<()> {
        let line = self.current_line();
        let mode = match self.expect_name()?.to_uppercase().as_str() {
            "DEC" => AcSweepMode::Decade,
            "LIN" => AcSweepMode::Linear,
            other => {
                return Err(Error::ParseError {
                    line,
                    message: format!("unknown AC sweep mode: {}", other),
                });
            }
        };
        let num_points = self.expect_value()? as usize;
        let fstart = self.expect_value()?;
        let fstop = self.expect_value()?;

        if num_points < 1 {
            return Err(Error::ParseError {
                line,
                message: ".ac requires at least one point".to_string(),
            });
        }
        if fstart <= 0.0 || fstop <= 0.0 {
            return Err(Error::ParseError {
                line,
                message: ".ac requires positive start and stop frequencies".to_string(),
            });
        }

        self.circuit.ac = Some(AcSweep {
            mode,
            num_points,
            fstart,
            fstop,
        });
        self.skip_to_eol();
        Ok(())
    }

    /// `.TRAN tstep tstop`.
    fn parse_tran_command(&mut self) -> Result<()> {
        let line = self.current_line();
        let tstep = self.expect_value()?;
        let tstop = self.expect_value()?;

        if tstop <= 0.0 {
            return Err(Error::ParseError {
                line,
                message: ".tran requires a positive stop time".to_string(),
            });
        }

        self.circuit.tran = Some(TranSweep { tstep, tstop });
        self.skip_to_eol();
        Ok(())
    }

    /// `.PRINT TRAN V(node) ...`; other print types are ignored.
    fn parse_print_command(&mut self) -> Result<()> {
        let analysis = self.expect_name()?.to_uppercase();
        if analysis != "TRAN" {
            self.skip_to_eol();
            return Ok(());
        }

        while !self.at_eol() {
            let line = self.current_line();
            match self.peek().clone() {
                Token::Name(n) if n.eq_ignore_ascii_case("v") => {
                    self.advance();
                    if !matches!(self.peek(), Token::LParen) {
                        return Err(Error::ParseError {
                            line,
                            message: "expected '(' after V".to_string(),
                        });
                    }
                    self.advance();
                    let node = self.expect_name()?;
                    if !matches!(self.peek(), Token::RParen) {
                        return Err(Error::ParseError {
                            line,
                            message: "expected ')' after node name".to_string(),
                        });
                    }
                    self.advance();
                    self.circuit.probes.push(node);
                }
                Token::Comma => {
                    self.advance();
                }
                other => {
                    return Err(Error::ParseError {
                        line,
                        message: format!("unexpected output variable: {:?}", other),
                    });
                }
            }
        }

        self.skip_to_eol();
        Ok(())
    }

    /// `name=value` pairs, optionally parenthesized, until end of line.
    fn param_list(&mut self) -> Result<HashMap<String, f64>> {
        let mut params = HashMap::new();
        loop {
            match self.peek().clone() {
                Token::LParen | Token::RParen | Token::Comma => {
                    self.advance();
                }
                Token::Name(key) => {
                    let key = key.to_uppercase();
                    self.advance();
                    let line = self.current_line();
                    if !matches!(self.peek(), Token::Equals) {
                        return Err(Error::ParseError {
                            line,
                            message: format!("expected '=' after parameter {}", key),
                        });
                    }
                    self.advance();
                    let value = self.expect_value()?;
                    params.insert(key, value);
                }
                Token::Eol | Token::Eof => break,
                other => {
                    let line = self.current_line();
                    return Err(Error::ParseError {
                        line,
                        message: format!("unexpected token in parameter list: {:?}", other),
                    });
                }
            }
        }
        Ok(params)
    }
}
