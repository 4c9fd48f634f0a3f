//! Unit string parsing for the source and registry conventions
//!
//! Supported forms:
//! - Simple: "m", "kg", "Ohm"
//! - Powers: "m**3", "m**(-3)", and in the source convention "m^3" and "m3"
//! - Products: "kg*m", and in the source convention "kg m"
//! - Quotients: "m/s", "1 / m3", "kg/(m*s**2)"
//!
//! `*` and `/` share one precedence level and associate to the left, so a
//! denominator with several factors must be parenthesised.

use crate::unit::UnitError;
use crate::units::{Grammar, UNITS};
use crate::Unit;

/// Parse a unit string under the given grammar
pub fn parse_unit(text: &str, grammar: Grammar) -> Result<Unit, UnitError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Unit::one());
    }

    let mut parser = Parser::new(trimmed, grammar);
    let mut unit = parser.product()?;
    if let Some(c) = parser.peek() {
        return Err(parser.error(format!("unexpected '{}'", c)));
    }
    unit.symbol = trimmed.to_string();
    Ok(unit)
}

/// Parse a source-convention unit and re-express it in base units
pub fn decompose(text: &str) -> Result<Unit, UnitError> {
    parse_unit(text, Grammar::Source).map(|u| u.decompose())
}

/// Check that a unit string is acceptable to the registry
pub fn validate_target(text: &str) -> Result<(), UnitError> {
    if text.trim().is_empty() {
        return Err(UnitError::Syntax {
            text: text.to_string(),
            position: 0,
            message: "empty unit".to_string(),
        });
    }
    parse_unit(text, Grammar::Target).map(|_| ())
}

struct Parser<'a> {
    text: &'a str,
    chars: Vec<char>,
    pos: usize,
    grammar: Grammar,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, grammar: Grammar) -> Self {
        Parser { text, chars: text.chars().collect(), pos: 0, grammar }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn error(&self, message: impl Into<String>) -> UnitError {
        UnitError::Syntax {
            text: self.text.to_string(),
            position: self.pos,
            message: message.into(),
        }
    }

    /// Skip whitespace. Returns whether any was skipped.
    fn skip_ws(&mut self) -> Result<bool, UnitError> {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            if self.grammar == Grammar::Target {
                return Err(self.error("whitespace is not allowed"));
            }
            self.pos += 1;
        }
        Ok(self.pos > start)
    }

    fn is_power_op(&self) -> bool {
        match self.peek() {
            Some('*') => self.peek_at(1) == Some('*'),
            Some('^') => true,
            _ => false,
        }
    }

    fn product(&mut self) -> Result<Unit, UnitError> {
        let mut acc = self.power()?;
        loop {
            let spaced = self.skip_ws()?;
            match self.peek() {
                None | Some(')') => break,
                Some('*') if !self.is_power_op() => {
                    self.pos += 1;
                    let rhs = self.power()?;
                    acc = acc.multiply(&rhs);
                }
                Some('/') => {
                    self.pos += 1;
                    let rhs = self.power()?;
                    acc = acc.divide(&rhs);
                }
                Some(_) if spaced => {
                    let rhs = self.power()?;
                    acc = acc.multiply(&rhs);
                }
                Some(c) => return Err(self.error(format!("unexpected '{}'", c))),
            }
        }
        Ok(acc)
    }

    fn power(&mut self) -> Result<Unit, UnitError> {
        self.skip_ws()?;
        let base = self.atom()?;

        if self.peek() == Some('*') && self.peek_at(1) == Some('*') {
            self.pos += 2;
            let exp = self.exponent()?;
            return Ok(base.power(exp));
        }
        if self.peek() == Some('^') {
            if self.grammar == Grammar::Target {
                return Err(self.error("'^' is not an operator here, use '**'"));
            }
            self.pos += 1;
            let exp = self.exponent()?;
            return Ok(base.power(exp));
        }
        Ok(base)
    }

    fn exponent(&mut self) -> Result<i32, UnitError> {
        let parenthesised = self.peek() == Some('(');
        if parenthesised {
            self.pos += 1;
        }

        let start = self.pos;
        if matches!(self.peek(), Some('-') | Some('+')) {
            self.pos += 1;
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '.') {
            self.pos += 1;
        }
        let raw: String = self.chars[start..self.pos].iter().collect();

        if parenthesised {
            if self.peek() != Some(')') {
                return Err(self.error("expected ')' after exponent"));
            }
            self.pos += 1;
        }

        let value: f64 = raw.parse().map_err(|_| UnitError::BadExponent(raw.clone()))?;
        if value.fract() != 0.0 {
            return Err(UnitError::BadExponent(raw));
        }
        Ok(value as i32)
    }

    fn atom(&mut self) -> Result<Unit, UnitError> {
        match self.peek() {
            Some('(') => {
                self.pos += 1;
                let inner = self.product()?;
                self.skip_ws()?;
                if self.peek() != Some(')') {
                    return Err(self.error("expected ')'"));
                }
                self.pos += 1;
                Ok(inner)
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.number(),
            Some(c) if is_ident_start(c) => self.ident(),
            Some(c) => Err(self.error(format!("unexpected '{}'", c))),
            None => Err(self.error("unexpected end of unit")),
        }
    }

    fn number(&mut self) -> Result<Unit, UnitError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '.') {
            self.pos += 1;
        }
        if matches!(self.peek(), Some('e') | Some('E')) {
            let signed = matches!(self.peek_at(1), Some('-') | Some('+'));
            let digit_at = if signed { 2 } else { 1 };
            if self.peek_at(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                self.pos += digit_at;
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.pos += 1;
                }
            }
        }
        let raw: String = self.chars[start..self.pos].iter().collect();
        let value: f64 = raw.parse().map_err(|_| self.error(format!("invalid number '{}'", raw)))?;
        Ok(Unit::number(value))
    }

    fn ident(&mut self) -> Result<Unit, UnitError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| is_ident_start(c) || (self.grammar == Grammar::Target && c.is_ascii_digit())) {
            self.pos += 1;
        }
        let symbol: String = self.chars[start..self.pos].iter().collect();
        let unit = UNITS.lookup(&symbol, self.grammar)
            .ok_or_else(|| UnitError::UnknownUnit(symbol.clone()))?;

        // Source convention writes m**3 as "m3"
        if self.grammar == Grammar::Source {
            let digits_start = self.pos;
            if self.peek() == Some('-') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
                self.pos += 1;
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.pos += 1;
            }
            if self.pos > digits_start {
                let raw: String = self.chars[digits_start..self.pos].iter().collect();
                let exp: i32 = raw.parse().map_err(|_| UnitError::BadExponent(raw.clone()))?;
                return Ok(unit.power(exp));
            }
        }
        Ok(unit)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == 'µ' || c == 'Ω'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dimension;

    fn source(s: &str) -> Unit {
        parse_unit(s, Grammar::Source).unwrap()
    }

    fn target(s: &str) -> Unit {
        parse_unit(s, Grammar::Target).unwrap()
    }

    #[test]
    fn test_parse_simple_unit() {
        let unit = source("m");
        assert_eq!(unit.symbol, "m");
        assert_eq!(unit.dimension, Dimension::LENGTH);
    }

    #[test]
    fn test_source_density_forms() {
        assert_eq!(source("1 / m3").dimension, Dimension::NUMBER_DENSITY);
        assert_eq!(source("kg / m3").dimension, Dimension::MASS_DENSITY);
        assert_eq!(source("m**(-3)").dimension, Dimension::NUMBER_DENSITY);
        assert_eq!(source("m^-3").dimension, Dimension::NUMBER_DENSITY);
        assert_eq!(source("m-3").dimension, Dimension::NUMBER_DENSITY);
    }

    #[test]
    fn test_source_implicit_product() {
        let unit = source("Ohm m");
        assert_eq!(unit.dimension, Dimension::RESISTANCE.multiply(&Dimension::LENGTH));
        let unit = source("kg m / s2");
        assert_eq!(unit.dimension, Dimension::FORCE);
    }

    #[test]
    fn test_parenthesised_denominator() {
        let unit = target("kg/(m*s**2)");
        assert_eq!(unit.dimension, Dimension::PRESSURE);
        let unit = source("kg / (m s2)");
        assert_eq!(unit.dimension, Dimension::PRESSURE);
    }

    #[test]
    fn test_left_associative_division() {
        // kg*m**3/A**2/s**3 == kg m3 A-2 s-3
        let unit = target("kg*m**3/A**2/s**3");
        assert_eq!(unit.dimension, Dimension::RESISTANCE.multiply(&Dimension::LENGTH));
    }

    #[test]
    fn test_target_accepts_normalized_forms() {
        assert_eq!(target("radian/s").dimension, Dimension::ANGULAR_FREQUENCY);
        assert_eq!(target("1/m**3").dimension, Dimension::NUMBER_DENSITY);
        assert!(target("m/m").dimension.is_dimensionless());
        assert_eq!(target("Hz").dimension, Dimension::FREQUENCY);
        assert_eq!(target("s**3*A**2/(kg*m**3)").dimension,
            Dimension::CONDUCTANCE.divide(&Dimension::LENGTH));
    }

    #[test]
    fn test_target_rejects_source_conventions() {
        assert!(parse_unit("m s", Grammar::Target).is_err());
        assert!(parse_unit("m^2", Grammar::Target).is_err());
        assert!(matches!(parse_unit("m3", Grammar::Target), Err(UnitError::UnknownUnit(_))));
        assert!(matches!(parse_unit("rad/s", Grammar::Target), Err(UnitError::UnknownUnit(_))));
        assert!(matches!(parse_unit("N", Grammar::Target), Err(UnitError::UnknownUnit(_))));
    }

    #[test]
    fn test_scale_factors() {
        let unit = source("1000 kg m / s**2");
        assert_eq!(unit.scale, 1000.0);
        assert_eq!(unit.dimension, Dimension::FORCE);
        assert_eq!(source("1e3 m").scale, 1000.0);
    }

    #[test]
    fn test_fractional_exponent_is_rejected() {
        assert!(matches!(parse_unit("m**(1.5)", Grammar::Source), Err(UnitError::BadExponent(_))));
    }

    #[test]
    fn test_decompose() {
        assert_eq!(decompose("N").unwrap().symbol, "kg m / s**2");
        assert_eq!(decompose("S / m").unwrap().symbol, "s**3 A**2 / (kg m**3)");
        assert_eq!(decompose("Ohm m").unwrap().symbol, "m**3 kg / (A**2 s**3)");
        assert_eq!(decompose("rad / s").unwrap().symbol, "rad / s");
    }

    #[test]
    fn test_validate_target() {
        assert!(validate_target("kg/m**3").is_ok());
        assert!(validate_target("").is_err());
        assert!(validate_target("furlong").is_err());
    }

    #[test]
    fn test_unknown_unit() {
        assert!(matches!(parse_unit("unknown_xyz", Grammar::Source), Err(UnitError::UnknownUnit(_))));
    }
}
