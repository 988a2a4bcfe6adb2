//! Touchstone option line
//!
//! In Touchstone 1.1 every option is optional and the order is free; only the
//! leading `#` is mandatory. Each category may appear at most once per line.

use std::fmt;
use std::str::FromStr;

use super::parser::TouchstoneError;
use crate::constants::{DEFAULT_RESISTANCE, OPTION_MARKER};
use crate::frequency::FrequencyUnit;

/// Network parameter type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParameterType {
    #[default]
    S,
    Y,
    Z,
    G,
    H,
}

impl ParameterType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "S" => Some(ParameterType::S),
            "Y" => Some(ParameterType::Y),
            "Z" => Some(ParameterType::Z),
            "G" => Some(ParameterType::G),
            "H" => Some(ParameterType::H),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            ParameterType::S => "S",
            ParameterType::Y => "Y",
            ParameterType::Z => "Z",
            ParameterType::G => "G",
            ParameterType::H => "H",
        }
    }
}

/// Number representation of the value pairs on a data line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SParamFormat {
    #[default]
    MA, // Magnitude-Angle (degrees)
    DB, // dB-Angle (degrees)
    RI, // Real-Imaginary
}

impl SParamFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "MA" => Some(SParamFormat::MA),
            "DB" => Some(SParamFormat::DB),
            "RI" => Some(SParamFormat::RI),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            SParamFormat::MA => "MA",
            SParamFormat::DB => "DB",
            SParamFormat::RI => "RI",
        }
    }
}

/// Cursor over the whitespace-separated tokens of an option line
#[derive(Debug, Clone)]
pub struct TokenCursor {
    tokens: Vec<String>,
    pos: usize,
}

impl TokenCursor {
    pub fn new(text: &str) -> Self {
        Self {
            tokens: text.split_whitespace().map(str::to_string).collect(),
            pos: 0,
        }
    }

    /// Look at the current token without advancing
    pub fn peek(&self) -> Option<&str> {
        self.tokens.get(self.pos).map(String::as_str)
    }

    /// Return the current token and advance past it
    pub fn next(&mut self) -> Option<&str> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token.as_str())
    }

    /// Index of the next token to be returned
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.tokens.len()
    }
}

/// Settings declared by the `#` option line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub unit: FrequencyUnit,
    pub parameter: ParameterType,
    pub format: SParamFormat,
    /// Reference impedance in ohms, always > 0
    pub resistance: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            unit: FrequencyUnit::default(),
            parameter: ParameterType::default(),
            format: SParamFormat::default(),
            resistance: DEFAULT_RESISTANCE,
        }
    }
}

impl Options {
    /// Build options from keyword strings (case-insensitive).
    ///
    /// # Example
    /// ```
    /// use touchstone_core::touchstone::Options;
    /// let opts = Options::new("MHz", "s", "RI", 75).unwrap();
    /// assert_eq!(opts.to_string(), "# MHZ S RI R 75");
    /// ```
    pub fn new(
        unit: &str,
        parameter: &str,
        format: &str,
        resistance: i64,
    ) -> Result<Self, TouchstoneError> {
        let unit = FrequencyUnit::from_str(unit)
            .ok_or_else(|| TouchstoneError::InvalidArgument(format!("unit '{}'", unit)))?;
        let parameter = ParameterType::from_str(parameter).ok_or_else(|| {
            TouchstoneError::InvalidArgument(format!("parameter '{}'", parameter))
        })?;
        let format = SParamFormat::from_str(format)
            .ok_or_else(|| TouchstoneError::InvalidArgument(format!("format '{}'", format)))?;
        let resistance = u32::try_from(resistance)
            .ok()
            .filter(|&r| r > 0)
            .ok_or_else(|| {
                TouchstoneError::InvalidArgument(format!("resistance {}", resistance))
            })?;

        Ok(Self {
            unit,
            parameter,
            format,
            resistance,
        })
    }

    /// Multiplier converting the declared frequency unit to Hz
    #[inline]
    pub fn factor(&self) -> f64 {
        self.unit.multiplier()
    }

    /// Apply an option line on top of the current settings.
    ///
    /// Categories missing from the line keep their current value. On error the
    /// categories already consumed from the line stay applied.
    pub fn parse(&mut self, line: &str) -> Result<(), TouchstoneError> {
        let body = line
            .strip_prefix(OPTION_MARKER)
            .ok_or_else(|| TouchstoneError::format("Not an option line", line))?;

        let mut cursor = TokenCursor::new(&body.to_lowercase());
        let (mut seen_unit, mut seen_param, mut seen_format, mut seen_resist) =
            (false, false, false, false);

        while let Some(token) = cursor.next() {
            if let Some(unit) = FrequencyUnit::from_str(token).filter(|_| !seen_unit) {
                self.unit = unit;
                seen_unit = true;
            } else if let Some(pt) = ParameterType::from_str(token).filter(|_| !seen_param) {
                self.parameter = pt;
                seen_param = true;
            } else if let Some(fmt) = SParamFormat::from_str(token).filter(|_| !seen_format) {
                self.format = fmt;
                seen_format = true;
            } else if token == "r" && !seen_resist {
                let value = cursor
                    .next()
                    .ok_or_else(|| TouchstoneError::format("Missing resistance value", line))?;
                self.resistance = value
                    .parse::<u32>()
                    .ok()
                    .filter(|&r| r > 0)
                    .ok_or_else(|| TouchstoneError::format("Invalid resistance value", line))?;
                seen_resist = true;
            } else {
                return Err(TouchstoneError::format("Illegal option line", line));
            }
        }

        Ok(())
    }
}

impl FromStr for Options {
    type Err = TouchstoneError;

    /// Parse an option line starting from the defaults
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut opts = Options::default();
        opts.parse(line)?;
        Ok(opts)
    }
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "# {} {} {} R {}",
            self.unit.keyword(),
            self.parameter.keyword(),
            self.format.keyword(),
            self.resistance
        )
    }
}
