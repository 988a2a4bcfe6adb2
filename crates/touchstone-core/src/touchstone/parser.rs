//! Touchstone file parser
//!
//! Implements parsing of Touchstone v1.1 files with up to four parameter
//! pairs per data line (1-port and 2-port layouts).

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use num_complex::Complex64;
use thiserror::Error;
use tracing::{debug, error, info};

use super::options::{Options, SParamFormat};
use crate::constants::{COMMENT_MARKER, MAX_SLOTS, VALUES_PER_SLOT};
use crate::datapoint::Datapoint;
use crate::math::conversions::{dbdeg_2_reim, magdeg_2_reim};

/// Touchstone parsing errors
#[derive(Error, Debug)]
pub enum TouchstoneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Option line missing, malformed, or with a repeated/unknown token
    #[error("{reason}: {line}")]
    Format { reason: &'static str, line: String },

    #[error("Frequency not ascending: {line}")]
    Ordering { line: String },

    #[error("Data values aren't pairs: {line}")]
    Pairing { line: String },

    #[error("Inconsistent number of pairs: {line}")]
    Consistency { line: String },

    #[error("Invalid number '{token}': {line}")]
    Value { token: String, line: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl TouchstoneError {
    pub(crate) fn format(reason: &'static str, line: &str) -> Self {
        Self::Format {
            reason,
            line: line.trim().to_string(),
        }
    }
}

/// Touchstone parser and data container
///
/// Loading appends to whatever the instance already holds, so several files
/// can be accumulated into one parser.
#[derive(Debug, Clone, Default)]
pub struct Touchstone {
    filename: Option<PathBuf>,
    /// Settings from the most recent option line
    pub opts: Options,
    /// Leading `!` lines, verbatim
    pub comments: Vec<String>,
    /// Parameter series by column slot: S11, S21, S12, S22
    pub sdata: [Vec<Datapoint>; MAX_SLOTS],
}

impl Touchstone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filename<P: AsRef<Path>>(path: P) -> Self {
        Self {
            filename: Some(path.as_ref().to_path_buf()),
            ..Self::default()
        }
    }

    /// Parse a Touchstone file into a fresh parser
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TouchstoneError> {
        let mut ts = Self::with_filename(&path);
        ts.load_from_path(path)?;
        Ok(ts)
    }

    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    pub fn set_filename<P: AsRef<Path>>(&mut self, path: P) {
        self.filename = Some(path.as_ref().to_path_buf());
    }

    pub fn opts(&self) -> &Options {
        &self.opts
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn sdata(&self) -> &[Vec<Datapoint>; MAX_SLOTS] {
        &self.sdata
    }

    pub fn s11data(&self) -> &[Datapoint] {
        &self.sdata[0]
    }

    pub fn s21data(&self) -> &[Datapoint] {
        &self.sdata[1]
    }

    pub fn s12data(&self) -> &[Datapoint] {
        &self.sdata[2]
    }

    pub fn s22data(&self) -> &[Datapoint] {
        &self.sdata[3]
    }

    /// Number of ports implied by the populated slots (0 when empty)
    pub fn nports(&self) -> usize {
        if self.sdata[1..].iter().any(|s| !s.is_empty()) {
            2
        } else if !self.sdata[0].is_empty() {
            1
        } else {
            0
        }
    }

    /// Get the number of frequency points
    pub fn nfreq(&self) -> usize {
        self.sdata[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.sdata.iter().all(Vec::is_empty)
    }

    /// Read `path` and parse its contents into this instance
    pub fn load_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<(), TouchstoneError> {
        let content = fs::read_to_string(path)?;
        self.load_from_text(&content)
    }

    /// Load the stored filename, reporting failures through the log.
    ///
    /// Returns `true` when the file was read and parsed completely. On a parse
    /// error the points appended before the failing line are kept.
    pub fn load(&mut self) -> bool {
        let Some(path) = self.filename.clone() else {
            error!("No filename set, nothing to load");
            return false;
        };

        info!("Attempting to open file {}", path.display());
        match self.load_from_path(&path) {
            Ok(()) => true,
            Err(TouchstoneError::Io(e)) => {
                error!("Failed to open {}: {}", path.display(), e);
                false
            }
            Err(e) => {
                error!("Failed to parse {}: {}", path.display(), e);
                false
            }
        }
    }

    /// Parse Touchstone 1.1 text, appending to the existing series
    ///
    /// # Example
    /// ```
    /// use touchstone_core::touchstone::Touchstone;
    /// let mut ts = Touchstone::new();
    /// ts.load_from_text("! DUT\n# MHz S RI R 50\n100 0.5 -0.5\n").unwrap();
    /// assert_eq!(ts.s11data()[0].freq, 100e6);
    /// ```
    pub fn load_from_text(&mut self, text: &str) -> Result<(), TouchstoneError> {
        let mut state = ParserState::new();

        for line in text.lines() {
            match state.phase {
                Phase::Comments => {
                    let trimmed = line.trim();
                    if trimmed.starts_with(COMMENT_MARKER) {
                        info!("{}", trimmed);
                        self.comments.push(trimmed.to_string());
                        continue;
                    }
                    self.opts.parse(trimmed)?;
                    debug!("Parsed options: {}", self.opts);
                    state.phase = Phase::Data;
                }
                Phase::Data => self.parse_data_line(line, &mut state)?,
            }
        }

        if state.phase == Phase::Comments {
            return Err(TouchstoneError::format("Missing option line", ""));
        }
        debug!(
            "Loaded {} data lines, {} points in slot 0",
            state.lines_read,
            self.sdata[0].len()
        );

        Ok(())
    }

    fn parse_data_line(
        &mut self,
        line: &str,
        state: &mut ParserState,
    ) -> Result<(), TouchstoneError> {
        // Strip comments from data line if any
        let clean_line = match line.find(COMMENT_MARKER) {
            Some(idx) => &line[..idx],
            None => line,
        };

        let mut parts = clean_line.split_whitespace();
        let Some(freq_token) = parts.next() else {
            return Ok(());
        };

        let freq = parse_number(freq_token, line)? * self.opts.factor();
        let values = parts
            .map(|token| parse_number(token, line))
            .collect::<Result<Vec<f64>, _>>()?;

        if freq <= state.prev_freq {
            return Err(TouchstoneError::Ordering {
                line: line.trim().to_string(),
            });
        }
        state.prev_freq = freq;

        if state.expected_len == 0 {
            state.expected_len = values.len();
            if values.len() % VALUES_PER_SLOT != 0
                || values.len() > MAX_SLOTS * VALUES_PER_SLOT
            {
                return Err(TouchstoneError::Pairing {
                    line: line.trim().to_string(),
                });
            }
        } else if values.len() != state.expected_len {
            return Err(TouchstoneError::Consistency {
                line: line.trim().to_string(),
            });
        }

        for (slot, pair) in self.sdata.iter_mut().zip(values.chunks_exact(VALUES_PER_SLOT)) {
            let z = pair_to_complex(self.opts.format, pair[0], pair[1]);
            slot.push(Datapoint::from_complex(freq, z));
        }
        state.lines_read += 1;

        Ok(())
    }
}

impl FromStr for Touchstone {
    type Err = TouchstoneError;

    /// Parse from string content into a fresh parser
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let mut ts = Self::new();
        ts.load_from_text(content)?;
        Ok(ts)
    }
}

/// Parse a finite real; `nan` and `inf` are rejected like any other bad token
fn parse_number(token: &str, line: &str) -> Result<f64, TouchstoneError> {
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| TouchstoneError::Value {
            token: token.to_string(),
            line: line.trim().to_string(),
        })
}

fn pair_to_complex(format: SParamFormat, v1: f64, v2: f64) -> Complex64 {
    match format {
        SParamFormat::RI => Complex64::new(v1, v2),
        SParamFormat::MA => magdeg_2_reim(v1, v2),
        SParamFormat::DB => dbdeg_2_reim(v1, v2),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Comments,
    Data,
}

/// Per-call parser state
struct ParserState {
    phase: Phase,
    prev_freq: f64,
    /// Value count fixed by the first data line carrying values, 0 until then
    expected_len: usize,
    lines_read: usize,
}

impl ParserState {
    fn new() -> Self {
        Self {
            phase: Phase::Comments,
            prev_freq: 0.0,
            expected_len: 0,
            lines_read: 0,
        }
    }
}
