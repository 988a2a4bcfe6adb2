//! Constants shared by the option-line and data-line parsers

/// Reference impedance assumed when the option line omits `R`.
pub const DEFAULT_RESISTANCE: u32 = 50;

/// Number of network-parameter slots a 1.1 data line can fill (S11, S21, S12, S22).
pub const MAX_SLOTS: usize = 4;

/// Values per slot on a data line (two numeric components).
pub const VALUES_PER_SLOT: usize = 2;

/// Option lines start with this marker.
pub const OPTION_MARKER: char = '#';

/// Comment lines, and trailing comments on data lines, start with this marker.
pub const COMMENT_MARKER: char = '!';
