//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | Success                                              |
//! | 1    | General error (unspecified)                          |
//! | 2    | CLI usage error (bad args; also clap's own failures) |
//! | 3    | Input file could not be read or parsed               |
//! | 4    | Config file unreadable, malformed or invalid         |
//! | 5    | Output file could not be written                     |
//! | 6    | Engine rejected the candidate table                  |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use staffmatch_engine::AssignError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unsupported file extension.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Run (3-6)
// =============================================================================

/// Input sheet missing, unreadable, or lacking the required columns.
pub const EXIT_INPUT: u8 = 3;

/// Config file cannot be read, parsed, or fails validation.
pub const EXIT_CONFIG: u8 = 4;

/// Result file cannot be written.
pub const EXIT_OUTPUT: u8 = 5;

/// Engine error (candidate refers to an unknown demand, non-finite match).
pub const EXIT_ENGINE: u8 = 6;

/// Map an engine error to its exit code.
pub fn assign_exit_code(err: &AssignError) -> u8 {
    match err {
        AssignError::ConfigParse(_) | AssignError::ConfigValidation(_) => EXIT_CONFIG,
        AssignError::UnknownDemand { .. } | AssignError::InvalidMatchPercent { .. } => EXIT_ENGINE,
    }
}
