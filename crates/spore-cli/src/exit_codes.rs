//! Exit codes of the `spore` binary. Scripts and CI jobs depend on these.

pub const SUCCESS: i32 = 0;
pub const CHECK_FAILED: i32 = 1; // At least one check reported a failed assertion
pub const INPUT_ERROR: i32 = 2; // Config, dump or I/O problem before any check ran
