//! Exit code constants for the marketgen CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, bad config)
//! - 2: Template not found
//! - 3: Bad generation request (attestation time, unresolved placeholder)
//! - 4: Catalog error (load failure or failed consistency check)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// The requested template id is not in the catalog.
pub const NOT_FOUND: i32 = 2;

/// The generation request was rejected (invalid attestation time, strict-mode placeholder).
pub const BAD_REQUEST: i32 = 3;

/// The catalog could not be loaded or failed the consistency check.
pub const CATALOG_FAILURE: i32 = 4;
