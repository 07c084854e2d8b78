//! Shared error messages and codes, kept identical across endpoints so
//! clients can match on them.

// Message constants
pub const VALIDATION_FAILED: &str = "Request validation failed";
pub const INVALID_UUID: &str = "Invalid UUID format";
pub const UNAUTHORIZED: &str = "Authentication required";

// Error codes for client parsing
pub const CODE_VALIDATION: &str = "VALIDATION_ERROR";
pub const CODE_UUID: &str = "INVALID_UUID";
pub const CODE_NOT_FOUND: &str = "NOT_FOUND";
pub const CODE_UNAUTHORIZED: &str = "UNAUTHORIZED";
