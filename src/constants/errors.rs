//! Error message constants used throughout the application.

// User errors
pub const ERR_USER_NOT_FOUND: &str = "User not found";
pub const ERR_NAME_AND_EMAIL_REQUIRED: &str = "Name and email are required";
