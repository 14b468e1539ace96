//! Constants used throughout the pfeps-session library.
//!
//! This module provides central definitions for the persisted-storage keys
//! shared by the session manager and the theme preference.

/// Storage key holding the opaque session token.
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the serialized authenticated user.
pub const USER_KEY: &str = "user";

/// Storage key holding the theme preference.
///
/// Only the exact value `"light"` selects the light theme; any other value
/// (or absence) means dark.
pub const THEME_KEY: &str = "theme";
