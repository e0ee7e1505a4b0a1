//! Platform profiles for Mason.
//!
//! A profile names a target platform and carries the settings tuple that
//! platform selects (SDK, threading backend, sound backend, renderer
//! backend). Built-in profiles cover the platforms the tool knows out of
//! the box; a project can add or shadow profiles with `<name>.platform.toml`
//! files under its `platforms/` directory.

pub mod error;
pub mod parse;
pub mod profile;

pub use error::ProfileError;
pub use parse::{
    discover_profiles, find_profile, generate_template, load_profile_toml, parse_profile_toml,
    profile_to_toml, validate_profile, ValidationIssue,
};
pub use profile::PlatformProfile;
