//! Navigation and suggestion settings
//!
//! This module provides access to wayfinder-conf.

pub use wayfinder_conf::*;
