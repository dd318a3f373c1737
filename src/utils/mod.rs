//! Utility functions for nsig-probe

pub mod url;

pub use self::url::*;
