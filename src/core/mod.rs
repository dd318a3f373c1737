//! Core functionality for nsig-probe

pub mod probe;

pub use probe::*;
