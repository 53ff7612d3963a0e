//! Command line front end: builds an in-process engine from configuration
//! and prints results.

pub mod commands;
pub mod display;
