//! Command-line front end for the hashcard deck tool.

pub mod commands;
