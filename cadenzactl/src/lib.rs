//! Library half of `cadenzactl`: scripted carousel simulation and view
//! preference management on top of `cadenza-core`.
#![allow(missing_docs)]

pub mod cli;
pub mod script;
