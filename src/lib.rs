//! Budget-constrained sizing of a wind, solar, nuclear, and storage mix.
//!
//! Hourly production for a candidate mix is balanced against demand over one
//! year with a single storage reservoir; a black-box search picks the mix
//! that needs the least backup energy.

/// Command-line interface definitions.
pub mod cli;
pub mod config;
/// Capital cost model and search bounds.
pub mod cost;
pub mod error;
pub mod generation;
/// Input file loading.
pub mod io;
pub mod logging;
pub mod report;
/// Capacity search and the minimizers behind it.
pub mod search;
pub mod series;
/// Hourly balance simulation, dispatch types, and KPIs.
pub mod sim;
