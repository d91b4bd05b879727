//! Round damage info - per-round damage accounting for multiplayer matches
//!
//! The core tracks damage exchanged between players, ranks it into
//! summaries, and decides when summaries are shown and when state resets:
//! - `damage`: match ledger, rolling center-screen totals, aggregation
//! - `lifecycle`: event handling across spawns, deaths and rounds
//! - `render`: console, center and chat text
//! - `host`: traits the host platform implements, plus the replay roster

pub mod app;
pub mod config;
pub mod damage;
pub mod host;
pub mod lifecycle;
pub mod render;
