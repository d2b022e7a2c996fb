//! Broadcast overlay for bot leagues.
//!
//! Polls the JSON files written by the league runner, and renders the
//! leaderboard, the match history, the current match and rotating tip cards
//! into HTML fragments that a broadcast page includes.

pub mod config;
pub mod constants;
pub mod controller;
pub mod model;
pub mod network;
pub mod surface;
pub mod widget;
