//! Interactive viewer for National Family Health Survey (NFHS) indicator exports.
//!
//! The [`data`] layer loads a survey table once and answers the dashboard's
//! queries; [`state`] holds the selections and cached results independent of
//! rendering.

pub mod color;
pub mod config;
pub mod data;
pub mod state;
