//! Health insurance claims dashboard.
//!
//! [`data`] holds the filtering and aggregation core; [`app`], [`state`],
//! [`ui`] and [`color`] are the egui front end that drives it.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
