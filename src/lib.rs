//! Sensor Dashboard - fetches sensor time series and renders them as line charts
//!
//! This library exposes the core modules for testing and reuse.

pub mod chart;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod page;
pub mod sensor;
pub mod widget;
