//! State Obesity Dashboard
//!
//! Joins state-level obesity prevalence, median household income and GDP
//! tables, filters them, and renders a bubble chart and a choropleth.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
