//! Interactive explorer for US bikeshare trip data.
//!
//! The `bikeshare-explorer` binary drives [`app::ExplorerApp`] over stdin
//! and stdout; `generate_sample` writes city files the loader accepts.

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod stats;
pub mod ui;
