//! Platform-independent logic for the POS admin panel widgets.
//!
//! Everything in this crate compiles natively and is unit tested with plain
//! `cargo test`. The browser layer (`pos-widgets`) is a thin shell that feeds
//! DOM text and attributes into these functions and writes the results back.
//!
//! - `axis`, `chart`, `kpi`, `counter`: dashboard chart and metric helpers
//! - `theme`: dark/light preference resolution and persistence
//! - `sort`, `columns`, `selection`, `bulk`: table enhancement state
//! - `store`: key/value persistence seam and storage-key derivation
//! - `config`: the page-supplied initialization configuration

pub mod axis;
pub mod bulk;
pub mod chart;
pub mod columns;
pub mod config;
pub mod counter;
pub mod error;
pub mod kpi;
pub mod selection;
pub mod sort;
pub mod store;
pub mod theme;
