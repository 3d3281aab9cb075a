//! # costsheet-xlsx
//!
//! Binds the costsheet repair engine's [`SheetGrid`](costsheet_core::SheetGrid)
//! trait to real XLSX files via umya-spreadsheet: open by path, cell values,
//! solid-fill repair highlights, dropdown list validators, save in place.
//!
//! ## Example
//!
//! ```no_run
//! use costsheet_core::SheetScanner;
//! use costsheet_xlsx::XlsxGrid;
//!
//! let grid = XlsxGrid::open("schedule.xlsx")?;
//! let scanner = SheetScanner::open(grid, false)?;
//! let (outcome, _grid) = scanner.scan()?;
//! println!("saved: {}", outcome.saved);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod grid;

pub use error::{Error, Result};
pub use grid::XlsxGrid;
