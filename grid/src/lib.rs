//! Column sets and table configuration for the deck and player grids.
//!
//! The browser renders both stat tables with Tabulator. This crate decides
//! *what configuration to hand it*: which columns appear for a given viewer,
//! in what order, how cells are formatted and how rows are highlighted.
//!
//! Everything here is pure construction. Viewer capabilities are passed in
//! explicitly, so the whole pipeline is testable without a browser.
//!
//! ```
//! use mtgstats_grid::{EntityKind, LayoutVariant, ViewerCapabilities, build_columns};
//!
//! let admin = ViewerCapabilities::new(true, true);
//! let set = build_columns(EntityKind::Deck, admin, LayoutVariant::AdminOnlyStyled);
//! assert_eq!(set.columns.len(), 5);
//! assert!(set.row_rule.is_some());
//! ```

pub mod builder;
pub mod capabilities;
pub mod column;
pub mod entity;
pub mod error;
pub mod format;
pub mod rule;
pub mod table;
pub mod variant;

pub use builder::{ColumnSet, build_columns, edit_column};
pub use capabilities::ViewerCapabilities;
pub use column::{Alignment, CellFormatter, ColumnSpec, SortKind};
pub use entity::EntityKind;
pub use error::GridError;
pub use format::{coerce_number, format_percentage};
pub use rule::{HighlightTier, RowDisplayRule};
pub use table::{PAGE_SIZE, PAGE_SIZE_OPTIONS, ROW_HEIGHT, TableConfig};
pub use variant::{EditPlacement, EditPredicate, LayoutVariant};
