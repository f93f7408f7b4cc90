//! The configuration object handed to the grid widget.

use serde::Serialize;
use serde_json::Value;

use crate::builder::{ColumnSet, build_columns};
use crate::capabilities::ViewerCapabilities;
use crate::column::ColumnSpec;
use crate::entity::EntityKind;
use crate::rule::{HighlightTier, RowDisplayRule};
use crate::variant::LayoutVariant;

pub const PAGE_SIZE: u32 = 25;
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [10, 25, 50, 100];
pub const ROW_HEIGHT: u32 = 60;

/// Tabulator options for one stat table.
///
/// Serializes with Tabulator's option names, so the page can pass the JSON
/// straight to `new Tabulator(selector, config)` after swapping the named
/// formatters and `rowFormatter` description for its callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    #[serde(rename = "ajaxURL")]
    pub data_source_url: String,
    pub layout: &'static str,
    pub pagination: &'static str,
    pub pagination_size: u32,
    pub pagination_size_selector: Vec<u32>,
    pub row_height: u32,
    pub columns: Vec<ColumnSpec>,
    #[serde(rename = "rowFormatter", skip_serializing_if = "Option::is_none")]
    pub row_rule: Option<RowDisplayRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsive_layout: Option<&'static str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub resizable_columns: bool,
}

impl TableConfig {
    /// Wraps a column set with the default pagination and sizing.
    pub fn from_column_set(set: ColumnSet, variant: LayoutVariant) -> Self {
        let responsive = variant.is_responsive();
        Self {
            data_source_url: set.entity.data_source_url().to_string(),
            layout: "fitColumns",
            pagination: "local",
            pagination_size: PAGE_SIZE,
            pagination_size_selector: PAGE_SIZE_OPTIONS.to_vec(),
            row_height: ROW_HEIGHT,
            columns: set.columns,
            row_rule: set.row_rule,
            responsive_layout: responsive.then_some("collapse"),
            resizable_columns: responsive,
        }
    }

    /// Builds the complete configuration for one table and viewer.
    pub fn build(
        entity: EntityKind,
        capabilities: ViewerCapabilities,
        variant: LayoutVariant,
    ) -> Self {
        Self::from_column_set(build_columns(entity, capabilities, variant), variant)
    }

    /// The cells of one row as the grid would display them.
    pub fn display_row(&self, row: &Value) -> Vec<String> {
        self.columns.iter().map(|column| column.display(row)).collect()
    }

    /// Highlight tier for one row, `None` when the table has no row rule.
    pub fn row_tier(&self, row: &Value) -> HighlightTier {
        self.row_rule
            .as_ref()
            .map(|rule| rule.classify_row(row))
            .unwrap_or(HighlightTier::None)
    }

    /// Background color override for one row.
    pub fn row_style(&self, row: &Value) -> Option<&'static str> {
        self.row_tier(row).color()
    }
}
