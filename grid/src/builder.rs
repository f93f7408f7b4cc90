//! Column set construction per table and viewer.

use serde::Serialize;

use crate::capabilities::ViewerCapabilities;
use crate::column::{CellFormatter, ColumnSpec};
use crate::entity::EntityKind;
use crate::rule::RowDisplayRule;
use crate::variant::{EditPlacement, LayoutVariant};

/// Fixed width of the edit column.
pub const EDIT_WIDTH: u32 = 90;

/// Ordered columns for one table plus its optional row rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSet {
    pub entity: EntityKind,
    pub columns: Vec<ColumnSpec>,
    pub row_rule: Option<RowDisplayRule>,
}

impl ColumnSet {
    pub fn fields(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.field.as_str()).collect()
    }

    /// Whether the set carries the edit action.
    pub fn has_edit_column(&self) -> bool {
        self.columns
            .iter()
            .any(|c| matches!(c.formatter, Some(CellFormatter::EditLink(_))))
    }
}

fn win_rate_column() -> ColumnSpec {
    ColumnSpec::new("Win Rate", "win_rate")
        .numeric()
        .with_width(120)
        .with_formatter(CellFormatter::Percentage)
        .filterable()
}

/// The intrinsic columns of a table, in render order.
pub fn base_columns(entity: EntityKind) -> Vec<ColumnSpec> {
    match entity {
        EntityKind::Deck => vec![
            ColumnSpec::new("Deck Name", "deck_name").filterable(),
            ColumnSpec::new("Color Identity", "color_identity")
                .with_width(130)
                .centered(),
            ColumnSpec::new("Owner", "deck_owner").with_width(150),
            win_rate_column(),
        ],
        EntityKind::Player => vec![
            ColumnSpec::new("ID", "id").numeric().with_width(80),
            ColumnSpec::new("Player Name", "player_name").filterable(),
            ColumnSpec::new("Wins", "wins").numeric().with_width(100),
            ColumnSpec::new("Total Games", "total_games")
                .numeric()
                .with_width(120),
            win_rate_column(),
        ],
    }
}

/// The synthetic edit column for a table.
pub fn edit_column(entity: EntityKind) -> ColumnSpec {
    ColumnSpec::new("", "id")
        .unsortable()
        .with_width(EDIT_WIDTH)
        .centered()
        .pinned()
        .with_formatter(CellFormatter::EditLink(entity))
}

/// Builds the column set for `entity` as seen by a viewer with
/// `capabilities` under `variant`.
///
/// The edit column is only ever added after the base columns are complete,
/// at the front or back depending on the variant. Deck tables get the
/// win-rate row rule when the variant highlights rows.
pub fn build_columns(
    entity: EntityKind,
    capabilities: ViewerCapabilities,
    variant: LayoutVariant,
) -> ColumnSet {
    let mut columns = base_columns(entity);

    let show_edit = variant.shows_edit_column(capabilities);
    if show_edit {
        let edit = edit_column(entity);
        match variant.edit_placement() {
            EditPlacement::Append => columns.push(edit),
            EditPlacement::Prepend => columns.insert(0, edit),
        }
    }

    let row_rule = (entity == EntityKind::Deck && variant.highlights_rows())
        .then(RowDisplayRule::win_rate);

    log::debug!(
        "Built {} columns for {entity} table (variant: {variant}, edit: {show_edit})",
        columns.len()
    );

    ColumnSet {
        entity,
        columns,
        row_rule,
    }
}
