//! Column specifications and their Tabulator representation.

use serde::{Serialize, Serializer, ser::SerializeStruct};
use serde_json::Value;

use crate::entity::EntityKind;
use crate::format::{format_edit_link, format_percentage, format_plain};

/// How the grid sorts a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKind {
    #[default]
    String,
    Number,
    None,
}

impl SortKind {
    /// Tabulator sorter name, `None` for unsorted columns.
    pub fn sorter(&self) -> Option<&'static str> {
        match self {
            Self::String => Some("string"),
            Self::Number => Some("number"),
            Self::None => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
}

/// Named display function attached to a column.
///
/// The grid page registers a JS formatter under each [`CellFormatter::name`];
/// the Rust side keeps the reference implementation so the formatting rules
/// stay testable on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellFormatter {
    /// Fraction rendered as `"42.0%"`.
    Percentage,
    /// Edit button linking to `/{entity}/edit/{id}`.
    EditLink(EntityKind),
}

impl CellFormatter {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::EditLink(_) => "editLink",
        }
    }

    /// Formats one cell. `row` is the whole decoded row.
    pub fn apply(&self, cell: &Value, row: &Value) -> String {
        match self {
            Self::Percentage => format_percentage(cell),
            Self::EditLink(entity) => {
                format_edit_link(*entity, row.get("id").unwrap_or(&Value::Null))
            }
        }
    }

    fn params(&self) -> Option<Value> {
        match self {
            Self::Percentage => None,
            Self::EditLink(entity) => Some(serde_json::json!({ "entity": entity.as_str() })),
        }
    }
}

/// One column of a stat table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub title: String,
    pub field: String,
    pub sort_kind: SortKind,
    pub width: Option<u32>,
    pub alignment: Alignment,
    pub formatter: Option<CellFormatter>,
    pub filterable: bool,
    pub pinned: bool,
    pub sortable: bool,
}

impl ColumnSpec {
    /// A sortable, left-aligned string column.
    pub fn new(title: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            field: field.into(),
            sort_kind: SortKind::String,
            width: None,
            alignment: Alignment::Left,
            formatter: None,
            filterable: false,
            pinned: false,
            sortable: true,
        }
    }

    pub fn numeric(mut self) -> Self {
        self.sort_kind = SortKind::Number;
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn centered(mut self) -> Self {
        self.alignment = Alignment::Center;
        self
    }

    pub fn with_formatter(mut self, formatter: CellFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    pub fn pinned(mut self) -> Self {
        self.pinned = true;
        self
    }

    /// Disables header sorting entirely.
    pub fn unsortable(mut self) -> Self {
        self.sort_kind = SortKind::None;
        self.sortable = false;
        self
    }

    /// Renders this column's cell for one row.
    pub fn display(&self, row: &Value) -> String {
        let cell = row.get(&self.field).unwrap_or(&Value::Null);
        match &self.formatter {
            Some(formatter) => formatter.apply(cell, row),
            None => format_plain(cell),
        }
    }
}

// Field names follow Tabulator's column definition options.
impl Serialize for ColumnSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let sorter = if self.sortable {
            self.sort_kind.sorter()
        } else {
            None
        };

        let mut state = serializer.serialize_struct("ColumnSpec", 10)?;
        state.serialize_field("title", &self.title)?;
        state.serialize_field("field", &self.field)?;
        if let Some(sorter) = sorter {
            state.serialize_field("sorter", sorter)?;
        } else {
            state.skip_field("sorter")?;
        }
        if let Some(width) = self.width {
            state.serialize_field("width", &width)?;
        } else {
            state.skip_field("width")?;
        }
        state.serialize_field("hozAlign", &self.alignment)?;
        if let Some(formatter) = &self.formatter {
            state.serialize_field("formatter", formatter.name())?;
            match formatter.params() {
                Some(params) => state.serialize_field("formatterParams", &params)?,
                None => state.skip_field("formatterParams")?,
            }
        } else {
            state.skip_field("formatter")?;
            state.skip_field("formatterParams")?;
        }
        if self.filterable {
            state.serialize_field("headerFilter", "input")?;
        } else {
            state.skip_field("headerFilter")?;
        }
        state.serialize_field("headerSort", &self.sortable)?;
        state.serialize_field("frozen", &self.pinned)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_tabulator_options() {
        let column = ColumnSpec::new("Win Rate", "win_rate")
            .numeric()
            .with_width(120)
            .with_formatter(CellFormatter::Percentage)
            .filterable();

        assert_eq!(
            serde_json::to_value(&column).unwrap(),
            json!({
                "title": "Win Rate",
                "field": "win_rate",
                "sorter": "number",
                "width": 120,
                "hozAlign": "left",
                "formatter": "percentage",
                "headerFilter": "input",
                "headerSort": true,
                "frozen": false,
            })
        );
    }

    #[test]
    fn unsortable_column_has_no_sorter() {
        let column = ColumnSpec::new("", "id")
            .unsortable()
            .centered()
            .pinned()
            .with_formatter(CellFormatter::EditLink(EntityKind::Player));

        let value = serde_json::to_value(&column).unwrap();
        assert!(value.get("sorter").is_none());
        assert_eq!(value["headerSort"], json!(false));
        assert_eq!(value["frozen"], json!(true));
        assert_eq!(value["hozAlign"], json!("center"));
        assert_eq!(value["formatter"], json!("editLink"));
        assert_eq!(value["formatterParams"], json!({ "entity": "player" }));
    }

    #[test]
    fn display_uses_formatter_or_raw_value() {
        let row = json!({ "id": 9, "deck_name": "Krenko", "win_rate": "0.25" });

        let name = ColumnSpec::new("Deck Name", "deck_name");
        assert_eq!(name.display(&row), "Krenko");

        let rate = ColumnSpec::new("Win Rate", "win_rate").with_formatter(CellFormatter::Percentage);
        assert_eq!(rate.display(&row), "25.0%");

        let missing = ColumnSpec::new("Win Rate", "missing").with_formatter(CellFormatter::Percentage);
        assert_eq!(missing.display(&row), "0.0%");

        let edit = ColumnSpec::new("", "id").with_formatter(CellFormatter::EditLink(EntityKind::Deck));
        assert!(edit.display(&row).contains(r#"href="/deck/edit/9""#));
    }
}
