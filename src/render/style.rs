use crate::store::{Table, Value};

/// Background color class for one table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Green,
    Yellow,
    Red,
}

impl CellStyle {
    pub fn css_color(self) -> &'static str {
        match self {
            CellStyle::Green => "green",
            CellStyle::Yellow => "yellow",
            CellStyle::Red => "red",
        }
    }
}

/// Fixed presentation mapping, not configurable: a cell reading exactly
/// `OK` is green, `BB` is red, and a null (or the literal text `None`)
/// is yellow. Everything else is unstyled.
pub fn style_for(value: &Value) -> Option<CellStyle> {
    match value {
        Value::Null => Some(CellStyle::Yellow),
        Value::Text(s) if s == "OK" => Some(CellStyle::Green),
        Value::Text(s) if s == "None" => Some(CellStyle::Yellow),
        Value::Text(s) if s == "BB" => Some(CellStyle::Red),
        _ => None,
    }
}

/// Style hints for a whole query result, row-major like the table.
pub fn style_table(table: &Table) -> Vec<Vec<Option<CellStyle>>> {
    table
        .rows
        .iter()
        .map(|row| row.iter().map(style_for).collect())
        .collect()
}
