//! Tabular props

use super::{Align, Constraints, ConstraintViolation, Record};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TableColumn {
    pub key: String,
    pub header: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TableProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Record>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub striped: Option<bool>,
}

/// How a data-grid cell is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    Text,
    Number,
    Badge,
    Progress,
    Avatar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DataGridColumn {
    pub key: String,
    pub header: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sortable: Option<bool>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub cell_type: Option<CellType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DataGridProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub columns: Vec<DataGridColumn>,
    /// Cells may hold any JSON value (badges, progress numbers, avatar urls)
    pub rows: Vec<IndexMap<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_pagination: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub striped: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hoverable: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HeatmapTableProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub x_labels: Vec<String>,
    pub y_labels: Vec<String>,
    /// Row-major: `data[y][x]`
    pub data: Vec<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_values: Option<bool>,
}

impl Constraints for TableProps {}
impl Constraints for DataGridProps {}

impl Constraints for HeatmapTableProps {
    fn check(&self) -> Result<(), ConstraintViolation> {
        if self.data.len() > self.y_labels.len() {
            return Err(ConstraintViolation::new(
                "data",
                format!(
                    "has {} rows but only {} yLabels",
                    self.data.len(),
                    self.y_labels.len()
                ),
            ));
        }
        for (y, row) in self.data.iter().enumerate() {
            if row.len() > self.x_labels.len() {
                return Err(ConstraintViolation::new(
                    format!("data[{y}]"),
                    format!(
                        "has {} cells but only {} xLabels",
                        row.len(),
                        self.x_labels.len()
                    ),
                ));
            }
        }
        Ok(())
    }
}
