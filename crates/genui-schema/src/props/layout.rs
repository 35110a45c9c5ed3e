//! Layout containers

use super::Constraints;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Root wrapper of a dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PageProps {
    pub title: String,
}

/// Responsive grid; the only node whose props drive the layout of its children
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GridProps {
    /// Gap between cells, in theme spacing units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<f64>,
    /// Columns (out of 12) each child spans
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xs: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum StackDirection {
    Row,
    Column,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StackProps {
    pub direction: StackDirection,
    pub spacing: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CardProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// `Divider` takes no props; the object must still be present and empty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DividerProps {}

impl Constraints for PageProps {}
impl Constraints for GridProps {}
impl Constraints for StackProps {}
impl Constraints for CardProps {}
impl Constraints for DividerProps {}
