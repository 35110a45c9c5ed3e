//! Fixture trees and a fixed clock

use chrono::{DateTime, TimeZone, Utc};
use genui_schema::props::{NamedValue, PieChartProps};
use genui_schema::UiNode;

/// The documented sales dashboard example
pub const SALES_EXAMPLE_JSON: &str = genui_core::prompts::EXAMPLE_SALES;

/// What [`fixed_clock`] renders as in request messages
pub const FIXED_DATE: &str = "2025-06-01T12:00:00.000Z";

pub fn fixed_clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

pub fn sales_tree() -> UiNode {
    genui_schema::parse_str(SALES_EXAMPLE_JSON).unwrap()
}

pub fn pie_chart() -> UiNode {
    UiNode::PieChart {
        props: PieChartProps {
            title: Some("Revenue by Region".into()),
            description: None,
            data: vec![
                NamedValue {
                    name: "North".into(),
                    value: 42.0,
                    fill: Some("#1976d2".into()),
                },
                NamedValue {
                    name: "South".into(),
                    value: 58.0,
                    fill: None,
                },
            ],
            inner_radius: None,
            outer_radius: None,
            show_labels: Some(true),
            show_legend: None,
        },
    }
}

/// `tree` with [`pie_chart`] appended to the root's children
pub fn with_pie_chart(tree: &UiNode) -> UiNode {
    match tree.clone() {
        UiNode::Page { props, mut children } => {
            children.push(pie_chart());
            UiNode::Page { props, children }
        }
        other => panic!("expected a Page root, got {}", other.kind()),
    }
}

/// JSON text of `tree`
pub fn to_json(tree: &UiNode) -> String {
    serde_json::to_string(tree).unwrap()
}
