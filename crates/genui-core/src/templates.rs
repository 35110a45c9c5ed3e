//! Pre-authored dashboard prompts

use serde::Serialize;

/// One entry of the template catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Prompt handed to `generate`
    pub prompt: &'static str,
}

pub const TEMPLATES: [Template; 5] = [
    Template {
        id: "sales",
        name: "Sales Dashboard",
        description: "Revenue, orders, and sales performance",
        prompt: "Create a sales dashboard with 4 KPI cards (Revenue, Orders, Customers, AOV), \
                 a line chart showing monthly revenue trend, and a bar chart showing top products",
    },
    Template {
        id: "marketing",
        name: "Marketing Analytics",
        description: "Campaign performance and user acquisition",
        prompt: "Create a marketing dashboard with KPIs for traffic, leads, and conversion rate, \
                 a funnel chart showing the marketing funnel, and a comparison bar for channel performance",
    },
    Template {
        id: "hr",
        name: "HR Overview",
        description: "Employee metrics and team analytics",
        prompt: "Create an HR dashboard with headcount, turnover rate, and satisfaction score cards, \
                 a pie chart for department distribution, and a table of recent hires",
    },
    Template {
        id: "finance",
        name: "Financial Summary",
        description: "P&L, cash flow, and financial KPIs",
        prompt: "Create a finance dashboard with revenue, expenses, profit, and cash flow KPIs, \
                 an area chart showing monthly P&L trend, and a heatmap of expenses by category and month",
    },
    Template {
        id: "product",
        name: "Product Metrics",
        description: "User engagement and feature adoption",
        prompt: "Create a product dashboard with DAU, MAU, retention rate, and NPS score cards, \
                 a line chart showing user growth, and a comparison bar for feature usage",
    },
];

/// Look a template up by id (case-insensitive)
#[must_use]
pub fn find(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id.eq_ignore_ascii_case(id.trim()))
}
