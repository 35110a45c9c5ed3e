//! System instructions and few-shot examples sent with every request

use genui_schema::{Category, NodeKind};
use once_cell::sync::Lazy;

/// Few-shot example: sales dashboard
pub const EXAMPLE_SALES: &str = r##"{
  "type": "Page",
  "props": { "title": "Sales Dashboard" },
  "children": [
    { "type": "Header", "props": { "text": "Sales Dashboard" } },
    {
      "type": "Grid",
      "props": { "spacing": 2, "xs": 6 },
      "children": [
        { "type": "StatCard", "props": { "title": "Revenue", "value": "$124,500", "change": 12, "trend": "up" } },
        { "type": "StatCard", "props": { "title": "Orders", "value": "1,234", "change": 8, "trend": "up" } }
      ]
    },
    {
      "type": "LineChart",
      "props": {
        "title": "Monthly Revenue",
        "data": [
          { "month": "Jan", "revenue": 45000 },
          { "month": "Feb", "revenue": 52000 },
          { "month": "Mar", "revenue": 48000 },
          { "month": "Apr", "revenue": 61000 }
        ],
        "xAxisKey": "month",
        "lines": [{ "dataKey": "revenue", "stroke": "#1976d2", "name": "Revenue" }]
      }
    }
  ]
}"##;

/// Few-shot example: stock market overview
pub const EXAMPLE_STOCKS: &str = r##"{
  "type": "Page",
  "props": { "title": "Market Overview" },
  "children": [
    { "type": "Header", "props": { "text": "Stock Market Analysis" } },
    {
      "type": "Grid",
      "props": { "spacing": 2, "xs": 3 },
      "children": [
        { "type": "StockTicker", "props": { "symbol": "AAPL", "name": "Apple Inc.", "price": 178.35, "change": 2.45, "changePercent": 1.4, "trendData": [170, 172, 171, 175, 174, 178] } },
        { "type": "StockTicker", "props": { "symbol": "TSLA", "name": "Tesla, Inc.", "price": 245.50, "change": -5.20, "changePercent": -2.1, "trendData": [250, 248, 252, 246, 240, 245] } },
        { "type": "StockTicker", "props": { "symbol": "NVDA", "name": "NVIDIA Corp.", "price": 485.00, "change": 12.00, "changePercent": 2.5, "trendData": [460, 470, 465, 475, 480, 485] } },
        { "type": "MarketSentiment", "props": { "value": 65, "label": "Greed", "title": "Market Mood" } }
      ]
    },
    {
      "type": "Grid",
      "props": { "spacing": 2, "xs": 6 },
      "children": [
        {
          "type": "FinancialChart",
          "props": {
            "title": "AAPL Price Action",
            "height": 400,
            "chartType": "candlestick",
            "data": [
              { "time": "10:00", "open": 170, "high": 172, "low": 169, "close": 171, "volume": 5000 },
              { "time": "11:00", "open": 171, "high": 174, "low": 171, "close": 173, "volume": 7000 },
              { "time": "12:00", "open": 173, "high": 173, "low": 171, "close": 172, "volume": 4000 },
              { "time": "13:00", "open": 172, "high": 175, "low": 172, "close": 174, "volume": 6000 },
              { "time": "14:00", "open": 174, "high": 176, "low": 174, "close": 175, "volume": 8000 }
            ]
          }
        },
        {
          "type": "StockWatchlist",
          "props": {
            "title": "Top Gainers",
            "items": [
              { "symbol": "AMD", "name": "Adv. Micro Devices", "price": 110.25, "change": 5.4, "changePercent": 5.1 },
              { "symbol": "AMZN", "name": "Amazon.com", "price": 145.00, "change": 2.1, "changePercent": 1.4 },
              { "symbol": "GOOGL", "name": "Alphabet Inc.", "price": 138.50, "change": 0.5, "changePercent": 0.3 }
            ]
          }
        }
      ]
    }
  ]
}"##;

/// Few-shot example: KPI cards
pub const EXAMPLE_KPIS: &str = r##"{
  "type": "Page",
  "props": { "title": "KPI Overview" },
  "children": [
    {
      "type": "Grid",
      "props": { "spacing": 2, "xs": 4 },
      "children": [
        { "type": "KPICard", "props": { "title": "Active Users", "value": "12,450", "change": 15, "trend": "up", "sparklineData": [100, 120, 115, 140, 155], "color": "#1976d2" } },
        { "type": "KPICard", "props": { "title": "Revenue", "value": "$89,200", "change": 8, "trend": "up", "sparklineData": [70, 75, 82, 78, 89], "color": "#2e7d32" } },
        { "type": "KPICard", "props": { "title": "Conversion", "value": "3.2%", "change": -2, "trend": "down", "color": "#d32f2f" } }
      ]
    }
  ]
}"##;

/// `(request, response)` pairs shown to the model
pub const FEW_SHOT_EXAMPLES: [(&str, &str); 3] = [
    ("Create a simple sales dashboard", EXAMPLE_SALES),
    ("Show me a stock dashboard for Apple and Tesla", EXAMPLE_STOCKS),
    ("Show 3 KPI cards for users, revenue, and conversion", EXAMPLE_KPIS),
];

const RULES: &str = "\
IMPORTANT RULES:
1. Always return a single valid JSON object describing one UI tree
2. Use the \"Page\" component as the root wrapper
3. Every node has \"type\" and \"props\"; only container nodes have \"children\"
4. For data visualizations, use realistic, internally consistent sample data
5. Prefer Grid for layouts with multiple cards; divide the 12 columns evenly by child count (xs = 12 / cards per row)
6. Use semantic colors: green for positive, red for negative trends
7. Do not invent component types or props that are not listed below";

static DASHBOARD_SYSTEM_PROMPT: Lazy<String> = Lazy::new(|| {
    let mut prompt = String::from(
        "You are GenUI, an AI dashboard builder that creates data visualization components.\n\n",
    );
    prompt.push_str(RULES);
    prompt.push_str("\n\n");
    prompt.push_str(&catalog());
    for (i, (request, response)) in FEW_SHOT_EXAMPLES.iter().enumerate() {
        prompt.push_str(&format!(
            "\nEXAMPLE {}:\nUser: \"{request}\"\nResponse:\n{response}\n",
            i + 1
        ));
    }
    prompt.push_str(
        "\nNow generate UI for the user's request. Return ONLY valid JSON, no markdown or explanation.",
    );
    prompt
});

/// Instruction for `generate`
#[must_use]
pub fn dashboard_system_prompt() -> &'static str {
    &DASHBOARD_SYSTEM_PROMPT
}

/// Instruction for `refine`
pub const REFINEMENT_SYSTEM_PROMPT: &str = "\
You are GenUI, modifying an existing dashboard based on user instructions.

You will receive:
1. The current dashboard JSON
2. The user's modification request

Return the COMPLETE updated JSON with the requested changes.
Do NOT return partial updates or diffs - return the full tree.

MODIFICATION EXAMPLES:
- \"Add a pie chart\" -> Add a PieChart component to children
- \"Change the title\" -> Update the Header text
- \"Make it blue\" -> Update color props to blue variants
- \"Remove the table\" -> Remove that component from children

Return ONLY valid JSON, no markdown or explanation.";

/// Catalog listing, one line per category
#[must_use]
pub fn catalog() -> String {
    let mut out = String::from("AVAILABLE COMPONENTS:\n");
    for category in Category::ALL {
        let names: Vec<&str> = category.kinds().map(NodeKind::as_str).collect();
        out.push_str(&format!("- {}: {}\n", category.label(), names.join(", ")));
    }
    let containers: Vec<&str> = NodeKind::ALL
        .into_iter()
        .filter(|k| k.is_container())
        .map(NodeKind::as_str)
        .collect();
    out.push_str(&format!("Containers (may have children): {}\n", containers.join(", ")));
    out
}
