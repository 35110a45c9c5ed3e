//! Functional tests for the tree validator.
//!
//! Core guarantees exercised here:
//! - A well-formed tree decodes into the matching typed variants.
//! - Any defect anywhere in the tree rejects the whole tree, and the error
//!   locates the node and field at fault.
//! - Strictness: unknown types, unknown keys and misplaced children are
//!   rejected rather than stripped or coerced.
//! - Round-trip: serializing a valid tree and validating it again yields an
//!   equal tree.

use genui_schema::prelude::*;
use genui_schema::{NodeKind, ValidationErrorKind, DEFAULT_MAX_DEPTH};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{json, Value};

fn sales_dashboard() -> Value {
    json!({
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
    })
}

/// Tenet: a minimal valid leaf is accepted as-is.
#[test]
fn header_with_text_is_valid() {
    let tree = parse(&json!({ "type": "Header", "props": { "text": "Hi" } })).unwrap();
    assert_eq!(tree, UiNode::header("Hi"));
}

/// Tenet: a missing required prop is reported by field name.
#[test]
fn header_without_text_names_the_field() {
    let err = parse(&json!({ "type": "Header", "props": {} })).unwrap_err();
    assert!(matches!(err.kind, ValidationErrorKind::InvalidProps { .. }));
    assert_eq!(err.field(), Some("text"));
    assert_eq!(err.path, "$");
}

/// Tenet: one bad descendant rejects the whole tree.
///
/// The parent `Grid` is fine on its own; the unknown child must still sink
/// the entire parse rather than being dropped.
#[test]
fn unknown_child_type_fails_whole_tree() {
    let err = parse(&json!({
        "type": "Grid",
        "props": {},
        "children": [{ "type": "Bogus", "props": {} }]
    }))
    .unwrap_err();

    assert_eq!(err.kind, ValidationErrorKind::UnknownDiscriminant("Bogus".into()));
    assert_eq!(err.path, "$.children[0]");
}

#[test]
fn sales_example_decodes_into_typed_variants() {
    let tree = parse(&sales_dashboard()).unwrap();

    let UiNode::Page { props, children } = &tree else {
        panic!("root should be a Page, got {}", tree.kind());
    };
    assert_eq!(props.title, "Sales Dashboard");
    assert_eq!(children.len(), 3);

    assert!(matches!(&children[0], UiNode::Header { props } if props.text == "Sales Dashboard"));

    let UiNode::Grid { props: grid, children: cards } = &children[1] else {
        panic!("second child should be a Grid");
    };
    assert_eq!(grid.xs, Some(6.0));
    assert!(cards.iter().all(|c| c.kind() == NodeKind::StatCard));

    let UiNode::LineChart { props: chart } = &children[2] else {
        panic!("third child should be a LineChart");
    };
    assert_eq!(chart.x_axis_key, "month");
    assert_eq!(chart.lines.len(), 1);
    assert_eq!(chart.lines[0].data_key, "revenue");
    let first_row: Vec<&str> = chart.data[0].keys().map(String::as_str).collect();
    assert_eq!(first_row, vec!["month", "revenue"]);
}

/// Tenet: field paths reach into nested arrays of a deep node.
#[test]
fn nested_field_error_has_full_path() {
    let mut doc = sales_dashboard();
    doc["children"][2]["props"]["lines"][0]
        .as_object_mut()
        .unwrap()
        .remove("dataKey");

    let err = parse(&doc).unwrap_err();
    assert_eq!(err.path, "$.children[2]");
    assert_eq!(err.node_type.as_deref(), Some("LineChart"));
    assert_eq!(err.full_path(), "$.children[2].props.lines[0].dataKey");
}

#[test]
fn empty_series_breaks_constraint() {
    let err = parse(&json!({
        "type": "BarChart",
        "props": { "data": [], "xAxisKey": "x", "bars": [] }
    }))
    .unwrap_err();
    assert!(matches!(err.kind, ValidationErrorKind::Constraint { .. }));
    assert_eq!(err.field(), Some("bars"));
}

#[test]
fn out_of_range_progress_is_rejected() {
    let err = parse(&json!({
        "type": "LinearProgress",
        "props": { "value": 140, "color": "primary" }
    }))
    .unwrap_err();
    assert_eq!(err.field(), Some("value"));
}

/// Tenet: unknown props keys are rejected, never stripped.
#[test]
fn unknown_props_key_is_rejected() {
    let err = parse(&json!({
        "type": "Header",
        "props": { "text": "Hi", "fontSize": 30 }
    }))
    .unwrap_err();
    assert!(matches!(err.kind, ValidationErrorKind::InvalidProps { .. }));
    assert_eq!(err.field(), Some("fontSize"));
}

#[test]
fn unknown_node_key_is_rejected() {
    let err = parse(&json!({
        "type": "Header",
        "props": { "text": "Hi" },
        "style": {}
    }))
    .unwrap_err();
    assert_eq!(err.kind, ValidationErrorKind::UnexpectedKey("style".into()));
}

#[test]
fn envelope_errors() {
    let cases = [
        (json!("Header"), ValidationErrorKind::NotAnObject),
        (json!({ "props": {} }), ValidationErrorKind::MissingDiscriminant),
        (json!({ "type": 7, "props": {} }), ValidationErrorKind::MissingDiscriminant),
        (json!({ "type": "Header" }), ValidationErrorKind::MissingProps),
        (
            json!({ "type": "Card", "props": {} }),
            ValidationErrorKind::MissingChildren,
        ),
        (
            json!({ "type": "Header", "props": { "text": "a" }, "children": [] }),
            ValidationErrorKind::UnexpectedChildren,
        ),
        (
            json!({ "type": "Stack", "props": { "direction": "row", "spacing": 1 }, "children": {} }),
            ValidationErrorKind::InvalidChildren,
        ),
    ];

    for (doc, expected) in cases {
        let err = parse(&doc).unwrap_err();
        assert_eq!(err.kind, expected, "for {doc}");
    }
}

#[test]
fn badge_children_are_optional() {
    let bare = parse(&json!({ "type": "Badge", "props": { "content": 4 } })).unwrap();
    assert!(bare.children().is_empty());

    let wrapped = parse(&json!({
        "type": "Badge",
        "props": { "content": "new", "variant": "dot" },
        "children": [{ "type": "Text", "props": { "content": "Inbox", "align": "left" } }]
    }))
    .unwrap();
    assert_eq!(wrapped.children().len(), 1);
}

#[test]
fn null_optionals_are_absent() {
    let tree = parse(&json!({
        "type": "Card",
        "props": { "title": null },
        "children": []
    }))
    .unwrap();
    assert_eq!(
        tree.to_value(),
        json!({ "type": "Card", "props": {}, "children": [] })
    );
}

fn nest(depth: usize) -> Value {
    let mut node = json!({ "type": "Divider", "props": {} });
    for _ in 1..depth {
        node = json!({ "type": "Card", "props": {}, "children": [node] });
    }
    node
}

/// Tenet: nesting is bounded; the limit itself is still legal.
#[test]
fn depth_limit() {
    let at_limit = parse(&nest(DEFAULT_MAX_DEPTH)).unwrap();
    assert_eq!(at_limit.depth(), DEFAULT_MAX_DEPTH);

    let err = parse(&nest(DEFAULT_MAX_DEPTH + 1)).unwrap_err();
    assert_eq!(
        err.kind,
        ValidationErrorKind::DepthExceeded {
            max: DEFAULT_MAX_DEPTH
        }
    );

    let shallow = Validator::new().with_max_depth(2);
    assert!(shallow.parse(&nest(2)).is_ok());
    assert!(shallow.parse(&nest(3)).is_err());
}

#[test]
fn parse_str_separates_syntax_from_shape() {
    let syntax = parse_str("not json").unwrap_err();
    assert!(syntax.is_syntax());

    let shape = parse_str(r#"{"type":"Header","props":{}}"#).unwrap_err();
    assert!(!shape.is_syntax());
}

#[test]
fn financial_example_is_valid() {
    let tree = parse(&json!({
        "type": "Grid",
        "props": { "spacing": 2, "xs": 8 },
        "children": [
            {
                "type": "FinancialChart",
                "props": {
                    "title": "AAPL Price Action",
                    "height": 400,
                    "chartType": "candlestick",
                    "data": [
                        { "time": "10:00", "open": 170, "high": 172, "low": 169, "close": 171, "volume": 5000 }
                    ]
                }
            },
            { "type": "MarketSentiment", "props": { "value": 65, "label": "Greed", "title": "Market Mood" } },
            { "type": "StockTicker", "props": { "symbol": "AAPL", "price": 178.35, "change": 2.45 } }
        ]
    }))
    .unwrap();
    assert_eq!(tree.node_count(), 4);
}

#[test]
fn example_round_trips() {
    let tree = parse(&sales_dashboard()).unwrap();
    let text = serde_json::to_string(&tree).unwrap();
    assert_eq!(parse_str(&text).unwrap(), tree);
}

/// One sample of every kind in the catalog, exercising renamed keys,
/// string-or-number props and optional children.
fn catalog_samples() -> Vec<Value> {
    let child = json!({ "type": "Header", "props": { "text": "Inside" } });
    vec![
        json!({ "type": "Page", "props": { "title": "All kinds" }, "children": [child.clone()] }),
        json!({ "type": "Grid", "props": { "spacing": 2, "xs": 4 }, "children": [child.clone()] }),
        json!({ "type": "Stack", "props": { "direction": "row", "spacing": 1 }, "children": [child.clone()] }),
        json!({ "type": "Card", "props": { "title": "Card" }, "children": [child.clone()] }),
        json!({ "type": "Divider", "props": {} }),
        json!({ "type": "Header", "props": { "text": "Title" } }),
        json!({ "type": "Text", "props": { "content": "Body", "align": "center" } }),
        json!({ "type": "Image", "props": { "src": "https://img.example/a.png", "alt": "a" } }),
        json!({ "type": "Button", "props": { "label": "Go", "action": "refresh", "disabled": false } }),
        json!({ "type": "Input", "props": { "label": "Email", "placeholder": "you@example.com", "type": "email" } }),
        json!({ "type": "List", "props": { "items": ["one", "two"] } }),
        json!({ "type": "LineChart", "props": {
            "data": [{ "m": "Jan", "v": 1 }], "xAxisKey": "m",
            "lines": [{ "dataKey": "v", "stroke": "#1976d2", "name": "Value" }] } }),
        json!({ "type": "BarChart", "props": {
            "data": [{ "m": "Jan", "v": 1 }], "xAxisKey": "m", "layout": "horizontal",
            "bars": [{ "dataKey": "v", "fill": "#1976d2", "stackId": "a" }] } }),
        json!({ "type": "AreaChart", "props": {
            "data": [{ "m": "Jan", "v": 1 }], "xAxisKey": "m",
            "areas": [{ "dataKey": "v", "fill": "#1976d2", "stroke": "#0d47a1" }] } }),
        json!({ "type": "PieChart", "props": {
            "data": [{ "name": "A", "value": 60 }, { "name": "B", "value": 40, "fill": "#e91e63" }],
            "innerRadius": 40, "showLegend": true } }),
        json!({ "type": "ComboChart", "props": {
            "data": [{ "m": "Jan", "v": 1, "w": 2 }], "xAxisKey": "m",
            "bars": [{ "dataKey": "v", "fill": "#1976d2" }],
            "lines": [{ "dataKey": "w", "stroke": "#2e7d32" }] } }),
        json!({ "type": "ScatterChart", "props": {
            "data": [{ "x": 1, "y": 2, "z": 3, "name": "p" }], "xAxisLabel": "x", "showZAxis": true } }),
        json!({ "type": "FunnelChart", "props": {
            "data": [{ "name": "Visits", "value": 1000 }, { "name": "Buys", "value": 80 }], "showValues": true } }),
        json!({ "type": "TreemapChart", "props": {
            "data": [{ "name": "Tech", "size": 10, "children": [{ "name": "AAPL", "size": 6 }] }] } }),
        json!({ "type": "SparklineChart", "props": { "data": [1, 3, 2], "showDots": true } }),
        json!({ "type": "MiniChart", "props": { "type": "bar", "data": [1, 2, 3], "width": 80 } }),
        json!({ "type": "Table", "props": {
            "columns": [{ "key": "n", "header": "Name", "align": "left" }],
            "rows": [{ "n": "Ada" }], "striped": true } }),
        json!({ "type": "DataGrid", "props": {
            "columns": [{ "key": "s", "header": "Status", "type": "badge", "sortable": true }],
            "rows": [{ "s": "active", "extra": { "nested": [1, null] } }], "pageSize": 10 } }),
        json!({ "type": "HeatmapTable", "props": {
            "xLabels": ["Mon", "Tue"], "yLabels": ["AM"], "data": [[1, 2]], "showValues": true } }),
        json!({ "type": "StatCard", "props": { "title": "Users", "value": 1234, "trend": "neutral" } }),
        json!({ "type": "KPICard", "props": {
            "title": "MRR", "value": "$42k", "sparklineData": [1, 2, 3], "trend": "up" } }),
        json!({ "type": "MetricTrend", "props": {
            "title": "Health", "metrics": [{ "label": "Uptime", "value": "99.9%", "trend": "up" }], "layout": "vertical" } }),
        json!({ "type": "ComparisonBar", "props": {
            "items": [{ "label": "Q1", "value": 30, "maxValue": 100 }], "showPercentage": true } }),
        json!({ "type": "LinearProgress", "props": { "value": 75, "color": "secondary" } }),
        json!({ "type": "CircularProgress", "props": { "variant": "indeterminate", "color": "success" } }),
        json!({ "type": "ProgressRing", "props": { "value": 3, "maxValue": 5, "size": "large" } }),
        json!({ "type": "RadialGauge", "props": { "title": "CPU", "value": 42, "maxValue": 100 } }),
        json!({ "type": "Alert", "props": { "severity": "warning", "message": "Careful", "dismissible": true } }),
        json!({ "type": "Timer", "props": { "initialSeconds": 90, "autoStart": false, "size": "small" } }),
        json!({ "type": "Countdown", "props": { "targetDate": "2026-01-01T00:00:00Z", "showSeconds": false } }),
        json!({ "type": "Rating", "props": { "value": 4.5, "max": 5, "readOnly": true } }),
        json!({ "type": "Stepper", "props": {
            "activeStep": 1, "steps": [{ "label": "Plan" }, { "label": "Ship", "description": "Go live" }],
            "orientation": "horizontal" } }),
        json!({ "type": "Accordion", "props": { "items": [{ "title": "Q", "content": "A", "defaultExpanded": true }] } }),
        json!({ "type": "Badge", "props": { "content": 5, "color": "error", "max": 99 }, "children": [child.clone()] }),
        json!({ "type": "Switch", "props": { "label": "Live", "defaultChecked": true, "size": "small" } }),
        json!({ "type": "Slider", "props": { "min": 0, "max": 10, "defaultValue": 5, "color": "primary" } }),
        json!({ "type": "Skeleton", "props": { "variant": "rounded", "width": "100%", "height": 40, "animation": "false" } }),
        json!({ "type": "Avatar", "props": { "name": "Ada Lovelace", "variant": "rounded", "size": "medium" } }),
        json!({ "type": "AvatarGroup", "props": { "max": 3, "avatars": [{ "name": "A" }, { "src": "https://img.example/b.png" }] } }),
        json!({ "type": "Tooltip", "props": { "title": "Hint", "placement": "top", "arrow": true }, "children": [child] }),
        json!({ "type": "StockTicker", "props": { "symbol": "MSFT", "price": "412.10", "change": -1.5, "trendData": [1, 2] } }),
        json!({ "type": "MarketSentiment", "props": { "value": 20, "label": "Fear" } }),
        json!({ "type": "StockWatchlist", "props": { "items": [
            { "symbol": "NVDA", "name": "Nvidia", "price": 900, "change": 12, "changePercent": 1.3, "volume": "40M" }] } }),
        json!({ "type": "FinancialChart", "props": {
            "chartType": "baseline", "data": [{ "time": 1_700_000_000, "value": 10 }, { "time": "2025-01-02", "value": 11 }],
            "colors": { "upColor": "#26a69a", "lineColor": "#2962ff" } } }),
    ]
}

fn catalog_nodes() -> Vec<UiNode> {
    catalog_samples()
        .iter()
        .map(|value| parse(value).unwrap())
        .collect()
}

/// Tenet: every kind in the catalog survives serialize-then-validate.
#[test]
fn every_catalog_kind_round_trips() {
    let nodes = catalog_nodes();

    let sampled: std::collections::BTreeSet<&str> = nodes.iter().map(|n| n.kind().as_str()).collect();
    let catalog: std::collections::BTreeSet<&str> = NodeKind::ALL.iter().map(|k| k.as_str()).collect();
    assert_eq!(sampled, catalog);

    for node in &nodes {
        let back = parse(&node.to_value()).unwrap();
        assert_eq!(&back, node);
    }
}

#[test]
fn renamed_and_mixed_props_serialize_under_their_wire_names() {
    let by_kind = |kind: NodeKind| {
        catalog_nodes()
            .into_iter()
            .find(|n| n.kind() == kind)
            .unwrap()
            .to_value()
    };

    assert_eq!(by_kind(NodeKind::KpiCard)["type"], "KPICard");
    assert_eq!(by_kind(NodeKind::KpiCard)["props"]["value"], "$42k");
    assert_eq!(by_kind(NodeKind::MiniChart)["props"]["type"], "bar");
    assert_eq!(by_kind(NodeKind::DataGrid)["props"]["columns"][0]["type"], "badge");
    assert_eq!(by_kind(NodeKind::Input)["props"]["type"], "email");
    assert_eq!(by_kind(NodeKind::Skeleton)["props"]["animation"], "false");
    assert_eq!(by_kind(NodeKind::Skeleton)["props"]["width"], "100%");
    assert!(by_kind(NodeKind::StatCard)["props"]["value"].is_number());
    assert!(by_kind(NodeKind::StockTicker)["props"]["price"].is_string());
    assert_eq!(by_kind(NodeKind::Badge)["children"].as_array().map(Vec::len), Some(1));
    assert!(by_kind(NodeKind::FinancialChart)["props"]["data"][0]["time"].is_number());
    assert!(by_kind(NodeKind::FinancialChart)["props"]["data"][1]["time"].is_string());
}

fn leaf() -> impl Strategy<Value = UiNode> {
    prop_oneof![
        prop::sample::select(catalog_nodes()),
        "[a-zA-Z ]{0,16}".prop_map(UiNode::header),
        ("[a-z ]{0,24}", prop_oneof![Just(Align::Left), Just(Align::Center), Just(Align::Right)])
            .prop_map(|(content, align)| UiNode::text(content, align)),
        Just(UiNode::Divider {
            props: DividerProps::default()
        }),
        (0u32..=100).prop_map(|v| UiNode::LinearProgress {
            props: LinearProgressProps {
                value: f64::from(v),
                color: BrandColor::Primary,
            }
        }),
        ("[A-Za-z]{1,10}", 0u32..100_000).prop_map(|(title, v)| UiNode::StatCard {
            props: StatCardProps {
                title,
                value: Scalar::Number(f64::from(v)),
                change: None,
                change_label: None,
                trend: Some(Trend::Up),
                icon: None,
            }
        }),
    ]
}

fn tree() -> impl Strategy<Value = UiNode> {
    leaf().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(|children| UiNode::Card {
                props: CardProps::default(),
                children,
            }),
            prop::collection::vec(inner.clone(), 0..4).prop_map(|children| UiNode::Grid {
                props: GridProps {
                    spacing: Some(2.0),
                    xs: None,
                },
                children,
            }),
            ("[A-Za-z ]{1,12}", prop::collection::vec(inner, 0..4))
                .prop_map(|(title, children)| UiNode::page(title, children)),
        ]
    })
}

proptest! {
    #[test]
    fn prop_serialize_then_parse_is_identity(tree in tree()) {
        let value = serde_json::to_value(&tree).unwrap();
        let back = parse(&value).unwrap();
        prop_assert_eq!(back, tree);
    }

    #[test]
    fn prop_parsed_trees_only_contain_catalog_kinds(tree in tree()) {
        let back = parse(&tree.to_value()).unwrap();
        let mut seen = Vec::new();
        back.walk(&mut |node, _| seen.push(node.kind().as_str()));
        for tag in seen {
            prop_assert!(tag.parse::<NodeKind>().is_ok());
        }
    }
}
