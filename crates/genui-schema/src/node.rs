//! The dashboard tree
//!
//! [`UiNode`] is a closed sum type: one variant per catalog entry, each
//! carrying the `props` struct for that kind and, for containers, its
//! children. It serializes to `{ "type": ..., "props": {...}, "children": [...] }`.
//!
//! Deserializing a `UiNode` always goes through [`Validator`](crate::Validator),
//! so a tree read back from storage is held to the same rules as one produced
//! by a model.

use crate::props::*;
use crate::validate::Validator;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Grouping used when presenting the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Layout,
    Text,
    Input,
    Chart,
    Table,
    Metric,
    Progress,
    Utility,
    Financial,
}

impl Category {
    /// All categories in presentation order
    pub const ALL: [Category; 9] = [
        Category::Layout,
        Category::Text,
        Category::Input,
        Category::Chart,
        Category::Table,
        Category::Metric,
        Category::Progress,
        Category::Utility,
        Category::Financial,
    ];

    /// Human-readable label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Layout => "Layout",
            Category::Text => "Text",
            Category::Input => "Input",
            Category::Chart => "Charts",
            Category::Table => "Data",
            Category::Metric => "Metrics",
            Category::Progress => "Progress",
            Category::Utility => "Utility",
            Category::Financial => "Financial",
        }
    }

    /// Kinds belonging to this category, in catalog order
    pub fn kinds(self) -> impl Iterator<Item = NodeKind> {
        NodeKind::ALL.into_iter().filter(move |k| k.category() == self)
    }
}

/// The discriminant of a [`UiNode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Page,
    Grid,
    Stack,
    Card,
    Divider,
    Header,
    Text,
    Image,
    Button,
    Input,
    List,
    LineChart,
    BarChart,
    AreaChart,
    PieChart,
    ComboChart,
    ScatterChart,
    FunnelChart,
    TreemapChart,
    SparklineChart,
    MiniChart,
    Table,
    DataGrid,
    HeatmapTable,
    StatCard,
    KpiCard,
    MetricTrend,
    ComparisonBar,
    LinearProgress,
    CircularProgress,
    ProgressRing,
    RadialGauge,
    Alert,
    Timer,
    Countdown,
    Rating,
    Stepper,
    Accordion,
    Badge,
    Switch,
    Slider,
    Skeleton,
    Avatar,
    AvatarGroup,
    Tooltip,
    StockTicker,
    MarketSentiment,
    StockWatchlist,
    FinancialChart,
}

/// How a kind treats the `children` key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildPolicy {
    /// `children` must be present
    Required,
    /// `children` may be present
    Optional,
    /// `children` must be absent
    Forbidden,
}

impl NodeKind {
    /// Every kind, in catalog order
    pub const ALL: [NodeKind; 49] = [
        NodeKind::Page,
        NodeKind::Grid,
        NodeKind::Stack,
        NodeKind::Card,
        NodeKind::Divider,
        NodeKind::Header,
        NodeKind::Text,
        NodeKind::Image,
        NodeKind::Button,
        NodeKind::Input,
        NodeKind::List,
        NodeKind::LineChart,
        NodeKind::BarChart,
        NodeKind::AreaChart,
        NodeKind::PieChart,
        NodeKind::ComboChart,
        NodeKind::ScatterChart,
        NodeKind::FunnelChart,
        NodeKind::TreemapChart,
        NodeKind::SparklineChart,
        NodeKind::MiniChart,
        NodeKind::Table,
        NodeKind::DataGrid,
        NodeKind::HeatmapTable,
        NodeKind::StatCard,
        NodeKind::KpiCard,
        NodeKind::MetricTrend,
        NodeKind::ComparisonBar,
        NodeKind::LinearProgress,
        NodeKind::CircularProgress,
        NodeKind::ProgressRing,
        NodeKind::RadialGauge,
        NodeKind::Alert,
        NodeKind::Timer,
        NodeKind::Countdown,
        NodeKind::Rating,
        NodeKind::Stepper,
        NodeKind::Accordion,
        NodeKind::Badge,
        NodeKind::Switch,
        NodeKind::Slider,
        NodeKind::Skeleton,
        NodeKind::Avatar,
        NodeKind::AvatarGroup,
        NodeKind::Tooltip,
        NodeKind::StockTicker,
        NodeKind::MarketSentiment,
        NodeKind::StockWatchlist,
        NodeKind::FinancialChart,
    ];

    /// The `type` tag as it appears on the wire
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Page => "Page",
            NodeKind::Grid => "Grid",
            NodeKind::Stack => "Stack",
            NodeKind::Card => "Card",
            NodeKind::Divider => "Divider",
            NodeKind::Header => "Header",
            NodeKind::Text => "Text",
            NodeKind::Image => "Image",
            NodeKind::Button => "Button",
            NodeKind::Input => "Input",
            NodeKind::List => "List",
            NodeKind::LineChart => "LineChart",
            NodeKind::BarChart => "BarChart",
            NodeKind::AreaChart => "AreaChart",
            NodeKind::PieChart => "PieChart",
            NodeKind::ComboChart => "ComboChart",
            NodeKind::ScatterChart => "ScatterChart",
            NodeKind::FunnelChart => "FunnelChart",
            NodeKind::TreemapChart => "TreemapChart",
            NodeKind::SparklineChart => "SparklineChart",
            NodeKind::MiniChart => "MiniChart",
            NodeKind::Table => "Table",
            NodeKind::DataGrid => "DataGrid",
            NodeKind::HeatmapTable => "HeatmapTable",
            NodeKind::StatCard => "StatCard",
            NodeKind::KpiCard => "KPICard",
            NodeKind::MetricTrend => "MetricTrend",
            NodeKind::ComparisonBar => "ComparisonBar",
            NodeKind::LinearProgress => "LinearProgress",
            NodeKind::CircularProgress => "CircularProgress",
            NodeKind::ProgressRing => "ProgressRing",
            NodeKind::RadialGauge => "RadialGauge",
            NodeKind::Alert => "Alert",
            NodeKind::Timer => "Timer",
            NodeKind::Countdown => "Countdown",
            NodeKind::Rating => "Rating",
            NodeKind::Stepper => "Stepper",
            NodeKind::Accordion => "Accordion",
            NodeKind::Badge => "Badge",
            NodeKind::Switch => "Switch",
            NodeKind::Slider => "Slider",
            NodeKind::Skeleton => "Skeleton",
            NodeKind::Avatar => "Avatar",
            NodeKind::AvatarGroup => "AvatarGroup",
            NodeKind::Tooltip => "Tooltip",
            NodeKind::StockTicker => "StockTicker",
            NodeKind::MarketSentiment => "MarketSentiment",
            NodeKind::StockWatchlist => "StockWatchlist",
            NodeKind::FinancialChart => "FinancialChart",
        }
    }

    #[must_use]
    pub fn category(self) -> Category {
        use NodeKind::*;
        match self {
            Page | Grid | Stack | Card | Divider => Category::Layout,
            Header | Text | Image => Category::Text,
            Button | Input | List => Category::Input,
            LineChart | BarChart | AreaChart | PieChart | ComboChart | ScatterChart
            | FunnelChart | TreemapChart | SparklineChart | MiniChart => Category::Chart,
            Table | DataGrid | HeatmapTable => Category::Table,
            StatCard | KpiCard | MetricTrend | ComparisonBar => Category::Metric,
            LinearProgress | CircularProgress | ProgressRing | RadialGauge => Category::Progress,
            Alert | Timer | Countdown | Rating | Stepper | Accordion | Badge | Switch | Slider
            | Skeleton | Avatar | AvatarGroup | Tooltip => Category::Utility,
            StockTicker | MarketSentiment | StockWatchlist | FinancialChart => Category::Financial,
        }
    }

    #[must_use]
    pub fn child_policy(self) -> ChildPolicy {
        match self {
            NodeKind::Page | NodeKind::Grid | NodeKind::Stack | NodeKind::Card | NodeKind::Tooltip => {
                ChildPolicy::Required
            }
            NodeKind::Badge => ChildPolicy::Optional,
            _ => ChildPolicy::Forbidden,
        }
    }

    /// Whether nodes of this kind may nest other nodes
    #[inline]
    #[must_use]
    pub fn is_container(self) -> bool {
        self.child_policy() != ChildPolicy::Forbidden
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a `type` tag is not in the catalog
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown node type '{0}'")]
pub struct UnknownKind(pub String);

impl FromStr for NodeKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// One node of a dashboard tree
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(tag = "type", deny_unknown_fields)]
pub enum UiNode {
    Page { props: PageProps, children: Vec<UiNode> },
    Grid { props: GridProps, children: Vec<UiNode> },
    Stack { props: StackProps, children: Vec<UiNode> },
    Card { props: CardProps, children: Vec<UiNode> },
    Divider { props: DividerProps },
    Header { props: HeaderProps },
    Text { props: TextProps },
    Image { props: ImageProps },
    Button { props: ButtonProps },
    Input { props: InputProps },
    List { props: ListProps },
    LineChart { props: LineChartProps },
    BarChart { props: BarChartProps },
    AreaChart { props: AreaChartProps },
    PieChart { props: PieChartProps },
    ComboChart { props: ComboChartProps },
    ScatterChart { props: ScatterChartProps },
    FunnelChart { props: FunnelChartProps },
    TreemapChart { props: TreemapChartProps },
    SparklineChart { props: SparklineChartProps },
    MiniChart { props: MiniChartProps },
    Table { props: TableProps },
    DataGrid { props: DataGridProps },
    HeatmapTable { props: HeatmapTableProps },
    StatCard { props: StatCardProps },
    #[serde(rename = "KPICard")]
    KpiCard { props: KpiCardProps },
    MetricTrend { props: MetricTrendProps },
    ComparisonBar { props: ComparisonBarProps },
    LinearProgress { props: LinearProgressProps },
    CircularProgress { props: CircularProgressProps },
    ProgressRing { props: ProgressRingProps },
    RadialGauge { props: RadialGaugeProps },
    Alert { props: AlertProps },
    Timer { props: TimerProps },
    Countdown { props: CountdownProps },
    Rating { props: RatingProps },
    Stepper { props: StepperProps },
    Accordion { props: AccordionProps },
    Badge {
        props: BadgeProps,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        children: Option<Vec<UiNode>>,
    },
    Switch { props: SwitchProps },
    Slider { props: SliderProps },
    Skeleton { props: SkeletonProps },
    Avatar { props: AvatarProps },
    AvatarGroup { props: AvatarGroupProps },
    Tooltip { props: TooltipProps, children: Vec<UiNode> },
    StockTicker { props: StockTickerProps },
    MarketSentiment { props: MarketSentimentProps },
    StockWatchlist { props: StockWatchlistProps },
    FinancialChart { props: FinancialChartProps },
}

impl UiNode {
    /// The discriminant of this node
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            UiNode::Page { .. } => NodeKind::Page,
            UiNode::Grid { .. } => NodeKind::Grid,
            UiNode::Stack { .. } => NodeKind::Stack,
            UiNode::Card { .. } => NodeKind::Card,
            UiNode::Divider { .. } => NodeKind::Divider,
            UiNode::Header { .. } => NodeKind::Header,
            UiNode::Text { .. } => NodeKind::Text,
            UiNode::Image { .. } => NodeKind::Image,
            UiNode::Button { .. } => NodeKind::Button,
            UiNode::Input { .. } => NodeKind::Input,
            UiNode::List { .. } => NodeKind::List,
            UiNode::LineChart { .. } => NodeKind::LineChart,
            UiNode::BarChart { .. } => NodeKind::BarChart,
            UiNode::AreaChart { .. } => NodeKind::AreaChart,
            UiNode::PieChart { .. } => NodeKind::PieChart,
            UiNode::ComboChart { .. } => NodeKind::ComboChart,
            UiNode::ScatterChart { .. } => NodeKind::ScatterChart,
            UiNode::FunnelChart { .. } => NodeKind::FunnelChart,
            UiNode::TreemapChart { .. } => NodeKind::TreemapChart,
            UiNode::SparklineChart { .. } => NodeKind::SparklineChart,
            UiNode::MiniChart { .. } => NodeKind::MiniChart,
            UiNode::Table { .. } => NodeKind::Table,
            UiNode::DataGrid { .. } => NodeKind::DataGrid,
            UiNode::HeatmapTable { .. } => NodeKind::HeatmapTable,
            UiNode::StatCard { .. } => NodeKind::StatCard,
            UiNode::KpiCard { .. } => NodeKind::KpiCard,
            UiNode::MetricTrend { .. } => NodeKind::MetricTrend,
            UiNode::ComparisonBar { .. } => NodeKind::ComparisonBar,
            UiNode::LinearProgress { .. } => NodeKind::LinearProgress,
            UiNode::CircularProgress { .. } => NodeKind::CircularProgress,
            UiNode::ProgressRing { .. } => NodeKind::ProgressRing,
            UiNode::RadialGauge { .. } => NodeKind::RadialGauge,
            UiNode::Alert { .. } => NodeKind::Alert,
            UiNode::Timer { .. } => NodeKind::Timer,
            UiNode::Countdown { .. } => NodeKind::Countdown,
            UiNode::Rating { .. } => NodeKind::Rating,
            UiNode::Stepper { .. } => NodeKind::Stepper,
            UiNode::Accordion { .. } => NodeKind::Accordion,
            UiNode::Badge { .. } => NodeKind::Badge,
            UiNode::Switch { .. } => NodeKind::Switch,
            UiNode::Slider { .. } => NodeKind::Slider,
            UiNode::Skeleton { .. } => NodeKind::Skeleton,
            UiNode::Avatar { .. } => NodeKind::Avatar,
            UiNode::AvatarGroup { .. } => NodeKind::AvatarGroup,
            UiNode::Tooltip { .. } => NodeKind::Tooltip,
            UiNode::StockTicker { .. } => NodeKind::StockTicker,
            UiNode::MarketSentiment { .. } => NodeKind::MarketSentiment,
            UiNode::StockWatchlist { .. } => NodeKind::StockWatchlist,
            UiNode::FinancialChart { .. } => NodeKind::FinancialChart,
        }
    }

    /// Direct children; empty for leaf kinds
    #[must_use]
    pub fn children(&self) -> &[UiNode] {
        match self {
            UiNode::Page { children, .. }
            | UiNode::Grid { children, .. }
            | UiNode::Stack { children, .. }
            | UiNode::Card { children, .. }
            | UiNode::Tooltip { children, .. } => children,
            UiNode::Badge { children, .. } => children.as_deref().unwrap_or_default(),
            _ => &[],
        }
    }

    /// Visit every node in pre-order together with its depth (root = 1)
    pub fn walk<'a, F>(&'a self, visit: &mut F)
    where
        F: FnMut(&'a UiNode, usize),
    {
        self.walk_at(1, visit);
    }

    fn walk_at<'a, F>(&'a self, depth: usize, visit: &mut F)
    where
        F: FnMut(&'a UiNode, usize),
    {
        visit(self, depth);
        for child in self.children() {
            child.walk_at(depth + 1, visit);
        }
    }

    /// Total number of nodes in this subtree
    #[must_use]
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_, _| count += 1);
        count
    }

    /// Length of the longest root-to-leaf path
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut max = 0;
        self.walk(&mut |_, d| max = max.max(d));
        max
    }

    /// Serialize to a JSON value (infallible for this type)
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Convenience constructor for a `Page` root
    #[must_use]
    pub fn page(title: impl Into<String>, children: Vec<UiNode>) -> Self {
        UiNode::Page {
            props: PageProps { title: title.into() },
            children,
        }
    }

    /// Convenience constructor for a `Header`
    #[must_use]
    pub fn header(text: impl Into<String>) -> Self {
        UiNode::Header {
            props: HeaderProps { text: text.into() },
        }
    }

    /// Convenience constructor for a `Text`
    #[must_use]
    pub fn text(content: impl Into<String>, align: Align) -> Self {
        UiNode::Text {
            props: TextProps {
                content: content.into(),
                align,
            },
        }
    }
}

impl<'de> Deserialize<'de> for UiNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Validator::default()
            .parse(&value)
            .map_err(serde::de::Error::custom)
    }
}
