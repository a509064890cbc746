//! Monitoring chart models

use serde::Deserialize;
use serde::Serialize;

/// Series key that carries the cluster-wide total.
pub const TOTAL_KEY: &str = "total";

/// A monitored broker statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatsChartType {
    IncomingMsgs,
    OutgoingMsgs,
    DroppedMsgs,
    Sessions,
    Subscriptions,
}

impl StatsChartType {
    /// All chart types in display order.
    pub const ALL: [StatsChartType; 5] = [
        Self::IncomingMsgs,
        Self::OutgoingMsgs,
        Self::DroppedMsgs,
        Self::Sessions,
        Self::Subscriptions,
    ];

    /// Translation key for the chart title.
    pub fn translation_key(&self) -> &'static str {
        match self {
            Self::IncomingMsgs => "overview.incoming-messages",
            Self::OutgoingMsgs => "overview.outgoing-messages",
            Self::DroppedMsgs => "overview.dropped-messages",
            Self::Sessions => "overview.sessions",
            Self::Subscriptions => "overview.subscriptions",
        }
    }

    /// Translation key for the chart tooltip.
    pub fn tooltip_key(&self) -> &'static str {
        match self {
            Self::IncomingMsgs => "overview.incoming-messages-tooltip",
            Self::OutgoingMsgs => "overview.outgoing-messages-tooltip",
            Self::DroppedMsgs => "overview.dropped-messages-tooltip",
            Self::Sessions => "overview.sessions-tooltip",
            Self::Subscriptions => "overview.subscriptions-tooltip",
        }
    }

    /// Sessions and subscriptions are only charted as a cluster total.
    pub fn only_total(&self) -> bool {
        matches!(self, Self::Sessions | Self::Subscriptions)
    }

    fn palette(&self) -> &'static [&'static str] {
        match self {
            Self::IncomingMsgs => &["#58519E", "#260638", "#A356D1", "#AAA081", "#D1A656"],
            Self::OutgoingMsgs => &["#4A6EA8", "#393842", "#604BDB", "#4A6EA8", "#B39B7C"],
            Self::DroppedMsgs => &["#47848F", "#4E73C2", "#1860F5", "#47848F", "#9C8175"],
            Self::Sessions => &["#4FA889", "#3A4142", "#51C0DB", "#4FA889", "#B38381"],
            Self::Subscriptions => &["#499E55", "#303836", "#4BD1A9", "#AA799F", "#BE4BD1"],
        }
    }
}

/// Colour for the `index`-th series of a chart.
///
/// Series beyond the palette wrap around to its start.
pub fn chart_color(chart: StatsChartType, index: usize) -> &'static str {
    let palette = chart.palette();
    palette[index % palette.len()]
}

/// One timeseries sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TsValue {
    /// Epoch milliseconds.
    pub ts: i64,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}
