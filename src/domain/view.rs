// View domain model - visualization configuration hosted by a cell
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("no view creator implemented for view of type {0}")]
    UnsupportedKind(String),
}

/// Discriminator of the visualization kinds a cell can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewKind {
    #[serde(rename = "xy")]
    Xy,
    #[serde(rename = "single-stat")]
    SingleStat,
    #[serde(rename = "gauge")]
    Gauge,
    #[serde(rename = "table")]
    Table,
    #[serde(rename = "markdown")]
    Markdown,
    #[serde(rename = "line-plus-single-stat")]
    LinePlusSingleStat,
}

impl ViewKind {
    pub const ALL: [ViewKind; 6] = [
        ViewKind::Xy,
        ViewKind::SingleStat,
        ViewKind::Gauge,
        ViewKind::Table,
        ViewKind::Markdown,
        ViewKind::LinePlusSingleStat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKind::Xy => "xy",
            ViewKind::SingleStat => "single-stat",
            ViewKind::Gauge => "gauge",
            ViewKind::Table => "table",
            ViewKind::Markdown => "markdown",
            ViewKind::LinePlusSingleStat => "line-plus-single-stat",
        }
    }

    /// Whether views of this kind render series data and carry queries
    pub fn supports_queries(&self) -> bool {
        match self {
            ViewKind::Xy
            | ViewKind::SingleStat
            | ViewKind::Gauge
            | ViewKind::Table
            | ViewKind::LinePlusSingleStat => true,
            ViewKind::Markdown => false,
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewKind {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ViewError::UnsupportedKind(s.to_string()))
    }
}

/// Format generation of a view document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewShape {
    #[default]
    #[serde(rename = "chronograf-v2")]
    ChronografV2,
    #[serde(rename = "chronograf-v1")]
    ChronografV1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryLanguage {
    #[default]
    Flux,
    #[serde(rename = "influxql")]
    InfluxQL,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewQuery {
    #[serde(rename = "type", default)]
    pub language: QueryLanguage,
    pub text: String,
    #[serde(default)]
    pub source: String,
}

impl ViewQuery {
    pub fn new(language: QueryLanguage, text: impl Into<String>) -> Self {
        Self {
            language,
            text: text.into(),
            source: String::new(),
        }
    }
}

/// Threshold mapping from a numeric value to a color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewColor {
    pub id: String,
    #[serde(rename = "type")]
    pub color_type: String,
    pub hex: String,
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    #[serde(default, deserialize_with = "lenient_bounds")]
    pub bounds: [String; 2],
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    #[serde(default)]
    pub base: String,
    #[serde(default)]
    pub scale: String,
}

impl Default for Axis {
    fn default() -> Self {
        Self {
            bounds: [String::new(), String::new()],
            label: String::new(),
            prefix: String::new(),
            suffix: String::new(),
            base: "10".to_string(),
            scale: "linear".to_string(),
        }
    }
}

/// Accepts `null` and short or empty arrays, padding with empty bounds
fn lenient_bounds<'de, D>(deserializer: D) -> Result<[String; 2], D::Error>
where
    D: Deserializer<'de>,
{
    let bounds: Option<Vec<String>> = Option::deserialize(deserializer)?;
    let mut bounds = bounds.unwrap_or_default().into_iter();
    Ok([
        bounds.next().unwrap_or_default(),
        bounds.next().unwrap_or_default(),
    ])
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Axes {
    pub x: Axis,
    pub y: Axis,
    pub y2: Axis,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Legend {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub legend_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecimalPlaces {
    pub is_enforced: bool,
    pub digits: u8,
}

impl DecimalPlaces {
    /// Two digits, enforced; stat-like views start here
    pub fn enforced() -> Self {
        Self {
            is_enforced: true,
            digits: 2,
        }
    }

    /// Two digits, not enforced; tables start here
    pub fn unenforced() -> Self {
        Self {
            is_enforced: false,
            digits: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XyGeom {
    #[default]
    Line,
    Step,
    Stacked,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenamableField {
    pub internal_name: String,
    pub display_name: String,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOptions {
    pub vertical_time_axis: bool,
    pub sort_by: RenamableField,
    pub fix_first_column: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XyProperties {
    #[serde(default)]
    pub queries: Vec<ViewQuery>,
    #[serde(default)]
    pub colors: Vec<ViewColor>,
    #[serde(default)]
    pub legend: Legend,
    #[serde(default)]
    pub axes: Axes,
    #[serde(default)]
    pub geom: XyGeom,
    #[serde(default)]
    pub shape: ViewShape,
}

/// Shared by single-stat and gauge views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatProperties {
    #[serde(default)]
    pub queries: Vec<ViewQuery>,
    #[serde(default)]
    pub colors: Vec<ViewColor>,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    #[serde(default = "DecimalPlaces::enforced")]
    pub decimal_places: DecimalPlaces,
    #[serde(default)]
    pub shape: ViewShape,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinePlusSingleStatProperties {
    #[serde(default)]
    pub queries: Vec<ViewQuery>,
    #[serde(default)]
    pub colors: Vec<ViewColor>,
    #[serde(default)]
    pub legend: Legend,
    #[serde(default)]
    pub axes: Axes,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    #[serde(default = "DecimalPlaces::enforced")]
    pub decimal_places: DecimalPlaces,
    #[serde(default)]
    pub shape: ViewShape,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableProperties {
    #[serde(default)]
    pub queries: Vec<ViewQuery>,
    #[serde(default)]
    pub colors: Vec<ViewColor>,
    #[serde(default)]
    pub table_options: TableOptions,
    #[serde(default)]
    pub field_options: Vec<RenamableField>,
    #[serde(default = "DecimalPlaces::unenforced")]
    pub decimal_places: DecimalPlaces,
    #[serde(default)]
    pub time_format: String,
    #[serde(default)]
    pub shape: ViewShape,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkdownProperties {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub shape: ViewShape,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ViewProperties {
    #[serde(rename = "xy")]
    Xy(XyProperties),
    #[serde(rename = "single-stat")]
    SingleStat(StatProperties),
    #[serde(rename = "gauge")]
    Gauge(StatProperties),
    #[serde(rename = "table")]
    Table(TableProperties),
    #[serde(rename = "markdown")]
    Markdown(MarkdownProperties),
    #[serde(rename = "line-plus-single-stat")]
    LinePlusSingleStat(LinePlusSingleStatProperties),
}

impl ViewProperties {
    pub fn kind(&self) -> ViewKind {
        match self {
            ViewProperties::Xy(_) => ViewKind::Xy,
            ViewProperties::SingleStat(_) => ViewKind::SingleStat,
            ViewProperties::Gauge(_) => ViewKind::Gauge,
            ViewProperties::Table(_) => ViewKind::Table,
            ViewProperties::Markdown(_) => ViewKind::Markdown,
            ViewProperties::LinePlusSingleStat(_) => ViewKind::LinePlusSingleStat,
        }
    }

    /// Queries of the view, `None` for kinds that render no series
    pub fn queries(&self) -> Option<&[ViewQuery]> {
        match self {
            ViewProperties::Xy(p) => Some(&p.queries),
            ViewProperties::SingleStat(p) | ViewProperties::Gauge(p) => Some(&p.queries),
            ViewProperties::Table(p) => Some(&p.queries),
            ViewProperties::LinePlusSingleStat(p) => Some(&p.queries),
            ViewProperties::Markdown(_) => None,
        }
    }

    pub fn queries_mut(&mut self) -> Option<&mut Vec<ViewQuery>> {
        match self {
            ViewProperties::Xy(p) => Some(&mut p.queries),
            ViewProperties::SingleStat(p) | ViewProperties::Gauge(p) => Some(&mut p.queries),
            ViewProperties::Table(p) => Some(&mut p.queries),
            ViewProperties::LinePlusSingleStat(p) => Some(&mut p.queries),
            ViewProperties::Markdown(_) => None,
        }
    }

    pub fn shape(&self) -> ViewShape {
        match self {
            ViewProperties::Xy(p) => p.shape,
            ViewProperties::SingleStat(p) | ViewProperties::Gauge(p) => p.shape,
            ViewProperties::Table(p) => p.shape,
            ViewProperties::Markdown(p) => p.shape,
            ViewProperties::LinePlusSingleStat(p) => p.shape,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewLinks {
    #[serde(rename = "self")]
    pub self_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<ViewLinks>,
    pub properties: ViewProperties,
}

impl View {
    pub fn kind(&self) -> ViewKind {
        self.properties.kind()
    }
}
