// View factory - zero-valued views and kind conversion
use crate::domain::view::{
    Axes, DecimalPlaces, Legend, LinePlusSingleStatProperties, MarkdownProperties, QueryLanguage,
    StatProperties, TableOptions, TableProperties, View, ViewError, ViewKind, ViewProperties,
    ViewQuery, ViewShape, XyGeom, XyProperties,
};

const DEFAULT_VIEW_NAME: &str = "Untitled";
const DEFAULT_TIME_FORMAT: &str = "YYYY-MM-DD HH:mm:ss";

fn zero_properties(kind: ViewKind) -> ViewProperties {
    match kind {
        ViewKind::Xy => ViewProperties::Xy(XyProperties {
            queries: Vec::new(),
            colors: Vec::new(),
            legend: Legend::default(),
            axes: Axes::default(),
            geom: XyGeom::Line,
            shape: ViewShape::ChronografV2,
        }),
        ViewKind::SingleStat => ViewProperties::SingleStat(zero_stat_properties()),
        ViewKind::Gauge => ViewProperties::Gauge(zero_stat_properties()),
        ViewKind::LinePlusSingleStat => {
            ViewProperties::LinePlusSingleStat(LinePlusSingleStatProperties {
                queries: Vec::new(),
                colors: Vec::new(),
                legend: Legend::default(),
                axes: Axes::default(),
                prefix: String::new(),
                suffix: String::new(),
                decimal_places: DecimalPlaces::enforced(),
                shape: ViewShape::ChronografV2,
            })
        }
        ViewKind::Table => ViewProperties::Table(TableProperties {
            queries: Vec::new(),
            colors: Vec::new(),
            table_options: TableOptions::default(),
            field_options: Vec::new(),
            decimal_places: DecimalPlaces::unenforced(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            shape: ViewShape::ChronografV2,
        }),
        ViewKind::Markdown => ViewProperties::Markdown(MarkdownProperties {
            text: String::new(),
            shape: ViewShape::ChronografV2,
        }),
    }
}

fn zero_stat_properties() -> StatProperties {
    StatProperties {
        queries: Vec::new(),
        colors: Vec::new(),
        prefix: String::new(),
        suffix: String::new(),
        decimal_places: DecimalPlaces::enforced(),
        shape: ViewShape::ChronografV2,
    }
}

/// Creates the zero value of a view of the given kind
pub fn create_view(kind: ViewKind) -> View {
    View {
        id: None,
        name: DEFAULT_VIEW_NAME.to_string(),
        links: None,
        properties: zero_properties(kind),
    }
}

/// Like [`create_view`] for a kind named on the wire
pub fn create_view_of(kind: &str) -> Result<View, ViewError> {
    Ok(create_view(kind.parse()?))
}

/// Builds a view of `target` from `view`.
///
/// Queries survive when both kinds carry them; name, id and links always do.
/// Every other kind-specific setting of the source is dropped.
pub fn convert_view(view: &View, target: ViewKind) -> View {
    let mut converted = create_view(target);

    if let (Some(source), Some(queries)) =
        (view.properties.queries(), converted.properties.queries_mut())
    {
        *queries = source.to_vec();
    }

    converted.name = view.name.clone();
    converted.id = view.id.clone();
    converted.links = view.links.clone();
    converted
}

pub fn convert_view_to(view: &View, target: &str) -> Result<View, ViewError> {
    Ok(convert_view(view, target.parse()?))
}

/// Replaces the queries of `view` with a single query.
///
/// Returns `None` when the kind renders no queries.
pub fn replace_query(view: &View, text: &str, language: QueryLanguage) -> Option<View> {
    view.properties.queries()?;

    let mut replaced = view.clone();
    if let Some(queries) = replaced.properties.queries_mut() {
        *queries = vec![ViewQuery::new(language, text)];
    }
    Some(replaced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::view::{ViewColor, ViewLinks};

    fn queries() -> Vec<ViewQuery> {
        vec![
            ViewQuery::new(QueryLanguage::Flux, "from(bucket: \"telegraf\")"),
            ViewQuery::new(QueryLanguage::InfluxQL, "SELECT mean(usage) FROM cpu"),
        ]
    }

    fn view_with_queries(kind: ViewKind) -> View {
        let mut view = create_view(kind);
        view.id = Some("0246e457".to_string());
        view.name = "Apache Bytes/Second".to_string();
        view.links = Some(ViewLinks {
            self_link: "/v2/views/0246e457".to_string(),
        });
        if let Some(q) = view.properties.queries_mut() {
            *q = queries();
        }
        view
    }

    #[test]
    fn test_create_view_every_kind() {
        for kind in ViewKind::ALL {
            let view = create_view(kind);
            assert_eq!(view.kind(), kind);
            assert_eq!(view.name, "Untitled");
            assert_eq!(view.properties.shape(), ViewShape::ChronografV2);
            if kind.supports_queries() {
                assert_eq!(view.properties.queries(), Some(&[][..]));
            } else {
                assert!(view.properties.queries().is_none());
            }
        }
    }

    #[test]
    fn test_create_view_defaults() {
        let ViewProperties::Xy(xy) = create_view(ViewKind::Xy).properties else {
            panic!("expected xy properties");
        };
        assert_eq!(xy.axes.y.bounds, [String::new(), String::new()]);
        assert_eq!(xy.axes.y2.base, "10");
        assert_eq!(xy.axes.x.scale, "linear");
        assert_eq!(xy.geom, XyGeom::Line);

        let ViewProperties::Gauge(gauge) = create_view(ViewKind::Gauge).properties else {
            panic!("expected gauge properties");
        };
        assert_eq!(gauge.decimal_places, DecimalPlaces::enforced());

        let ViewProperties::Table(table) = create_view(ViewKind::Table).properties else {
            panic!("expected table properties");
        };
        assert!(!table.decimal_places.is_enforced);
        assert_eq!(table.time_format, DEFAULT_TIME_FORMAT);
        assert!(!table.table_options.sort_by.visible);

        let ViewProperties::Markdown(markdown) = create_view(ViewKind::Markdown).properties
        else {
            panic!("expected markdown properties");
        };
        assert!(markdown.text.is_empty());
    }

    #[test]
    fn test_unsupported_kind_fails() {
        assert_eq!(
            create_view_of("heatmap"),
            Err(ViewError::UnsupportedKind("heatmap".to_string()))
        );
        let view = create_view(ViewKind::Xy);
        assert_eq!(
            convert_view_to(&view, "heatmap"),
            Err(ViewError::UnsupportedKind("heatmap".to_string()))
        );
        assert_eq!(create_view_of("table").unwrap().kind(), ViewKind::Table);
    }

    #[test]
    fn test_convert_keeps_queries_between_query_kinds() {
        let query_kinds = ViewKind::ALL.into_iter().filter(|k| k.supports_queries());
        for from in query_kinds.clone() {
            for to in query_kinds.clone() {
                let source = view_with_queries(from);
                let converted = convert_view(&source, to);
                assert_eq!(converted.kind(), to);
                assert_eq!(converted.properties.queries(), Some(&queries()[..]));
            }
        }
    }

    #[test]
    fn test_convert_to_markdown_drops_queries() {
        let converted = convert_view(&view_with_queries(ViewKind::Xy), ViewKind::Markdown);
        assert!(converted.properties.queries().is_none());

        let back = convert_view(&converted, ViewKind::SingleStat);
        assert_eq!(back.properties.queries(), Some(&[][..]));
    }

    #[test]
    fn test_convert_preserves_identity_for_every_pair() {
        for from in ViewKind::ALL {
            for to in ViewKind::ALL {
                let source = view_with_queries(from);
                let converted = convert_view(&source, to);
                assert_eq!(converted.name, source.name);
                assert_eq!(converted.id, source.id);
                assert_eq!(converted.links, source.links);
            }
        }
    }

    #[test]
    fn test_convert_discards_kind_specific_settings() {
        let mut source = view_with_queries(ViewKind::Gauge);
        if let ViewProperties::Gauge(p) = &mut source.properties {
            p.suffix = "%".to_string();
            p.colors.push(ViewColor {
                id: "base".to_string(),
                color_type: "min".to_string(),
                hex: "#00C9FF".to_string(),
                name: "laser".to_string(),
                value: 0.0,
            });
        }
        let original = source.clone();

        let converted = convert_view(&source, ViewKind::SingleStat);
        let ViewProperties::SingleStat(p) = &converted.properties else {
            panic!("expected single-stat properties");
        };
        assert!(p.suffix.is_empty());
        assert!(p.colors.is_empty());
        assert_eq!(source, original);
    }

    #[test]
    fn test_replace_query() {
        let source = view_with_queries(ViewKind::LinePlusSingleStat);
        let replaced = replace_query(&source, "SELECT 1", QueryLanguage::InfluxQL).unwrap();
        assert_eq!(
            replaced.properties.queries(),
            Some(&[ViewQuery::new(QueryLanguage::InfluxQL, "SELECT 1")][..])
        );
        assert_eq!(source.properties.queries(), Some(&queries()[..]));
        assert_eq!(replaced.name, source.name);
    }

    #[test]
    fn test_replace_query_on_markdown_is_noop() {
        let view = create_view(ViewKind::Markdown);
        assert!(replace_query(&view, "SELECT 1", QueryLanguage::Flux).is_none());
    }
}
