//! Read-only projection of a session for renderers.

use super::toggle::ToggleTarget;
use super::{Message, MessageContent, Role, Session, PLACEHOLDER_TEXT};
use crate::domain::analysis::{ChartSeries, SingleResult};

/// Shown in place of a comparison that matched no areas.
pub const NO_COMPARABLE_AREAS_TEXT: &str = "No comparable areas found for this query.";

/// How one message should be drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageView<'a> {
    User(&'a str),
    BotText(&'a str),
    Analyzing,
    Error(&'a str),
    Summary(SummaryView<'a>),
    Comparison(ComparisonView<'a>),
}

/// A summary panel with its chart toggle.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryView<'a> {
    pub area: &'a str,
    pub summary: &'a str,
    pub show_chart: bool,
    /// Present only while the chart is shown.
    pub chart: Option<&'a ChartSeries>,
    pub toggle: ToggleTarget,
}

impl SummaryView<'_> {
    pub fn toggle_label(&self) -> &'static str {
        if self.show_chart {
            "Hide chart"
        } else {
            "Show chart"
        }
    }
}

/// A comparison: one summary panel per area, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonView<'a> {
    pub panels: Vec<SummaryView<'a>>,
}

impl ComparisonView<'_> {
    pub fn heading(&self) -> String {
        match self.panels.len() {
            0 => NO_COMPARABLE_AREAS_TEXT.to_string(),
            1 => "Comparison result (1 area)".to_string(),
            n => format!("Comparison result ({n} areas)"),
        }
    }
}

fn summary<'a>(result: &'a SingleResult, show_chart: bool, toggle: ToggleTarget) -> SummaryView<'a> {
    SummaryView {
        area: &result.area,
        summary: &result.summary,
        show_chart,
        chart: show_chart.then_some(&result.chart),
        toggle,
    }
}

impl<'a> MessageView<'a> {
    pub fn of(index: usize, message: &'a Message) -> Self {
        match (message.role(), message.content()) {
            (Role::User, MessageContent::Text(t)) => MessageView::User(t),
            (_, MessageContent::Text(t)) => MessageView::BotText(t),
            (_, MessageContent::Pending) => MessageView::Analyzing,
            (_, MessageContent::Error(t)) => MessageView::Error(t),
            (_, MessageContent::Single { result, show_chart }) => {
                MessageView::Summary(summary(result, *show_chart, ToggleTarget::message(index)))
            }
            (_, MessageContent::Compare { result, toggles }) => {
                MessageView::Comparison(ComparisonView {
                    panels: result
                        .iter()
                        .map(|(key, area)| {
                            summary(
                                area,
                                toggles.is_shown(key.as_str()),
                                ToggleTarget::area(index, key.clone()),
                            )
                        })
                        .collect(),
                })
            }
        }
    }

    /// Plain text for text-like views; `"Analyzing..."` for the placeholder.
    pub fn text(&self) -> Option<&str> {
        match self {
            MessageView::User(t) | MessageView::BotText(t) | MessageView::Error(t) => Some(*t),
            MessageView::Analyzing => Some(PLACEHOLDER_TEXT),
            _ => None,
        }
    }
}

impl Session {
    /// One view per message, in timeline order.
    pub fn views(&self) -> Vec<MessageView<'_>> {
        self.messages()
            .iter()
            .enumerate()
            .map(|(i, m)| MessageView::of(i, m))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::{AnalysisResult, CompareResult};
    use crate::domain::session::Reply;
    use crate::shared::AreaKey;

    fn single(area: &str) -> SingleResult {
        SingleResult {
            area: area.to_string(),
            summary: format!("Summary for {area}"),
            chart: ChartSeries::new(vec!["2020".into()], vec![Some(1.0)], vec![None]).unwrap(),
            table: vec![],
        }
    }

    #[test]
    fn test_views_follow_timeline() {
        let mut s = Session::new();
        s.begin_query("Analyze Wakad").unwrap();
        let views = s.views();
        assert_eq!(views[0], MessageView::User("Analyze Wakad"));
        assert_eq!(views[1], MessageView::Analyzing);
        assert_eq!(views[1].text(), Some("Analyzing..."));
    }

    #[test]
    fn test_summary_chart_follows_toggle() {
        let mut s = Session::new();
        s.begin_query("Analyze Wakad").unwrap();
        s.resolve_placeholder(Reply::Analysis(AnalysisResult::Single(single("Wakad"))))
            .unwrap();

        let target = {
            let views = s.views();
            let MessageView::Summary(view) = &views[1] else {
                panic!("expected summary");
            };
            assert!(view.chart.is_none());
            assert_eq!(view.toggle_label(), "Show chart");
            view.toggle.clone()
        };

        s.toggle(&target).unwrap();
        let views = s.views();
        let MessageView::Summary(view) = &views[1] else {
            panic!("expected summary");
        };
        assert_eq!(view.chart.map(ChartSeries::len), Some(1));
        assert_eq!(view.toggle_label(), "Hide chart");
    }

    #[test]
    fn test_comparison_panels_in_order() {
        let mut compare = CompareResult::new();
        compare.insert(AreaKey::from("b"), single("B"));
        compare.insert(AreaKey::from("a"), single("A"));
        let mut s = Session::new();
        s.begin_query("Compare B and A").unwrap();
        s.resolve_placeholder(Reply::Analysis(AnalysisResult::Compare(compare)))
            .unwrap();
        s.toggle(&ToggleTarget::area(1, "a")).unwrap();

        let views = s.views();
        let MessageView::Comparison(view) = &views[1] else {
            panic!("expected comparison");
        };
        assert_eq!(view.heading(), "Comparison result (2 areas)");
        let areas: Vec<_> = view.panels.iter().map(|p| p.area).collect();
        assert_eq!(areas, ["B", "A"]);
        assert!(!view.panels[0].show_chart);
        assert!(view.panels[1].show_chart);
        assert_eq!(view.panels[1].toggle, ToggleTarget::area(1, "a"));
    }

    #[test]
    fn test_empty_comparison_heading() {
        let view = ComparisonView { panels: vec![] };
        assert_eq!(view.heading(), "No comparable areas found for this query.");
    }
}
