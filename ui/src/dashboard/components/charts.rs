use api::EventCount;
use dioxus::prelude::*;

use crate::core::format::format_number;
use crate::core::series::{hour_label, HeatmapMatrix, HOURS_PER_DAY};

const CHART_WIDTH: f64 = 640.0;
const CHART_HEIGHT: f64 = 180.0;
const CHART_PAD: f64 = 12.0;

#[component]
pub fn EventsChart(
    points: Vec<EventCount>,
    #[props(!optional)] burstiness: Option<f64>,
) -> Element {
    let total: u64 = points.iter().map(|p| p.count).sum();
    let polyline = polyline_points(&points);
    let first = points.first().map(|p| p.date.clone()).unwrap_or_default();
    let last = points.last().map(|p| p.date.clone()).unwrap_or_default();

    rsx! {
        section { class: "stats-card stats-events",
            div { class: "stats-card__header",
                h2 { "Events per day" }
                if !points.is_empty() {
                    span { class: "stats-card__meta", "{total} events over {points.len()} days" }
                }
            }

            if points.is_empty() {
                p { class: "stats-card__placeholder", "No events in the selected range." }
            } else {
                svg {
                    class: "stats-events__chart",
                    view_box: "0 0 {CHART_WIDTH} {CHART_HEIGHT}",
                    preserve_aspect_ratio: "none",
                    polyline {
                        class: "stats-events__line",
                        points: "{polyline}",
                        fill: "none",
                    }
                }
                div { class: "stats-events__axis",
                    span { "{first}" }
                    span { "{last}" }
                }
                if let Some(burstiness) = burstiness {
                    p { class: "stats-card__meta",
                        "Burstiness: {format_number(burstiness, 2)}"
                    }
                }
            }
        }
    }
}

/// SVG coordinates of the series, left to right in input order.
fn polyline_points(points: &[EventCount]) -> String {
    let max = points.iter().map(|p| p.count).max().unwrap_or(0).max(1) as f64;
    let step = if points.len() > 1 {
        (CHART_WIDTH - 2.0 * CHART_PAD) / (points.len() - 1) as f64
    } else {
        0.0
    };

    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let x = CHART_PAD + step * i as f64;
            let y = CHART_HEIGHT
                - CHART_PAD
                - (p.count as f64 / max) * (CHART_HEIGHT - 2.0 * CHART_PAD);
            format!("{x:.1},{y:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[component]
pub fn ActivityHeatmap(matrix: HeatmapMatrix) -> Element {
    let hours: Vec<String> = (0..HOURS_PER_DAY).step_by(3).map(hour_label).collect();

    rsx! {
        section { class: "stats-card stats-heatmap",
            div { class: "stats-card__header",
                h2 { "Activity by weekday and hour" }
                if !matrix.is_empty() {
                    span { class: "stats-card__meta", "Peak: {matrix.max_value()} events" }
                }
            }

            if matrix.is_empty() {
                p { class: "stats-card__placeholder", "No hourly activity recorded." }
            } else {
                div { class: "stats-heatmap__grid",
                    for (label, row) in matrix.rows() {
                        div { key: "{label}", class: "stats-heatmap__row",
                            span { class: "stats-heatmap__day", "{label}" }
                            for (hour, cell) in row.iter().enumerate() {
                                {heatmap_cell(&matrix, hour, *cell)}
                            }
                        }
                    }
                    div { class: "stats-heatmap__hours",
                        for label in hours.iter() {
                            span { key: "{label}", "{label}" }
                        }
                    }
                }
            }
        }
    }
}

fn heatmap_cell(matrix: &HeatmapMatrix, hour: usize, cell: Option<u64>) -> Element {
    let title = match cell {
        Some(count) => format!("{}: {count}", hour_label(hour)),
        None => format!("{}: no data", hour_label(hour)),
    };
    let (class, style) = match cell {
        Some(count) => (
            "stats-heatmap__cell",
            format!("opacity: {:.2}", 0.15 + 0.85 * matrix.intensity(count)),
        ),
        None => ("stats-heatmap__cell stats-heatmap__cell--empty", String::new()),
    };

    rsx! {
        span { class, style, title }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polyline_spans_the_chart_width() {
        let points = vec![EventCount::new("2026-01-09", 0), EventCount::new("2026-01-10", 10)];
        assert_eq!(polyline_points(&points), "12.0,168.0 628.0,12.0");
        assert_eq!(polyline_points(&[]), "");
    }
}
