use std::collections::HashMap;
use std::f64::consts::TAU;

use dioxus::prelude::*;

use crate::core::graph::{GraphEdge, InteractionGraph};

const VIEW_SIZE: f64 = 320.0;
const RING_RADIUS: f64 = 130.0;
const STRONGEST_EDGES: usize = 10;
const LOOP_RADIUS: f64 = 9.0;

#[component]
pub fn InteractionGraphPanel(graph: InteractionGraph) -> Element {
    let positions = ring_layout(graph.nodes.len());
    let (lines, loops) = edge_shapes(&graph, &positions);
    let dots: Vec<(String, String, String)> = graph
        .nodes
        .iter()
        .zip(positions.iter())
        .map(|(node, (x, y))| (node.id.clone(), format!("{x:.1}"), format!("{y:.1}")))
        .collect();
    let strongest = graph.strongest(STRONGEST_EDGES);

    rsx! {
        section { class: "stats-card stats-graph",
            div { class: "stats-card__header",
                h2 { "Who replies to whom" }
                if !graph.is_empty() {
                    span { class: "stats-card__meta",
                        "{graph.nodes.len()} authors · {graph.total_interactions()} replies"
                    }
                }
            }

            if graph.is_empty() {
                p { class: "stats-card__placeholder", "No interactions recorded." }
            } else {
                svg {
                    class: "stats-graph__canvas",
                    view_box: "0 0 {VIEW_SIZE} {VIEW_SIZE}",
                    for (i, edge) in lines.into_iter().enumerate() {
                        line {
                            key: "edge-{i}",
                            class: "stats-graph__edge",
                            x1: edge.x1,
                            y1: edge.y1,
                            x2: edge.x2,
                            y2: edge.y2,
                            stroke_width: edge.width,
                        }
                    }
                    for (i, LoopMark { author, value, cx, cy, width }) in loops.into_iter().enumerate() {
                        circle {
                            key: "loop-{i}",
                            class: "stats-graph__loop",
                            cx,
                            cy,
                            r: "{LOOP_RADIUS}",
                            stroke_width: width,
                            title { "{author} → {author}: {value}" }
                        }
                    }
                    for (id, cx, cy) in dots.into_iter() {
                        circle {
                            key: "{id}",
                            class: "stats-graph__node",
                            cx,
                            cy,
                            r: "5",
                            title { "{id}" }
                        }
                    }
                }

                table { class: "stats-table stats-graph__edges",
                    thead {
                        tr {
                            th { "From" }
                            th { "To" }
                            th { "Replies" }
                        }
                    }
                    tbody {
                        for (i, edge) in strongest.iter().enumerate() {
                            tr { key: "strong-{i}",
                                td { "{edge.source}" }
                                td { "{edge.target}" }
                                td { "{edge.value}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

struct EdgeLine {
    x1: String,
    y1: String,
    x2: String,
    y2: String,
    width: String,
}

/// Self reply, drawn as a small ring just outside its author's node.
struct LoopMark {
    author: String,
    value: u64,
    cx: String,
    cy: String,
    width: String,
}

/// Straight lines between distinct authors plus loop marks for self replies. Edges into authors
/// that never replied have no node to land on and are left to the table.
fn edge_shapes(graph: &InteractionGraph, positions: &[(f64, f64)]) -> (Vec<EdgeLine>, Vec<LoopMark>) {
    let index: HashMap<&str, usize> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.id.as_str(), i))
        .collect();
    let position = |id: &str| index.get(id).map(|&i| positions[i]);

    let mut lines = Vec::new();
    let mut loops = Vec::new();
    for edge in &graph.edges {
        let Some((x1, y1)) = position(&edge.source) else {
            continue;
        };
        if edge.is_self_loop() {
            let (cx, cy) = loop_centre(x1, y1);
            loops.push(LoopMark {
                author: edge.source.clone(),
                value: edge.value,
                cx: format!("{cx:.1}"),
                cy: format!("{cy:.1}"),
                width: stroke(edge),
            });
            continue;
        }
        let Some((x2, y2)) = position(&edge.target) else {
            continue;
        };
        lines.push(EdgeLine {
            x1: format!("{x1:.1}"),
            y1: format!("{y1:.1}"),
            x2: format!("{x2:.1}"),
            y2: format!("{y2:.1}"),
            width: stroke(edge),
        });
    }
    (lines, loops)
}

fn stroke(edge: &GraphEdge) -> String {
    format!("{:.2}", edge.width())
}

/// Pushed away from the canvas centre so the ring sits outside the node dot.
fn loop_centre(x: f64, y: f64) -> (f64, f64) {
    let centre = VIEW_SIZE / 2.0;
    let (dx, dy) = (x - centre, y - centre);
    let length = dx.hypot(dy);
    if length == 0.0 {
        return (x, y - LOOP_RADIUS);
    }
    (x + dx / length * LOOP_RADIUS, y + dy / length * LOOP_RADIUS)
}

/// Evenly spaced points on a circle, starting at twelve o'clock.
fn ring_layout(count: usize) -> Vec<(f64, f64)> {
    let centre = VIEW_SIZE / 2.0;
    (0..count)
        .map(|i| {
            let angle = TAU * i as f64 / count as f64 - TAU / 4.0;
            (
                centre + RING_RADIUS * angle.cos(),
                centre + RING_RADIUS * angle.sin(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_layout_starts_at_the_top() {
        let points = ring_layout(4);
        assert_eq!(points.len(), 4);
        assert!((points[0].0 - 160.0).abs() < 1e-9);
        assert!((points[0].1 - 30.0).abs() < 1e-9);
        assert!(ring_layout(0).is_empty());
    }

    #[test]
    fn self_replies_become_loop_marks() {
        let mut adjacency = api::InteractionAdjacency::new();
        adjacency.insert(
            "ann".to_string(),
            [("ann".to_string(), 4), ("bob".to_string(), 1), ("cat".to_string(), 2)]
                .into_iter()
                .collect(),
        );
        adjacency.insert("bob".to_string(), api::IndexMap::new());
        let graph = InteractionGraph::build(&adjacency);
        let positions = ring_layout(graph.nodes.len());

        let (lines, loops) = edge_shapes(&graph, &positions);

        assert_eq!(lines.len(), 1);
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].author, "ann");
        assert_eq!(loops[0].value, 4);
        // ann sits at the top of the ring, so the loop is drawn above the node.
        assert_eq!(loops[0].cx, "160.0");
        assert_eq!(loops[0].cy, "21.0");
    }
}
