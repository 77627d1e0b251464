use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::cand::BufPlace;
use crate::engine::Solution;
use crate::error::{Error, Result};

use super::net::{LoadedNet, RawEdge};

/// Returns the point on `segments` at Manhattan distance `target` measured
/// from the first vertex, clamped to the polyline's endpoints.
fn point_at_distance(segments: &[[i64; 2]], target: i64) -> [i64; 2] {
    let mut remaining = target.max(0);
    for pair in segments.windows(2) {
        let [x0, y0] = pair[0];
        let [x1, y1] = pair[1];
        let seg_len = (x1 - x0).abs() + (y1 - y0).abs();
        if seg_len == 0 {
            continue;
        }
        if remaining <= seg_len {
            let t = remaining as f64 / seg_len as f64;
            let x = x0 as f64 + t * (x1 - x0) as f64;
            let y = y0 as f64 + t * (y1 - y0) as f64;
            return [x.round() as i64, y.round() as i64];
        }
        remaining -= seg_len;
    }
    segments.last().copied().unwrap_or([0, 0])
}

/// Extracts the portion of `segments` spanning distances `[d_lo, d_hi]` from
/// its first vertex, including any original bend points strictly inside that
/// span so an L-shaped (or longer) polyline keeps its shape after a split.
fn sub_polyline(segments: &[[i64; 2]], d_lo: i64, d_hi: i64) -> Vec<[i64; 2]> {
    let mut out = vec![point_at_distance(segments, d_lo)];
    let mut cum = 0i64;
    for pair in segments.windows(2) {
        let [x0, y0] = pair[0];
        let [x1, y1] = pair[1];
        let seg_len = (x1 - x0).abs() + (y1 - y0).abs();
        let seg_end = cum + seg_len;
        if seg_end > d_lo && seg_end < d_hi {
            out.push([x1, y1]);
        }
        cum = seg_end;
    }
    out.push(point_at_distance(segments, d_hi));
    out.dedup();
    out
}

/// Regenerates the net file with a buffer node spliced into the geometry at
/// every placement in `solution` (excluding the mandatory driver-stage
/// placement, which names no new edge), writing the result to
/// `<net-stem>_out.json` next to `net_path`.
pub fn write_output_file(
    net_path: impl AsRef<Path>,
    loaded: &LoadedNet,
    solution: &Solution,
) -> Result<()> {
    let net_path = net_path.as_ref();
    let path_str = net_path.display().to_string();

    let mut nodes = loaded.raw.node.clone();
    let mut edges = loaded.raw.edge.clone();

    let template = nodes
        .iter()
        .find(|n| n.node_type == "b")
        .cloned()
        .ok_or_else(|| {
            Error::invalid_input(path_str.clone(), "no driver node to template buffers on")
        })?;

    let mut next_node_id = nodes.iter().map(|n| n.id).max().unwrap_or(0) + 1;
    let mut next_edge_id = edges.iter().map(|e| e.id).max().unwrap_or(0) + 1;

    let mut by_edge: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
    for place in &solution.placements {
        if place.parent_id == 0 && place.child_id == 0 {
            continue;
        }
        by_edge
            .entry((place.parent_id, place.child_id))
            .or_default()
            .push(place.len_from_child);
    }

    if by_edge.is_empty() {
        log::info!("no intermediate buffers to splice; writing net file unchanged");
    }

    for ((parent_id, child_id), offsets) in by_edge {
        // Resolve against the untouched original edge list: `loaded.edges`
        // and `loaded.raw.edge` share an index space that never changes,
        // unlike `edges`, which is rewritten in place below as each group is
        // processed (so looking positions up there would drift once an
        // earlier group has already spliced edges in or out).
        let original_index = loaded
            .edges
            .iter()
            .position(|e| e.start_id == parent_id && e.end_id == child_id)
            .ok_or_else(|| {
                Error::malformed_tree(format!(
                    "winning solution names an edge ({parent_id}, {child_id}) absent from the net file"
                ))
            })?;
        let original_edge = loaded.raw.edge[original_index].clone();
        let total_length = total_manhattan(&original_edge.segments);

        // len_from_child counts from the child end; convert to distance from
        // the edge's start vertex and order ascending so the chain below
        // runs start -> ... -> end.
        let mut distances: Vec<i64> = offsets.iter().map(|&k| total_length - k as i64).collect();
        distances.sort_unstable();
        distances.dedup();

        let mut buffer_ids = Vec::with_capacity(distances.len());
        for &d in &distances {
            let [x, y] = point_at_distance(&original_edge.segments, d);
            let mut buf = template.clone();
            buf.id = next_node_id;
            buf.x = x;
            buf.y = y;
            next_node_id += 1;
            buffer_ids.push(buf.id);
            nodes.push(buf);
        }

        let mut waypoints = vec![0i64];
        waypoints.extend(&distances);
        waypoints.push(total_length);
        let mut waypoint_ids = vec![original_edge.vertices[0]];
        waypoint_ids.extend(&buffer_ids);
        waypoint_ids.push(original_edge.vertices[1]);

        let mut new_edges = Vec::with_capacity(waypoints.len() - 1);
        for w in 0..waypoints.len() - 1 {
            new_edges.push(RawEdge {
                id: next_edge_id,
                vertices: [waypoint_ids[w], waypoint_ids[w + 1]],
                segments: sub_polyline(&original_edge.segments, waypoints[w], waypoints[w + 1]),
                extra: original_edge.extra.clone(),
            });
            next_edge_id += 1;
        }

        let current_index = edges
            .iter()
            .position(|e| e.id == original_edge.id)
            .expect("original edge id is unique and not yet removed");
        edges.remove(current_index);
        edges.splice(current_index..current_index, new_edges);
    }

    let out = super::net::NetFile { node: nodes, edge: edges };
    let out_path = output_path_for(net_path);
    let text = serde_json::to_string_pretty(&out).map_err(|e| Error::json(path_str.clone(), e))?;
    fs::write(&out_path, text).map_err(|e| Error::io(out_path.display().to_string(), e))?;
    log::info!("wrote {}", out_path.display());
    Ok(())
}

fn total_manhattan(segments: &[[i64; 2]]) -> i64 {
    segments
        .windows(2)
        .map(|pair| (pair[0][0] - pair[1][0]).abs() + (pair[0][1] - pair[1][1]).abs())
        .sum()
}

fn output_path_for(net_path: &Path) -> std::path::PathBuf {
    let stem = net_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "net".to_string());
    net_path.with_file_name(format!("{stem}_out.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::net::load_net_from_str as load_net_from_file_str_for_tests;

    fn solution_with(placements: Vec<BufPlace>) -> Solution {
        Solution {
            rat: 0.0,
            c: 0.0,
            placements,
        }
    }

    #[test]
    fn point_at_distance_interpolates_a_straight_segment() {
        let segments = [[0, 0], [10, 0]];
        assert_eq!(point_at_distance(&segments, 4), [4, 0]);
        assert_eq!(point_at_distance(&segments, 0), [0, 0]);
        assert_eq!(point_at_distance(&segments, 10), [10, 0]);
    }

    #[test]
    fn point_at_distance_crosses_a_bend() {
        let segments = [[0, 0], [5, 0], [5, 5]];
        assert_eq!(point_at_distance(&segments, 3), [3, 0]);
        assert_eq!(point_at_distance(&segments, 7), [5, 2]);
    }

    #[test]
    fn sub_polyline_keeps_interior_bends() {
        let segments = [[0, 0], [5, 0], [5, 5]];
        let part = sub_polyline(&segments, 0, 7);
        assert_eq!(part, vec![[0, 0], [5, 0], [5, 2]]);
    }

    #[test]
    fn splices_a_single_buffer_into_a_straight_edge() {
        let raw = r#"{
            "node": [
                { "id": 1, "x": 0, "y": 0, "type": "b", "name": "drv" },
                { "id": 2, "x": 10, "y": 0, "type": "t", "capacitance": 1.0, "rat": 1.0 }
            ],
            "edge": [
                { "id": 1, "vertices": [1, 2], "segments": [[0,0],[10,0]] }
            ]
        }"#;
        let loaded = load_net_from_file_str_for_tests(raw, "net.json").unwrap();
        let sol = solution_with(vec![
            BufPlace {
                parent_id: 0,
                child_id: 0,
                len_from_child: 0,
            },
            BufPlace {
                parent_id: loaded.original_to_internal[&1],
                child_id: loaded.original_to_internal[&2],
                len_from_child: 4,
            },
        ]);

        let dir = std::env::temp_dir().join(format!(
            "vg_output_test_{}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        let net_path = dir.join("net.json");
        fs::write(&net_path, raw).unwrap();

        write_output_file(&net_path, &loaded, &sol).unwrap();

        let out_text = fs::read_to_string(dir.join("net_out.json")).unwrap();
        let out: super::super::net::NetFile = serde_json::from_str(&out_text).unwrap();
        assert_eq!(out.node.len(), 3);
        assert_eq!(out.edge.len(), 2);
        let new_node = out.node.iter().find(|n| n.id == 3).unwrap();
        assert_eq!(new_node.node_type, "b");
        // len_from_child 4 on a length-10 edge places the buffer at distance
        // 6 from the start (x=0), i.e. x=6.
        assert_eq!(new_node.x, 6);
        assert_eq!(new_node.y, 0);
    }
}
