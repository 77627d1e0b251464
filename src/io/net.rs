use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::tree::{Edge, SinkSpec};

/// The `net.json` envelope, kept close to its on-disk shape (including
/// whatever extra per-node/per-edge fields the source tool writes) so the
/// output regenerator in [`super::output`] can round-trip it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetFile {
    pub node: Vec<RawNode>,
    pub edge: Vec<RawEdge>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawNode {
    pub id: i64,
    pub x: i64,
    pub y: i64,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub capacitance: Option<f64>,
    #[serde(default)]
    pub rat: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawEdge {
    pub id: i64,
    pub vertices: [i64; 2],
    pub segments: Vec<[i64; 2]>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

const DRIVER_TYPE: &str = "b";
const SINK_TYPE: &str = "t";
const STEINER_TYPE: &str = "s";

/// A parsed net file translated into the core's input types, plus the id
/// remapping needed to express the solution back in terms of the original
/// file's node ids (and to splice buffers back into its geometry).
pub struct LoadedNet {
    pub raw: NetFile,
    pub edges: Vec<Edge>,
    pub sinks: Vec<SinkSpec>,
    /// Internal id -> original file id.
    pub internal_to_original: HashMap<usize, i64>,
    /// Original file id -> internal id.
    pub original_to_internal: HashMap<i64, usize>,
}

fn manhattan_length(segments: &[[i64; 2]]) -> i64 {
    segments
        .windows(2)
        .map(|pair| (pair[0][0] - pair[1][0]).abs() + (pair[0][1] - pair[1][1]).abs())
        .sum()
}

/// Reads and parses a net file, assigning internal ids (driver -> 0, sinks ->
/// `1..N` in file order, Steiner points -> `N+1..N+M` in file order) and
/// translating the edge list into unit lengths via Manhattan distance along
/// each edge's polyline.
pub fn load_net_file(path: impl AsRef<Path>) -> Result<LoadedNet> {
    let path = path.as_ref();
    let path_str = path.display().to_string();
    let raw_text = fs::read_to_string(path).map_err(|e| Error::io(path_str.clone(), e))?;
    load_net_from_str(&raw_text, &path_str)
}

pub(crate) fn load_net_from_str(raw_text: &str, path_str: &str) -> Result<LoadedNet> {
    let raw: NetFile =
        serde_json::from_str(raw_text).map_err(|e| Error::json(path_str.to_string(), e))?;

    let driver_id = raw
        .node
        .iter()
        .find(|n| n.node_type == DRIVER_TYPE)
        .map(|n| n.id)
        .ok_or_else(|| Error::invalid_input(path_str, "no node of type \"b\" (driver) found"))?;

    let mut original_to_internal = HashMap::with_capacity(raw.node.len());
    let mut internal_to_original = HashMap::with_capacity(raw.node.len());
    original_to_internal.insert(driver_id, 0);
    internal_to_original.insert(0, driver_id);

    let mut next_sink_id = 1usize;
    for node in raw.node.iter().filter(|n| n.node_type == SINK_TYPE) {
        original_to_internal.insert(node.id, next_sink_id);
        internal_to_original.insert(next_sink_id, node.id);
        next_sink_id += 1;
    }
    let sink_count = next_sink_id - 1;

    let mut next_steiner_id = sink_count + 1;
    for node in raw.node.iter().filter(|n| n.node_type == STEINER_TYPE) {
        original_to_internal.insert(node.id, next_steiner_id);
        internal_to_original.insert(next_steiner_id, node.id);
        next_steiner_id += 1;
    }

    for node in &raw.node {
        if ![DRIVER_TYPE, SINK_TYPE, STEINER_TYPE].contains(&node.node_type.as_str()) {
            return Err(Error::invalid_input(
                path_str,
                format!("node {} has unknown type \"{}\"", node.id, node.node_type),
            ));
        }
    }

    let mut sinks = Vec::with_capacity(sink_count);
    for node in raw.node.iter().filter(|n| n.node_type == SINK_TYPE) {
        let c_load = node.capacitance.ok_or_else(|| {
            Error::invalid_input(path_str, format!("sink {} has no capacitance", node.id))
        })?;
        let rat = node.rat.ok_or_else(|| {
            Error::invalid_input(path_str, format!("sink {} has no rat", node.id))
        })?;
        sinks.push(SinkSpec {
            id: original_to_internal[&node.id],
            c_load,
            rat,
        });
    }

    let mut edges = Vec::with_capacity(raw.edge.len());
    for edge in &raw.edge {
        let [start, end] = edge.vertices;
        let start_id = *original_to_internal.get(&start).ok_or_else(|| {
            Error::invalid_input(
                path_str,
                format!("edge {} references unknown node {}", edge.id, start),
            )
        })?;
        let end_id = *original_to_internal.get(&end).ok_or_else(|| {
            Error::invalid_input(
                path_str,
                format!("edge {} references unknown node {}", edge.id, end),
            )
        })?;
        let length = manhattan_length(&edge.segments);
        if length < 0 {
            return Err(Error::invalid_input(
                path_str,
                format!("edge {} has a negative computed length", edge.id),
            ));
        }
        edges.push(Edge {
            start_id,
            end_id,
            length: length as usize,
        });
    }

    Ok(LoadedNet {
        raw,
        edges,
        sinks,
        internal_to_original,
        original_to_internal,
    })
}
