use std::collections::HashMap;

use crate::error::{Error, Result};

/// A directed routing-tree edge as supplied by the caller: wire of integer
/// `length` running from `start_id` (toward the driver) to `end_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub start_id: usize,
    pub end_id: usize,
    pub length: usize,
}

/// A sink's electrical load and timing requirement, keyed by node id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SinkSpec {
    pub id: usize,
    pub c_load: f64,
    pub rat: f64,
}

/// The tag of a routing-tree node. An explicit sum type rather than an
/// id-range convention (`id == 0` is the driver, `1..N` are sinks, anything
/// else is Steiner): membership is resolved once, from the sink list, instead
/// of re-derived from id arithmetic at every call site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    Driver,
    Sink { c_load: f64, rat: f64 },
    Steiner,
}

/// One node of the routing tree, with its children recorded in the order
/// they were discovered in the input edge list, each tagged with the length
/// of the edge connecting it to this node.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: usize,
    pub kind: NodeKind,
    pub children: Vec<(usize, usize)>,
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A rooted, connected, acyclic routing tree built from a flat edge list.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: HashMap<usize, Node>,
    root: usize,
}

impl Tree {
    pub fn root(&self) -> usize {
        self.root
    }

    pub fn node(&self, id: usize) -> &Node {
        self.nodes
            .get(&id)
            .expect("node id must belong to this tree")
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// Builds a rooted tree from a flat edge list and sink list.
///
/// Node id 0 is reserved for the driver. The builder performs a depth-first
/// expansion from id 0 over the edge list, consuming each edge exactly once;
/// any edge whose start is never reached, any edge left unconsumed, any node
/// revisited through more than one parent, or an empty sink list fails the
/// build with [`Error::MalformedTree`].
pub fn build_tree(edges: &[Edge], sinks: &[SinkSpec]) -> Result<Tree> {
    if sinks.is_empty() {
        return Err(Error::malformed_tree("routing tree has zero sinks"));
    }

    let mut sink_map = HashMap::with_capacity(sinks.len());
    for sink in sinks {
        if sink.id == 0 {
            return Err(Error::malformed_tree("driver id 0 cannot be a sink"));
        }
        if sink_map.insert(sink.id, *sink).is_some() {
            return Err(Error::malformed_tree(format!(
                "duplicate sink id {}",
                sink.id
            )));
        }
    }

    let mut visited = vec![false; edges.len()];
    let mut nodes: HashMap<usize, Node> = HashMap::new();

    build_recursive(0, edges, &sink_map, &mut visited, &mut nodes)?;

    if visited.iter().any(|v| !v) {
        return Err(Error::malformed_tree(
            "edge list contains edges unreachable from the driver",
        ));
    }

    for sink in sinks {
        if !nodes.contains_key(&sink.id) {
            return Err(Error::malformed_tree(format!(
                "sink {} is not connected to the driver",
                sink.id
            )));
        }
    }

    for node in nodes.values() {
        if node.is_leaf() && !matches!(node.kind, NodeKind::Sink { .. }) {
            return Err(Error::malformed_tree(format!(
                "node {} is a leaf but is not a sink",
                node.id
            )));
        }
    }

    Ok(Tree { nodes, root: 0 })
}

fn build_recursive(
    id: usize,
    edges: &[Edge],
    sink_map: &HashMap<usize, SinkSpec>,
    visited: &mut [bool],
    nodes: &mut HashMap<usize, Node>,
) -> Result<()> {
    if nodes.contains_key(&id) {
        return Err(Error::malformed_tree(format!(
            "node {} is reachable through more than one edge",
            id
        )));
    }

    if let Some(sink) = sink_map.get(&id) {
        nodes.insert(
            id,
            Node {
                id,
                kind: NodeKind::Sink {
                    c_load: sink.c_load,
                    rat: sink.rat,
                },
                children: Vec::new(),
            },
        );
        return Ok(());
    }

    let kind = if id == 0 {
        NodeKind::Driver
    } else {
        NodeKind::Steiner
    };
    let mut children = Vec::new();
    for (i, edge) in edges.iter().enumerate() {
        if visited[i] || edge.start_id != id {
            continue;
        }
        visited[i] = true;
        children.push((edge.end_id, edge.length));
        build_recursive(edge.end_id, edges, sink_map, visited, nodes)?;
    }
    nodes.insert(id, Node { id, kind, children });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_a_simple_chain() {
        let edges = [Edge {
            start_id: 0,
            end_id: 1,
            length: 5,
        }];
        let sinks = [SinkSpec {
            id: 1,
            c_load: 1.0,
            rat: 10.0,
        }];
        let tree = build_tree(&edges, &sinks).unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.node(0).children, vec![(1, 5)]);
        assert!(matches!(tree.node(1).kind, NodeKind::Sink { .. }));
    }

    #[test]
    fn rejects_unreachable_edges() {
        let edges = [
            Edge {
                start_id: 0,
                end_id: 1,
                length: 1,
            },
            Edge {
                start_id: 7,
                end_id: 2,
                length: 1,
            },
        ];
        let sinks = [
            SinkSpec {
                id: 1,
                c_load: 1.0,
                rat: 1.0,
            },
            SinkSpec {
                id: 2,
                c_load: 1.0,
                rat: 1.0,
            },
        ];
        assert!(matches!(
            build_tree(&edges, &sinks),
            Err(Error::MalformedTree { .. })
        ));
    }

    #[test]
    fn rejects_zero_sinks() {
        assert!(matches!(
            build_tree(&[], &[]),
            Err(Error::MalformedTree { .. })
        ));
    }

    #[test]
    fn rejects_disconnected_sink() {
        let edges = [Edge {
            start_id: 0,
            end_id: 1,
            length: 1,
        }];
        let sinks = [
            SinkSpec {
                id: 1,
                c_load: 1.0,
                rat: 1.0,
            },
            SinkSpec {
                id: 2,
                c_load: 1.0,
                rat: 1.0,
            },
        ];
        assert!(matches!(
            build_tree(&edges, &sinks),
            Err(Error::MalformedTree { .. })
        ));
    }

    #[test]
    fn builds_ternary_fanout() {
        let edges = [
            Edge {
                start_id: 0,
                end_id: 4,
                length: 2,
            },
            Edge {
                start_id: 4,
                end_id: 1,
                length: 1,
            },
            Edge {
                start_id: 4,
                end_id: 2,
                length: 1,
            },
            Edge {
                start_id: 4,
                end_id: 3,
                length: 1,
            },
        ];
        let sinks = [
            SinkSpec {
                id: 1,
                c_load: 1.0,
                rat: 1.0,
            },
            SinkSpec {
                id: 2,
                c_load: 1.0,
                rat: 1.0,
            },
            SinkSpec {
                id: 3,
                c_load: 1.0,
                rat: 1.0,
            },
        ];
        let tree = build_tree(&edges, &sinks).unwrap();
        assert_eq!(tree.node(4).children.len(), 3);
        assert!(matches!(tree.node(4).kind, NodeKind::Steiner));
    }
}
