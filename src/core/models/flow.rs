//! Flow document model
//!
//! Nodes and edges keep every field of the input object, in input order, so
//! per-item overrides such as `color`, `shape` or `level` reach vis-network
//! untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A node of the flow. Holds at least `id` and `label` once validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Node {
    fields: Map<String, Value>,
}

impl Node {
    /// Node identifier (any JSON value).
    #[must_use]
    pub fn id(&self) -> Option<&Value> {
        self.fields.get("id")
    }

    /// Explicit hierarchical level, if the input set one.
    #[must_use]
    pub fn level(&self) -> Option<&Value> {
        self.fields.get("level")
    }
}

/// A directed edge between two node ids. The ids are not checked against
/// the node list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Edge {
    fields: Map<String, Value>,
}

impl Edge {
    /// Source node id.
    #[must_use]
    pub fn from_id(&self) -> Option<&Value> {
        self.fields.get("from")
    }

    /// Target node id.
    #[must_use]
    pub fn to_id(&self) -> Option<&Value> {
        self.fields.get("to")
    }
}

/// The parsed input: ordered nodes and edges.
///
/// Built once per run from a validated JSON value and never modified.
/// Unknown top-level keys are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowDocument {
    /// Nodes in input order. Position is the default hierarchical level.
    pub nodes: Vec<Node>,
    /// Edges in input order.
    pub edges: Vec<Edge>,
}

impl FlowDocument {
    /// Convert a value that already passed
    /// [`validate_parsed`](crate::core::validator::validate_parsed).
    ///
    /// # Errors
    /// Returns an error if the value does not deserialize, which only happens
    /// for values that were not validated first.
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    /// Serialized `nodes` array as compact JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn nodes_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.nodes)
    }

    /// Number of nodes that set their own `level`.
    #[must_use]
    pub fn explicit_levels(&self) -> usize {
        self.nodes.iter().filter(|node| node.level().is_some()).count()
    }

    /// Number of edges with an endpoint matching no node id.
    #[must_use]
    pub fn dangling_edges(&self) -> usize {
        let ids: Vec<&Value> = self.nodes.iter().filter_map(Node::id).collect();
        let known = |end: Option<&Value>| end.is_some_and(|id| ids.contains(&id));
        self.edges
            .iter()
            .filter(|edge| !known(edge.from_id()) || !known(edge.to_id()))
            .count()
    }

    /// Serialized `edges` array as compact JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn edges_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn passthrough_fields_keep_input_order() {
        let doc = FlowDocument::from_value(json!({
            "nodes": [{"shape": "ellipse", "id": 1, "label": "Start", "color": "red"}],
            "edges": [{"from": 1, "to": 1, "dashes": true}]
        }))
        .unwrap();

        assert_eq!(
            doc.nodes_json().unwrap(),
            r#"[{"shape":"ellipse","id":1,"label":"Start","color":"red"}]"#
        );
        assert_eq!(doc.edges_json().unwrap(), r#"[{"from":1,"to":1,"dashes":true}]"#);
    }

    #[test]
    fn accessors_expose_required_fields() {
        let doc = FlowDocument::from_value(json!({
            "nodes": [{"id": "a", "label": "A", "level": 3}],
            "edges": [{"from": "a", "to": "b"}],
            "title": "ignored"
        }))
        .unwrap();

        assert_eq!(doc.nodes[0].id(), Some(&json!("a")));
        assert_eq!(doc.nodes[0].level(), Some(&json!(3)));
        assert_eq!(doc.edges[0].from_id(), Some(&json!("a")));
        assert_eq!(doc.edges[0].to_id(), Some(&json!("b")));
    }

    #[test]
    fn counts_levels_and_dangling_edges() {
        let doc = FlowDocument::from_value(json!({
            "nodes": [
                {"id": 1, "label": "A", "level": 2},
                {"id": "2", "label": "B"},
                {"id": 3, "label": "C", "level": 0}
            ],
            "edges": [
                {"from": 1, "to": "2"},
                {"from": 1, "to": 2},
                {"from": 9, "to": 3},
                {"from": 3, "to": 1}
            ]
        }))
        .unwrap();

        assert_eq!(doc.explicit_levels(), 2);
        assert_eq!(doc.dangling_edges(), 2);
    }

    #[test]
    fn null_id_is_kept() {
        let doc = FlowDocument::from_value(json!({
            "nodes": [{"id": null, "label": "A"}],
            "edges": []
        }))
        .unwrap();
        assert_eq!(doc.nodes[0].id(), Some(&Value::Null));
    }
}
