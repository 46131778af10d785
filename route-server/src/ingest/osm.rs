//! OpenStreetMap relation documents.
//!
//! Parses the response of the OSM API's `relation/{id}/full` call: every
//! node and way the relation references, plus the relation itself.

use std::collections::HashMap;

use roxmltree::{Document, Node};
use tracing::debug;

use crate::domain::Coordinate;

use super::error::IngestError;
use super::names::normalize_station_name;

/// A node with a usable position.
#[derive(Debug, Clone, PartialEq)]
pub struct OsmNode {
    pub id: String,
    pub location: Coordinate,
    pub tags: HashMap<String, String>,
}

impl OsmNode {
    /// Value of a tag, if set.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Chinese name, falling back to the default name.
    pub fn local_name(&self) -> Option<&str> {
        self.tag("name:zh").or_else(|| self.tag("name"))
    }

    /// Local name with station suffixes removed.
    pub fn normalized_name(&self) -> Option<String> {
        self.local_name().map(normalize_station_name)
    }

    pub fn english_name(&self) -> Option<&str> {
        self.tag("name:en")
    }
}

/// Kind of object a relation member refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Node,
    Way,
    Relation,
}

/// One member of a relation, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub kind: MemberKind,
    pub reference: String,
    pub role: String,
}

/// A relation with the nodes and ways it references.
#[derive(Debug, Clone, Default)]
pub struct OsmRelation {
    pub id: String,
    pub nodes: HashMap<String, OsmNode>,
    /// Way id to its node references, in order.
    pub ways: HashMap<String, Vec<String>>,
    pub members: Vec<Member>,
}

impl OsmRelation {
    /// Parse a `relation/{id}/full` document.
    ///
    /// Nodes without finite coordinates are dropped. Fails if the document
    /// does not contain relation `relation_id`.
    pub fn parse(xml: &str, relation_id: &str) -> Result<Self, IngestError> {
        let doc = Document::parse(xml)?;
        let root = doc.root_element();

        let nodes: HashMap<String, OsmNode> = root
            .children()
            .filter(|n| n.has_tag_name("node"))
            .filter_map(parse_node)
            .map(|node| (node.id.clone(), node))
            .collect();

        let ways: HashMap<String, Vec<String>> = root
            .children()
            .filter(|n| n.has_tag_name("way"))
            .filter_map(|way| {
                let id = way.attribute("id")?;
                let refs = way
                    .children()
                    .filter(|n| n.has_tag_name("nd"))
                    .filter_map(|nd| nd.attribute("ref"))
                    .filter(|r| !r.is_empty())
                    .map(str::to_string)
                    .collect();
                Some((id.to_string(), refs))
            })
            .collect();

        let relation = root
            .children()
            .filter(|n| n.has_tag_name("relation"))
            .find(|n| n.attribute("id") == Some(relation_id))
            .ok_or_else(|| IngestError::MissingRelation(relation_id.to_string()))?;

        let members: Vec<Member> = relation
            .children()
            .filter(|n| n.has_tag_name("member"))
            .filter_map(parse_member)
            .collect();

        debug!(
            relation = relation_id,
            nodes = nodes.len(),
            ways = ways.len(),
            members = members.len(),
            "parsed OSM relation"
        );

        Ok(Self {
            id: relation_id.to_string(),
            nodes,
            ways,
            members,
        })
    }

    /// Station-like node members, in member order.
    pub fn station_members(&self) -> Vec<(&Member, &OsmNode)> {
        self.members
            .iter()
            .filter(|m| m.kind == MemberKind::Node)
            .filter_map(|m| Some((m, self.nodes.get(&m.reference)?)))
            .filter(|(m, node)| is_station_like(node, &m.role))
            .collect()
    }

    /// The relation's node sequence.
    ///
    /// Node members contribute their own id, way members their node list,
    /// in member order. Nodes may repeat where ways join.
    pub fn node_sequence(&self) -> Vec<&str> {
        let mut sequence = Vec::new();
        for member in &self.members {
            match member.kind {
                MemberKind::Node => sequence.push(member.reference.as_str()),
                MemberKind::Way => {
                    if let Some(refs) = self.ways.get(&member.reference) {
                        sequence.extend(refs.iter().map(String::as_str));
                    }
                }
                MemberKind::Relation => {}
            }
        }
        sequence
    }
}

/// Whether a node is a station, junction, halt or stop.
///
/// Decided by the `railway` and `public_transport` tags, or by a member
/// role mentioning a stop or station.
pub fn is_station_like(node: &OsmNode, role: &str) -> bool {
    let railway = matches!(
        node.tag("railway"),
        Some("station" | "junction" | "halt" | "stop" | "stop_position")
    );
    let public_transport = matches!(
        node.tag("public_transport"),
        Some("station" | "stop_position" | "platform")
    );
    railway || public_transport || role.contains("stop") || role.contains("station")
}

fn parse_node(node: Node) -> Option<OsmNode> {
    let id = node.attribute("id")?;
    let latitude: f64 = node.attribute("lat")?.parse().ok()?;
    let longitude: f64 = node.attribute("lon")?.parse().ok()?;
    if !latitude.is_finite() || !longitude.is_finite() {
        return None;
    }

    let tags = node
        .children()
        .filter(|n| n.has_tag_name("tag"))
        .filter_map(|tag| {
            let key = tag.attribute("k")?;
            let value = tag.attribute("v")?;
            Some((key.to_string(), value.to_string()))
        })
        .filter(|(k, _)| !k.is_empty())
        .collect();

    Some(OsmNode {
        id: id.to_string(),
        location: Coordinate::new(latitude, longitude),
        tags,
    })
}

fn parse_member(member: Node) -> Option<Member> {
    let kind = match member.attribute("type")? {
        "node" => MemberKind::Node,
        "way" => MemberKind::Way,
        "relation" => MemberKind::Relation,
        _ => return None,
    };
    Some(Member {
        kind,
        reference: member.attribute("ref")?.to_string(),
        role: member.attribute("role").unwrap_or_default().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RELATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6" generator="openstreetmap-cgimap">
  <node id="1" lat="22.0" lon="114.0">
    <tag k="railway" v="station"/>
    <tag k="name" v="甲站"/>
    <tag k="name:en" v="Jia"/>
  </node>
  <node id="2" lat="22.0" lon="114.1"/>
  <node id="3" lat="22.0" lon="114.2">
    <tag k="public_transport" v="stop_position"/>
    <tag k="name:zh" v="乙站"/>
    <tag k="name" v="Yi"/>
  </node>
  <node id="4" lat="22.0" lon="114.3">
    <tag k="railway" v="junction"/>
    <tag k="name" v="丙线路所"/>
  </node>
  <node id="5" lat="NaN" lon="114.4">
    <tag k="railway" v="station"/>
  </node>
  <node id="6" lat="22.5" lon="114.5">
    <tag k="name" v="丁站"/>
  </node>
  <node id="7" lat="22.5" lon="114.5">
    <tag k="railway" v="level_crossing"/>
  </node>
  <way id="10">
    <nd ref="1"/>
    <nd ref="2"/>
    <nd ref="3"/>
  </way>
  <way id="11">
    <nd ref="3"/>
    <nd ref="4"/>
  </way>
  <relation id="99">
    <member type="node" ref="1" role="stop"/>
    <member type="node" ref="3" role=""/>
    <member type="node" ref="4" role=""/>
    <member type="node" ref="5" role="stop"/>
    <member type="node" ref="6" role="station"/>
    <member type="node" ref="7" role=""/>
    <member type="way" ref="10" role=""/>
    <member type="way" ref="11" role=""/>
    <member type="way" ref="404" role=""/>
  </relation>
</osm>
"#;

    #[test]
    fn parses_nodes_ways_members() {
        let relation = OsmRelation::parse(RELATION, "99").unwrap();

        assert_eq!(relation.nodes.len(), 6);
        assert!(!relation.nodes.contains_key("5"));
        assert_eq!(relation.ways["10"], vec!["1", "2", "3"]);
        assert_eq!(relation.members.len(), 9);
        assert_eq!(relation.members[0].role, "stop");
        assert_eq!(relation.members[6].kind, MemberKind::Way);
    }

    #[test]
    fn node_names() {
        let relation = OsmRelation::parse(RELATION, "99").unwrap();

        let jia = &relation.nodes["1"];
        assert_eq!(jia.local_name(), Some("甲站"));
        assert_eq!(jia.normalized_name().as_deref(), Some("甲"));
        assert_eq!(jia.english_name(), Some("Jia"));

        let yi = &relation.nodes["3"];
        assert_eq!(yi.local_name(), Some("乙站"));

        let bing = &relation.nodes["4"];
        assert_eq!(bing.normalized_name().as_deref(), Some("丙所"));

        assert_eq!(relation.nodes["2"].local_name(), None);
    }

    #[test]
    fn station_members_in_order() {
        let relation = OsmRelation::parse(RELATION, "99").unwrap();
        let ids: Vec<&str> = relation
            .station_members()
            .iter()
            .map(|(_, node)| node.id.as_str())
            .collect();

        // 5 has no position, 7 is neither tagged nor in a station role
        assert_eq!(ids, vec!["1", "3", "4", "6"]);
    }

    #[test]
    fn node_sequence_concatenates_members() {
        let relation = OsmRelation::parse(RELATION, "99").unwrap();
        assert_eq!(
            relation.node_sequence(),
            vec!["1", "3", "4", "5", "6", "7", "1", "2", "3", "3", "4"]
        );
    }

    #[test]
    fn station_like_rules() {
        let node = |k: &str, v: &str| OsmNode {
            id: "n".into(),
            location: Coordinate::default(),
            tags: HashMap::from([(k.to_string(), v.to_string())]),
        };

        assert!(is_station_like(&node("railway", "halt"), ""));
        assert!(is_station_like(&node("railway", "stop"), ""));
        assert!(is_station_like(&node("public_transport", "platform"), ""));
        assert!(!is_station_like(&node("public_transport", "stop_area"), ""));
        assert!(!is_station_like(&node("railway", "signal"), ""));
        assert!(is_station_like(&node("railway", "signal"), "stop_entry_only"));
        assert!(is_station_like(&node("highway", "bus_stop"), "station"));
    }

    #[test]
    fn missing_relation() {
        let err = OsmRelation::parse(RELATION, "100").unwrap_err();
        assert!(matches!(err, IngestError::MissingRelation(id) if id == "100"));
    }

    #[test]
    fn malformed_xml() {
        let err = OsmRelation::parse("<osm><node></osm>", "1").unwrap_err();
        assert!(matches!(err, IngestError::Xml(_)));
    }
}
