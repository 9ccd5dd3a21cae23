//! Read-only cache-cluster observability records.

use serde::{Deserialize, Serialize};

/// Number of hash slots in the cluster keyspace.
pub const TOTAL_SLOTS: u32 = 16384;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterNode {
    pub node_id: String,
    pub ip_port: String,
    pub role: String,
    #[serde(default)]
    pub master_id: Option<String>,
    pub state: String,
    /// Comma-separated ranges such as `0-5460`, or `-` for replicas
    #[serde(default)]
    pub slots: String,
    #[serde(default)]
    pub flags: String,
    #[serde(default)]
    pub used_memory_human: Option<String>,
    #[serde(default)]
    pub instantaneous_ops_per_sec: Option<u64>,
    #[serde(default)]
    pub connected_clients: Option<u64>,
    #[serde(default)]
    pub uptime_in_seconds: Option<u64>,
}

impl ClusterNode {
    pub fn is_master(&self) -> bool {
        self.role == "master"
    }

    /// True when the node reports a failure flag.
    pub fn is_failing(&self) -> bool {
        self.state == "fail" || self.flags.split(',').any(|f| f == "fail" || f == "fail?")
    }

    /// Number of slots served by this node.
    pub fn slot_count(&self) -> u32 {
        self.slots.split(',').map(range_len).sum()
    }
}

/// Length of a slot range like `0-5460` or `42`; anything else counts as zero.
fn range_len(range: &str) -> u32 {
    let range = range.trim();
    match range.split_once('-') {
        Some((start, end)) => match (start.parse::<u32>(), end.parse::<u32>()) {
            (Ok(start), Ok(end)) if end >= start => end - start + 1,
            _ => 0,
        },
        None => range.parse::<u32>().map(|_| 1).unwrap_or(0),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterHealth {
    pub mode: String,
    pub timestamp: String,
    pub cluster_state: String,
    pub cluster_size: u32,
    pub cluster_known_nodes: u32,
    pub cluster_slots_assigned: u32,
    pub cluster_slots_ok: u32,
    pub cluster_slots_pfail: u32,
    pub cluster_slots_fail: u32,
    #[serde(default)]
    pub nodes: Vec<ClusterNode>,
}

impl ClusterHealth {
    pub fn is_ok(&self) -> bool {
        self.cluster_state == "ok"
    }

    /// Percentage of the keyspace with an assigned slot.
    pub fn slot_coverage(&self) -> f64 {
        slot_coverage(self.cluster_slots_assigned)
    }

    pub fn masters(&self) -> impl Iterator<Item = &ClusterNode> {
        self.nodes.iter().filter(|n| n.is_master())
    }

    /// Replicas attached to `master_id`.
    pub fn replicas_of<'a>(&'a self, master_id: &'a str) -> impl Iterator<Item = &'a ClusterNode> {
        self.nodes
            .iter()
            .filter(move |n| n.master_id.as_deref() == Some(master_id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotDistribution {
    pub slot_range: String,
    pub master_node: String,
    pub master_ip_port: String,
    #[serde(default)]
    pub replicas: Vec<String>,
}

impl SlotDistribution {
    pub fn slot_count(&self) -> u32 {
        range_len(&self.slot_range)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSlots {
    pub mode: String,
    pub timestamp: String,
    #[serde(default = "default_total_slots")]
    pub total_slots: u32,
    #[serde(default)]
    pub slot_distributions: Vec<SlotDistribution>,
}

fn default_total_slots() -> u32 {
    TOTAL_SLOTS
}

/// Whether observability data is live or simulated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservabilityMode {
    pub mode: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl ObservabilityMode {
    pub fn is_mock(&self) -> bool {
        self.mode == "mock"
    }
}

/// `assigned` as a percentage of [`TOTAL_SLOTS`].
pub fn slot_coverage(assigned: u32) -> f64 {
    f64::from(assigned) * 100.0 / f64::from(TOTAL_SLOTS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, role: &str, master: Option<&str>, slots: &str) -> ClusterNode {
        ClusterNode {
            node_id: id.to_string(),
            ip_port: "10.0.0.1:6379".to_string(),
            role: role.to_string(),
            master_id: master.map(str::to_string),
            state: "connected".to_string(),
            slots: slots.to_string(),
            flags: role.to_string(),
            used_memory_human: None,
            instantaneous_ops_per_sec: None,
            connected_clients: None,
            uptime_in_seconds: None,
        }
    }

    #[test]
    fn test_slot_counts() {
        assert_eq!(node("a", "master", None, "0-5460").slot_count(), 5461);
        assert_eq!(node("b", "master", None, "0-9,20-29").slot_count(), 20);
        assert_eq!(node("c", "replica", Some("a"), "-").slot_count(), 0);
        assert_eq!(node("d", "master", None, "7").slot_count(), 1);
    }

    #[test]
    fn test_slot_coverage() {
        assert_eq!(slot_coverage(TOTAL_SLOTS), 100.0);
        assert_eq!(slot_coverage(8192), 50.0);
        assert_eq!(slot_coverage(0), 0.0);
    }

    #[test]
    fn test_failing_node() {
        let mut n = node("a", "master", None, "0-1");
        assert!(!n.is_failing());
        n.flags = "master,fail".to_string();
        assert!(n.is_failing());
    }

    #[test]
    fn test_health_topology() {
        let health = ClusterHealth {
            mode: "mock".to_string(),
            timestamp: "2024-01-01T00:00:00".to_string(),
            cluster_state: "ok".to_string(),
            cluster_size: 1,
            cluster_known_nodes: 2,
            cluster_slots_assigned: TOTAL_SLOTS,
            cluster_slots_ok: TOTAL_SLOTS,
            cluster_slots_pfail: 0,
            cluster_slots_fail: 0,
            nodes: vec![
                node("m1", "master", None, "0-16383"),
                node("r1", "replica", Some("m1"), "-"),
            ],
        };
        assert!(health.is_ok());
        assert_eq!(health.masters().count(), 1);
        assert_eq!(health.replicas_of("m1").count(), 1);
        assert_eq!(health.slot_coverage(), 100.0);
    }

    #[test]
    fn test_slots_default_total() {
        let slots: ClusterSlots =
            serde_json::from_str(r#"{"mode":"mock","timestamp":"t"}"#).unwrap();
        assert_eq!(slots.total_slots, TOTAL_SLOTS);
        assert!(slots.slot_distributions.is_empty());
    }
}
