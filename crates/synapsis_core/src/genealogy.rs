use crate::config::GenealogyConfig;
use chrono::Utc;
use std::collections::{HashMap, HashSet, VecDeque};
use synapsis_data::{
    FamilyNode, GenealogyExport, GenealogyRecord, GenealogyStats, History, ReplicationEvent,
};
use thiserror::Error;
use uuid::Uuid;

/// Documented hard cap on ancestor walks.
pub const MAX_LINEAGE_HOPS: usize = 100;
/// Documented hard cap on descendant traversal.
pub const MAX_DESCENDANT_VISITS: usize = 1000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenealogyError {
    /// Re-registering an id would desynchronize generation counts from the
    /// recorded lineage, so it is rejected and the first record stands.
    #[error("particle {0} is already registered")]
    DuplicateBirth(Uuid),
}

/// Maintains the parent/children forest over particle identities and the
/// bounded log of replication events.
///
/// Records are created on birth notification and never deleted; memory is
/// bounded by the number of distinct identities the simulation produces.
pub struct GenealogyTracker {
    family_tree: HashMap<Uuid, GenealogyRecord>,
    replication_events: History<ReplicationEvent>,
}

impl Default for GenealogyTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl GenealogyTracker {
    pub fn new() -> Self {
        Self::with_config(&GenealogyConfig {
            event_capacity: 1000,
        })
    }

    pub fn with_config(config: &GenealogyConfig) -> Self {
        Self {
            family_tree: HashMap::new(),
            replication_events: History::new(config.event_capacity),
        }
    }

    /// Registers a newborn particle. A known parent links the child into the
    /// forest at `parent.generation + 1`; an unknown or absent parent makes
    /// the particle a root at generation 0.
    pub fn register_birth(
        &mut self,
        id: Uuid,
        parent_id: Option<Uuid>,
    ) -> Result<(), GenealogyError> {
        if self.family_tree.contains_key(&id) {
            return Err(GenealogyError::DuplicateBirth(id));
        }

        let mut record = GenealogyRecord {
            parent: None,
            children: Vec::new(),
            generation: 0,
            birth_time: Utc::now(),
        };

        if let Some(pid) = parent_id {
            if let Some(parent) = self.family_tree.get_mut(&pid) {
                parent.children.push(id);
                record.parent = Some(pid);
                record.generation = parent.generation + 1;
            }
        }

        self.family_tree.insert(id, record);
        Ok(())
    }

    /// Records a replication event, stamped with the child's generation at
    /// this moment.
    pub fn register_replication(
        &mut self,
        parent_id: Uuid,
        child_id: Uuid,
        parent_energy: f64,
        child_energy: f64,
    ) {
        let event = ReplicationEvent {
            timestamp: Utc::now(),
            parent_id,
            child_id,
            parent_energy,
            child_energy,
            generation: self.generation(child_id),
        };
        self.replication_events.push(event);
    }

    /// Generation of a particle; 0 for unknown ids.
    pub fn generation(&self, id: Uuid) -> u32 {
        self.family_tree.get(&id).map_or(0, |r| r.generation)
    }

    pub fn record(&self, id: Uuid) -> Option<&GenealogyRecord> {
        self.family_tree.get(&id)
    }

    /// Ancestors oldest-first, ending with `id` itself.
    ///
    /// A visited-set guards against a corrupted (cyclic) forest; the
    /// documented 100-hop cap bounds the result either way.
    pub fn lineage(&self, id: Uuid) -> Vec<Uuid> {
        let mut lineage = Vec::new();
        let mut visited = HashSet::new();
        let mut current = Some(id);

        while let Some(cid) = current {
            if lineage.len() >= MAX_LINEAGE_HOPS || !visited.insert(cid) {
                break;
            }
            let Some(record) = self.family_tree.get(&cid) else {
                break;
            };
            lineage.push(cid);
            current = record.parent;
        }

        lineage.reverse();
        lineage
    }

    /// All descendants of `id`, breadth-first.
    ///
    /// Same guard discipline as `lineage`: visited-set plus the documented
    /// 1000-node cap.
    pub fn descendants(&self, id: Uuid) -> Vec<Uuid> {
        let mut descendants = Vec::new();
        let Some(root) = self.family_tree.get(&id) else {
            return descendants;
        };

        let mut visited: HashSet<Uuid> = HashSet::from([id]);
        let mut queue: VecDeque<Uuid> = root.children.iter().copied().collect();

        while let Some(child) = queue.pop_front() {
            if descendants.len() >= MAX_DESCENDANT_VISITS {
                break;
            }
            if !visited.insert(child) {
                continue;
            }
            descendants.push(child);
            if let Some(record) = self.family_tree.get(&child) {
                queue.extend(record.children.iter().copied());
            }
        }

        descendants
    }

    pub fn statistics(&self) -> GenealogyStats {
        let max_generation = self
            .family_tree
            .values()
            .map(|r| r.generation)
            .max()
            .unwrap_or(0);

        let avg_children = if self.family_tree.is_empty() {
            0.0
        } else {
            self.family_tree
                .values()
                .map(|r| r.children.len())
                .sum::<usize>() as f64
                / self.family_tree.len() as f64
        };

        GenealogyStats {
            total_particles: self.family_tree.len(),
            max_generation,
            avg_children,
            total_replications: self.replication_events.len(),
            recent_replications: self.replication_events.recent(10),
        }
    }

    /// Flattens the forest, events, and statistics into one serializable
    /// document. Nodes are sorted by birth time (ties by id) so identical
    /// trackers export identical documents.
    pub fn export(&self) -> GenealogyExport {
        let mut family_tree: Vec<FamilyNode> = self
            .family_tree
            .iter()
            .map(|(&id, record)| FamilyNode {
                id,
                parent: record.parent,
                children: record.children.clone(),
                generation: record.generation,
                birth_time: record.birth_time,
            })
            .collect();
        family_tree.sort_by(|a, b| a.birth_time.cmp(&b.birth_time).then(a.id.cmp(&b.id)));

        GenealogyExport {
            family_tree,
            replication_events: self.replication_events.recent(self.replication_events.len()),
            statistics: self.statistics(),
        }
    }

    pub fn events(&self) -> &History<ReplicationEvent> {
        &self.replication_events
    }

    pub fn len(&self) -> usize {
        self.family_tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.family_tree.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lineage_terminates_on_a_corrupted_cycle() {
        let mut tracker = GenealogyTracker::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        tracker.register_birth(a, None).unwrap();
        tracker.register_birth(b, Some(a)).unwrap();

        // Corrupt the forest: a's parent becomes its own descendant.
        tracker.family_tree.get_mut(&a).unwrap().parent = Some(b);

        let lineage = tracker.lineage(b);
        assert!(lineage.len() <= MAX_LINEAGE_HOPS);
        assert!(lineage.contains(&a) && lineage.contains(&b));
    }

    #[test]
    fn descendants_terminate_on_a_corrupted_cycle() {
        let mut tracker = GenealogyTracker::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        tracker.register_birth(a, None).unwrap();
        tracker.register_birth(b, Some(a)).unwrap();

        // Corrupt the forest: the child adopts its own parent.
        tracker.family_tree.get_mut(&b).unwrap().children.push(a);

        let descendants = tracker.descendants(a);
        assert!(descendants.len() <= MAX_DESCENDANT_VISITS);
        assert_eq!(descendants, vec![b]);
    }

    #[test]
    fn unknown_parent_makes_a_root() {
        let mut tracker = GenealogyTracker::new();
        let ghost = Uuid::new_v4();
        let child = Uuid::new_v4();
        tracker.register_birth(child, Some(ghost)).unwrap();
        assert_eq!(tracker.generation(child), 0);
        assert_eq!(tracker.record(child).unwrap().parent, None);
    }
}
