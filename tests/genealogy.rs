use synapsis_lib::genealogy::{GenealogyError, GenealogyTracker, MAX_LINEAGE_HOPS};
use uuid::Uuid;

#[test]
fn root_generation_is_zero_and_children_increment() {
    let mut tracker = GenealogyTracker::new();
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let c = Uuid::new_v4();

    tracker.register_birth(a, None).unwrap();
    tracker.register_birth(b, Some(a)).unwrap();
    tracker.register_birth(c, Some(b)).unwrap();

    assert_eq!(tracker.generation(a), 0);
    assert_eq!(tracker.generation(b), 1);
    assert_eq!(tracker.generation(c), 2);
    assert_eq!(tracker.generation(Uuid::new_v4()), 0);
}

#[test]
fn lineage_runs_oldest_first_to_self() {
    let mut tracker = GenealogyTracker::new();
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let c = Uuid::new_v4();

    tracker.register_birth(a, None).unwrap();
    tracker.register_birth(b, Some(a)).unwrap();
    tracker.register_birth(c, Some(b)).unwrap();

    assert_eq!(tracker.lineage(c), vec![a, b, c]);
    assert_eq!(tracker.lineage(a), vec![a]);
    assert!(tracker.lineage(Uuid::new_v4()).is_empty());
}

#[test]
fn duplicate_birth_is_rejected_and_first_record_stands() {
    let mut tracker = GenealogyTracker::new();
    let parent = Uuid::new_v4();
    let child = Uuid::new_v4();

    tracker.register_birth(parent, None).unwrap();
    tracker.register_birth(child, Some(parent)).unwrap();

    let result = tracker.register_birth(child, None);
    assert_eq!(result, Err(GenealogyError::DuplicateBirth(child)));
    assert_eq!(tracker.generation(child), 1);
    assert_eq!(tracker.record(child).unwrap().parent, Some(parent));
}

#[test]
fn descendants_cover_the_whole_subtree() {
    let mut tracker = GenealogyTracker::new();
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let c = Uuid::new_v4();
    let d = Uuid::new_v4();

    tracker.register_birth(a, None).unwrap();
    tracker.register_birth(b, Some(a)).unwrap();
    tracker.register_birth(c, Some(a)).unwrap();
    tracker.register_birth(d, Some(b)).unwrap();

    let descendants = tracker.descendants(a);
    assert_eq!(descendants.len(), 3);
    assert!(descendants.contains(&b));
    assert!(descendants.contains(&c));
    assert!(descendants.contains(&d));
    assert!(tracker.descendants(d).is_empty());
    assert!(tracker.descendants(Uuid::new_v4()).is_empty());
}

#[test]
fn lineage_never_exceeds_the_hop_cap() {
    let mut tracker = GenealogyTracker::new();
    let mut chain = vec![Uuid::new_v4()];
    tracker.register_birth(chain[0], None).unwrap();
    for i in 1..150 {
        let id = Uuid::new_v4();
        tracker.register_birth(id, Some(chain[i - 1])).unwrap();
        chain.push(id);
    }

    let deepest = *chain.last().unwrap();
    let lineage = tracker.lineage(deepest);
    assert_eq!(lineage.len(), MAX_LINEAGE_HOPS);
    assert_eq!(*lineage.last().unwrap(), deepest);
    assert_eq!(tracker.generation(deepest), 149);
}

#[test]
fn replication_events_stamp_child_generation() {
    let mut tracker = GenealogyTracker::new();
    let parent = Uuid::new_v4();
    let child = Uuid::new_v4();
    tracker.register_birth(parent, None).unwrap();
    tracker.register_birth(child, Some(parent)).unwrap();
    tracker.register_replication(parent, child, 80.0, 40.0);

    let stats = tracker.statistics();
    assert_eq!(stats.total_replications, 1);
    let event = &stats.recent_replications[0];
    assert_eq!(event.parent_id, parent);
    assert_eq!(event.child_id, child);
    assert_eq!(event.generation, 1);
    assert_eq!(event.parent_energy, 80.0);
    assert_eq!(event.child_energy, 40.0);
}

#[test]
fn statistics_aggregate_the_forest() {
    let mut tracker = GenealogyTracker::new();
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let c = Uuid::new_v4();
    tracker.register_birth(a, None).unwrap();
    tracker.register_birth(b, Some(a)).unwrap();
    tracker.register_birth(c, Some(a)).unwrap();
    for _ in 0..15 {
        tracker.register_replication(a, b, 10.0, 5.0);
    }

    let stats = tracker.statistics();
    assert_eq!(stats.total_particles, 3);
    assert_eq!(stats.max_generation, 1);
    // a has two children, b and c none.
    assert!((stats.avg_children - 2.0 / 3.0).abs() < 1e-12);
    assert_eq!(stats.total_replications, 15);
    assert_eq!(stats.recent_replications.len(), 10);
}
