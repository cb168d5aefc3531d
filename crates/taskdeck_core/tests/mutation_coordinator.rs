use taskdeck_core::db::open_store_in_memory;
use taskdeck_core::{SortPolicy, SqliteStore, TrackerError, TrackerService};
use uuid::Uuid;

#[test]
fn create_project_starts_open_with_default_fields() {
    let mut conn = open_store_in_memory().unwrap();
    let store = SqliteStore::try_new(&mut conn).unwrap();
    let mut tracker = TrackerService::new(store);

    let id = tracker.create_project().unwrap();

    let project = tracker.project(id).unwrap().unwrap();
    assert!(!project.closed);
    assert!(project.title.is_empty());
    assert!(project.color.is_none());
    assert_eq!(project.display_title(), "New Project");
}

#[test]
fn create_item_starts_incomplete_with_default_priority() {
    let mut conn = open_store_in_memory().unwrap();
    let store = SqliteStore::try_new(&mut conn).unwrap();
    let mut tracker = TrackerService::new(store);

    let project = tracker.create_project().unwrap();
    let id = tracker.create_item(Some(project)).unwrap();

    let item = tracker.item(id).unwrap().unwrap();
    assert!(!item.completed);
    assert_eq!(item.priority, 0);
    assert_eq!(item.project_uuid, Some(project));
    assert_eq!(item.display_title(), "New Item");
}

#[test]
fn create_item_without_a_project_is_unassigned_not_an_error() {
    let mut conn = open_store_in_memory().unwrap();
    let store = SqliteStore::try_new(&mut conn).unwrap();
    let mut tracker = TrackerService::new(store);

    let id = tracker.create_item(None).unwrap();

    let item = tracker.item(id).unwrap().unwrap();
    assert!(item.project_uuid.is_none());

    let unassigned = tracker.unassigned_items(SortPolicy::Optimized).unwrap();
    assert_eq!(unassigned.len(), 1);
    assert_eq!(unassigned[0].uuid, id);
}

#[test]
fn create_item_with_a_dangling_project_fails() {
    let mut conn = open_store_in_memory().unwrap();
    let store = SqliteStore::try_new(&mut conn).unwrap();
    let mut tracker = TrackerService::new(store);

    let missing = Uuid::new_v4();
    let err = tracker.create_item(Some(missing)).unwrap_err();
    assert!(matches!(err, TrackerError::ProjectNotFound(id) if id == missing));
}

#[test]
fn later_assignment_of_an_unassigned_item_goes_through_update() {
    let mut conn = open_store_in_memory().unwrap();
    let store = SqliteStore::try_new(&mut conn).unwrap();
    let mut tracker = TrackerService::new(store);

    let project = tracker.create_project().unwrap();
    let id = tracker.create_item(None).unwrap();

    let mut item = tracker.item(id).unwrap().unwrap();
    item.project_uuid = Some(project);
    tracker.update_item(&item).unwrap();

    let items = tracker.project_items(project, SortPolicy::Optimized).unwrap();
    assert_eq!(items.len(), 1);
    assert!(tracker
        .unassigned_items(SortPolicy::Optimized)
        .unwrap()
        .is_empty());
}

fn seed_titled_items(
    tracker: &mut TrackerService<SqliteStore<'_>>,
    project: Uuid,
    titles: &[&str],
) {
    for title in titles {
        let id = tracker.create_item(Some(project)).unwrap();
        let mut item = tracker.item(id).unwrap().unwrap();
        item.title = title.to_string();
        tracker.update_item(&item).unwrap();
    }
}

#[test]
fn delete_positions_resolve_against_one_ordered_snapshot() {
    let mut conn = open_store_in_memory().unwrap();
    let store = SqliteStore::try_new(&mut conn).unwrap();
    let mut tracker = TrackerService::new(store);

    let project = tracker.create_project().unwrap();
    seed_titled_items(&mut tracker, project, &["B", "A", "C"]);

    // Sorted view is ["A", "B", "C"]; positions 0 and 2 are "A" and "C".
    tracker
        .delete_items_at_positions(project, SortPolicy::Title, &[0, 2])
        .unwrap();

    let remaining = tracker.project_items(project, SortPolicy::Title).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].title, "B");
}

#[test]
fn out_of_range_position_fails_and_leaves_the_store_unchanged() {
    let mut conn = open_store_in_memory().unwrap();
    let store = SqliteStore::try_new(&mut conn).unwrap();
    let mut tracker = TrackerService::new(store);

    let project = tracker.create_project().unwrap();
    seed_titled_items(&mut tracker, project, &["A", "B", "C"]);

    let err = tracker
        .delete_items_at_positions(project, SortPolicy::Title, &[5])
        .unwrap_err();
    assert!(matches!(
        err,
        TrackerError::PositionOutOfRange { position: 5, len: 3 }
    ));

    let items = tracker.project_items(project, SortPolicy::Title).unwrap();
    assert_eq!(items.len(), 3);
}

#[test]
fn a_single_bad_position_voids_the_whole_deletion() {
    let mut conn = open_store_in_memory().unwrap();
    let store = SqliteStore::try_new(&mut conn).unwrap();
    let mut tracker = TrackerService::new(store);

    let project = tracker.create_project().unwrap();
    seed_titled_items(&mut tracker, project, &["A", "B", "C"]);

    let err = tracker
        .delete_items_at_positions(project, SortPolicy::Title, &[0, 7])
        .unwrap_err();
    assert!(matches!(err, TrackerError::PositionOutOfRange { .. }));

    assert_eq!(
        tracker.project_items(project, SortPolicy::Title).unwrap().len(),
        3
    );
}

#[test]
fn duplicate_positions_collapse_to_one_deletion() {
    let mut conn = open_store_in_memory().unwrap();
    let store = SqliteStore::try_new(&mut conn).unwrap();
    let mut tracker = TrackerService::new(store);

    let project = tracker.create_project().unwrap();
    seed_titled_items(&mut tracker, project, &["A", "B", "C"]);

    tracker
        .delete_items_at_positions(project, SortPolicy::Title, &[1, 1])
        .unwrap();

    let remaining = tracker.project_items(project, SortPolicy::Title).unwrap();
    let titles: Vec<&str> = remaining.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "C"]);
}

#[test]
fn deleting_from_a_missing_project_fails() {
    let mut conn = open_store_in_memory().unwrap();
    let store = SqliteStore::try_new(&mut conn).unwrap();
    let mut tracker = TrackerService::new(store);

    let missing = Uuid::new_v4();
    let err = tracker
        .delete_items_at_positions(missing, SortPolicy::Title, &[0])
        .unwrap_err();
    assert!(matches!(err, TrackerError::ProjectNotFound(id) if id == missing));
}

#[test]
fn repeated_reads_without_mutation_are_identical() {
    let mut conn = open_store_in_memory().unwrap();
    let store = SqliteStore::try_new(&mut conn).unwrap();
    let mut tracker = TrackerService::new(store);

    let project = tracker.create_project().unwrap();
    seed_titled_items(&mut tracker, project, &["B", "A", "C"]);

    let first = tracker.project_items(project, SortPolicy::Optimized).unwrap();
    let second = tracker.project_items(project, SortPolicy::Optimized).unwrap();
    assert_eq!(first, second);
}

#[test]
fn deleting_a_project_cascades_to_its_items() {
    let mut conn = open_store_in_memory().unwrap();
    let store = SqliteStore::try_new(&mut conn).unwrap();
    let mut tracker = TrackerService::new(store);

    let project = tracker.create_project().unwrap();
    let kept = tracker.create_item(None).unwrap();
    let doomed = tracker.create_item(Some(project)).unwrap();

    tracker.delete_project(project).unwrap();

    assert!(tracker.project(project).unwrap().is_none());
    assert!(tracker.item(doomed).unwrap().is_none());
    assert!(tracker.item(kept).unwrap().is_some());
}

#[test]
fn completing_an_item_drops_it_from_the_feed_but_not_the_project() {
    let mut conn = open_store_in_memory().unwrap();
    let store = SqliteStore::try_new(&mut conn).unwrap();
    let mut tracker = TrackerService::new(store);

    let project = tracker.create_project().unwrap();
    let id = tracker.create_item(Some(project)).unwrap();

    let mut item = tracker.item(id).unwrap().unwrap();
    item.completed = true;
    tracker.update_item(&item).unwrap();

    assert!(tracker.home_feed().unwrap().is_empty());
    assert_eq!(
        tracker
            .project_items(project, SortPolicy::Optimized)
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn save_with_nothing_pending_is_idempotent() {
    let mut conn = open_store_in_memory().unwrap();
    let store = SqliteStore::try_new(&mut conn).unwrap();
    let mut tracker = TrackerService::new(store);

    tracker.save().unwrap();
    tracker.save().unwrap();
}
