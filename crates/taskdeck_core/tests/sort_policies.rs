use std::str::FromStr;
use taskdeck_core::{sorted_items, InvalidSortPolicy, Item, SortPolicy};
use uuid::Uuid;

fn item_at(id: u128, title: &str, completed: bool, priority: i64, created_at: i64) -> Item {
    Item {
        uuid: Uuid::from_u128(id),
        title: title.to_string(),
        detail: String::new(),
        completed,
        priority,
        created_at,
        project_uuid: None,
    }
}

#[test]
fn optimized_places_every_incomplete_item_before_every_completed_item() {
    let items = vec![
        item_at(1, "done low", true, 0, 10),
        item_at(2, "open low", false, 0, 20),
        item_at(3, "done urgent", true, 9, 30),
        item_at(4, "open urgent", false, 9, 40),
    ];

    let ordered = sorted_items(&items, SortPolicy::Optimized);

    let first_completed = ordered
        .iter()
        .position(|item| item.completed)
        .expect("completed items should be present");
    assert!(ordered[first_completed..].iter().all(|item| item.completed));
    assert!(ordered[..first_completed].iter().all(|item| !item.completed));
}

#[test]
fn optimized_orders_by_priority_descending_within_equal_status() {
    let items = vec![
        item_at(1, "low", false, 1, 10),
        item_at(2, "high", false, 8, 10),
        item_at(3, "mid", false, 4, 10),
    ];

    let ordered = sorted_items(&items, SortPolicy::Optimized);

    let priorities: Vec<i64> = ordered.iter().map(|item| item.priority).collect();
    assert_eq!(priorities, vec![8, 4, 1]);
}

#[test]
fn optimized_breaks_priority_ties_by_creation_date_ascending() {
    let items = vec![
        item_at(1, "newer", false, 3, 300),
        item_at(2, "oldest", false, 3, 100),
        item_at(3, "middle", false, 3, 200),
    ];

    let ordered = sorted_items(&items, SortPolicy::Optimized);

    let titles: Vec<&str> = ordered.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, vec!["oldest", "middle", "newer"]);
}

#[test]
fn optimized_breaks_remaining_ties_by_id() {
    let items = vec![
        item_at(9, "twin", false, 3, 100),
        item_at(2, "twin", false, 3, 100),
        item_at(5, "twin", false, 3, 100),
    ];

    let ordered = sorted_items(&items, SortPolicy::Optimized);

    let ids: Vec<Uuid> = ordered.iter().map(|item| item.uuid).collect();
    assert_eq!(
        ids,
        vec![Uuid::from_u128(2), Uuid::from_u128(5), Uuid::from_u128(9)]
    );
}

#[test]
fn title_policy_uses_case_sensitive_codepoint_order() {
    let items = vec![
        item_at(1, "b", false, 0, 0),
        item_at(2, "A", false, 0, 0),
        item_at(3, "C", false, 0, 0),
    ];

    let ordered = sorted_items(&items, SortPolicy::Title);

    let titles: Vec<&str> = ordered.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "C", "b"]);
}

#[test]
fn creation_date_policy_sorts_oldest_first() {
    let items = vec![
        item_at(1, "third", false, 0, 300),
        item_at(2, "first", false, 0, 100),
        item_at(3, "second", false, 0, 200),
    ];

    let ordered = sorted_items(&items, SortPolicy::CreationDate);

    let titles: Vec<&str> = ordered.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
}

#[test]
fn sorting_returns_a_new_vector_and_leaves_input_untouched() {
    let items = vec![
        item_at(1, "z", false, 0, 0),
        item_at(2, "a", false, 0, 0),
    ];
    let before = items.clone();

    let ordered = sorted_items(&items, SortPolicy::Title);

    assert_eq!(items, before);
    assert_eq!(ordered[0].title, "a");
}

#[test]
fn identical_input_yields_identical_output() {
    let items = vec![
        item_at(1, "twin", false, 3, 100),
        item_at(2, "twin", true, 3, 100),
        item_at(3, "other", false, 5, 50),
    ];

    for policy in [
        SortPolicy::Title,
        SortPolicy::CreationDate,
        SortPolicy::Optimized,
    ] {
        assert_eq!(sorted_items(&items, policy), sorted_items(&items, policy));
    }
}

#[test]
fn input_order_does_not_leak_into_the_result() {
    let forward = vec![
        item_at(1, "twin", false, 3, 100),
        item_at(2, "twin", false, 3, 100),
        item_at(3, "twin", false, 3, 100),
    ];
    let mut reversed = forward.clone();
    reversed.reverse();

    assert_eq!(
        sorted_items(&forward, SortPolicy::Optimized),
        sorted_items(&reversed, SortPolicy::Optimized)
    );
}

#[test]
fn policy_names_round_trip_and_default_is_optimized() {
    assert_eq!(SortPolicy::default(), SortPolicy::Optimized);

    for policy in [
        SortPolicy::Title,
        SortPolicy::CreationDate,
        SortPolicy::Optimized,
    ] {
        assert_eq!(SortPolicy::from_str(policy.as_str()).unwrap(), policy);
    }
}

#[test]
fn unknown_policy_name_is_rejected_instead_of_defaulting() {
    let err = SortPolicy::from_str("alphabetical").unwrap_err();
    assert_eq!(err, InvalidSortPolicy("alphabetical".to_string()));
    assert!(err.to_string().contains("alphabetical"));
}
