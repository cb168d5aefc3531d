//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taskdeck_core` wiring end to
//!   end against an in-memory store.
//! - Keep output deterministic for quick local sanity checks.

use taskdeck_core::db::open_store_in_memory;
use taskdeck_core::{SortPolicy, SqliteStore, TrackerService};

fn main() {
    if let Err(err) = run() {
        eprintln!("taskdeck smoke run failed: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("taskdeck_core version={}", taskdeck_core::core_version());

    let mut conn = open_store_in_memory()?;
    let store = SqliteStore::try_new(&mut conn)?;
    let mut tracker = TrackerService::new(store);

    let project = tracker.create_project()?;
    let mut record = tracker
        .project(project)?
        .ok_or("created project missing from store")?;
    record.title = "Getting started".to_string();
    record.color = Some("Teal".to_string());
    tracker.update_project(&record)?;

    for (title, priority) in [
        ("Read the handbook", 2),
        ("File expenses", 0),
        ("Plan the week", 1),
        ("Set up the workspace", 3),
    ] {
        let id = tracker.create_item(Some(project))?;
        let mut item = tracker.item(id)?.ok_or("created item missing from store")?;
        item.title = title.to_string();
        item.priority = priority;
        tracker.update_item(&item)?;
    }

    let feed = tracker.home_feed()?;
    println!("up next:");
    for item in &feed.up_next {
        println!("  [p{}] {}", item.priority, item.display_title());
    }
    println!("more to explore: {} item(s)", feed.more_to_explore.len());

    let items = tracker.project_items(project, SortPolicy::Title)?;
    println!("project items by title:");
    for item in &items {
        println!("  {}", item.display_title());
    }

    let summary = tracker.project_summary(project)?;
    println!(
        "project `{}` ({}): {} item(s), {:.0}% complete",
        summary.project.display_title(),
        summary.project.display_color(),
        summary.item_count,
        summary.completion_ratio * 100.0
    );

    Ok(())
}
