use std::fs;

use tempfile::TempDir;
use vtt_index::actor::ActorScanner;
use vtt_index::types::FailureKind;
use vtt_index::{ActorLocator, ApiError, DataPaths, IndexService};

use crate::support::Fixture;

#[test]
fn missing_root_is_unavailable_and_build_fails_with_discovery_error() {
    let temp = TempDir::new().unwrap();
    let service = IndexService::new(
        DataPaths::new(temp.path().join("no-such-root")),
        ActorScanner::new(),
    );

    assert!(!service.is_available());
    match service.build_index() {
        Err(ApiError::Discovery { path, .. }) => {
            assert!(path.ends_with("Data/worlds"));
        }
        other => panic!("expected discovery failure, got {:?}", other.map(|r| r.entries)),
    }
}

#[test]
fn entry_count_is_sum_of_actors_and_stable_across_builds() {
    let fixture = Fixture::new();
    fixture
        .world("alpha", "Alpha")
        .container("alpha", &["Goblin", "Orc", "Wolf"]);
    fixture
        .world("beta", "Beta")
        .container("beta", &["Bandit"])
        .record_file("beta", "hero.json", "Sildar");
    fixture.world("gamma", "Gamma");

    let service = fixture.service();
    let first = service.build_index().unwrap();
    let second = service.build_index().unwrap();

    assert_eq!(first.entries.len(), 5);
    assert_eq!(first.entries, second.entries);
    assert_eq!(first.worlds.len(), 3);
    assert!(first.failures.is_empty());
}

#[test]
fn entries_follow_world_then_storage_order() {
    let fixture = Fixture::new();
    fixture.world("zz-last", "Last").container("zz-last", &["Zed"]);
    fixture
        .world("aa-first", "First")
        .container("aa-first", &["Beta", "Alpha"])
        .record_file("aa-first", "c.json", "Gamma");

    let report = fixture.service().build_index().unwrap();
    let order: Vec<_> = report
        .entries
        .iter()
        .map(|e| format!("{}/{}", e.world, e.name))
        .collect();
    assert_eq!(order, vec!["First/Beta", "First/Alpha", "First/Gamma", "Last/Zed"]);
}

#[test]
fn rebuild_replaces_index_without_stale_entries() {
    let fixture = Fixture::new();
    fixture
        .world("alpha", "Alpha")
        .container("alpha", &["Goblin", "Orc"])
        .record_file("alpha", "wolf.json", "Wolf");

    let service = fixture.service();
    service.build_index().unwrap();
    assert!(service.search_actor("wolf").is_some());

    fs::remove_file(fixture.world_dir("alpha").join("data/actors/wolf.json")).unwrap();
    fixture.container("alpha", &["Goblin", "Orc", "Owlbear"]);

    let report = service.build_index().unwrap();
    let names: Vec<_> = report.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Goblin", "Orc", "Owlbear"]);
    assert!(service.search_actor("wolf").is_none());
    assert_eq!(service.snapshot().len(), 3);
}

#[test]
fn malformed_manifest_falls_back_and_world_is_still_scanned() {
    let fixture = Fixture::new();
    fixture
        .world_with_manifest("broken", "{ this is not json")
        .container("broken", &["Nothic"]);
    fixture.world("fine", "Fine World").container("fine", &["Goblin"]);

    let report = fixture.service().build_index().unwrap();
    assert_eq!(report.entries.len(), 2);
    assert_eq!(report.entries[0].name, "Nothic");
    assert_eq!(report.entries[0].world, "broken");
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].kind, FailureKind::World);
}

#[test]
fn bad_records_are_counted_not_fatal() {
    let fixture = Fixture::new();
    fixture.world("alpha", "Alpha").raw_container(
        "alpha",
        concat!(
            "{\"_id\":\"1\",\"name\":\"Goblin\"}\n",
            "{\"_id\":\"2\",\"name\":\n",
            "{\"_id\":\"3\",\"type\":\"npc\"}\n",
            "{\"_id\":\"4\",\"name\":\"Orc\"}\n",
        ),
    );

    let service = fixture.service();
    let report = service.build_index().unwrap();
    assert_eq!(report.entries.len(), 2);
    let record_failures = report
        .failures
        .iter()
        .filter(|f| f.kind == FailureKind::Record)
        .count();
    assert_eq!(record_failures, 2);
    assert_eq!(service.status().failure_count, 2);
}

#[test]
fn locators_reopen_the_indexed_record() {
    let fixture = Fixture::new();
    fixture
        .world("alpha", "Alpha")
        .container("alpha", &["Goblin", "Klarg"])
        .record_file("alpha", "sildar.json", "Sildar");

    let service = fixture.service();
    service.build_index().unwrap();

    let klarg = service.search_actor("klarg").unwrap();
    assert!(matches!(klarg.locator, ActorLocator::Record { line: 2, .. }));
    assert_eq!(klarg.locator.open().unwrap()["name"], "Klarg");

    let sildar = service.search_actor("sildar").unwrap();
    assert_eq!(sildar.locator.open().unwrap()["type"], "character");
}

#[test]
fn list_worlds_is_recomputed_each_call() {
    let fixture = Fixture::new();
    fixture.world("alpha", "Alpha");
    let service = fixture.service();
    assert_eq!(service.list_worlds().unwrap().len(), 1);

    fixture.world("beta", "Beta");
    let worlds = service.list_worlds().unwrap();
    let names: Vec<_> = worlds.iter().map(|w| w.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Beta"]);
}
