use clap::Parser;
use vtt_index::tooling::{Cli, CliContext};
use vtt_index::triple::decode_entry;

use crate::support::Fixture;

fn run(fixture: &Fixture, args: &[&str]) -> String {
    let root = fixture.root().to_string_lossy().to_string();
    let mut argv = vec!["vtt-index", "--root", root.as_str()];
    argv.extend_from_slice(args);
    let cli = Cli::parse_from(argv);
    let context = CliContext::new(&cli).unwrap();
    context.execute(&cli.command).unwrap()
}

fn fixture() -> Fixture {
    let fixture = Fixture::new();
    fixture
        .world("lost-mine", "Lost Mine")
        .container("lost-mine", &["Goblin", "Klarg"]);
    fixture
}

#[test]
fn build_json_contract_has_required_fields() {
    let fixture = fixture();
    let output = run(&fixture, &["build", "--format", "json"]);

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["entry_count"].as_u64(), Some(2));
    assert_eq!(parsed["world_count"].as_u64(), Some(1));
    assert!(parsed["failures"].as_array().unwrap().is_empty());
    assert!(parsed["built_at"].as_str().is_some());
    assert_eq!(parsed["installed"].as_bool(), Some(true));
}

#[test]
fn concurrent_build_reports_same_counts() {
    let fixture = fixture();
    let output = run(&fixture, &["build", "--concurrent", "--format", "json"]);
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["entry_count"].as_u64(), Some(2));
}

#[test]
fn search_triple_output_decodes() {
    let fixture = fixture();
    let output = run(&fixture, &["search", "klarg", "--format", "triple"]);

    let entry = decode_entry(output.trim()).unwrap();
    assert_eq!(entry.name, "Klarg");
    assert_eq!(entry.world, "Lost Mine");
}

#[test]
fn search_miss_is_a_message_not_an_error() {
    let fixture = fixture();
    let output = run(&fixture, &["search", "zzz-nonexistent-name"]);
    assert_eq!(output, "No actor matching 'zzz-nonexistent-name'");
}

#[test]
fn show_reopens_record_from_locator() {
    let fixture = fixture();
    let triple = run(&fixture, &["search", "goblin", "--format", "triple"]);
    let entry = decode_entry(triple.trim()).unwrap();

    let output = run(&fixture, &["show", &entry.locator.to_string()]);
    let doc: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(doc["name"], "Goblin");
    assert_eq!(doc["type"], "npc");
}

#[test]
fn worlds_json_lists_catalog() {
    let fixture = fixture();
    fixture.world_with_manifest("mystery", "42");
    let output = run(&fixture, &["worlds", "--format", "json"]);

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    let worlds = parsed["worlds"].as_array().unwrap();
    assert_eq!(worlds.len(), 2);
    assert_eq!(worlds[0]["id"], "lost-mine");
    assert_eq!(worlds[1]["name"], "mystery");
    assert_eq!(parsed["failures"].as_array().unwrap().len(), 1);
}

#[test]
fn unavailable_root_is_reported_plainly() {
    let fixture = Fixture::new();
    let missing = fixture.root().join("gone");
    let cli = Cli::parse_from(["vtt-index", "--root", missing.to_str().unwrap(), "search", "goblin"]);
    let context = CliContext::new(&cli).unwrap();
    let output = context.execute(&cli.command).unwrap();
    assert!(output.starts_with("Data directory is not available"));
}

#[test]
fn show_works_without_a_data_root() {
    let fixture = fixture();
    let locator = format!(
        "{}#L2",
        fixture.world_dir("lost-mine").join("data/actors.db").display()
    );
    let cli = Cli::parse_from(["vtt-index", "show", locator.as_str()]);
    let context = CliContext::new(&cli).unwrap();

    let output = context.execute(&cli.command).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(doc["name"], "Klarg");
}

#[test]
fn status_json_counts_worlds_on_disk() {
    let fixture = fixture();
    fixture
        .world("phandalin", "Phandalin")
        .container("phandalin", &["Sildar"]);
    let output = run(&fixture, &["status", "--format", "json"]);

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["available"].as_bool(), Some(true));
    assert_eq!(parsed["world_count"].as_u64(), Some(2));
    assert_eq!(parsed["entry_count"].as_u64(), Some(0));
    assert!(parsed.get("built_at").is_none());
}
