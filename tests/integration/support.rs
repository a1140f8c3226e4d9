use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use vtt_index::actor::ActorScanner;
use vtt_index::{DataPaths, IndexService};

/// A throwaway data root laid out like the tabletop application's.
pub struct Fixture {
    pub temp: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("Data/worlds")).unwrap();
        Self { temp }
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn world_dir(&self, dir: &str) -> PathBuf {
        self.root().join("Data/worlds").join(dir)
    }

    /// Create a world with a well-formed manifest.
    pub fn world(&self, dir: &str, title: &str) -> &Self {
        self.world_with_manifest(dir, &format!(r#"{{"id":"{}","title":"{}"}}"#, dir, title))
    }

    pub fn world_with_manifest(&self, dir: &str, manifest: &str) -> &Self {
        let world = self.world_dir(dir);
        fs::create_dir_all(world.join("data")).unwrap();
        fs::write(world.join("world.json"), manifest).unwrap();
        self
    }

    /// Write the world's actor container with one record per name.
    pub fn container(&self, dir: &str, names: &[&str]) -> &Self {
        let lines: String = names
            .iter()
            .enumerate()
            .map(|(i, name)| format!("{{\"_id\":\"{}-{}\",\"name\":\"{}\",\"type\":\"npc\"}}\n", dir, i, name))
            .collect();
        self.raw_container(dir, &lines)
    }

    pub fn raw_container(&self, dir: &str, contents: &str) -> &Self {
        let data = self.world_dir(dir).join("data");
        fs::create_dir_all(&data).unwrap();
        fs::write(data.join("actors.db"), contents).unwrap();
        self
    }

    /// Write one per-record actor file under `data/actors/`.
    pub fn record_file(&self, dir: &str, file: &str, name: &str) -> &Self {
        let actors = self.world_dir(dir).join("data/actors");
        fs::create_dir_all(&actors).unwrap();
        fs::write(
            actors.join(file),
            format!(r#"{{"name":"{}","type":"character"}}"#, name),
        )
        .unwrap();
        self
    }

    pub fn service(&self) -> IndexService {
        IndexService::new(DataPaths::new(self.root()), ActorScanner::new())
    }
}
