use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use std::{
    fmt::Debug,
    fs,
    path::PathBuf,
    sync::Mutex,
};

/// Persistence port for the single "last searched city" value. Read once at
/// startup, written once per successful fetch.
pub trait LastCityStore: Send + Sync + Debug {
    fn load(&self) -> Option<String>;
    fn save(&self, query: &str) -> Result<()>;
}

/// File-backed store: one value in one file, the way a browser would keep it
/// under a single local-storage key.
#[derive(Debug)]
pub struct FileLastCityStore {
    path: PathBuf,
}

impl FileLastCityStore {
    /// Store at the platform data directory.
    pub fn new() -> Result<Self> {
        let dirs = ProjectDirs::from("dev", "weather-dash", "weather-dash")
            .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;

        Ok(Self { path: dirs.data_dir().join("weather_last_city") })
    }

    /// Store at an explicit path.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }
}

impl LastCityStore for FileLastCityStore {
    fn load(&self) -> Option<String> {
        let contents = fs::read_to_string(&self.path).ok()?;
        let trimmed = contents.trim();
        if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
    }

    fn save(&self, query: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }

        fs::write(&self.path, query)
            .with_context(|| format!("Failed to write last-city file: {}", self.path.display()))
    }
}

/// In-memory store for tests and ephemeral setups.
#[derive(Debug, Default)]
pub struct MemoryLastCityStore {
    value: Mutex<Option<String>>,
}

impl MemoryLastCityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: &str) -> Self {
        Self { value: Mutex::new(Some(value.to_string())) }
    }
}

impl LastCityStore for MemoryLastCityStore {
    fn load(&self) -> Option<String> {
        self.value.lock().ok()?.clone()
    }

    fn save(&self, query: &str) -> Result<()> {
        let mut guard = self.value.lock().map_err(|_| anyhow!("store lock poisoned"))?;
        *guard = Some(query.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir must be created");
        let store = FileLastCityStore::at(dir.path().join("weather_last_city"));

        assert_eq!(store.load(), None);

        store.save("Paris").expect("save must succeed");
        assert_eq!(store.load(), Some("Paris".to_string()));

        store.save("Kyiv").expect("save must succeed");
        assert_eq!(store.load(), Some("Kyiv".to_string()));
    }

    #[test]
    fn file_store_creates_missing_parents() {
        let dir = tempfile::tempdir().expect("tempdir must be created");
        let store = FileLastCityStore::at(dir.path().join("nested/dir/weather_last_city"));

        store.save("Oslo").expect("save must create parents");
        assert_eq!(store.load(), Some("Oslo".to_string()));
    }

    #[test]
    fn file_store_treats_blank_file_as_empty() {
        let dir = tempfile::tempdir().expect("tempdir must be created");
        let path = dir.path().join("weather_last_city");
        fs::write(&path, "  \n").expect("write must succeed");

        let store = FileLastCityStore::at(path);
        assert_eq!(store.load(), None);
    }

    #[test]
    fn memory_store_roundtrip() {
        let store = MemoryLastCityStore::new();
        assert_eq!(store.load(), None);

        store.save("Lisbon").expect("save must succeed");
        assert_eq!(store.load(), Some("Lisbon".to_string()));
    }
}
