use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// Key-value convenience store for the last successfully searched city.
///
/// Read once at startup to replay the previous search; written after every
/// successful current-weather render. Failures are logged and swallowed,
/// never surfaced: losing the convenience value must not break a search.
pub trait LastCityStore {
    fn load(&self) -> Option<String>;
    fn save(&mut self, city: &str);
}

/// Plain-text file store, one city name per file.
#[derive(Debug)]
pub struct FileLastCityStore {
    path: PathBuf,
}

impl FileLastCityStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store file in the platform data directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "weather-panel", "weather-panel")
            .map(|dirs| dirs.data_dir().join("last_city"))
    }
}

impl LastCityStore for FileLastCityStore {
    fn load(&self) -> Option<String> {
        let city = fs::read_to_string(&self.path).ok()?;
        let city = city.trim();
        if city.is_empty() {
            None
        } else {
            Some(city.to_string())
        }
    }

    fn save(&mut self, city: &str) {
        if let Some(parent) = self.path.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warn!(path = %parent.display(), error = %e, "Failed to create store directory");
            return;
        }
        if let Err(e) = fs::write(&self.path, city) {
            warn!(path = %self.path.display(), error = %e, "Failed to persist last city");
        }
    }
}

/// In-memory store, used by tests and one-shot invocations.
#[derive(Debug, Default)]
pub struct MemoryLastCityStore {
    city: Option<String>,
}

impl MemoryLastCityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_city(city: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
        }
    }
}

impl LastCityStore for MemoryLastCityStore {
    fn load(&self) -> Option<String> {
        self.city.clone()
    }

    fn save(&mut self, city: &str) {
        self.city = Some(city.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_city_name() {
        let dir = std::env::temp_dir().join(format!("panel-store-{}", std::process::id()));
        let mut store = FileLastCityStore::new(dir.join("last_city"));

        assert_eq!(store.load(), None);

        store.save("Paris");
        assert_eq!(store.load(), Some("Paris".to_string()));

        store.save("Tokyo");
        assert_eq!(store.load(), Some("Tokyo".to_string()));

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn blank_file_loads_as_none() {
        let dir = std::env::temp_dir().join(format!("panel-store-blank-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("last_city");
        fs::write(&path, "  \n").unwrap();

        let store = FileLastCityStore::new(path);
        assert_eq!(store.load(), None);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryLastCityStore::new();
        assert_eq!(store.load(), None);
        store.save("Berlin");
        assert_eq!(store.load(), Some("Berlin".to_string()));
    }
}
