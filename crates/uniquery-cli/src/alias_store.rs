//! The alias/connection-profile store (spec §6): a `name -> profile` map
//! persisted as JSON at `$UNIQUERY_HOME/aliases.json`, defaulting to
//! `~/.uniquery/aliases.json`. Loaded lazily, saved on every mutation.
//! Invalid JSON on read is treated as an empty store (spec §2).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use uniquery_drivers::ConnectionProfile;

pub struct AliasStore {
    path: PathBuf,
    aliases: BTreeMap<String, ConnectionProfile>,
}

impl AliasStore {
    pub fn open(path: PathBuf) -> Self {
        let aliases = fs::read_to_string(&path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default();
        Self { path, aliases }
    }

    /// `$UNIQUERY_HOME/aliases.json`, or `~/.uniquery/aliases.json` when
    /// `UNIQUERY_HOME` is unset.
    pub fn default_path() -> PathBuf {
        let home = std::env::var("UNIQUERY_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                std::env::var("HOME")
                    .map(|h| Path::new(&h).join(".uniquery"))
                    .unwrap_or_else(|_| PathBuf::from(".uniquery"))
            });
        home.join("aliases.json")
    }

    pub fn list(&self) -> impl Iterator<Item = (&str, &ConnectionProfile)> {
        self.aliases.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, name: &str) -> Option<&ConnectionProfile> {
        self.aliases.get(name)
    }

    pub fn put(&mut self, name: impl Into<String>, profile: ConnectionProfile) -> std::io::Result<()> {
        self.aliases.insert(name.into(), profile);
        self.save()
    }

    pub fn remove(&mut self, name: &str) -> std::io::Result<bool> {
        let existed = self.aliases.remove(name).is_some();
        if existed {
            self.save()?;
        }
        Ok(existed)
    }

    fn save(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(&self.aliases)?;
        fs::write(&self.path, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uniquery_drivers::ProfileType;

    fn profile() -> ConnectionProfile {
        ConnectionProfile {
            profile_type: ProfileType::Mongodb,
            host: Some("localhost".to_string()),
            port: Some(27017),
            uri: None,
            username: "admin".to_string(),
            password: "secret".to_string(),
            database: Some("uniquery".to_string()),
        }
    }

    #[test]
    fn missing_file_loads_as_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = AliasStore::open(dir.path().join("aliases.json"));
        assert_eq!(store.list().count(), 0);
    }

    #[test]
    fn invalid_json_loads_as_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aliases.json");
        fs::write(&path, "not json").unwrap();
        let store = AliasStore::open(path);
        assert_eq!(store.list().count(), 0);
    }

    #[test]
    fn put_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aliases.json");
        let mut store = AliasStore::open(path.clone());
        store.put("local", profile()).unwrap();

        let reopened = AliasStore::open(path);
        assert_eq!(reopened.get("local"), Some(&profile()));
    }

    #[test]
    fn remove_reports_whether_the_alias_existed() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = AliasStore::open(dir.path().join("aliases.json"));
        store.put("local", profile()).unwrap();
        assert!(store.remove("local").unwrap());
        assert!(!store.remove("local").unwrap());
    }
}
