//! An in-memory [`Driver`] used by the façade's own tests and the CLI's
//! `--dry-run` mode: it never touches a network, just records what it was
//! asked to run and plays back canned rows.

use serde_json::Value as Json;

use crate::error::{ConnectionError, ExecutionError};
use crate::profile::ConnectionProfile;
use crate::{Driver, NativeQuery};

pub struct MockDriver {
    profile: ConnectionProfile,
    responses: Vec<Json>,
    pub history: Vec<NativeQuery>,
    closed: bool,
}

impl MockDriver {
    /// Opens a mock connection after validating the profile the same way
    /// a real driver would (spec §6 field requirements).
    pub fn open(profile: &ConnectionProfile) -> Result<Self, ConnectionError> {
        profile.validate()?;
        Ok(Self {
            profile: profile.clone(),
            responses: Vec::new(),
            history: Vec::new(),
            closed: false,
        })
    }

    /// Queues the rows the next `run` call should return.
    pub fn stub(&mut self, rows: Vec<Json>) {
        self.responses = rows;
    }

    pub fn profile(&self) -> &ConnectionProfile {
        &self.profile
    }
}

impl Driver for MockDriver {
    fn run(&mut self, query: &NativeQuery) -> Result<Vec<Json>, ExecutionError> {
        if self.closed {
            return Err(ExecutionError::Failed("driver is closed".to_string()));
        }
        self.history.push(query.clone());
        Ok(std::mem::take(&mut self.responses))
    }

    fn close(&mut self) -> Result<(), ConnectionError> {
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileType;
    use serde_json::json;

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
    fn records_every_run_and_plays_back_stubbed_rows() {
        let mut driver = MockDriver::open(&profile()).unwrap();
        driver.stub(vec![json!({ "id": 1 })]);
        let rows = driver.run(&NativeQuery::Text("MATCH (n) RETURN n;".to_string())).unwrap();
        assert_eq!(rows, vec![json!({ "id": 1 })]);
        assert_eq!(driver.history.len(), 1);
    }

    #[test]
    fn refuses_to_run_after_close() {
        let mut driver = MockDriver::open(&profile()).unwrap();
        driver.close().unwrap();
        assert!(driver.run(&NativeQuery::Text("SELECT 1".to_string())).is_err());
    }

    #[test]
    fn open_rejects_an_invalid_profile() {
        let mut invalid = profile();
        invalid.host = None;
        assert!(MockDriver::open(&invalid).is_err());
    }
}
