//! The connection profile record (spec §6): `{type, host?, port?, uri?,
//! username, password, database?}`, one entry in the CLI's alias store.

use serde::{Deserialize, Serialize};

use crate::error::ConnectionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileType {
    Mysql,
    Mongodb,
    Neo4j,
}

impl ProfileType {
    fn label(self) -> &'static str {
        match self {
            ProfileType::Mysql => "mysql",
            ProfileType::Mongodb => "mongodb",
            ProfileType::Neo4j => "neo4j",
        }
    }

    fn is_graph(self) -> bool {
        matches!(self, ProfileType::Neo4j)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionProfile {
    #[serde(rename = "type")]
    pub profile_type: ProfileType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}

impl ConnectionProfile {
    /// Checks the field requirements from spec §6: relational/document
    /// profiles need `host`+`port`; a graph profile needs `uri`;
    /// `username`+`password` are required for every profile type.
    pub fn validate(&self) -> Result<(), ConnectionError> {
        if self.username.is_empty() {
            return Err(ConnectionError::MissingField {
                profile_type: self.profile_type.label(),
                field: "username",
            });
        }
        if self.password.is_empty() {
            return Err(ConnectionError::MissingField {
                profile_type: self.profile_type.label(),
                field: "password",
            });
        }
        if self.profile_type.is_graph() {
            if self.uri.is_none() {
                return Err(ConnectionError::MissingField {
                    profile_type: self.profile_type.label(),
                    field: "uri",
                });
            }
        } else {
            if self.host.is_none() {
                return Err(ConnectionError::MissingField {
                    profile_type: self.profile_type.label(),
                    field: "host",
                });
            }
            if self.port.is_none() {
                return Err(ConnectionError::MissingField {
                    profile_type: self.profile_type.label(),
                    field: "port",
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(profile_type: ProfileType) -> ConnectionProfile {
        ConnectionProfile {
            profile_type,
            host: None,
            port: None,
            uri: None,
            username: "admin".to_string(),
            password: "secret".to_string(),
            database: None,
        }
    }

    #[test]
    fn mongodb_requires_host_and_port() {
        let profile = base(ProfileType::Mongodb);
        assert!(profile.validate().is_err());
        let profile = ConnectionProfile { host: Some("localhost".into()), port: Some(27017), ..profile };
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn neo4j_requires_uri_not_host_port() {
        let profile = base(ProfileType::Neo4j);
        assert!(profile.validate().is_err());
        let profile = ConnectionProfile { uri: Some("neo4j://localhost:7687".into()), ..profile };
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn missing_credentials_always_rejected() {
        let mut profile = base(ProfileType::Mysql);
        profile.host = Some("localhost".into());
        profile.port = Some(3306);
        profile.username = String::new();
        assert!(profile.validate().is_err());
    }
}
