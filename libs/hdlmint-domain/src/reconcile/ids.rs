use serde::{Deserialize, Serialize};
use std::fmt;

/// Persistent identifier of a repository object
///
/// Pid wraps the repository-issued identifier string to provide type safety
/// and prevent mixing pids up with datastream ids and other plain strings.
/// Pids are globally unique and immutable for the life of the object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pid(String);

impl Pid {
    /// Wrap an existing repository pid
    pub fn new(pid: impl Into<String>) -> Self {
        Self(pid.into())
    }

    /// Get the pid as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Pid {
    fn from(pid: &str) -> Self {
        Self(pid.to_string())
    }
}

impl From<String> for Pid {
    fn from(pid: String) -> Self {
        Self(pid)
    }
}

/// Identifier of a datastream on a repository object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dsid(String);

impl Dsid {
    /// Wrap a datastream id
    pub fn new(dsid: impl Into<String>) -> Self {
        Self(dsid.into())
    }

    /// The Dublin Core metadata stream every object carries
    pub fn dc() -> Self {
        Self("DC".to_string())
    }

    /// Get the datastream id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Dsid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Dsid {
    fn from(dsid: &str) -> Self {
        Self(dsid.to_string())
    }
}

impl From<String> for Dsid {
    fn from(dsid: String) -> Self {
        Self(dsid)
    }
}
