use std::{fmt, str::FromStr};

use super::BuildError;

/// Repository full name, as `<workspace>/<name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryPath {
    workspace: String,
    name: String,
}

impl RepositoryPath {
    pub fn new(path: &str) -> Result<Self, BuildError> {
        match path.split_once('/') {
            Some((workspace, name))
                if !workspace.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self {
                    workspace: workspace.into(),
                    name: name.into(),
                })
            }
            _ => Err(BuildError::MalformedRepositoryPath(path.into())),
        }
    }

    pub fn workspace(&self) -> &str {
        &self.workspace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RepositoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.workspace, self.name)
    }
}

impl FromStr for RepositoryPath {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
