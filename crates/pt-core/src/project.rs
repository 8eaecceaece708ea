//! Known projects and the patterns that map calendar descriptions onto them.

use std::collections::HashSet;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ProjectId;

/// A project pattern failed to compile.
#[derive(Debug, Error)]
#[error("invalid project pattern {pattern:?}")]
pub struct PatternError {
    pattern: String,
    #[source]
    source: regex::Error,
}

/// A compiled match rule tied to a project.
///
/// Stored as its regex source text and compiled once on construction, so a
/// catalog loaded from disk never re-parses patterns while matching.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectPattern(Regex);

impl ProjectPattern {
    /// Compiles a pattern from regex source.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        Regex::new(pattern).map(Self).map_err(|source| PatternError {
            pattern: pattern.to_string(),
            source,
        })
    }

    /// Builds the default pattern for a project name.
    ///
    /// Matches the literal text `[<slug>]`, e.g. `[acme-corp]` for "Acme Corp".
    pub fn for_name(name: &str) -> Result<Self, PatternError> {
        let literal = format!("[{}]", slug::slugify(name));
        Self::new(&regex::escape(&literal))
    }

    /// Returns the regex source text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns true if the pattern occurs anywhere in `haystack`.
    pub fn is_match(&self, haystack: &str) -> bool {
        self.0.is_match(haystack)
    }

    /// Removes every occurrence of the pattern and trims the remainder.
    pub fn strip(&self, haystack: &str) -> String {
        self.0.replace_all(haystack, "").trim().to_string()
    }
}

impl fmt::Debug for ProjectPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ProjectPattern").field(&self.as_str()).finish()
    }
}

impl PartialEq for ProjectPattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for ProjectPattern {}

impl TryFrom<String> for ProjectPattern {
    type Error = PatternError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<ProjectPattern> for String {
    fn from(pattern: ProjectPattern) -> Self {
        pattern.as_str().to_string()
    }
}

/// A project known to the local catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub pattern: ProjectPattern,
}

impl Project {
    /// Creates a project with the default pattern for its name.
    pub fn with_default_pattern(id: ProjectId, name: impl Into<String>) -> Result<Self, PatternError> {
        let name = name.into();
        let pattern = ProjectPattern::for_name(&name)?;
        Ok(Self { id, name, pattern })
    }
}

/// A project as listed by the remote ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteProject {
    pub id: ProjectId,
    pub name: String,
}

/// Ordered set of known projects.
///
/// Order is significant: matching picks the first project whose pattern hits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCatalog {
    projects: Vec<Project>,
}

/// Result of merging a remote project list into a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRefresh {
    pub catalog: ProjectCatalog,
    /// Projects that were not in the catalog before.
    pub added: Vec<ProjectId>,
    /// Existing projects whose name changed remotely.
    pub renamed: Vec<ProjectId>,
}

impl ProjectCatalog {
    pub const fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    /// Iterates projects in match order.
    pub fn iter(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    /// Builds a new catalog from this one and the remote project list.
    ///
    /// Existing patterns are never overwritten; names follow the remote.
    /// Projects missing remotely are kept at the front in their current order,
    /// followed by the remote projects in remote order.
    pub fn refresh(&self, remote: &[RemoteProject]) -> Result<CatalogRefresh, PatternError> {
        let remote_ids: HashSet<ProjectId> = remote.iter().map(|project| project.id).collect();

        let mut projects: Vec<Project> = self
            .projects
            .iter()
            .filter(|project| !remote_ids.contains(&project.id))
            .cloned()
            .collect();
        let mut added = Vec::new();
        let mut renamed = Vec::new();
        let mut seen = HashSet::new();

        for remote_project in remote {
            if !seen.insert(remote_project.id) {
                continue;
            }
            let project = match self.get(remote_project.id) {
                Some(existing) => {
                    if existing.name != remote_project.name {
                        renamed.push(existing.id);
                    }
                    Project {
                        id: existing.id,
                        name: remote_project.name.clone(),
                        pattern: existing.pattern.clone(),
                    }
                }
                None => {
                    added.push(remote_project.id);
                    Project::with_default_pattern(remote_project.id, remote_project.name.clone())?
                }
            };
            projects.push(project);
        }

        Ok(CatalogRefresh {
            catalog: Self::new(projects),
            added,
            renamed,
        })
    }
}

impl<'a> IntoIterator for &'a ProjectCatalog {
    type Item = &'a Project;
    type IntoIter = std::slice::Iter<'a, Project>;

    fn into_iter(self) -> Self::IntoIter {
        self.projects.iter()
    }
}
