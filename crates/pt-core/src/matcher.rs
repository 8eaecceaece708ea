//! Matching calendar descriptions against the project catalog.

use crate::project::{Project, ProjectCatalog};

/// Descriptions starting with this are meant to target a project.
pub const PROJECT_MARKER_PREFIX: char = '[';

/// A description attributed to a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMatch<'a> {
    pub project: &'a Project,
    /// The description with the project pattern removed.
    pub description: String,
}

/// How a calendar description relates to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification<'a> {
    /// A project pattern matched.
    Project(ProjectMatch<'a>),
    /// No match and no project marker; not work time.
    Personal,
    /// Carries the project marker but no pattern matched.
    UnknownProject,
}

/// Finds the first project in catalog order whose pattern matches.
pub fn match_project<'a>(catalog: &'a ProjectCatalog, description: &str) -> Option<ProjectMatch<'a>> {
    catalog
        .iter()
        .find(|project| project.pattern.is_match(description))
        .map(|project| ProjectMatch {
            project,
            description: project.pattern.strip(description),
        })
}

/// Returns true if the description follows the bracket-marker convention.
pub fn has_project_marker(description: &str) -> bool {
    description.starts_with(PROJECT_MARKER_PREFIX)
}

/// Classifies a description, separating personal events from misconfiguration.
pub fn classify<'a>(catalog: &'a ProjectCatalog, description: &str) -> Classification<'a> {
    match match_project(catalog, description) {
        Some(found) => Classification::Project(found),
        None if has_project_marker(description) => Classification::UnknownProject,
        None => Classification::Personal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::project::ProjectPattern;
    use crate::types::ProjectId;

    fn catalog(projects: &[(u64, &str, &str)]) -> ProjectCatalog {
        ProjectCatalog::new(
            projects
                .iter()
                .map(|(id, name, pattern)| Project {
                    id: ProjectId::new(*id),
                    name: (*name).to_string(),
                    pattern: ProjectPattern::new(pattern).unwrap(),
                })
                .collect(),
        )
    }

    #[test]
    fn match_strips_pattern_and_trims() {
        let catalog = catalog(&[(1, "Acme", r"\[acme\]")]);

        let found = match_project(&catalog, "[acme] Design review").unwrap();

        assert_eq!(found.project.id, ProjectId::new(1));
        assert_eq!(found.description, "Design review");
    }

    #[test]
    fn first_matching_project_wins() {
        let catalog = catalog(&[(1, "Broad", r"\[a"), (2, "Narrow", r"\[acme\]")]);

        let found = match_project(&catalog, "[acme] Standup").unwrap();

        assert_eq!(found.project.id, ProjectId::new(1));
        assert_eq!(found.description, "cme] Standup");
    }

    #[test]
    fn matching_is_deterministic() {
        let catalog = catalog(&[(1, "Acme", r"\[acme\]"), (2, "Beta", r"\[beta\]")]);

        let first = match_project(&catalog, "Review [beta] docs");
        let second = match_project(&catalog, "Review [beta] docs");

        assert_eq!(first, second);
        assert_eq!(first.unwrap().description, "Review  docs");
    }

    #[test]
    fn stripped_description_reconstructs_original() {
        let catalog = catalog(&[(1, "Acme", r"\[acme\]")]);
        let original = "  [acme] Design review  ";

        let found = match_project(&catalog, original).unwrap();

        let rebuilt = format!("[acme] {}", found.description);
        assert_eq!(rebuilt, original.trim());
    }

    #[test]
    fn marked_description_without_match_is_unknown_project() {
        let catalog = catalog(&[(1, "Acme", r"\[acme\]")]);
        assert_eq!(classify(&catalog, "[beta] Standup"), Classification::UnknownProject);
    }

    #[test]
    fn unmarked_description_without_match_is_personal() {
        let catalog = catalog(&[(1, "Acme", r"\[acme\]")]);
        assert_eq!(classify(&catalog, "Dentist"), Classification::Personal);
    }

    #[test]
    fn empty_catalog_matches_nothing() {
        let catalog = ProjectCatalog::default();
        assert!(match_project(&catalog, "[acme] Design review").is_none());
    }
}
