//! Projects command for listing remote projects and their local patterns.

use std::io::Write;

use anyhow::{Context, Result};
use pt_core::{ProjectCatalog, TimeLedger};

pub fn run<W: Write, L: TimeLedger>(writer: &mut W, ledger: &L, catalog: &ProjectCatalog) -> Result<()> {
    let projects = ledger.list_projects().context("failed to list projects")?;

    if projects.is_empty() {
        writeln!(writer, "No projects found.")?;
        return Ok(());
    }

    for project in projects {
        let pattern = catalog
            .get(project.id)
            .map_or("(not in catalog)", |known| known.pattern.as_str());
        writeln!(writer, "{:<6}  {:<24}  {pattern}", project.id.get(), project.name)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;
    use pt_core::{Project, ProjectId, RemoteProject};

    use crate::testing::FakeLedger;

    #[test]
    fn projects_command_shows_catalog_patterns() {
        let ledger = FakeLedger {
            projects: vec![
                RemoteProject {
                    id: ProjectId::new(1),
                    name: "Acme".to_string(),
                },
                RemoteProject {
                    id: ProjectId::new(12),
                    name: "Beta".to_string(),
                },
            ],
            ..FakeLedger::default()
        };
        let catalog = ProjectCatalog::new(vec![
            Project::with_default_pattern(ProjectId::new(1), "Acme").unwrap(),
        ]);

        let mut output = Vec::new();
        run(&mut output, &ledger, &catalog).unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        1       Acme                      \[acme\]
        12      Beta                      (not in catalog)
        ");
    }

    #[test]
    fn projects_command_handles_empty_list() {
        let mut output = Vec::new();
        run(&mut output, &FakeLedger::default(), &ProjectCatalog::default()).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "No projects found.\n");
    }
}
