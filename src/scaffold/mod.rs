pub mod layout;
pub mod writer;

use log::info;
use std::path::PathBuf;

use crate::api::types::ProblemDescription;
use crate::config::NamingConfig;
use crate::error::Result;
use writer::{FileKind, PlannedFile, ScaffoldPlan};

#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    pub directory: PathBuf,
    pub code_file: PathBuf,
    pub written: Vec<PathBuf>,
}

/// Derives every directory and file for a problem without touching the disk.
pub fn plan(
    problem: &ProblemDescription,
    naming: &NamingConfig,
    template: &[u8],
) -> Result<ScaffoldPlan> {
    let location = layout::locate(problem, naming.layout)?;

    let mut directories = Vec::with_capacity(location.components.len());
    let mut dir = naming.root.clone();
    for component in &location.components {
        dir = dir.join(component);
        directories.push(dir.clone());
    }

    let mut files = vec![PlannedFile {
        path: dir.join(format!("{}{}", location.code_stem, naming.language)),
        kind: FileKind::Code,
        contents: template.to_vec(),
        overwrite: !naming.preserve_code,
    }];

    for (index, test) in problem.tests.iter().enumerate() {
        let n = index + 1;
        // Inputs are always written; an empty suffix leaves bare `1`, `2`, ...
        files.push(PlannedFile {
            path: dir.join(format!("{n}{}", naming.input_suffix)),
            kind: FileKind::Input,
            contents: test.input.as_bytes().to_vec(),
            overwrite: true,
        });
        if !naming.output_suffix.is_empty() {
            files.push(PlannedFile {
                path: dir.join(format!("{n}{}", naming.output_suffix)),
                kind: FileKind::Output,
                contents: test.output.as_bytes().to_vec(),
                overwrite: true,
            });
        }
        if !naming.error_suffix.is_empty() {
            files.push(PlannedFile {
                path: dir.join(format!("{n}{}", naming.error_suffix)),
                kind: FileKind::Error,
                contents: Vec::new(),
                overwrite: true,
            });
        }
    }

    Ok(ScaffoldPlan { directories, files })
}

pub fn materialize(
    problem: &ProblemDescription,
    naming: &NamingConfig,
    template: &[u8],
) -> Result<ScaffoldReport> {
    let plan = plan(problem, naming, template)?;
    let written = writer::execute(&plan)?;

    let directory = plan
        .directories
        .last()
        .cloned()
        .unwrap_or_else(|| naming.root.clone());
    let code_file = plan
        .files
        .iter()
        .find(|f| f.kind == FileKind::Code)
        .map(|f| f.path.clone())
        .unwrap_or_else(|| directory.clone());
    let inputs = plan.files.iter().filter(|f| f.kind == FileKind::Input).count();

    info!(
        "Scaffolded {} in {} ({} files written, {} inputs)",
        problem.name,
        directory.display(),
        written.len(),
        inputs
    );

    Ok(ScaffoldReport {
        directory,
        code_file,
        written,
    })
}
