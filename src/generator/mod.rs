//! Project scaffolding generator.
//!
//! # Data Flow
//! ```text
//! Parameters (project name, repo path)
//!     → templates.rs (fixed element set)
//!     → render (placeholder substitution, pure)
//!     → generate (create directories, write files)
//! ```
//!
//! # Design Decisions
//! - Placeholders are plain string tokens; no template engine
//! - Rendering is separated from emission so it can be tested without disk

pub mod templates;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

const PROJECT_NAME_TOKEN: &str = "{{ project_name }}";
const REPO_PATH_TOKEN: &str = "{{ repo_path }}";

/// Error type for project generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("unable to create directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to write {path}: {source}")]
    WriteFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Values substituted into every template.
#[derive(Debug, Clone)]
pub struct Parameters {
    pub project_name: String,
    pub repo_path: String,
}

/// Render the full element set into (relative path, text) pairs.
pub fn render(parameters: &Parameters) -> Vec<(PathBuf, String)> {
    templates::ELEMENTS
        .iter()
        .map(|element| {
            (
                PathBuf::from(element.path),
                substitute(element.template, parameters),
            )
        })
        .collect()
}

fn substitute(template: &str, parameters: &Parameters) -> String {
    template
        .replace(PROJECT_NAME_TOKEN, &parameters.project_name)
        .replace(REPO_PATH_TOKEN, &parameters.repo_path)
}

/// Render all templates and write them under `project_path`.
pub fn generate(
    project_path: &Path,
    project_name: &str,
    repo_path: &str,
) -> Result<(), GeneratorError> {
    let parameters = Parameters {
        project_name: project_name.to_string(),
        repo_path: repo_path.to_string(),
    };

    for (relative_path, text) in render(&parameters) {
        let target = project_path.join(relative_path);

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|source| GeneratorError::CreateDir {
                path: parent.display().to_string(),
                source,
            })?;
        }

        fs::write(&target, text).map_err(|source| GeneratorError::WriteFile {
            path: target.display().to_string(),
            source,
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parameters() -> Parameters {
        Parameters {
            project_name: "widget".to_string(),
            repo_path: "github.com/example".to_string(),
        }
    }

    #[test]
    fn renders_every_element_with_placeholders_substituted() {
        let rendered = render(&parameters());
        assert_eq!(rendered.len(), templates::ELEMENTS.len());

        for (path, text) in &rendered {
            assert!(
                !text.contains("{{"),
                "unsubstituted placeholder left in {}",
                path.display()
            );
        }
    }

    #[test]
    fn substitutes_project_name_and_repo_path() {
        let rendered = render(&parameters());

        let (_, readme) = rendered
            .iter()
            .find(|(path, _)| path == Path::new("README.md"))
            .unwrap();
        assert!(readme.starts_with("# widget"));

        let (_, manifest) = rendered
            .iter()
            .find(|(path, _)| path == Path::new("Cargo.toml"))
            .unwrap();
        assert!(manifest.contains(r#"name = "widget""#));
        assert!(manifest.contains("https://github.com/example/widget"));
    }
}
