//! Scaffolding CLI: materializes a new service project from the fixed
//! template set.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use scaffold::generator;

#[derive(Parser)]
#[command(version, about = "Generate a new HTTP service project")]
struct Cli {
    /// Path to the new project directory (last element is the project name)
    #[arg(long)]
    project: PathBuf,

    /// Git repository path for the new project (e.g. github.com/causelovem)
    #[arg(long)]
    repo: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scaffold=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let Some(project_name) = cli
        .project
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
    else {
        tracing::error!(project = %cli.project.display(), "project path has no name component");
        return ExitCode::FAILURE;
    };

    if let Err(err) = fs::create_dir_all(&cli.project) {
        tracing::error!(project = %cli.project.display(), "unable to create project directory: {err}");
        return ExitCode::FAILURE;
    }

    if let Err(err) = generator::generate(&cli.project, &project_name, &cli.repo) {
        tracing::error!("unable to generate project: {err}");
        return ExitCode::FAILURE;
    }

    tracing::info!(
        project = %cli.project.display(),
        "project '{project_name}' successfully created"
    );
    ExitCode::SUCCESS
}
