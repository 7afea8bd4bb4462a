//! Package-manager integration for the install and finish stages.
//!
//! After the scaffold is on disk, dependencies are installed with `npm`
//! and the project build is kicked off. A missing npm is not fatal: the
//! generated files are already in place and the run degrades to printed
//! instructions.

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::errors::WidgenError;
use crate::project::scaffold::RUN_MARKER;
use crate::text;

/// Installs the generated project's dependencies.
///
/// # Errors
///
/// Returns [`WidgenError::ProcessExitCode`] when `npm install` exits with
/// a non-zero status. A missing npm only prints a warning.
pub fn install(project_dir: &Path) -> Result<()> {
    println!("{}", text::INSTALL_MSG);

    let Some(npm) = find_npm() else {
        eprintln!("Warning: npm not found in PATH. Run 'npm install' manually.");
        return Ok(());
    };

    run_npm(&npm, project_dir, &["install"])
}

/// Runs the finish stage: widget-path configuration, the first project
/// build, and removal of the leftover run marker.
///
/// # Errors
///
/// Returns [`WidgenError::ProcessExitCode`] when the project build exits
/// with a non-zero status.
pub fn finish(project_dir: &Path, package_name: &str, skip_build: bool) -> Result<()> {
    if let Some(npm) = find_npm() {
        configure_widget_path(&npm, project_dir, package_name);
    }

    let result = if node_modules_missing(project_dir) {
        println!("{}", text::NEED_INSTALL_MSG);
        Ok(())
    } else if skip_build {
        Ok(())
    } else if let Some(npm) = find_npm() {
        println!("{}", text::RUN_BUILD_MSG);
        run_npm(&npm, project_dir, &["run", "start"])
    } else {
        Ok(())
    };

    remove_run_marker(project_dir);
    result
}

/// Locates npm on the PATH.
fn find_npm() -> Option<PathBuf> {
    which::which("npm").ok()
}

/// Points the npm widget-path setting at the local test project.
///
/// Written project-local (`.npmrc` in the scaffold), never user-wide.
/// Failures only warn.
fn configure_widget_path(npm: &Path, project_dir: &Path, package_name: &str) {
    let setting = format!("{package_name}:widgetPath");
    let status = Command::new(npm)
        .args(["config", "set", "--location=project", &setting, "./dist/TestProject/widgets"])
        .current_dir(project_dir)
        .status();

    match status {
        Ok(status) if status.success() => {}
        Ok(status) => eprintln!("Warning: npm config set exited with {status}."),
        Err(e) => eprintln!("Warning: failed to run npm config set: {e}."),
    }
}

/// Runs an npm subcommand in the project directory, propagating its exit
/// code on failure.
fn run_npm(npm: &Path, project_dir: &Path, args: &[&str]) -> Result<()> {
    let status = Command::new(npm)
        .args(args)
        .current_dir(project_dir)
        .status()
        .map_err(|e| WidgenError::io(format!("failed to run npm {}", args.join(" ")), e))?;

    if status.success() {
        Ok(())
    } else {
        Err(WidgenError::process_exit_code(status.code().unwrap_or(1)).into())
    }
}

/// Returns `true` if `node_modules` is absent or has no entries.
fn node_modules_missing(project_dir: &Path) -> bool {
    match std::fs::read_dir(project_dir.join("node_modules")) {
        Ok(mut entries) => entries.next().is_none(),
        Err(_) => true,
    }
}

/// Removes the leftover run marker: attempt once, log on failure, never
/// propagate.
fn remove_run_marker(project_dir: &Path) {
    let marker = project_dir.join(RUN_MARKER);
    if let Err(e) = std::fs::remove_file(&marker)
        && e.kind() != std::io::ErrorKind::NotFound
    {
        tracing::debug!("could not remove {}: {e}", marker.display());
    }
}
