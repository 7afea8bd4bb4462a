//! Fixed user-visible text for the widgen CLI.
//!
//! The banner and the run-stage messages live here so commands and tests
//! refer to one copy of each string.

/// Printed when scaffolding is finished and dependencies are about to install.
pub const INSTALL_MSG: &str = "Widget files written. Installing dependencies...";

/// Printed at the end of a run when `node_modules` is still missing.
pub const NEED_INSTALL_MSG: &str =
    "Dependencies are not installed yet. Run 'npm install' in the project directory first.";

/// Printed at the end of a run before the project build is started.
pub const RUN_BUILD_MSG: &str = "Starting the project build (npm run start)...";

/// Printed when the user declines to upgrade an existing project.
pub const DECLINED_MSG: &str = "Upgrade declined. No files were changed.";

/// Returns the greeting banner, stamped with the generator version.
///
/// Shown once per run: before the prompts, or before the directory-conflict
/// error when the target cannot be scaffolded at all.
#[must_use]
pub fn banner() -> String {
    format!(
        r"
   _      __ ____ ___   ____ ____ _  __
  | | /| / //  _// _ \ / __// __// |/ /
  | |/ |/ /_/ / / // // _/ / _/ /    /
  |__/|__//___//____//___//___//_/|_/   v{}

  Widget project generator
",
        env!("CARGO_PKG_VERSION")
    )
}
