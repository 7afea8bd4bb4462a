//! Generate command: the full scaffolding lifecycle.
//!
//! ## Usage
//!
//! ```bash
//! widgen generate                  # Scaffold or upgrade the current directory
//! widgen generate ./my-widget      # Scaffold or upgrade a specific directory
//! ```
//!
//! The run is strictly staged: the target directory is classified first,
//! then the prompts collect answers (seeded from the detected metadata for
//! an existing project), and only then does any file get written. After
//! writing, dependencies are installed and the first project build is
//! started.
//!
//! Every prompt can be pre-answered with a flag, which also makes fully
//! non-interactive runs possible:
//!
//! ```bash
//! widgen generate --headless --widget-name MyWidget --skip-install
//! ```

use anyhow::Result;
use clap::Args;
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::errors::WidgenError;
use crate::npm;
use crate::project::detect;
use crate::project::manifest::Builder;
use crate::project::scaffold::{self, WidgetSpec};
use crate::prompts::{
    self, AnswerOverrides, Boilerplate, License, PromptOutcome, Prompter,
};
use crate::templates::TemplateEngine;
use crate::text;

/// Arguments for the `generate` command.
///
/// Each metadata flag pre-answers the matching prompt; in headless runs
/// the flags are the only source of answers.
#[derive(Args)]
pub struct GenerateArgs {
    /// Target directory (defaults to the current directory).
    #[clap(default_value = ".")]
    pub path: PathBuf,

    /// Widget name. Also used for generated file and class names.
    #[clap(long = "widget-name")]
    pub widget_name: Option<String>,

    /// Project description.
    #[clap(long)]
    pub description: Option<String>,

    /// Widget version, two or three dot-separated numeric components.
    #[clap(long)]
    pub version: Option<String>,

    /// Author name written into the project manifest.
    #[clap(long)]
    pub author: Option<String>,

    /// Copyright line written into the project manifest.
    #[clap(long)]
    pub copyright: Option<String>,

    /// License for the generated project.
    #[clap(long, value_enum)]
    pub license: Option<License>,

    /// Boilerplate flavor to scaffold from.
    #[clap(long, value_enum)]
    pub boilerplate: Option<Boilerplate>,

    /// Build tool to generate for.
    #[clap(long, value_enum)]
    pub builder: Option<Builder>,

    /// Emit unit test files.
    #[clap(long = "unit-tests", action = clap::ArgAction::SetTrue)]
    pub unit_tests: bool,

    /// Emit end-to-end test files.
    #[clap(long = "e2e-tests", action = clap::ArgAction::SetTrue)]
    pub e2e_tests: bool,

    /// Confirm an upgrade without asking.
    ///
    /// Required for headless upgrades: without it, a run against an
    /// existing project ends cleanly without touching anything.
    #[clap(long, action = clap::ArgAction::SetTrue)]
    pub yes: bool,

    /// Skip `npm install` after writing the scaffold.
    #[clap(long = "skip-install", action = clap::ArgAction::SetTrue)]
    pub skip_install: bool,

    /// Skip starting the project build at the end of the run.
    #[clap(long = "skip-build", action = clap::ArgAction::SetTrue)]
    pub skip_build: bool,
}

impl GenerateArgs {
    fn overrides(&self) -> AnswerOverrides {
        AnswerOverrides {
            widget_name: self.widget_name.clone(),
            description: self.description.clone(),
            version: self.version.clone(),
            author: self.author.clone(),
            copyright: self.copyright.clone(),
            license: self.license,
            boilerplate: self.boilerplate,
            builder: self.builder,
            unit_tests: self.unit_tests,
            e2e_tests: self.e2e_tests,
            yes: self.yes,
        }
    }
}

/// Executes the `generate` command.
///
/// # Errors
///
/// Returns an error on any of the fatal detection conditions (unreadable
/// manifest, unparseable descriptor, occupied directory), on invalid
/// flag-supplied answers, and on write or install failures. A declined
/// upgrade is not an error.
pub async fn execute(args: &GenerateArgs, headless: bool) -> Result<()> {
    let target = args.path.as_path();

    // Detection finishes completely, including descriptor parsing, before
    // any prompt is shown.
    let state = match detect::detect(target).await {
        Ok(state) => state,
        Err(e) => {
            if matches!(
                e.downcast_ref::<WidgenError>(),
                Some(WidgenError::DirectoryConflict { .. })
            ) {
                println!("{}", text::banner());
            }
            return Err(e);
        }
    };

    println!("{}", text::banner());

    let overrides = args.overrides();
    let outcome = if headless || !prompts_allowed() {
        if state.is_new {
            PromptOutcome::Proceed(prompts::headless_new(&overrides)?)
        } else {
            prompts::headless_upgrade(&overrides, &state)?
        }
    } else {
        let stdin = std::io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());
        if state.is_new {
            PromptOutcome::Proceed(prompter.collect_new(&overrides)?)
        } else {
            prompter.collect_upgrade(&overrides, &state)?
        }
    };

    let answers = match outcome {
        PromptOutcome::Proceed(answers) => answers,
        PromptOutcome::Declined => {
            println!("{}", text::DECLINED_MSG);
            return Ok(());
        }
    };

    let spec = WidgetSpec::assemble(answers, &state);
    let engine = TemplateEngine::new()?;
    scaffold::write_project(target, &spec, &engine)?;

    println!(
        "Widget '{}' (version {}) written to {}",
        spec.widget_name,
        spec.version,
        target.display()
    );

    if !args.skip_install {
        npm::install(target)?;
    }

    npm::finish(target, &spec.package_name, args.skip_build)
}

/// Returns `true` when interactive prompting is possible and wanted.
///
/// Mirrors the headless detection of the rest of the CLI: the
/// `WIDGEN_NO_PROMPT` environment variable (any value) or a non-terminal
/// stdin/stdout disables prompts.
fn prompts_allowed() -> bool {
    if std::env::var("WIDGEN_NO_PROMPT").is_ok() {
        return false;
    }
    std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}
