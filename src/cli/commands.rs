use crate::core::placement::target_column;
use crate::core::resolver::{companion_candidates, cycle_order, ensure_supported, resolve};
use crate::domain::error::SwitchError;
use crate::domain::models::{
    DEFAULT_SCRIPT_EXTENSION, DEFAULT_STYLE_EXTENSION, RawOptions, ResolutionConfig,
    ResolutionResult,
};
use crate::infra::file_system::{create_empty_file, list_siblings};
use crate::infra::logger::setup_logger;
use crate::infra::output::{OpenWith, create_opener, report_notice};
use crate::infra::prompt::{AcceptDefault, CompanionPrompt, FixedName, TuiPrompt};
use clap::{Args, Parser, Subcommand};
use log::{debug, info};
use std::io::IsTerminal;
use std::path::{Component, Path, PathBuf};

#[derive(Parser)]
#[command(name = "styleswitch")]
#[command(about = "Switch between a script file and its companion stylesheet", long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    STYLESWITCH_LOG_LEVEL=debug    Override the log level")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Args, Debug)]
pub struct ResolveOptions {
    /// Extension used when creating a stylesheet companion
    #[arg(long = "style-ext", default_value = DEFAULT_STYLE_EXTENSION)]
    pub style_ext: String,

    /// Extension used when creating a script companion
    #[arg(long = "script-ext", default_value = DEFAULT_SCRIPT_EXTENSION)]
    pub script_ext: String,

    /// Disable the directory-name and index fallbacks
    #[arg(long)]
    pub no_directory_name: bool,

    /// Open the companion in the other editor column
    #[arg(long)]
    pub other_column: bool,
}

impl ResolveOptions {
    fn to_config(&self) -> ResolutionConfig {
        ResolutionConfig::from_raw(RawOptions {
            style_extension: Some(self.style_ext.clone()),
            script_extension: Some(self.script_ext.clone()),
            use_directory_name: Some(!self.no_directory_name),
            use_other_column: Some(self.other_column),
        })
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the next companion of FILE, or create one
    Switch {
        /// File currently being edited
        file: PathBuf,

        #[command(flatten)]
        options: ResolveOptions,

        /// Column of the active editor
        #[arg(long)]
        column: Option<u32>,

        /// Create the suggested companion without prompting
        #[arg(short, long)]
        yes: bool,

        /// Name of the companion to create when none exists
        #[arg(long, conflicts_with = "yes")]
        name: Option<String>,

        /// What to do with the resolved companion
        #[arg(long, value_enum, default_value_t = OpenWith::Print)]
        open: OpenWith,
    },
    /// List the companion candidates of FILE in cycling order
    Candidates {
        file: PathBuf,

        #[command(flatten)]
        options: ResolveOptions,
    },
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logger(cli.verbose)?;

    let result = match cli.command {
        Commands::Switch {
            file,
            options,
            column,
            yes,
            name,
            open,
        } => {
            info!("Starting switch command");
            debug!(
                "Command parameters: file={}, options={:?}, column={:?}, yes={}, name={:?}, open={:?}",
                file.display(),
                options,
                column,
                yes,
                name,
                open
            );

            let request = SwitchRequest {
                config: options.to_config(),
                active_column: column,
                open_with: open,
            };
            let has_terminal = std::io::stdin().is_terminal() && std::io::stderr().is_terminal();
            let prompt = choose_prompt(yes, name, has_terminal);
            switch(&file, &request, prompt.as_ref())
        }
        Commands::Candidates { file, options } => {
            info!("Starting candidates command");
            list_candidates(&file, &options.to_config())
        }
    };

    match result {
        Err(err) if is_informational(&err) => {
            report_notice(&err.to_string())?;
            Ok(())
        }
        other => other,
    }
}

fn is_informational(err: &anyhow::Error) -> bool {
    err.downcast_ref::<SwitchError>()
        .is_some_and(SwitchError::is_informational)
}

/// The prompt reads keys from stdin and draws on stderr, so both must be terminals.
fn choose_prompt(yes: bool, name: Option<String>, has_terminal: bool) -> Box<dyn CompanionPrompt> {
    if let Some(name) = name {
        return Box::new(FixedName(name));
    }
    if yes {
        return Box::new(AcceptDefault);
    }
    if !has_terminal {
        debug!("stdin or stderr is not a terminal, interactive prompt unavailable");
        return Box::new(NoTerminal);
    }
    Box::new(TuiPrompt)
}

/// Stands in for the interactive prompt when there is no terminal to draw on.
struct NoTerminal;

impl CompanionPrompt for NoTerminal {
    fn ask(&self, default_name: &str) -> anyhow::Result<Option<String>> {
        Err(anyhow::anyhow!(
            "No companion exists and no terminal is available to ask for one; pass --yes to create {} or --name to pick another",
            default_name
        ))
    }
}

pub struct SwitchRequest {
    pub config: ResolutionConfig,
    pub active_column: Option<u32>,
    pub open_with: OpenWith,
}

fn split_path(file: &Path) -> anyhow::Result<(PathBuf, PathBuf, String)> {
    let current = std::path::absolute(file)?;
    let dir = current
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow::anyhow!("{} has no parent directory", current.display()))?;
    let current_name = current
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .ok_or_else(|| anyhow::anyhow!("{} is not a file path", current.display()))?;
    Ok((current, dir, current_name))
}

/// Path of a new companion. Only plain names below `dir` are accepted.
fn companion_path(dir: &Path, name: &str) -> Result<PathBuf, SwitchError> {
    let relative = Path::new(name);
    let plain = relative
        .components()
        .all(|component| matches!(component, Component::Normal(_)));
    if !plain {
        return Err(SwitchError::InvalidFileName(name.to_string()));
    }
    Ok(dir.join(relative))
}

/// classify, read the listing, resolve, then open or create.
pub fn switch(
    file: &Path,
    request: &SwitchRequest,
    prompt: &dyn CompanionPrompt,
) -> anyhow::Result<()> {
    let (current, dir, current_name) = split_path(file)?;

    // Unsupported files fail before the directory is touched.
    ensure_supported(&current)?;

    info!("Reading directory {}", dir.display());
    let siblings = list_siblings(&dir)?;

    let column = target_column(request.active_column, request.config.use_other_column);
    let opener = create_opener(request.open_with, request.active_column.is_some())?;

    match resolve(&current, &siblings, &request.config)? {
        ResolutionResult::OpenCandidate(path) => {
            info!("Opening {} in column {}", path.display(), column);
            opener.open(&path, column)
        }
        ResolutionResult::CreateCompanion(default_name) => {
            let Some(name) = prompt.ask(&default_name)? else {
                info!("No file name given, nothing created");
                return Ok(());
            };

            let new_path = companion_path(&dir, &name)?;
            create_empty_file(&new_path)?;
            opener.open(&new_path, column)
        }
        ResolutionResult::NoCompanionFound => Err(SwitchError::NoCompanionFound(current_name).into()),
    }
}

fn list_candidates(file: &Path, config: &ResolutionConfig) -> anyhow::Result<()> {
    let (current, dir, current_name) = split_path(file)?;
    let file_type = ensure_supported(&current)?;
    let siblings = list_siblings(&dir)?;

    let candidates = companion_candidates(&current, &siblings, file_type, config);
    info!("{} is a {:?} file with {} candidates", current.display(), file_type, candidates.len());

    for candidate in cycle_order(&candidates, &siblings, &current_name) {
        println!("{}", dir.join(candidate).display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::TempDir;

    struct Dismiss;

    impl CompanionPrompt for Dismiss {
        fn ask(&self, _default_name: &str) -> anyhow::Result<Option<String>> {
            Ok(None)
        }
    }

    fn request() -> SwitchRequest {
        SwitchRequest {
            config: ResolutionConfig::default(),
            active_column: None,
            open_with: OpenWith::Print,
        }
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "styleswitch",
            "switch",
            "src/app.tsx",
            "--style-ext",
            ".scss",
            "--no-directory-name",
            "--other-column",
            "--column",
            "2",
            "--yes",
            "--open",
            "editor",
        ])
        .unwrap();

        match cli.command {
            Commands::Switch {
                file,
                options,
                column,
                yes,
                open,
                ..
            } => {
                assert_eq!(file, PathBuf::from("src/app.tsx"));
                assert_eq!(column, Some(2));
                assert!(yes);
                assert_eq!(open, OpenWith::Editor);

                let config = options.to_config();
                assert_eq!(config.style_extension, ".scss");
                assert_eq!(config.script_extension, ".js");
                assert!(!config.use_directory_name);
                assert!(config.use_other_column);
            }
            Commands::Candidates { .. } => panic!("expected switch"),
        }
    }

    #[test]
    fn test_cli_rejects_yes_with_name() {
        let cli = Cli::try_parse_from([
            "styleswitch",
            "switch",
            "app.ts",
            "--yes",
            "--name",
            "app.css",
        ]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_switch_creates_default_companion() {
        let temp_dir = TempDir::new().unwrap();
        let current = temp_dir.path().join("button.js");
        File::create(&current).unwrap();

        switch(&current, &request(), &AcceptDefault).unwrap();

        assert!(temp_dir.path().join("button.css").is_file());
    }

    #[test]
    fn test_switch_dismissed_prompt_creates_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let current = temp_dir.path().join("button.js");
        File::create(&current).unwrap();

        switch(&current, &request(), &Dismiss).unwrap();

        let names: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn test_switch_opens_existing_without_prompting() {
        let temp_dir = TempDir::new().unwrap();
        let current = temp_dir.path().join("app.ts");
        File::create(&current).unwrap();
        File::create(temp_dir.path().join("app.css")).unwrap();

        switch(&current, &request(), &NoTerminal).unwrap();
    }

    #[test]
    fn test_switch_keeps_new_file_in_directory() {
        let temp_dir = TempDir::new().unwrap();
        let other_dir = TempDir::new().unwrap();
        let current = temp_dir.path().join("button.js");
        File::create(&current).unwrap();

        let outside = other_dir.path().join("escaped.css");
        let prompt = FixedName(outside.to_string_lossy().to_string());
        let err = switch(&current, &request(), &prompt).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SwitchError>(),
            Some(SwitchError::InvalidFileName(_))
        ));
        assert!(!outside.exists());

        let err = switch(&current, &request(), &FixedName("../up.css".to_string())).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SwitchError>(),
            Some(SwitchError::InvalidFileName(_))
        ));
        assert!(!temp_dir.path().parent().unwrap().join("up.css").exists());
    }

    #[test]
    fn test_companion_path() {
        let dir = Path::new("/project/src");
        assert_eq!(
            companion_path(dir, "button.css").unwrap(),
            PathBuf::from("/project/src/button.css")
        );
        assert_eq!(
            companion_path(dir, "styles/button.css").unwrap(),
            PathBuf::from("/project/src/styles/button.css")
        );
        assert!(companion_path(dir, "/tmp/button.css").is_err());
        assert!(companion_path(dir, "./button.css").is_err());
        assert!(companion_path(dir, "../button.css").is_err());
    }

    #[test]
    fn test_choose_prompt_without_terminal() {
        let prompt = choose_prompt(false, None, false);
        assert!(prompt.ask("button.css").is_err());

        let prompt = choose_prompt(true, None, false);
        assert_eq!(prompt.ask("button.css").unwrap(), Some("button.css".to_string()));

        let prompt = choose_prompt(false, Some("theme.scss".to_string()), false);
        assert_eq!(prompt.ask("button.css").unwrap(), Some("theme.scss".to_string()));
    }

    #[test]
    fn test_switch_unsupported_file_skips_directory_read() {
        let temp_dir = TempDir::new().unwrap();
        let current = temp_dir.path().join("missing").join("style.unknownext");

        let err = switch(&current, &request(), &AcceptDefault).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SwitchError>(),
            Some(SwitchError::UnsupportedFileType(_))
        ));
    }

    #[test]
    fn test_switch_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let current = temp_dir.path().join("missing").join("app.ts");

        let err = switch(&current, &request(), &AcceptDefault).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SwitchError>(),
            Some(SwitchError::DirectoryRead { .. })
        ));
    }

    #[test]
    fn test_no_companion_is_informational() {
        let temp_dir = TempDir::new().unwrap();
        let current = temp_dir.path().join(".css");
        File::create(&current).unwrap();

        let err = switch(&current, &request(), &AcceptDefault).unwrap_err();
        assert!(is_informational(&err));
    }
}
