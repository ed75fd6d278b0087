#[cfg(feature = "clipboard-support")]
use clipboard::{ClipboardContext, ClipboardProvider};
use crossterm::{
    ExecutableCommand,
    style::{Color, ResetColor, SetForegroundColor},
};
use log::{debug, info, warn};
use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::process::Command;

pub trait CompanionOpener {
    fn open(&self, path: &Path, column: u32) -> anyhow::Result<()>;
}

fn format_location(path: &Path, column: u32, show_column: bool) -> String {
    if show_column {
        format!("{}\t{}", path.display(), column)
    } else {
        path.display().to_string()
    }
}

/// Prints the resolved path for the calling editor to pick up.
pub struct PrintOpener {
    show_column: bool,
}

impl PrintOpener {
    pub fn new(show_column: bool) -> Self {
        Self { show_column }
    }
}

impl CompanionOpener for PrintOpener {
    fn open(&self, path: &Path, column: u32) -> anyhow::Result<()> {
        debug!("Printing companion location");
        let mut stdout = io::stdout();
        writeln!(stdout, "{}", format_location(path, column, self.show_column))?;
        Ok(())
    }
}

/// Editor command from `$VISUAL`, then `$EDITOR`, split into program and arguments.
fn editor_command(visual: Option<String>, editor: Option<String>) -> Option<(String, Vec<String>)> {
    let command = visual
        .filter(|v| !v.trim().is_empty())
        .or_else(|| editor.filter(|e| !e.trim().is_empty()))?;

    let mut parts = command.split_whitespace().map(str::to_string);
    let program = parts.next()?;
    Some((program, parts.collect()))
}

pub struct EditorOpener;

impl CompanionOpener for EditorOpener {
    fn open(&self, path: &Path, column: u32) -> anyhow::Result<()> {
        let (program, args) = editor_command(env::var("VISUAL").ok(), env::var("EDITOR").ok())
            .ok_or_else(|| anyhow::anyhow!("Neither $VISUAL nor $EDITOR is set"))?;

        debug!(
            "Opening {} with {} (column {} ignored by external editors)",
            path.display(),
            program,
            column
        );
        let status = Command::new(&program).args(&args).arg(path).status()?;
        if !status.success() {
            warn!("Editor {} exited with {}", program, status);
            return Err(anyhow::anyhow!("Editor {} exited with {}", program, status));
        }

        info!("Opened {} in {}", path.display(), program);
        Ok(())
    }
}

#[cfg(feature = "clipboard-support")]
pub struct ClipboardOpener;

#[cfg(feature = "clipboard-support")]
impl CompanionOpener for ClipboardOpener {
    fn open(&self, path: &Path, _column: u32) -> anyhow::Result<()> {
        debug!("Copying companion path to clipboard");

        let mut ctx: ClipboardContext = match ClipboardProvider::new() {
            Ok(ctx) => ctx,
            Err(e) => {
                warn!("Failed to access clipboard: {}", e);
                return Err(anyhow::anyhow!("Failed to access clipboard: {}", e));
            }
        };

        match ctx.set_contents(path.display().to_string()) {
            Ok(_) => {
                info!("Companion path copied to clipboard");
                report_notice(&format!("📋 {} copied to clipboard", path.display()))?;
                Ok(())
            }
            Err(e) => {
                warn!("Failed to copy to clipboard: {}", e);
                Err(anyhow::anyhow!("Failed to copy to clipboard: {}", e))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OpenWith {
    Print,
    Editor,
    Clipboard,
}

pub fn create_opener(
    open_with: OpenWith,
    show_column: bool,
) -> anyhow::Result<Box<dyn CompanionOpener>> {
    match open_with {
        OpenWith::Print => Ok(Box::new(PrintOpener::new(show_column)) as Box<dyn CompanionOpener>),
        OpenWith::Editor => Ok(Box::new(EditorOpener) as Box<dyn CompanionOpener>),
        #[cfg(feature = "clipboard-support")]
        OpenWith::Clipboard => Ok(Box::new(ClipboardOpener) as Box<dyn CompanionOpener>),
        #[cfg(not(feature = "clipboard-support"))]
        OpenWith::Clipboard => Err(anyhow::anyhow!(
            "Clipboard support is not enabled in this build"
        )),
    }
}

/// Yellow notice on stderr, used for outcomes that are not failures.
pub fn report_notice(message: &str) -> io::Result<()> {
    let mut stderr = io::stderr();
    stderr.execute(SetForegroundColor(Color::Yellow))?;
    write!(stderr, "styleswitch: ")?;
    stderr.execute(ResetColor)?;
    writeln!(stderr, "{}", message)?;
    Ok(())
}
