use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use widget_studio::clipboard::system::{Osc52, StatusLabel, SystemClipboard};
use widget_studio::clipboard::{ClipboardExporter, CopyOutcome};
use widget_studio::panel::{self, ActionButton, Binding, ControlPanel, PanelError};
use widget_studio::{Button, Notice, Value, Widget};

/// How long `--copy` keeps serving the selection before exiting.
const CLIPBOARD_HOLD: Duration = Duration::from_secs(3);

#[derive(Parser)]
#[command(name = "widget", version = "0.2.0")]
#[command(about = "Widget Studio: inline-styled notice and button generators")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a widget to its HTML fragment
    Render {
        kind: Kind,

        /// JSON snapshot to start from (missing keys take defaults)
        #[arg(long)]
        params: Option<PathBuf>,

        /// Set a field, e.g. --set title="Heads up" (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        assignments: Vec<String>,

        /// Write output to file instead of stdout
        #[arg(short)]
        o: Option<PathBuf>,

        /// Also copy the markup to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Print the default snapshot as JSON
    Params { kind: Kind },

    /// List every control: folder, key, control type and current value
    Fields {
        kind: Kind,

        #[arg(long)]
        params: Option<PathBuf>,
    },

    /// Start the configurator dev server
    Dev {
        kind: Kind,

        /// JSON snapshot to load and watch for changes
        #[arg(long)]
        params: Option<PathBuf>,

        /// Server port
        #[arg(long, default_value_t = 3333)]
        port: u16,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    /// Callout box with icon, title, body and action link
    Notice,
    /// Standalone button or link
    Button,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Render {
            kind,
            params,
            assignments,
            o,
            copy,
        } => match kind {
            Kind::Notice => render::<Notice>(params.as_deref(), &assignments, o.as_deref(), copy),
            Kind::Button => render::<Button>(params.as_deref(), &assignments, o.as_deref(), copy),
        },
        Commands::Params { kind } => {
            let json = match kind {
                Kind::Notice => serde_json::to_string_pretty(&Notice::defaults())?,
                Kind::Button => serde_json::to_string_pretty(&Button::defaults())?,
            };
            println!("{json}");
            Ok(())
        }
        Commands::Fields { kind, params } => match kind {
            Kind::Notice => fields::<Notice>(params.as_deref()),
            Kind::Button => fields::<Button>(params.as_deref()),
        },
        Commands::Dev { kind, params, port } => {
            let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
            let result = rt.block_on(async {
                match kind {
                    Kind::Notice => {
                        widget_studio::server::run_dev_server::<Notice>(params, port).await
                    }
                    Kind::Button => {
                        widget_studio::server::run_dev_server::<Button>(params, port).await
                    }
                }
            });
            result.map_err(|e| anyhow::anyhow!("dev server failed: {e}"))
        }
    }
}

fn load<W: Widget>(params: Option<&Path>) -> anyhow::Result<W::State> {
    match params {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("cannot read '{}'", path.display()))?;
            widget_studio::load_state::<W>(&json)
                .with_context(|| format!("in '{}'", path.display()))
        }
        None => Ok(W::defaults()),
    }
}

fn render<W: Widget>(
    params: Option<&Path>,
    assignments: &[String],
    out: Option<&Path>,
    copy: bool,
) -> anyhow::Result<()> {
    let mut state = load::<W>(params)?;
    for assignment in assignments {
        state = widget_studio::apply_assignment::<W>(&state, assignment)
            .with_context(|| format!("--set {assignment}"))?;
    }
    let markup = W::render(&state);

    match out {
        Some(path) => {
            fs::write(path, &markup)
                .with_context(|| format!("cannot write '{}'", path.display()))?;
            eprintln!(
                "wrote {} to {} ({} bytes)",
                W::KIND,
                path.display(),
                markup.len()
            );
        }
        None => println!("{markup}"),
    }

    if copy {
        copy_markup(&markup)?;
    }
    Ok(())
}

fn copy_markup(markup: &str) -> anyhow::Result<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .context("failed to create tokio runtime")?;
    let system = SystemClipboard::detect().map(|c| c.hold_for(CLIPBOARD_HOLD));
    let exporter = ClipboardExporter::new(system, Osc52::stderr());
    let mut status = StatusLabel::new("copy");
    let (outcome, _) = rt.block_on(exporter.copy_with_feedback(Some(markup), Some(&mut status)));
    match outcome {
        CopyOutcome::Copied(path) => {
            eprintln!("{} ({path:?})", status.label);
            Ok(())
        }
        CopyOutcome::Failed(_, e) => bail!("{}: {e}", status.label),
        CopyOutcome::NoSource => Ok(()),
    }
}

/// Prints one row per bound control.
struct FieldLister {
    rows: Vec<[String; 4]>,
}

impl ControlPanel for FieldLister {
    fn add_folder(&mut self, _path: &[&str], _expanded: bool) -> Result<(), PanelError> {
        Ok(())
    }

    fn bind(&mut self, path: &[&str], binding: &Binding, current: &Value) -> Result<(), PanelError> {
        self.rows.push([
            path.join(" / "),
            binding.key.to_string(),
            binding.kind.name().to_string(),
            current.to_string(),
        ]);
        Ok(())
    }

    fn add_action(&mut self, _path: &[&str], _button: &ActionButton) -> Result<(), PanelError> {
        Ok(())
    }

    fn refresh(&mut self, _values: &[(&'static str, Value)]) {}
}

fn fields<W: Widget>(params: Option<&Path>) -> anyhow::Result<()> {
    let state = load::<W>(params)?;
    let mut lister = FieldLister { rows: Vec::new() };
    panel::mount(&mut lister, &W::layout(), &W::values(&state))?;

    let widths = lister.rows.iter().fold([0usize; 3], |mut w, row| {
        for (i, cell) in row.iter().take(3).enumerate() {
            w[i] = w[i].max(cell.chars().count());
        }
        w
    });
    for [folder, key, kind, value] in &lister.rows {
        println!(
            "{folder:<w0$}  {key:<w1$}  {kind:<w2$}  {value}",
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
        );
    }
    Ok(())
}
