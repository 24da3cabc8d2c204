use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use ngxjson_cli::{
    Config, ProjectOptions, Settings,
    export::{ExportOptions, run_export_command},
    import::{ImportOptions, import_table, run_import_command},
    validation::{normalize_locale, parse_locales, validate_locale},
    view::print_view,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log library events (skipped keys, per-file progress) to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Options naming the project and its locale files.
#[derive(ClapArgs, Debug)]
struct ProjectArgs {
    /// Base directory where language files are located
    #[arg(short, long)]
    dir: Option<String>,

    /// Directory a relative --dir is resolved against
    #[arg(long)]
    solution: Option<PathBuf>,

    /// Project name, used for storage location hints
    #[arg(short, long)]
    project: Option<String>,

    /// Project locale; its file holds the invariant texts
    #[arg(short, long)]
    locale: Option<String>,

    /// Config file (defaults to ./ngxjson.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl ProjectArgs {
    fn settings(self) -> Result<(Settings, Config), String> {
        let config = Config::load(self.config.as_deref())?;
        let options = ProjectOptions {
            dir: self.dir,
            solution: self.solution,
            project: self.project,
            locale: self.locale,
        };
        let settings = Settings::resolve(options, &config)?;
        Ok((settings, config))
    }
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Read every locale file below a directory into one table.
    Import {
        #[command(flatten)]
        project: ProjectArgs,

        /// Table file to write (.json or .csv); JSON on stdout when omitted
        #[arg(short, long)]
        output: Option<String>,

        /// Keep only entries that have an invariant text
        #[arg(long)]
        complete_only: bool,
    },

    /// Write one locale file per locale from a table.
    Export {
        #[command(flatten)]
        project: ProjectArgs,

        /// Table file to read (.json or .csv)
        #[arg(short, long)]
        input: String,

        /// Locales to export, comma separated; `invariant` (or an empty
        /// value) selects the invariant texts
        #[arg(long, value_delimiter = ',', num_args = 1..)]
        locales: Vec<String>,
    },

    /// View the resources of a directory of locale files.
    View {
        #[command(flatten)]
        project: ProjectArgs,

        /// Optional language code to filter entries by
        #[arg(long)]
        lang: Option<String>,

        /// Display full value without truncation
        #[arg(long)]
        full: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(commands: Commands) -> Result<bool, String> {
    match commands {
        Commands::Import {
            project,
            output,
            complete_only,
        } => {
            let (settings, _) = project.settings()?;
            run_import_command(
                &settings,
                ImportOptions {
                    output,
                    complete_only,
                },
            )?;
            Ok(true)
        }
        Commands::Export {
            project,
            input,
            locales,
        } => {
            let (settings, config) = project.settings()?;
            let locales = if locales.is_empty() {
                config.locales.unwrap_or_default()
            } else {
                locales
            };
            let locales = parse_locales(&locales)?;
            run_export_command(&settings, ExportOptions { input, locales })
        }
        Commands::View {
            project,
            lang,
            full,
        } => {
            let (settings, _) = project.settings()?;
            let lang = lang.map(|l| normalize_locale(&l));
            if let Some(lang) = &lang {
                validate_locale(lang)?;
            }
            let table = import_table(&settings, false)?;
            print_view(&table, &lang, full)?;
            Ok(true)
        }
    }
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args.commands) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}
