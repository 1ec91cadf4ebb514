//! Command-line front end for working with `.ts` translation catalogs.

use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use clap::{
    Parser,
    Subcommand,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use ts_catalog::config::{
    ConfigError,
    ConfigManager,
};
use ts_catalog::workspace::{
    self,
    WorkspaceError,
    WorkspaceReport,
};
use ts_catalog::{
    Catalog,
    TsError,
    read_ts_file,
    write_ts_string,
};

#[derive(Parser, Debug)]
#[command(name = "ts-catalog", version, about = "Check, format and query Qt Linguist catalogs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run consistency checks over every catalog in a workspace.
    Check {
        /// Workspace root to scan.
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Emit the report as JSON instead of one line per finding.
        #[arg(long)]
        json: bool,
    },
    /// Show per-file and overall completion statistics.
    Stats {
        #[arg(default_value = ".")]
        path: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Re-serialize a catalog file in canonical form.
    Fmt {
        file: PathBuf,
        /// Rewrite the file in place instead of printing to stdout.
        #[arg(long)]
        write: bool,
    },
    /// Look up one translation from a catalog file.
    Query {
        file: PathBuf,
        context: String,
        source: String,
        /// Disambiguating comment.
        #[arg(long)]
        comment: Option<String>,
        /// Count for numerus messages; substitutes %n.
        #[arg(short = 'n', long = "count")]
        count: Option<u32>,
    },
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error(transparent)]
    Ts(#[from] TsError),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { path, json } => command_check(&path, json),
        Commands::Stats { path, json } => command_stats(&path, json),
        Commands::Fmt { file, write } => command_fmt(&file, write),
        Commands::Query { file, context, source, comment, count } => {
            command_query(&file, &context, &source, comment.as_deref(), count)
        }
    }
}

fn scan(path: &Path) -> Result<WorkspaceReport, CliError> {
    let mut config_manager = ConfigManager::new();
    config_manager.load_settings(Some(path.to_path_buf()))?;
    Ok(workspace::scan_workspace(path, config_manager.get_settings())?)
}

fn command_check(path: &Path, json: bool) -> Result<ExitCode, CliError> {
    let report = scan(path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for file in &report.files {
            for diagnostic in &file.diagnostics {
                println!("{diagnostic}");
            }
        }
        for language in &report.missing_languages {
            println!("error [missing-required-language] no catalog found for \"{language}\"");
        }
    }

    Ok(if report.has_errors() { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

fn command_stats(path: &Path, json: bool) -> Result<ExitCode, CliError> {
    let report = scan(path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(ExitCode::SUCCESS);
    }

    for file in &report.files {
        let language = file.language.as_deref().unwrap_or("??");
        println!(
            "{}: {} [{}] {}/{} finished ({:.1}%), {} unfinished, {} obsolete",
            file.path.display(),
            language,
            plural_summary(file.language.as_deref()),
            file.stats.finished,
            file.stats.total,
            file.stats.completion(),
            file.stats.unfinished,
            file.stats.obsolete,
        );
    }
    println!(
        "total: {}/{} finished ({:.1}%)",
        report.stats.finished,
        report.stats.total,
        report.stats.completion(),
    );

    Ok(ExitCode::SUCCESS)
}

fn plural_summary(language: Option<&str>) -> String {
    language
        .and_then(ts_catalog::plural::PluralRule::for_language)
        .map_or_else(|| "unknown plural rule".to_string(), |r| format!("{} plural form(s)", r.form_count()))
}

fn command_fmt(file: &Path, write: bool) -> Result<ExitCode, CliError> {
    let doc = read_ts_file(file)?;
    let output = write_ts_string(&doc)?;

    if write {
        std::fs::write(file, &output)
            .map_err(|source| CliError::Write { path: file.to_path_buf(), source })?;
        tracing::debug!("Rewrote {:?}", file);
    } else {
        print!("{output}");
    }

    Ok(ExitCode::SUCCESS)
}

fn command_query(
    file: &Path,
    context: &str,
    source: &str,
    comment: Option<&str>,
    n: Option<u32>,
) -> Result<ExitCode, CliError> {
    let doc = read_ts_file(file)?;
    let catalog = Catalog::from_document(&doc);

    let translated = match n {
        Some(n) => catalog.translate_n(context, source, comment, n),
        None => catalog.translate_with_comment(context, source, comment).to_string(),
    };
    println!("{translated}");

    Ok(ExitCode::SUCCESS)
}
