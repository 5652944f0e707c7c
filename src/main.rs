use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use sort_class_members::cli::{self, Args, Command, LintArgs, OutputFormat};
use sort_class_members::config::{self, SortMembersConfig};
use sort_class_members::diagnostics::Diagnostic;
use sort_class_members::fixer;
use sort_class_members::lint::LintLevel;
use sort_class_members::parser::Dialect;
use sort_class_members::{LintEngine, create_engine, instrument_block};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    sort_class_members::telemetry::init_tracing();
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::from(2)
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    match args.command {
        Some(Command::Explain { config }) => {
            explain(config.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Lint(lint)) => lint_command(lint),
        None => lint_command(args.lint),
    }
}

fn load_config(explicit: Option<&Path>, paths: &[PathBuf]) -> anyhow::Result<SortMembersConfig> {
    let start_dir = cli::infer_start_dir(paths)?;
    Ok(config::load_config(explicit, &start_dir)?
        .map(|(_, cfg)| cfg)
        .unwrap_or_default())
}

fn explain(config_path: Option<&Path>) -> anyhow::Result<()> {
    let cfg = load_config(config_path, &[])?;
    let settings = cfg.settings();
    let engine = create_engine(&cfg.rule_options(), settings.clone())?;

    for d in engine.registry().descriptors() {
        println!("name: {}", d.name);
        println!("category: {}", d.category.as_str());
        println!("description: {}", d.description);
        println!("level: {}", settings.level_for(d.name).as_str());
        if d.fix.available {
            println!("fix: {}", d.fix.description);
        }
    }
    println!("options:");
    println!("{}", serde_json::to_string_pretty(&cfg.rule_options())?);
    Ok(())
}

fn lint_command(args: LintArgs) -> anyhow::Result<ExitCode> {
    let cfg = load_config(args.config.as_deref(), &args.paths)?;
    let engine = create_engine(&cfg.rule_options(), cfg.settings())?;

    if args.fix {
        return fix_command(&engine, &args);
    }

    let inputs = read_inputs(&args.paths)?;
    let mut report = Report::default();

    for input in &inputs {
        let diagnostics = instrument_block!("lint", {
            engine
                .lint_source_as(&input.source, input.dialect)
                .with_context(|| format!("failed to lint {}", input.name))
        })?;
        report.add(&input.name, &diagnostics, args.format, args.deny_warnings);
    }

    if args.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&report.json)?);
    }

    if report.has_error || (args.deny_warnings && report.total > 0) {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

struct Input {
    name: String,
    source: String,
    dialect: Dialect,
}

fn read_inputs(paths: &[PathBuf]) -> anyhow::Result<Vec<Input>> {
    if paths.is_empty() {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        return Ok(vec![Input {
            name: "stdin".to_string(),
            source,
            dialect: Dialect::TypeScript,
        }]);
    }

    cli::collect_source_files(paths)?
        .into_iter()
        .map(|path| {
            let source = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok(Input {
                name: path.display().to_string(),
                dialect: Dialect::from_path(&path),
                source,
            })
        })
        .collect()
}

#[derive(Debug, Serialize)]
struct JsonDiagnostic {
    file: String,
    row: usize,
    column: usize,
    level: String,
    lint: String,
    message: String,
    fixable: bool,
}

#[derive(Default)]
struct Report {
    total: usize,
    has_error: bool,
    json: Vec<JsonDiagnostic>,
}

impl Report {
    fn add(&mut self, file: &str, diagnostics: &[Diagnostic], format: OutputFormat, deny_warnings: bool) {
        for diag in diagnostics {
            let is_error = diag.level == LintLevel::Error;
            self.has_error |= is_error;

            match format {
                OutputFormat::Pretty => println!(
                    "{}:{}:{}: {}: {}: {}",
                    file,
                    diag.span.start.row,
                    diag.span.start.column,
                    diag.level.as_str(),
                    diag.lint.name,
                    diag.message
                ),
                OutputFormat::Github => {
                    let kind = if is_error || deny_warnings {
                        "error"
                    } else {
                        "warning"
                    };
                    println!(
                        "::{} file={},line={},col={},title={}::{}",
                        kind,
                        github_escape(file),
                        diag.span.start.row,
                        diag.span.start.column,
                        diag.lint.name,
                        github_escape(&diag.message)
                    );
                }
                OutputFormat::Json => self.json.push(JsonDiagnostic {
                    file: file.to_string(),
                    row: diag.span.start.row,
                    column: diag.span.start.column,
                    level: diag.level.as_str().to_string(),
                    lint: diag.lint.name.to_string(),
                    message: diag.message.clone(),
                    fixable: diag.suggestion.is_some(),
                }),
            }
        }

        self.total += diagnostics.len();
        if format == OutputFormat::Pretty {
            println!("{} diagnostics for {}", diagnostics.len(), file);
        }
    }
}

/// Handle --fix mode: rewrite files (or print diffs with --fix-dry-run).
fn fix_command(engine: &LintEngine, args: &LintArgs) -> anyhow::Result<ExitCode> {
    if args.paths.is_empty() {
        anyhow::bail!("--fix requires file paths (stdin not supported)");
    }

    let files = cli::collect_source_files(&args.paths)?;
    let mut total_fixed = 0usize;
    let mut files_modified = 0usize;
    let mut remaining = 0usize;
    let mut has_error = false;

    for path in &files {
        let original = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let outcome = instrument_block!("fix", {
            engine
                .fix_source(&original, Dialect::from_path(path))
                .with_context(|| format!("failed to fix {}", path.display()))
        })?;

        remaining += outcome.remaining.len();
        has_error |= outcome.remaining.iter().any(|d| d.level == LintLevel::Error);

        if !outcome.changed() {
            continue;
        }
        total_fixed += outcome.fixes_applied;
        files_modified += 1;

        if args.fix_dry_run {
            let diff = fixer::format_diff(&original, &outcome.fixed_source, path);
            if !diff.is_empty() {
                println!("{diff}");
            }
        } else {
            std::fs::write(path, &outcome.fixed_source)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
    }

    if args.fix_dry_run {
        println!("\n{total_fixed} fix(es) would be applied to {files_modified} file(s)");
    } else {
        println!("Applied {total_fixed} fix(es) to {files_modified} file(s)");
    }
    if remaining > 0 {
        println!("{remaining} problem(s) could not be fixed automatically");
    }

    if has_error || (args.deny_warnings && remaining > 0) {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn github_escape(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
