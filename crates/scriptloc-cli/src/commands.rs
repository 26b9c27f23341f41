//! Subcommand implementations. Each writes its report to `out`.

use std::io::Write;
use std::path::{Path, PathBuf};

use scriptloc_extract::update_scenarios;
use scriptloc_i18n::{FormatArg, StringCatalog, catalog_locale};
use scriptloc_po::{MessageKey, PoError, PoFile};
use serde::Serialize;

use crate::CliError;
use crate::cli::{CheckArgs, Command, CoverageArgs, LookupArgs, UpdateArgs};
use crate::config::Config;

/// How a command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The command ran but found problems.
    Findings(usize),
}

/// Dispatch one subcommand.
///
/// # Errors
///
/// Propagates the subcommand's error.
pub fn run(command: Command, config: &Config, out: &mut dyn Write) -> Result<Outcome, CliError> {
    match command {
        Command::Update(args) => update(&args, config, out),
        Command::Check(args) => check(&args, out),
        Command::Lookup(args) => lookup(&args, out),
        Command::Coverage(args) => coverage(&args, out),
    }
}

/// `scriptloc update`
///
/// # Errors
///
/// Fails on the first unreadable script or catalog.
pub fn update(args: &UpdateArgs, config: &Config, out: &mut dyn Write) -> Result<Outcome, CliError> {
    let mut options = config.update_options();
    if let Some(scripts) = &args.scripts {
        options.scripts_dir.clone_from(scripts);
    }
    if let Some(locale_dir) = &args.locale_dir {
        options.locale_dir.clone_from(locale_dir);
    }
    if !args.also.is_empty() {
        options.extra_bases.clone_from(&args.also);
    }

    let report = update_scenarios(&options)?;
    let sections: [(&str, &[PathBuf]); 5] = [
        ("wrote", &report.templates),
        ("merged", &report.merged),
        ("skipped", &report.skipped),
        ("removed", &report.removed),
        ("missing", &report.missing_bases),
    ];
    for (verb, paths) in sections {
        for path in paths {
            writeln!(out, "{verb} {}", path.display())?;
        }
    }
    Ok(Outcome::Success)
}

/// `scriptloc check`
///
/// # Errors
///
/// Only output failures are errors; unreadable catalogs count as findings.
pub fn check(args: &CheckArgs, out: &mut dyn Write) -> Result<Outcome, CliError> {
    let mut findings = 0;
    for path in &args.files {
        let file = match PoFile::read(path) {
            Ok(file) => file,
            Err(err @ PoError::Io { .. }) => {
                writeln!(out, "{err}")?;
                findings += 1;
                continue;
            }
            Err(err) => {
                writeln!(out, "{}: {err}", path.display())?;
                findings += 1;
                continue;
            }
        };

        let before = findings;
        for conflict in file.conflicts() {
            writeln!(
                out,
                "{}: duplicate {}: {:?} vs {:?}",
                path.display(),
                conflict.key,
                conflict.first,
                conflict.second
            )?;
            findings += 1;
        }
        for issue in file.format_issues() {
            writeln!(out, "{}: {}: {}", path.display(), issue.key, issue.mismatch)?;
            findings += 1;
        }
        if findings == before {
            writeln!(out, "{}: ok", path.display())?;
        }
        tracing::debug!(path = %path.display(), findings = findings - before, "checked catalog");
    }
    Ok(if findings == 0 {
        Outcome::Success
    } else {
        Outcome::Findings(findings)
    })
}

fn load_locale(catalog: &mut StringCatalog, path: &Path) -> Result<(String, PoFile), CliError> {
    let file = PoFile::read(path)?;
    let locale = catalog_locale(path, &file).ok_or_else(|| CliError::UnknownLocale {
        path: path.to_path_buf(),
    })?;
    if catalog.locales().contains(&locale.as_str()) {
        tracing::warn!(path = %path.display(), %locale, "locale loaded twice, keeping the last file");
    }
    catalog.add_po(locale.clone(), &file)?;
    Ok((locale, file))
}

/// `scriptloc lookup`
///
/// # Errors
///
/// Fails when the catalog cannot be loaded.
pub fn lookup(args: &LookupArgs, out: &mut dyn Write) -> Result<Outcome, CliError> {
    let mut catalog = StringCatalog::new();
    let (locale, _) = load_locale(&mut catalog, &args.file)?;
    let format_args: Vec<FormatArg> = args.args.iter().map(|a| FormatArg::parse(a)).collect();
    let text = match &args.context {
        Some(context) => catalog.format_with_context(&locale, context, &args.text, &format_args),
        None => catalog.format(&locale, &args.text, &format_args),
    };
    writeln!(out, "{text}")?;
    Ok(Outcome::Success)
}

#[derive(Debug, Serialize)]
struct CoverageSummary {
    total_keys: usize,
    locales: Vec<CoverageRow>,
}

#[derive(Debug, Serialize)]
struct CoverageRow {
    locale: String,
    translated: usize,
    percent: f32,
    missing: Vec<MissingKey>,
}

#[derive(Debug, Serialize)]
struct MissingKey {
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<String>,
    id: String,
}

impl From<MessageKey> for MissingKey {
    fn from(key: MessageKey) -> Self {
        Self {
            context: key.context,
            id: key.id,
        }
    }
}

/// `scriptloc coverage`
///
/// Coverage is measured against the union of live keys over all files.
///
/// # Errors
///
/// Fails when a catalog cannot be loaded.
pub fn coverage(args: &CoverageArgs, out: &mut dyn Write) -> Result<Outcome, CliError> {
    let mut catalog = StringCatalog::new();
    let mut keys: Vec<MessageKey> = Vec::new();
    for path in &args.files {
        let (_, file) = load_locale(&mut catalog, path)?;
        keys.extend(file.live().map(scriptloc_po::Entry::key));
    }
    keys.sort_unstable();
    keys.dedup();

    let report = catalog.coverage_against(&keys);
    let summary = CoverageSummary {
        total_keys: report.total_keys,
        locales: report
            .locales
            .into_iter()
            .map(|l| CoverageRow {
                locale: l.locale,
                translated: l.present,
                percent: l.coverage_percent,
                missing: l.missing.into_iter().map(MissingKey::from).collect(),
            })
            .collect(),
    };

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
    } else {
        for row in &summary.locales {
            writeln!(
                out,
                "{}\t{}/{}\t{:.1}%",
                row.locale, row.translated, summary.total_keys, row.percent
            )?;
        }
    }
    Ok(Outcome::Success)
}
