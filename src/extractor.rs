use anyhow::{Context, Result};
use glob::Pattern;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use walkdir::WalkDir;

/// A single concrete location where a term was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    /// Path relative to the scanned root.
    pub file: String,
    /// 1-based line number.
    pub line: usize,
}

/// Everything collected for one translatable string during a scan.
///
/// The term itself is the map key, so identity is the exact literal text:
/// two strings that differ in case or whitespace never merge.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TranslationEntry {
    /// Disambiguating labels contributed by two-argument context calls.
    pub contexts: BTreeSet<String>,
    /// Every match site, in discovery order. Never deduplicated: a term
    /// used twice on one line yields two occurrences.
    pub occurrences: Vec<Occurrence>,
}

/// Accumulated scan result, keyed by term. BTreeMap keeps iteration in
/// lexicographic term order, which is the order both catalogs require.
pub type TermMap = BTreeMap<String, TranslationEntry>;

/// Compiled marker patterns for one scan.
///
/// Each group holds the double-quoted variant first, then the single-quoted
/// one. A literal cannot contain an unescaped instance of its own delimiter;
/// no further escape decoding is done. Matching is purely lexical, so a
/// marker-shaped string inside a comment still matches.
pub struct MarkerPatterns {
    /// `qsTr("…")` / `qsTr('…')` — captures the term.
    simple: [Regex; 2],
    /// `I18n.tr("…", "…")` — captures term and context label.
    with_context: [Regex; 2],
    /// `I18n.tr("…")` — captures the term; only consulted on lines where
    /// no two-argument form matched.
    context_simple: [Regex; 2],
}

impl MarkerPatterns {
    /// Build patterns for the configured marker function names.
    pub fn new(marker: &str, context_fn: &str) -> Result<Self> {
        let m = regex::escape(marker);
        let c = regex::escape(context_fn);

        let compile = |pattern: String| {
            Regex::new(&pattern).with_context(|| format!("Invalid marker pattern: {}", pattern))
        };

        Ok(Self {
            simple: [
                compile(format!(r#"{m}\("([^"]+)"\)"#))?,
                compile(format!(r#"{m}\('([^']+)'\)"#))?,
            ],
            with_context: [
                compile(format!(r#"{c}\("([^"]+)"\s*,\s*"([^"]+)"\)"#))?,
                compile(format!(r#"{c}\('([^']+)'\s*,\s*'([^']+)'\)"#))?,
            ],
            context_simple: [
                compile(format!(r#"{c}\("([^"]+)"\)"#))?,
                compile(format!(r#"{c}\('([^']+)'\)"#))?,
            ],
        })
    }
}

/// Compile ignore globs from config strings.
pub fn compile_ignore_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| Pattern::new(p).with_context(|| format!("Invalid ignore pattern: {}", p)))
        .collect()
}

fn matches_ignore(relative: &Path, full: &Path, ignore: &[Pattern]) -> bool {
    ignore
        .iter()
        .any(|p| p.matches_path(relative) || p.matches_path(full))
}

/// Scan every source file with the configured extension under `root` and
/// accumulate a term map.
///
/// Traversal is sorted by file name so occurrence order is stable
/// run-to-run. Any file that cannot be read or decoded as UTF-8 aborts the
/// whole scan; there is no skip-and-continue mode.
pub fn extract_from_root(
    root: &Path,
    extension: &str,
    patterns: &MarkerPatterns,
    ignore: &[Pattern],
) -> Result<TermMap> {
    let mut terms = TermMap::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry =
            entry.with_context(|| format!("Failed to walk directory: {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if path.extension().map(|e| e != extension).unwrap_or(true) {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        if matches_ignore(relative, path, ignore) {
            continue;
        }

        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        extract_from_source(
            &source,
            &relative.display().to_string(),
            patterns,
            &mut terms,
        );
    }

    Ok(terms)
}

/// Apply the marker patterns to one file's source, appending into `terms`.
///
/// Per line, in precedence order: every simple-marker match records an
/// occurrence; every two-argument context match records an occurrence and
/// adds its label to the term's context set; single-argument context
/// matches are recorded only when no two-argument form matched anywhere on
/// that line. The whole-line gate avoids counting one textually ambiguous
/// call as both a contextual and a plain use.
pub fn extract_from_source(
    source: &str,
    file: &str,
    patterns: &MarkerPatterns,
    terms: &mut TermMap,
) {
    for (index, line) in source.lines().enumerate() {
        let line_number = index + 1;

        for re in &patterns.simple {
            for cap in re.captures_iter(line) {
                record(terms, &cap[1], None, file, line_number);
            }
        }

        let mut line_has_context_call = false;
        for re in &patterns.with_context {
            for cap in re.captures_iter(line) {
                line_has_context_call = true;
                record(terms, &cap[1], Some(&cap[2]), file, line_number);
            }
        }

        if !line_has_context_call {
            for re in &patterns.context_simple {
                for cap in re.captures_iter(line) {
                    record(terms, &cap[1], None, file, line_number);
                }
            }
        }
    }
}

fn record(terms: &mut TermMap, term: &str, context: Option<&str>, file: &str, line: usize) {
    let entry = terms.entry(term.to_string()).or_default();
    if let Some(label) = context {
        entry.contexts.insert(label.to_string());
    }
    entry.occurrences.push(Occurrence {
        file: file.to_string(),
        line,
    });
}
