use anyhow::Result;
use serde::Serialize;

use crate::extractor::{TermMap, TranslationEntry};

/// One record of the populated source-language catalog.
///
/// `reference` lists every usage site as `file:line`, comma-joined in
/// discovery order. `context` carries the sorted context labels joined with
/// `" | "`, falling back to the term itself when no call site supplied one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceRecord {
    pub term: String,
    pub context: String,
    pub reference: String,
    pub comment: String,
}

/// One record of the empty template catalog handed to translators.
///
/// Unlike the reference flavor, `context` falls back to an empty string and
/// `reference` is always left blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateRecord {
    pub term: String,
    pub translation: String,
    pub context: String,
    pub reference: String,
    pub comment: String,
}

fn joined_contexts(entry: &TranslationEntry) -> Option<String> {
    if entry.contexts.is_empty() {
        None
    } else {
        let labels: Vec<&str> = entry.contexts.iter().map(|s| s.as_str()).collect();
        Some(labels.join(" | "))
    }
}

fn joined_references(entry: &TranslationEntry) -> String {
    let refs: Vec<String> = entry
        .occurrences
        .iter()
        .map(|occ| format!("{}:{}", occ.file, occ.line))
        .collect();
    refs.join(", ")
}

/// Build the reference catalog, sorted lexicographically by term.
pub fn build_reference_catalog(terms: &TermMap) -> Vec<ReferenceRecord> {
    terms
        .iter()
        .map(|(term, entry)| ReferenceRecord {
            term: term.clone(),
            context: joined_contexts(entry).unwrap_or_else(|| term.clone()),
            reference: joined_references(entry),
            comment: String::new(),
        })
        .collect()
}

/// Build the template catalog in the same term order as the reference one.
pub fn build_template_catalog(terms: &TermMap) -> Vec<TemplateRecord> {
    terms
        .iter()
        .map(|(term, entry)| TemplateRecord {
            term: term.clone(),
            translation: String::new(),
            context: joined_contexts(entry).unwrap_or_default(),
            reference: String::new(),
            comment: String::new(),
        })
        .collect()
}

/// Serialize a catalog with two-space indentation and a trailing newline.
/// Non-ASCII characters are left unescaped.
pub fn to_pretty_json<T: Serialize>(records: &[T]) -> Result<String> {
    let body = serde_json::to_string_pretty(records)?;
    Ok(format!("{}\n", body))
}
