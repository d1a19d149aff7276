use anyhow::Result;
use std::path::Path;

use crate::catalog;
use crate::config::Config;
use crate::extractor::{self, MarkerPatterns};
use crate::fs::{FileSystem, RealFileSystem};
use crate::logging;

pub fn run(config: &Config, root: Option<String>, output: Option<String>) -> Result<()> {
    logging::info("=== qml-i18n-extract extract ===\n");

    let root_dir = root.as_deref().unwrap_or(&config.root);
    let output_dir = output.as_deref().unwrap_or(&config.output);

    logging::debug(&format!("Root: {}", root_dir));
    logging::debug(&format!("Extension: .{}", config.extension));
    logging::debug(&format!(
        "Markers: {} / {}",
        config.marker_function, config.context_function
    ));

    let patterns = MarkerPatterns::new(&config.marker_function, &config.context_function)?;
    let ignore = extractor::compile_ignore_patterns(&config.ignore)?;

    logging::info(&format!("Extracting strings from {}...", root_dir));
    let terms = extractor::extract_from_root(Path::new(root_dir), &config.extension, &patterns, &ignore)?;

    // Serialize both catalogs before writing either, so a failure during
    // serialization leaves no half-written output pair behind.
    let reference = catalog::to_pretty_json(&catalog::build_reference_catalog(&terms))?;
    let template = catalog::to_pretty_json(&catalog::build_template_catalog(&terms))?;

    let fs = RealFileSystem;
    fs.create_dir_all(Path::new(output_dir))?;

    let reference_path = Path::new(output_dir).join(&config.reference_file);
    let template_path = Path::new(output_dir).join(&config.template_file);
    fs.atomic_write(&reference_path, reference.as_bytes())?;
    fs.atomic_write(&template_path, template.as_bytes())?;

    let total_occurrences: usize = terms.values().map(|e| e.occurrences.len()).sum();
    let with_contexts = terms.values().filter(|e| !e.contexts.is_empty()).count();

    logging::info("\nSummary:");
    logging::info(&format!("  Unique strings: {}", terms.len()));
    logging::info(&format!("  Total occurrences: {}", total_occurrences));
    logging::info(&format!("  Strings with contexts: {}", with_contexts));
    logging::info(&format!("  Reference file: {}", reference_path.display()));
    logging::info(&format!("  Template file: {}", template_path.display()));

    Ok(())
}
