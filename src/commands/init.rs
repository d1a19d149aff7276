use anyhow::{bail, Result};
use std::path::Path;

use crate::config::DEFAULT_CONFIG_FILE;
use crate::logging;

pub fn run(force: bool) -> Result<()> {
    logging::info("=== qml-i18n-extract init ===\n");

    let config_path = Path::new(DEFAULT_CONFIG_FILE);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = serde_json::json!({
        "root": ".",
        "extension": "qml",
        "output": "translations",
        "referenceFile": "en.json",
        "templateFile": "template.json",
        "markerFunction": "qsTr",
        "contextFunction": "I18n.tr",
        "ignore": []
    });

    let config_str = serde_json::to_string_pretty(&config)?;
    std::fs::write(config_path, format!("{}\n", config_str))?;

    logging::info(&format!(
        "Created configuration file: {}\n",
        config_path.display()
    ));
    logging::info("Next steps:");
    logging::info("  1. Adjust root/output paths in the config if needed");
    logging::info("  2. Run 'qml-i18n-extract extract' to generate the catalogs");

    Ok(())
}
