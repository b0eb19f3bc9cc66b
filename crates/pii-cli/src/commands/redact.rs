use std::collections::BTreeMap;
use std::fs;
use std::io::Read;

use anyhow::{Context, Result};

use pii_config::Config;
use pii_detect::scan;

use crate::cli::RedactArgs;

pub fn handle(args: RedactArgs, config: &Config) -> Result<()> {
    let text = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };

    let registry = super::registry_from_config(config);
    let output = scan(&registry, &text, true);

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for f in &output.findings {
        *counts.entry(f.kind.to_string()).or_insert(0) += 1;
    }
    for (kind, count) in &counts {
        tracing::info!(kind = kind.as_str(), count = *count, "redacted");
    }

    print!("{}", output.redacted_text);
    Ok(())
}
