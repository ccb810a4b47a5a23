//! Writes pipeline results as JSON
use log::*;
use serde::Serialize;
use std::path::Path;
use tokio::fs;

use crate::error::Result;

/// Pretty print `value` as JSON to stdout, or to `out_file` when given,
/// creating parent directories as needed.
pub async fn print_json<T: Serialize>(
    value: &T,
    out_file: Option<&str>,
) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;

    if let Some(out_file) = out_file {
        let file_path = Path::new(out_file);

        if let Some(parent) = file_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).await?;
        }

        info!("writing json to: {}", file_path.display());
        fs::write(file_path, &content).await?;
    } else {
        println!("{content}");
    }

    Ok(())
}
