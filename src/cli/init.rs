use anyhow::{Context, Result};
use std::fs;

use super::migrate;

pub async fn run(storage_path: &str, db_path: &str) -> Result<()> {
    println!("Initializing storage at {}...", storage_path);
    fs::create_dir_all(storage_path)
        .with_context(|| format!("Failed to create storage directory {}", storage_path))?;

    migrate::run(db_path).await?;
    println!("Finished initializing db");
    Ok(())
}
