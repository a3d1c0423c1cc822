use crate::core::db::{async_db, migrate_db};
use anyhow::Result;

pub async fn run(db_path: &str) -> Result<()> {
    println!("Migrating db...");
    let db = async_db(db_path).await?;
    let applied = db.call(|conn| Ok(migrate_db(conn)?)).await?;
    println!("Finished migrating db ({} migrations applied)", applied);
    Ok(())
}
