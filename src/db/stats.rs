use crate::db::pool::DbPool;
use crate::db::store::BlobStore;
use crate::errors::AppResult;
use std::fs;

const CYAN: &str = "\x1b[36m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Print file, key and log information about the database.
pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    let keys = pool.store().entries()?;
    println!("{}• Stored keys:{} {}", CYAN, RESET, keys.len());
    for (key, len) in keys {
        println!("    {:<24} {:>8} bytes", key, len);
    }

    let log_rows: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM log", [], |row| row.get(0))?;
    println!("{}• Log rows:{} {}", CYAN, RESET, log_rows);

    Ok(())
}
