//! Read-only `profiles` queries.

use profiledb_db::ProfileRow;

fn fmt_opt<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "\u{2014}".to_string(), |v| v.to_string())
}

fn print_table(rows: &[ProfileRow]) {
    println!(
        "{:<24}{:<24}{:<30}{:<12}VERIFIED",
        "USERNAME", "EXTERNAL ID", "FULL NAME", "FOLLOWERS"
    );
    for row in rows {
        let full_name = row.full_name.as_deref().unwrap_or("\u{2014}");
        let full_name = if full_name.chars().count() > 28 {
            format!("{}...", full_name.chars().take(25).collect::<String>())
        } else {
            full_name.to_string()
        };
        println!(
            "{:<24}{:<24}{:<30}{:<12}{}",
            row.username,
            row.external_id,
            full_name,
            fmt_opt(row.followers_count),
            fmt_opt(row.is_verified)
        );
    }
}

/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_profiles_list(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let rows = profiledb_db::list_profiles(pool).await?;
    if rows.is_empty() {
        println!("no profiles stored; run `ingest <path>` first");
        return Ok(());
    }
    print_table(&rows);
    Ok(())
}

/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_profiles_search(pool: &sqlx::PgPool, fragment: &str) -> anyhow::Result<()> {
    let rows = profiledb_db::search_profiles_by_username(pool, fragment).await?;
    if rows.is_empty() {
        println!("no match found");
        return Ok(());
    }
    print_table(&rows);
    Ok(())
}
