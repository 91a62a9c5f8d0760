//! `chefai status` command: post counts and recently generated recipes.

use std::fmt::Write;

use anyhow::Result;
use sqlx::PgPool;

use chefai_core::dashboard::{Dashboard, load_dashboard};

/// Run the status command.
pub async fn run_status(pool: &PgPool) -> Result<()> {
    let dashboard = load_dashboard(pool).await?;
    print!("{}", format_dashboard(&dashboard));
    Ok(())
}

fn format_dashboard(dashboard: &Dashboard) -> String {
    let counts = &dashboard.counts;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Posts: {} total ({} published, {} drafts)",
        counts.total(),
        counts.publish,
        counts.draft
    );
    let _ = writeln!(out);

    if dashboard.recent.is_empty() {
        let _ = writeln!(out, "No generated recipes yet.");
        return out;
    }

    let _ = writeln!(out, "Recent recipes:");
    let _ = writeln!(
        out,
        "{:<38} {:<40} {:<8} {:<16}",
        "ID", "TITLE", "STATUS", "CREATED"
    );
    let _ = writeln!(out, "{}", "-".repeat(105));

    for post in &dashboard.recent {
        let _ = writeln!(
            out,
            "{:<38} {:<40} {:<8} {:<16}",
            post.id.to_string(),
            truncate(&post.title, 38),
            post.status.to_string(),
            post.created_at.format("%Y-%m-%d %H:%M").to_string()
        );
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let head: String = s.chars().take(max - 3).collect();
    format!("{head}...")
}
