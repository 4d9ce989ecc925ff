use anyhow::Result;
use owo_colors::OwoColorize;
use rollcall_core::{ConflictResolver, Session};

use crate::render::{pluralize, Render};

pub async fn run(
    session: &mut Session,
    member: Option<&str>,
    mark_unexcused: bool,
    resolver: &mut dyn ConflictResolver,
) -> Result<()> {
    super::load_workspace(session).await?;

    let reports = session
        .sync_members(member, mark_unexcused, resolver)
        .await?;

    if reports.is_empty() {
        println!("{}", "No attendance to record".dimmed());
        return Ok(());
    }

    for (i, report) in reports.iter().enumerate() {
        println!("{}", report.render());
        if i < reports.len() - 1 {
            println!();
        }
    }

    let appended: usize = reports.iter().map(|r| r.outcome.appended.len()).sum();
    println!(
        "\nSynced {} {}: {} new {}",
        reports.len(),
        pluralize("member", reports.len()),
        appended,
        pluralize("row", appended)
    );

    Ok(())
}
