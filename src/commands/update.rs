use anyhow::Result;
use rollcall_core::{ConflictResolver, EventLog, Session};

use crate::render::Render;

pub async fn run(
    session: &mut Session,
    member_id: &str,
    logs: &[EventLog],
    resolver: &mut dyn ConflictResolver,
) -> Result<()> {
    super::load_workspace(session).await?;

    let report = session.update_attendance(member_id, logs, resolver).await?;
    println!("{}", report.render());

    Ok(())
}
