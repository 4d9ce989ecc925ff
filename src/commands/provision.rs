use anyhow::Result;
use owo_colors::OwoColorize;
use rollcall_core::{RollcallError, Session};

use crate::utils::tui;

pub async fn run(session: &mut Session, member_id: &str) -> Result<()> {
    let spinner = tui::create_spinner("Loading attendance sheets");
    let loaded = session.load_sheets().await;
    spinner.finish_and_clear();
    loaded?;

    let spinner = tui::create_spinner(format!("Creating attendance sheet for {member_id}"));
    let result = session.create_attendance_sheet(member_id).await;
    spinner.finish_and_clear();

    match result {
        Ok(sheet) => {
            let name = session
                .cached_member(member_id)
                .map(|m| m.display_name().to_string())
                .unwrap_or_else(|| member_id.to_string());
            println!(
                "{} Created attendance sheet for {} {}",
                "✓".green(),
                name.bold(),
                sheet.id.dimmed()
            );
            Ok(())
        }
        Err(RollcallError::AlreadyExists(_)) => {
            println!(
                "{}",
                format!("Member {member_id} already has an attendance sheet").yellow()
            );
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
