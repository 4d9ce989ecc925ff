use anyhow::Result;
use owo_colors::OwoColorize;
use rollcall_core::{Counters, Session};

use crate::render::Render;
use crate::utils::tui;

pub async fn run(session: &mut Session, limit: Option<u32>) -> Result<()> {
    let spinner = tui::create_spinner("Fetching members");
    let members = match limit {
        Some(limit) => session.list_members_bounded(limit).await,
        None => session.list_members().await,
    };
    let members = match members {
        Ok(members) => members,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e.into());
        }
    };

    spinner.set_message("Loading attendance sheets");
    let sheets = session.load_sheets().await;
    spinner.finish_and_clear();
    sheets?;

    if members.is_empty() {
        println!("{}", "No members found".dimmed());
        return Ok(());
    }

    for member in members.iter().filter(|m| !m.is_bot()) {
        let summary = match session.sheet(&member.id) {
            Some(sheet) => {
                let counters = Counters::from_sheet(sheet);
                if counters.total() == 0 {
                    "no outcomes".dimmed().to_string()
                } else {
                    counters.render()
                }
            }
            None => "no sheet".yellow().to_string(),
        };

        let ignored = if session.config().is_ignored(member.display_name()) {
            format!(" {}", "[ignored]".dimmed())
        } else {
            String::new()
        };

        println!("{}{}", member.render(), ignored);
        println!("   {}", summary);
    }

    Ok(())
}
