use anyhow::Result;
use owo_colors::OwoColorize;
use rollcall_core::Session;

use crate::render::Render;
use crate::utils::tui;

pub async fn run(session: &mut Session, event_id: &str) -> Result<()> {
    let spinner = tui::create_spinner("Checking attendance");
    let result = session.find_unexcused(event_id).await;
    spinner.finish_and_clear();

    let members = result?;
    if members.is_empty() {
        println!("{}", "Everyone is accounted for".green());
        return Ok(());
    }

    println!("{}", "No recorded outcome:".bold());
    for member in &members {
        println!("   {}", member.render());
    }

    Ok(())
}
