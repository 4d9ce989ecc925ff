pub mod events;
pub mod members;
pub mod provision;
pub mod sync;
pub mod unexcused;
pub mod update;

use anyhow::Result;
use rollcall_core::Session;

use crate::utils::tui;

/// Fill the event, member and sheet caches. Reconciling depends on all three.
pub async fn load_workspace(session: &mut Session) -> Result<()> {
    let spinner = tui::create_spinner("Loading events");
    let result = load_caches(session, &spinner).await;
    spinner.finish_and_clear();
    result
}

async fn load_caches(session: &mut Session, spinner: &indicatif::ProgressBar) -> Result<()> {
    session.load_events().await?;
    spinner.set_message("Loading members");
    session.load_members().await?;
    spinner.set_message("Loading attendance sheets");
    session.load_sheets().await?;
    Ok(())
}
