use anyhow::Result;
use owo_colors::OwoColorize;
use rollcall_core::{Event, Session};

use crate::render::Render;
use crate::utils::tui;

pub async fn run(session: &Session, limit: Option<u32>) -> Result<()> {
    let spinner = tui::create_spinner("Fetching events");
    let result = match limit {
        Some(limit) => session.list_events_bounded(limit).await,
        None => session.list_events().await,
    };
    spinner.finish_and_clear();

    let mut events: Vec<Event> = result?
        .iter()
        .filter_map(|page| match Event::from_page(page) {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::warn!(page_id = %page.id, error = %e, "skipping event");
                None
            }
        })
        .collect();

    if events.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    events.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.title.cmp(&b.title)));
    for event in &events {
        println!("{}", event.render());
    }

    Ok(())
}
