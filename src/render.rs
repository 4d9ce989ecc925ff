//! Colored terminal rendering for rollcall types.

use owo_colors::OwoColorize;
use rollcall_core::notion::User;
use rollcall_core::{AttendanceRow, AttendanceStatus, Counters, Event, ReconcileReport};

pub trait Render {
    fn render(&self) -> String;
}

fn colorize_status(label: &str) -> String {
    match label.parse::<AttendanceStatus>() {
        Ok(AttendanceStatus::Attended) => label.green().to_string(),
        Ok(AttendanceStatus::Late) => label.yellow().to_string(),
        Ok(AttendanceStatus::ApprovedAbsence | AttendanceStatus::ExcusedAbsence) => {
            label.cyan().to_string()
        }
        Ok(AttendanceStatus::UnexcusedAbsence) => label.red().to_string(),
        Err(_) => label.to_string(),
    }
}

impl Render for User {
    fn render(&self) -> String {
        format!("{} {}", self.display_name(), self.id.dimmed())
    }
}

impl Render for Event {
    fn render(&self) -> String {
        format!("{}  {} {}", self.date.bold(), self.title, self.id.dimmed())
    }
}

impl Render for AttendanceRow {
    fn render(&self) -> String {
        let mut line = format!(
            "{}  {}  {}",
            self.date,
            self.event_name,
            colorize_status(&self.status)
        );
        if !self.comments.is_empty() {
            line.push_str(&format!(" {}", format!("({})", self.comments).dimmed()));
        }
        line
    }
}

impl Render for Counters {
    fn render(&self) -> String {
        AttendanceStatus::ALL
            .iter()
            .filter(|s| self.get(**s) > 0)
            .map(|s| format!("{} {}", colorize_status(s.label()), self.get(*s)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Render for ReconcileReport {
    fn render(&self) -> String {
        let mut lines = vec![format!(
            "👤 {} {}",
            self.member_name.bold(),
            self.member_id.dimmed()
        )];

        for row in &self.outcome.appended {
            lines.push(format!("   {} {}", "+".green(), row.render()));
        }

        let mut skipped = Vec::new();
        if self.outcome.already_recorded > 0 {
            skipped.push(format!("{} already recorded", self.outcome.already_recorded));
        }
        if self.outcome.kept_existing > 0 {
            skipped.push(format!("{} kept as is", self.outcome.kept_existing));
        }
        if self.outcome.superseded > 0 {
            skipped.push(format!("{} superseded in this run", self.outcome.superseded));
        }
        if !skipped.is_empty() {
            lines.push(format!("   {}", skipped.join(", ").dimmed()));
        }
        if self.outcome.replaced > 0 {
            lines.push(format!(
                "   {}",
                format!(
                    "{} conflicting {} appended; delete the old {} by hand",
                    self.outcome.replaced,
                    pluralize("row", self.outcome.replaced),
                    pluralize("row", self.outcome.replaced),
                )
                .yellow()
            ));
        }

        let counters = if self.counters.total() == 0 {
            "no outcomes".dimmed().to_string()
        } else {
            self.counters.render()
        };
        lines.push(format!("   {}", counters));

        lines.join("\n")
    }
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
