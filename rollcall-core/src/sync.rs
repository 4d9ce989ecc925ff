//! Whole-roster sync: turn event pages into per-member logs and reconcile
//! each member.

use std::collections::{BTreeMap, HashSet};

use crate::error::RollcallResult;
use crate::event::Event;
use crate::notion::User;
use crate::reconcile::{ConflictResolver, EventLog, ReconcileReport};
use crate::session::Session;
use crate::status::AttendanceStatus;
use crate::unexcused::EventAttendance;

/// Build each member's event logs from per-event attendance.
///
/// Logs follow the order of `attendance`. A member marked under several
/// outcomes of one event keeps only the first, in `TRACKED` order. With
/// `mark_unexcused`, roster members who are not bots, not ignored and not
/// marked on an event get an unexcused absence for it.
pub fn derive_event_logs(
    attendance: &[EventAttendance],
    roster: &[User],
    is_ignored: impl Fn(&str) -> bool,
    mark_unexcused: bool,
) -> BTreeMap<String, Vec<EventLog>> {
    let mut logs: BTreeMap<String, Vec<EventLog>> = BTreeMap::new();

    for event in attendance {
        let mut logged: HashSet<&str> = HashSet::new();
        for status in AttendanceStatus::TRACKED {
            for member_id in event.marked.get(&status).into_iter().flatten() {
                if !logged.insert(member_id.as_str()) {
                    tracing::warn!(
                        event_id = %event.event_id,
                        member_id = %member_id,
                        status = status.label(),
                        "member marked under more than one outcome; keeping the first"
                    );
                    continue;
                }
                logs.entry(member_id.clone())
                    .or_default()
                    .push(EventLog::new(&event.event_id, status));
            }
        }

        if mark_unexcused {
            let tracked = event.tracked();
            for member in roster {
                if member.is_bot()
                    || is_ignored(member.display_name())
                    || tracked.contains(member.id.as_str())
                {
                    continue;
                }
                logs.entry(member.id.clone())
                    .or_default()
                    .push(EventLog::new(&event.event_id, AttendanceStatus::UnexcusedAbsence));
            }
        }
    }

    logs
}

impl Session {
    /// Reconcile every member (or only `only_member`) against all loaded
    /// events. Events, members and sheets must be loaded first.
    pub async fn sync_members(
        &mut self,
        only_member: Option<&str>,
        mark_unexcused: bool,
        resolver: &mut dyn ConflictResolver,
    ) -> RollcallResult<Vec<ReconcileReport>> {
        let mut events: Vec<Event> = self
            .events()
            .filter_map(|page| match Event::from_page(page) {
                Ok(event) => Some(event),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping event");
                    None
                }
            })
            .collect();
        events.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));

        let mut attendance = Vec::with_capacity(events.len());
        for event in &events {
            attendance.push(self.event_attendance(&event.id).await?);
        }

        let mut roster: Vec<User> = self.members().cloned().collect();
        roster.sort_by(|a, b| a.id.cmp(&b.id));

        let config = self.config.clone();
        let logs = derive_event_logs(
            &attendance,
            &roster,
            |name| config.is_ignored(name),
            mark_unexcused,
        );

        let mut reports = Vec::new();
        for (member_id, member_logs) in logs {
            if only_member.is_some_and(|only| only != member_id) {
                continue;
            }
            reports.push(
                self.update_attendance(&member_id, &member_logs, resolver)
                    .await?,
            );
        }

        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn user(id: &str, name: &str, kind: &str) -> User {
        User {
            id: id.to_string(),
            name: Some(name.to_string()),
            kind: Some(kind.to_string()),
        }
    }

    fn event(id: &str, marked: Vec<(AttendanceStatus, Vec<&str>)>) -> EventAttendance {
        EventAttendance {
            event_id: id.to_string(),
            marked: marked
                .into_iter()
                .map(|(s, ids)| (s, ids.into_iter().map(String::from).collect()))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn test_logs_follow_event_order() {
        let attendance = vec![
            event("e1", vec![(AttendanceStatus::Attended, vec!["u1", "u2"])]),
            event("e2", vec![(AttendanceStatus::Late, vec!["u1"])]),
        ];

        let logs = derive_event_logs(&attendance, &[], |_| false, false);
        assert_eq!(
            logs["u1"],
            vec![
                EventLog::new("e1", AttendanceStatus::Attended),
                EventLog::new("e2", AttendanceStatus::Late),
            ]
        );
        assert_eq!(logs["u2"].len(), 1);
    }

    #[test]
    fn test_member_marked_twice_keeps_first_outcome() {
        let attendance = vec![event(
            "e1",
            vec![
                (AttendanceStatus::Late, vec!["u1"]),
                (AttendanceStatus::Attended, vec!["u1", "u2"]),
            ],
        )];

        let logs = derive_event_logs(&attendance, &[], |_| false, false);
        assert_eq!(logs["u1"], vec![EventLog::new("e1", AttendanceStatus::Attended)]);
        assert_eq!(logs["u2"], vec![EventLog::new("e1", AttendanceStatus::Attended)]);
    }

    #[test]
    fn test_mark_unexcused_skips_tracked_ignored_and_bots() {
        let attendance = vec![event("e1", vec![(AttendanceStatus::ExcusedAbsence, vec!["u1"])])];
        let roster = vec![
            user("u1", "Ada", "person"),
            user("u2", "Grace", "person"),
            user("u3", "Officer", "person"),
            user("b1", "Attendance Tracker", "bot"),
        ];

        let logs = derive_event_logs(&attendance, &roster, |name| name == "Officer", true);

        assert_eq!(
            logs["u2"],
            vec![EventLog::new("e1", AttendanceStatus::UnexcusedAbsence)]
        );
        assert_eq!(
            logs["u1"],
            vec![EventLog::new("e1", AttendanceStatus::ExcusedAbsence)]
        );
        assert!(!logs.contains_key("u3"));
        assert!(!logs.contains_key("b1"));
    }

    #[test]
    fn test_without_marking_untracked_members_get_no_logs() {
        let attendance = vec![event("e1", vec![])];
        let roster = vec![user("u1", "Ada", "person")];

        let logs = derive_event_logs(&attendance, &roster, |_| false, false);
        assert!(logs.is_empty());
    }
}
