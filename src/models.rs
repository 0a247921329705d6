// opti-week/client/src/models.rs
use chrono::{DateTime, Duration, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Format des heures échangées avec le frontend (ex: "07:30")
const TIME_FORMAT: &str = "%H:%M";

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_FORMAT).ok()
}

// --- Task Model ---
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub role_id: String,
    pub is_permanent: bool,
}

impl Task {
    pub fn new(title: impl Into<String>, role_id: impl Into<String>, is_permanent: bool) -> Self {
        Task {
            id: new_id(),
            title: title.into(),
            role_id: role_id.into(),
            is_permanent,
        }
    }
}

// --- Role Model ---
// Un rôle possède ses tâches par copie, pas par référence.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: String,
    pub name: String,
    pub tasks: Vec<Task>,
    pub is_expanded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_add_task: Option<bool>,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Role {
            id: new_id(),
            name: name.into(),
            tasks: Vec::new(),
            is_expanded: false,
            show_add_task: None,
        }
    }
}

// --- ScheduledTask Model ---
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTask {
    pub id: String,
    pub task_id: String,
    /// 0 = Monday ... 6 = Sunday. Not checked on decode.
    pub day: u8,
    /// "HH:MM", kept as received.
    pub start_time: String,
    /// Minutes.
    pub duration: u32,
    pub title: String,
    pub role_id: String,
}

impl ScheduledTask {
    /// Places `task` on the week grid under a fresh id.
    pub fn from_task(
        task: &Task,
        day: u8,
        start_time: impl Into<String>,
        duration: u32,
    ) -> Self {
        ScheduledTask {
            id: new_id(),
            task_id: task.id.clone(),
            day,
            start_time: start_time.into(),
            duration,
            title: task.title.clone(),
            role_id: task.role_id.clone(),
        }
    }

    pub fn weekday(&self) -> Option<Weekday> {
        day_to_weekday(self.day)
    }

    pub fn start(&self) -> Option<NaiveTime> {
        parse_hhmm(&self.start_time)
    }

    /// End of the occurrence. Wraps past midnight.
    pub fn end(&self) -> Option<NaiveTime> {
        let start = self.start()?;
        let (end, _) = start.overflowing_add_signed(Duration::minutes(i64::from(self.duration)));
        Some(end)
    }
}

pub fn day_to_weekday(day: u8) -> Option<Weekday> {
    match day {
        0 => Some(Weekday::Mon),
        1 => Some(Weekday::Tue),
        2 => Some(Weekday::Wed),
        3 => Some(Weekday::Thu),
        4 => Some(Weekday::Fri),
        5 => Some(Weekday::Sat),
        6 => Some(Weekday::Sun),
        _ => None,
    }
}

// --- SharpenTheSawArea Model ---
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SharpenTheSawArea {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub tasks: Vec<Task>,
}

// --- DayNotes Model ---
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DayNotes {
    pub day: u8,
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_end: Option<String>,
}

impl DayNotes {
    /// Both sleep bounds, or `None` if one is missing or not "HH:MM".
    pub fn sleep_window(&self) -> Option<(NaiveTime, NaiveTime)> {
        let start = parse_hhmm(self.sleep_start.as_deref()?)?;
        let end = parse_hhmm(self.sleep_end.as_deref()?)?;
        Some((start, end))
    }
}

// --- WeekData (agrégat) ---
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeekData {
    pub week_start: DateTime<Utc>,
    pub scheduled_tasks: Vec<ScheduledTask>,
    pub day_notes: Vec<DayNotes>,
    pub weekly_notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporary_tasks: Option<Vec<Task>>,
}

impl WeekData {
    pub fn new(week_start: DateTime<Utc>) -> Self {
        WeekData {
            week_start,
            scheduled_tasks: Vec::new(),
            day_notes: Vec::new(),
            weekly_notes: String::new(),
            temporary_tasks: None,
        }
    }

    /// Occurrences on `day`, earliest first. Unparseable start times go last.
    pub fn tasks_on(&self, day: u8) -> Vec<&ScheduledTask> {
        let mut day_tasks: Vec<&ScheduledTask> = self
            .scheduled_tasks
            .iter()
            .filter(|scheduled| scheduled.day == day)
            .collect();
        // sort_by_key est stable: l'ordre d'origine est conservé à égalité
        day_tasks.sort_by_key(|scheduled| match scheduled.start() {
            Some(start) => (0, Some(start)),
            None => (1, None),
        });
        day_tasks
    }

    pub fn notes_for(&self, day: u8) -> Option<&DayNotes> {
        self.day_notes.iter().find(|notes| notes.day == day)
    }

    /// Total minutes scheduled on `day`. Summed as u64: decoded durations are unchecked.
    pub fn scheduled_minutes(&self, day: u8) -> u64 {
        self.scheduled_tasks
            .iter()
            .filter(|scheduled| scheduled.day == day)
            .map(|scheduled| u64::from(scheduled.duration))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn scheduled(day: u8, start_time: &str, duration: u32) -> ScheduledTask {
        ScheduledTask {
            id: format!("s-{}-{}", day, start_time),
            task_id: "t-1".to_string(),
            day,
            start_time: start_time.to_string(),
            duration,
            title: "Deep work".to_string(),
            role_id: "r-1".to_string(),
        }
    }

    #[test]
    fn task_uses_camel_case_on_the_wire() {
        let task = Task {
            id: "t-1".to_string(),
            title: "Write report".to_string(),
            role_id: "r-1".to_string(),
            is_permanent: true,
        };
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(
            value,
            json!({"id": "t-1", "title": "Write report", "roleId": "r-1", "isPermanent": true})
        );
    }

    #[test]
    fn task_rejects_stringly_typed_flag() {
        let result = serde_json::from_value::<Task>(json!({
            "id": "t-1", "title": "x", "roleId": "r-1", "isPermanent": "true"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn role_optional_flag_is_omitted_and_accepts_null() {
        let role = Role::new("Parent");
        let value = serde_json::to_value(&role).unwrap();
        assert!(value.get("showAddTask").is_none());
        assert_eq!(value["isExpanded"], json!(false));

        let decoded: Role = serde_json::from_value(json!({
            "id": "r-1", "name": "Parent", "tasks": [], "isExpanded": true, "showAddTask": null
        }))
        .unwrap();
        assert_eq!(decoded.show_add_task, None);
        assert!(decoded.is_expanded);
    }

    #[test]
    fn new_entities_get_distinct_ids() {
        let a = Task::new("A", "r-1", false);
        let b = Task::new("A", "r-1", false);
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn scheduled_task_copies_task_fields() {
        let task = Task::new("Gym", "r-health", true);
        let occurrence = ScheduledTask::from_task(&task, 2, "18:00", 90);
        assert_eq!(occurrence.task_id, task.id);
        assert_eq!(occurrence.title, "Gym");
        assert_eq!(occurrence.role_id, "r-health");
        assert_ne!(occurrence.id, task.id);
        assert_eq!(occurrence.weekday(), Some(Weekday::Wed));
    }

    #[test]
    fn out_of_range_day_decodes_but_has_no_weekday() {
        let decoded: ScheduledTask = serde_json::from_value(json!({
            "id": "s-1", "taskId": "t-1", "day": 9, "startTime": "25:99",
            "duration": 30, "title": "x", "roleId": "r-1"
        }))
        .unwrap();
        assert_eq!(decoded.weekday(), None);
        assert_eq!(decoded.start(), None);
        assert_eq!(decoded.end(), None);
    }

    #[test]
    fn end_time_wraps_past_midnight() {
        let late = scheduled(4, "23:30", 45);
        assert_eq!(late.end(), NaiveTime::from_hms_opt(0, 15, 0));
        let morning = scheduled(0, "09:15", 60);
        assert_eq!(morning.end(), NaiveTime::from_hms_opt(10, 15, 0));
    }

    #[test]
    fn sleep_window_needs_both_bounds() {
        let mut notes = DayNotes {
            day: 0,
            notes: String::new(),
            sleep_start: Some("23:00".to_string()),
            sleep_end: None,
        };
        assert_eq!(notes.sleep_window(), None);
        notes.sleep_end = Some("07:00".to_string());
        assert_eq!(
            notes.sleep_window(),
            Some((
                NaiveTime::from_hms_opt(23, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(7, 0, 0).unwrap()
            ))
        );
    }

    #[test]
    fn week_data_round_trips_iso_week_start() {
        let decoded: WeekData = serde_json::from_value(json!({
            "weekStart": "2024-03-04T00:00:00.000Z",
            "scheduledTasks": [],
            "dayNotes": [{"day": 1, "notes": "dentist"}],
            "weeklyNotes": "focus"
        }))
        .unwrap();
        assert_eq!(
            decoded.week_start,
            Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap()
        );
        assert_eq!(decoded.temporary_tasks, None);
        assert_eq!(decoded.notes_for(1).map(|n| n.notes.as_str()), Some("dentist"));
        assert!(decoded.notes_for(2).is_none());
    }

    #[test]
    fn tasks_on_sorts_by_start_and_sums_minutes() {
        let mut week = WeekData::new(Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap());
        week.scheduled_tasks = vec![
            scheduled(1, "14:00", 30),
            scheduled(1, "later", 15),
            scheduled(1, "08:30", 60),
            scheduled(3, "07:00", 120),
        ];

        let tuesday: Vec<&str> = week
            .tasks_on(1)
            .iter()
            .map(|s| s.start_time.as_str())
            .collect();
        assert_eq!(tuesday, vec!["08:30", "14:00", "later"]);
        assert_eq!(week.scheduled_minutes(1), 105);
        assert_eq!(week.scheduled_minutes(5), 0);
    }

    #[test]
    fn scheduled_minutes_does_not_overflow_on_huge_durations() {
        let decoded: Vec<ScheduledTask> = serde_json::from_value(json!([
            {"id": "s-1", "taskId": "t-1", "day": 0, "startTime": "08:00",
             "duration": 3_000_000_000u32, "title": "x", "roleId": "r-1"},
            {"id": "s-2", "taskId": "t-1", "day": 0, "startTime": "09:00",
             "duration": 3_000_000_000u32, "title": "x", "roleId": "r-1"}
        ]))
        .unwrap();
        let mut week = WeekData::new(Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap());
        week.scheduled_tasks = decoded;
        assert_eq!(week.scheduled_minutes(0), 6_000_000_000);
    }
}
