//! Shared fixtures for task unit tests.

use crate::task::domain::{
    PersistedTaskData, Task, TaskId, TaskOrigin, TaskPriority, TaskStatus, Timestamp,
};
use chrono::{DateTime, Local, NaiveDateTime, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use std::sync::Mutex;

/// Clock that only moves when a test moves it.
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn at(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock().expect("clock lock");
        *now += delta;
    }

    pub fn naive(&self) -> NaiveDateTime {
        *self.now.lock().expect("clock lock")
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        Local
            .from_local_datetime(&self.naive())
            .earliest()
            .expect("fixed time exists in the local zone")
    }

    fn utc(&self) -> DateTime<Utc> {
        self.local().with_timezone(&Utc)
    }
}

pub fn datetime(text: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S").expect("valid test date-time")
}

pub fn task_id(value: u64) -> TaskId {
    TaskId::new(value).expect("valid task id")
}

pub fn stored_task(
    id: u64,
    priority: TaskPriority,
    status: TaskStatus,
    completed_at: Option<&str>,
) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: task_id(id),
        title: format!("Stored task {id}"),
        description: String::new(),
        priority,
        status,
        origin: TaskOrigin::Email,
        created_at: Timestamp::from_raw("2024-01-01T08:00:00.000000"),
        completed_at: completed_at.map(Timestamp::from_raw),
    })
}
