//! SQLite-backed store: group catalog reads, idempotent occurrence
//! get-or-add, attendance state, and run history.
//!
//! Catalog tables are written by the hosting system (the `insert_*` /
//! seed surface) and are read-only to the scheduler itself. Occurrence
//! identity is enforced by a UNIQUE index over the 4-tuple key, so
//! get-or-add stays correct even across concurrent scheduling runs.

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use rosterclaw_core::error::{Result, RosterError};
use rosterclaw_core::model::{
    Attendance, Group, GroupLocation, GroupType, Occurrence, OccurrenceKey, Rsvp, RunSummary,
    Schedule,
};
use rosterclaw_core::traits::{Catalog, OccurrenceStore};

const DATE_FMT: &str = "%Y-%m-%d";
const TIME_FMT: &str = "%H:%M:%S";

/// SQLite store for all scheduler data.
pub struct SchedulerDb {
    conn: Connection,
    in_tx: bool,
}

fn store_err(e: rusqlite::Error) -> RosterError {
    RosterError::Store(e.to_string())
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FMT)
        .map_err(|e| RosterError::Store(format!("Bad date '{s}': {e}")))
}

fn parse_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, TIME_FMT)
        .map_err(|e| RosterError::Store(format!("Bad time '{s}': {e}")))
}

/// Weekday column encoding: 0 = Monday … 6 = Sunday.
fn weekday_from_index(i: i64) -> Weekday {
    match i {
        0 => Weekday::Mon,
        1 => Weekday::Tue,
        2 => Weekday::Wed,
        3 => Weekday::Thu,
        4 => Weekday::Fri,
        5 => Weekday::Sat,
        _ => Weekday::Sun,
    }
}

impl SchedulerDb {
    /// Open or create the scheduler database.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path).map_err(store_err)?;
        Self::from_conn(conn)
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(store_err)?;
        Self::from_conn(conn)
    }

    fn from_conn(conn: Connection) -> Result<Self> {
        let db = Self { conn, in_tx: false };
        db.migrate()?;
        Ok(db)
    }

    /// Run migrations to create tables.
    fn migrate(&self) -> Result<()> {
        self.conn
            .execute_batch(
                "
            -- Group catalog (written by the host, read-only to the scheduler)
            CREATE TABLE IF NOT EXISTS group_types (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                is_scheduling_enabled INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS groups (
                id INTEGER PRIMARY KEY,
                group_type_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                is_active INTEGER NOT NULL DEFAULT 1,
                is_archived INTEGER NOT NULL DEFAULT 0,
                parent_group_id INTEGER,             -- NULL = root group
                disable_scheduling INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS group_attributes (
                group_id INTEGER NOT NULL,
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                PRIMARY KEY (group_id, key)
            );

            CREATE TABLE IF NOT EXISTS schedules (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                weekday INTEGER NOT NULL,            -- 0 = Monday … 6 = Sunday
                start_time TEXT NOT NULL,            -- HH:MM:SS
                interval_weeks INTEGER NOT NULL DEFAULT 1,
                anchor TEXT NOT NULL,                -- first effective date
                is_active INTEGER NOT NULL DEFAULT 1
            );

            CREATE TABLE IF NOT EXISTS group_locations (
                id INTEGER PRIMARY KEY,
                group_id INTEGER NOT NULL,
                location_id INTEGER NOT NULL,
                location_name TEXT NOT NULL,
                display_order INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS group_location_schedules (
                group_location_id INTEGER NOT NULL,
                schedule_id INTEGER NOT NULL,
                PRIMARY KEY (group_location_id, schedule_id)
            );

            -- Scheduler-owned state
            CREATE TABLE IF NOT EXISTS occurrences (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                group_id INTEGER NOT NULL,
                location_id INTEGER NOT NULL,
                schedule_id INTEGER NOT NULL,
                created_at TEXT NOT NULL,
                UNIQUE (date, group_id, location_id, schedule_id)
            );

            CREATE TABLE IF NOT EXISTS attendances (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                occurrence_id INTEGER NOT NULL,
                person_id INTEGER NOT NULL,
                rsvp TEXT NOT NULL DEFAULT 'unknown',  -- yes, no, maybe, unknown
                requested_to_attend INTEGER NOT NULL DEFAULT 0,
                did_attend INTEGER,                    -- NULL until the occurrence happens
                FOREIGN KEY (occurrence_id) REFERENCES occurrences(id)
            );

            -- Run history
            CREATE TABLE IF NOT EXISTS scheduler_runs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                started_at TEXT NOT NULL,
                group_type_id INTEGER NOT NULL,
                occurrences_touched INTEGER NOT NULL,
                occurrences_assigned INTEGER NOT NULL,
                chunks_processed INTEGER NOT NULL,
                attendances_confirmed INTEGER NOT NULL,
                errors TEXT NOT NULL DEFAULT '[]'      -- JSON array of messages
            );
         ",
            )
            .map_err(store_err)
    }

    /// Open the run's unit of work if one is not already open. Mutating
    /// methods call this lazily; `commit`/`rollback` close it.
    fn begin(&mut self) -> Result<()> {
        if !self.in_tx {
            self.conn.execute_batch("BEGIN").map_err(store_err)?;
            self.in_tx = true;
        }
        Ok(())
    }

    // ─── Host-side catalog writes ─────────────────────────────

    pub fn insert_group_type(&mut self, group_type: &GroupType) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO group_types (id, name, is_scheduling_enabled)
                 VALUES (?1, ?2, ?3)",
                rusqlite::params![
                    group_type.id,
                    group_type.name,
                    group_type.is_scheduling_enabled
                ],
            )
            .map_err(store_err)?;
        Ok(())
    }

    pub fn insert_group(&mut self, group: &Group) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO groups
                 (id, group_type_id, name, is_active, is_archived, parent_group_id, disable_scheduling)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                rusqlite::params![
                    group.id,
                    group.group_type_id,
                    group.name,
                    group.is_active,
                    group.is_archived,
                    group.parent_group_id,
                    group.disable_scheduling
                ],
            )
            .map_err(store_err)?;
        Ok(())
    }

    pub fn set_group_attribute(&mut self, group_id: i64, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO group_attributes (group_id, key, value)
                 VALUES (?1, ?2, ?3)",
                rusqlite::params![group_id, key, value],
            )
            .map_err(store_err)?;
        Ok(())
    }

    pub fn insert_schedule(&mut self, schedule: &Schedule) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO schedules
                 (id, name, weekday, start_time, interval_weeks, anchor, is_active)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                rusqlite::params![
                    schedule.id,
                    schedule.name,
                    schedule.weekday.num_days_from_monday() as i64,
                    schedule.start_time.format(TIME_FMT).to_string(),
                    schedule.interval_weeks,
                    schedule.anchor.format(DATE_FMT).to_string(),
                    schedule.is_active
                ],
            )
            .map_err(store_err)?;
        Ok(())
    }

    pub fn insert_group_location(&mut self, gl: &GroupLocation) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO group_locations
                 (id, group_id, location_id, location_name, display_order)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![
                    gl.id,
                    gl.group_id,
                    gl.location_id,
                    gl.location_name,
                    gl.display_order
                ],
            )
            .map_err(store_err)?;
        for schedule_id in &gl.schedule_ids {
            self.conn
                .execute(
                    "INSERT OR IGNORE INTO group_location_schedules (group_location_id, schedule_id)
                     VALUES (?1, ?2)",
                    rusqlite::params![gl.id, schedule_id],
                )
                .map_err(store_err)?;
        }
        Ok(())
    }

    /// Load a whole catalog seed in one go.
    pub fn apply_seed(&mut self, seed: &CatalogSeed) -> Result<()> {
        for group_type in &seed.group_types {
            self.insert_group_type(group_type)?;
        }
        for group in &seed.groups {
            self.insert_group(group)?;
        }
        for schedule in &seed.schedules {
            self.insert_schedule(schedule)?;
        }
        for gl in &seed.group_locations {
            self.insert_group_location(gl)?;
        }
        for attr in &seed.attributes {
            self.set_group_attribute(attr.group_id, &attr.key, &attr.value)?;
        }
        tracing::info!(
            "💾 Seeded {} group type(s), {} group(s), {} schedule(s), {} location(s)",
            seed.group_types.len(),
            seed.groups.len(),
            seed.schedules.len(),
            seed.group_locations.len()
        );
        Ok(())
    }

    // ─── Queries used outside the run path ────────────────────

    pub fn occurrence_count(&self) -> Result<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM occurrences", [], |r| r.get(0))
            .map_err(store_err)
    }

    /// Flip an attendance entry's did-attend flag (host side, after the
    /// occurrence happened).
    pub fn set_did_attend(&mut self, attendance_id: i64, did_attend: bool) -> Result<()> {
        self.begin()?;
        self.conn
            .execute(
                "UPDATE attendances SET did_attend = ?2 WHERE id = ?1",
                rusqlite::params![attendance_id, did_attend],
            )
            .map_err(store_err)?;
        Ok(())
    }

    /// Most recent run summaries, newest first.
    pub fn recent_runs(&self, limit: usize) -> Result<Vec<RunSummary>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT started_at, group_type_id, occurrences_touched, occurrences_assigned,
                        chunks_processed, attendances_confirmed, errors
                 FROM scheduler_runs ORDER BY id DESC LIMIT ?1",
            )
            .map_err(store_err)?;
        let rows = stmt
            .query_map([limit as i64], |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    r.get::<_, i64>(1)?,
                    r.get::<_, i64>(2)?,
                    r.get::<_, i64>(3)?,
                    r.get::<_, i64>(4)?,
                    r.get::<_, i64>(5)?,
                    r.get::<_, String>(6)?,
                ))
            })
            .map_err(store_err)?;

        let mut runs = Vec::new();
        for row in rows {
            let (started, group_type_id, touched, assigned, chunks, confirmed, errors) =
                row.map_err(store_err)?;
            let started_at = DateTime::parse_from_rfc3339(&started)
                .map_err(|e| RosterError::Store(format!("Bad timestamp '{started}': {e}")))?
                .with_timezone(&Utc);
            runs.push(RunSummary {
                started_at,
                group_type_id,
                occurrences_touched: touched as usize,
                occurrences_assigned: assigned as u64,
                chunks_processed: chunks as usize,
                attendances_confirmed: confirmed as usize,
                errors: serde_json::from_str(&errors).unwrap_or_default(),
            });
        }
        Ok(runs)
    }
}

impl Catalog for SchedulerDb {
    fn group_type(&self, id: i64) -> Result<Option<GroupType>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, is_scheduling_enabled FROM group_types WHERE id = ?1")
            .map_err(store_err)?;
        let mut rows = stmt
            .query_map([id], |r| {
                Ok(GroupType {
                    id: r.get(0)?,
                    name: r.get(1)?,
                    is_scheduling_enabled: r.get(2)?,
                })
            })
            .map_err(store_err)?;
        rows.next().transpose().map_err(store_err)
    }

    fn groups_of_type(&self, group_type_id: i64) -> Result<Vec<Group>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, group_type_id, name, is_active, is_archived, parent_group_id, disable_scheduling
                 FROM groups WHERE group_type_id = ?1 ORDER BY id",
            )
            .map_err(store_err)?;
        let rows = stmt
            .query_map([group_type_id], |r| {
                Ok(Group {
                    id: r.get(0)?,
                    group_type_id: r.get(1)?,
                    name: r.get(2)?,
                    is_active: r.get(3)?,
                    is_archived: r.get(4)?,
                    parent_group_id: r.get(5)?,
                    disable_scheduling: r.get(6)?,
                })
            })
            .map_err(store_err)?;
        rows.collect::<std::result::Result<Vec<_>, _>>().map_err(store_err)
    }

    fn locations_for_groups(&self, group_ids: &[i64]) -> Result<Vec<GroupLocation>> {
        if group_ids.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; group_ids.len()].join(",");
        let sql = format!(
            "SELECT id, group_id, location_id, location_name, display_order
             FROM group_locations WHERE group_id IN ({placeholders}) ORDER BY id"
        );
        let mut stmt = self.conn.prepare(&sql).map_err(store_err)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(group_ids.iter()), |r| {
                Ok(GroupLocation {
                    id: r.get(0)?,
                    group_id: r.get(1)?,
                    location_id: r.get(2)?,
                    location_name: r.get(3)?,
                    display_order: r.get(4)?,
                    schedule_ids: Vec::new(),
                })
            })
            .map_err(store_err)?;
        let mut locations = rows
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(store_err)?;

        let mut stmt = self
            .conn
            .prepare(
                "SELECT schedule_id FROM group_location_schedules
                 WHERE group_location_id = ?1 ORDER BY schedule_id",
            )
            .map_err(store_err)?;
        for gl in &mut locations {
            let ids = stmt
                .query_map([gl.id], |r| r.get::<_, i64>(0))
                .map_err(store_err)?;
            gl.schedule_ids = ids
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(store_err)?;
        }
        Ok(locations)
    }

    fn schedule(&self, id: i64) -> Result<Option<Schedule>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, name, weekday, start_time, interval_weeks, anchor, is_active
                 FROM schedules WHERE id = ?1",
                [id],
                |r| {
                    Ok((
                        r.get::<_, i64>(0)?,
                        r.get::<_, String>(1)?,
                        r.get::<_, i64>(2)?,
                        r.get::<_, String>(3)?,
                        r.get::<_, i64>(4)?,
                        r.get::<_, String>(5)?,
                        r.get::<_, bool>(6)?,
                    ))
                },
            );
        let (id, name, weekday, start_time, interval_weeks, anchor, is_active) = match row {
            Ok(row) => row,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(store_err(e)),
        };
        Ok(Some(Schedule {
            id,
            name,
            weekday: weekday_from_index(weekday),
            start_time: parse_time(&start_time)?,
            interval_weeks: interval_weeks.max(0) as u32,
            anchor: parse_date(&anchor)?,
            is_active,
        }))
    }

    fn group_bool_attribute(&self, group_id: i64, key: &str) -> Result<Option<bool>> {
        let value: Option<String> = match self.conn.query_row(
            "SELECT value FROM group_attributes WHERE group_id = ?1 AND key = ?2",
            rusqlite::params![group_id, key],
            |r| r.get(0),
        ) {
            Ok(v) => Some(v),
            Err(rusqlite::Error::QueryReturnedNoRows) => None,
            Err(e) => return Err(store_err(e)),
        };
        Ok(value.and_then(|v| match v.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }))
    }
}

impl OccurrenceStore for SchedulerDb {
    fn get_or_add_occurrence(&mut self, key: &OccurrenceKey) -> Result<Occurrence> {
        // INSERT OR IGNORE under the UNIQUE index makes the create-or-fetch
        // race-free across concurrent runs; each call is durable on its own.
        let date = key.date.format(DATE_FMT).to_string();
        let inserted = self
            .conn
            .execute(
                "INSERT OR IGNORE INTO occurrences (date, group_id, location_id, schedule_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![
                    date,
                    key.group_id,
                    key.location_id,
                    key.schedule_id,
                    Utc::now().to_rfc3339()
                ],
            )
            .map_err(store_err)?;
        let id: i64 = self
            .conn
            .query_row(
                "SELECT id FROM occurrences
                 WHERE date = ?1 AND group_id = ?2 AND location_id = ?3 AND schedule_id = ?4",
                rusqlite::params![date, key.group_id, key.location_id, key.schedule_id],
                |r| r.get(0),
            )
            .map_err(store_err)?;
        if inserted > 0 {
            tracing::debug!(
                "🔔 New occurrence {id}: {date} group {} location {} schedule {}",
                key.group_id,
                key.location_id,
                key.schedule_id
            );
        }
        Ok(Occurrence {
            id,
            date: key.date,
            group_id: key.group_id,
            location_id: key.location_id,
            schedule_id: key.schedule_id,
        })
    }

    fn attendances_for(&self, occurrence_id: i64) -> Result<Vec<Attendance>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, occurrence_id, person_id, rsvp, requested_to_attend, did_attend
                 FROM attendances WHERE occurrence_id = ?1 ORDER BY id",
            )
            .map_err(store_err)?;
        let rows = stmt
            .query_map([occurrence_id], |r| {
                Ok(Attendance {
                    id: r.get(0)?,
                    occurrence_id: r.get(1)?,
                    person_id: r.get(2)?,
                    rsvp: Rsvp::parse(&r.get::<_, String>(3)?),
                    requested_to_attend: r.get(4)?,
                    did_attend: r.get(5)?,
                })
            })
            .map_err(store_err)?;
        rows.collect::<std::result::Result<Vec<_>, _>>().map_err(store_err)
    }

    fn add_attendance(
        &mut self,
        occurrence_id: i64,
        person_id: i64,
        rsvp: Rsvp,
        requested_to_attend: bool,
    ) -> Result<i64> {
        self.begin()?;
        self.conn
            .execute(
                "INSERT INTO attendances (occurrence_id, person_id, rsvp, requested_to_attend)
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![occurrence_id, person_id, rsvp.as_str(), requested_to_attend],
            )
            .map_err(store_err)?;
        Ok(self.conn.last_insert_rowid())
    }

    fn confirm_attendance(&mut self, attendance_id: i64) -> Result<()> {
        self.begin()?;
        self.conn
            .execute(
                "UPDATE attendances SET rsvp = 'yes' WHERE id = ?1",
                [attendance_id],
            )
            .map_err(store_err)?;
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        if self.in_tx {
            self.conn.execute_batch("COMMIT").map_err(store_err)?;
            self.in_tx = false;
        }
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        if self.in_tx {
            self.conn.execute_batch("ROLLBACK").map_err(store_err)?;
            self.in_tx = false;
        }
        Ok(())
    }

    fn record_run(&mut self, run: &RunSummary) -> Result<()> {
        let errors = serde_json::to_string(&run.errors)
            .map_err(|e| RosterError::Store(format!("Serialize run errors: {e}")))?;
        self.conn
            .execute(
                "INSERT INTO scheduler_runs
                 (started_at, group_type_id, occurrences_touched, occurrences_assigned,
                  chunks_processed, attendances_confirmed, errors)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                rusqlite::params![
                    run.started_at.to_rfc3339(),
                    run.group_type_id,
                    run.occurrences_touched as i64,
                    run.occurrences_assigned as i64,
                    run.chunks_processed as i64,
                    run.attendances_confirmed as i64,
                    errors
                ],
            )
            .map_err(store_err)?;
        Ok(())
    }
}

/// A complete catalog seed, loadable from TOML by the `seed` command.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub group_types: Vec<GroupType>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub schedules: Vec<Schedule>,
    #[serde(default)]
    pub group_locations: Vec<GroupLocation>,
    #[serde(default)]
    pub attributes: Vec<GroupAttribute>,
}

/// One group attribute row in a seed file.
#[derive(Debug, Serialize, Deserialize)]
pub struct GroupAttribute {
    pub group_id: i64,
    pub key: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(date: (i32, u32, u32)) -> OccurrenceKey {
        OccurrenceKey {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            group_id: 5,
            location_id: 1,
            schedule_id: 1,
        }
    }

    #[test]
    fn test_get_or_add_is_idempotent() {
        let mut db = SchedulerDb::open_in_memory().unwrap();
        let first = db.get_or_add_occurrence(&key((2026, 3, 1))).unwrap();
        let second = db.get_or_add_occurrence(&key((2026, 3, 1))).unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.key(), key((2026, 3, 1)));
        assert_eq!(db.occurrence_count().unwrap(), 1);
    }

    #[test]
    fn test_distinct_keys_get_distinct_rows() {
        let mut db = SchedulerDb::open_in_memory().unwrap();
        let a = db.get_or_add_occurrence(&key((2026, 3, 1))).unwrap();
        let b = db.get_or_add_occurrence(&key((2026, 3, 8))).unwrap();
        let mut other_location = key((2026, 3, 1));
        other_location.location_id = 2;
        let c = db.get_or_add_occurrence(&other_location).unwrap();
        assert_ne!(a.id, b.id);
        assert_ne!(a.id, c.id);
        assert_eq!(db.occurrence_count().unwrap(), 3);
    }

    #[test]
    fn test_rollback_discards_uncommitted_attendance() {
        let mut db = SchedulerDb::open_in_memory().unwrap();
        let occ = db.get_or_add_occurrence(&key((2026, 3, 1))).unwrap().id;
        db.add_attendance(occ, 1, Rsvp::Maybe, true).unwrap();
        db.rollback().unwrap();
        assert!(db.attendances_for(occ).unwrap().is_empty());

        db.add_attendance(occ, 1, Rsvp::Maybe, true).unwrap();
        db.commit().unwrap();
        assert_eq!(db.attendances_for(occ).unwrap().len(), 1);
    }

    #[test]
    fn test_schedule_roundtrip() {
        let mut db = SchedulerDb::open_in_memory().unwrap();
        let schedule = Schedule {
            id: 3,
            name: "Saturday 17:30".into(),
            weekday: Weekday::Sat,
            start_time: NaiveTime::from_hms_opt(17, 30, 0).unwrap(),
            interval_weeks: 2,
            anchor: NaiveDate::from_ymd_opt(2026, 1, 3).unwrap(),
            is_active: true,
        };
        db.insert_schedule(&schedule).unwrap();
        let loaded = db.schedule(3).unwrap().unwrap();
        assert_eq!(loaded.weekday, Weekday::Sat);
        assert_eq!(loaded.start_time, schedule.start_time);
        assert_eq!(loaded.interval_weeks, 2);
        assert_eq!(loaded.anchor, schedule.anchor);
        assert!(db.schedule(99).unwrap().is_none());
    }

    #[test]
    fn test_bool_attribute_parsing() {
        let mut db = SchedulerDb::open_in_memory().unwrap();
        db.set_group_attribute(5, "AutoSchedule", "True").unwrap();
        db.set_group_attribute(5, "Flag", "1").unwrap();
        db.set_group_attribute(5, "Other", "banana").unwrap();
        assert_eq!(db.group_bool_attribute(5, "AutoSchedule").unwrap(), Some(true));
        assert_eq!(db.group_bool_attribute(5, "Flag").unwrap(), Some(true));
        assert_eq!(db.group_bool_attribute(5, "Other").unwrap(), None);
        assert_eq!(db.group_bool_attribute(5, "Missing").unwrap(), None);
    }

    #[test]
    fn test_run_history_roundtrip() {
        let mut db = SchedulerDb::open_in_memory().unwrap();
        let mut run = RunSummary::new(10, Utc::now());
        run.occurrences_touched = 12;
        run.errors.push("Assignment error: engine unavailable".into());
        db.record_run(&run).unwrap();

        let runs = db.recent_runs(5).unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].occurrences_touched, 12);
        assert_eq!(runs[0].errors.len(), 1);
    }

    #[test]
    fn test_apply_seed() {
        let mut db = SchedulerDb::open_in_memory().unwrap();
        let seed = CatalogSeed {
            group_types: vec![GroupType {
                id: 10,
                name: "Serving Team".into(),
                is_scheduling_enabled: true,
            }],
            groups: vec![Group {
                id: 5,
                group_type_id: 10,
                name: "Ushers".into(),
                is_active: true,
                is_archived: false,
                parent_group_id: Some(1),
                disable_scheduling: false,
            }],
            schedules: Vec::new(),
            group_locations: Vec::new(),
            attributes: vec![GroupAttribute {
                group_id: 5,
                key: "AutoSchedule".into(),
                value: "true".into(),
            }],
        };
        db.apply_seed(&seed).unwrap();
        assert!(db.group_type(10).unwrap().unwrap().is_scheduling_enabled);
        assert_eq!(db.groups_of_type(10).unwrap().len(), 1);
        assert_eq!(db.group_bool_attribute(5, "AutoSchedule").unwrap(), Some(true));
    }
}
