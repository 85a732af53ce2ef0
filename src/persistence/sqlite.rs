use super::file::{parse_date, parse_day_length};
use super::{PersistenceResult, WorkingTimeStore};
use crate::working_time::{Jurisdiction, PersonId, WeeklyWorkingTime, WorkingTimeConfiguration};
use parking_lot::Mutex;
use rusqlite::{Connection, params, params_from_iter};

type WorkingTimeRow = (i64, String, [String; 7], Option<String>);

pub struct SqliteWorkingTimeStore {
    connection: Mutex<Connection>,
}

impl SqliteWorkingTimeStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> PersistenceResult<Self> {
        let connection = Connection::open(path)?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    pub fn in_memory() -> PersistenceResult<Self> {
        let connection = Connection::open_in_memory()?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            CREATE TABLE IF NOT EXISTS working_times (
                id INTEGER PRIMARY KEY,
                person_id INTEGER NOT NULL,
                valid_from TEXT NOT NULL,
                monday TEXT NOT NULL,
                tuesday TEXT NOT NULL,
                wednesday TEXT NOT NULL,
                thursday TEXT NOT NULL,
                friday TEXT NOT NULL,
                saturday TEXT NOT NULL,
                sunday TEXT NOT NULL,
                jurisdiction_override TEXT,
                UNIQUE (person_id, valid_from)
            );
            CREATE INDEX IF NOT EXISTS working_times_person_valid_from
                ON working_times (person_id, valid_from);
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }

    /// Stores the records, replacing existing ones with the same person and start date.
    pub fn save_configurations(
        &self,
        configurations: &[WorkingTimeConfiguration],
    ) -> PersistenceResult<()> {
        super::validate_configurations(configurations)?;
        let mut conn = self.connection.lock();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO working_times (person_id, valid_from, monday, tuesday, \
                 wednesday, thursday, friday, saturday, sunday, jurisdiction_override) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            for configuration in configurations {
                let weekly = &configuration.weekly;
                stmt.execute(params![
                    configuration.person.0,
                    configuration.valid_from.format("%Y-%m-%d").to_string(),
                    weekly.monday.as_str(),
                    weekly.tuesday.as_str(),
                    weekly.wednesday.as_str(),
                    weekly.thursday.as_str(),
                    weekly.friday.as_str(),
                    weekly.saturday.as_str(),
                    weekly.sunday.as_str(),
                    configuration.jurisdiction_override.as_ref().map(|j| j.code()),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn row_to_configuration(row: WorkingTimeRow) -> PersistenceResult<WorkingTimeConfiguration> {
        let (person, valid_from, days, jurisdiction_override) = row;
        let [monday, tuesday, wednesday, thursday, friday, saturday, sunday] = days;
        Ok(WorkingTimeConfiguration {
            person: PersonId(person),
            valid_from: parse_date(&valid_from)?,
            weekly: WeeklyWorkingTime {
                monday: parse_day_length(&monday)?,
                tuesday: parse_day_length(&tuesday)?,
                wednesday: parse_day_length(&wednesday)?,
                thursday: parse_day_length(&thursday)?,
                friday: parse_day_length(&friday)?,
                saturday: parse_day_length(&saturday)?,
                sunday: parse_day_length(&sunday)?,
            },
            jurisdiction_override: jurisdiction_override.map(Jurisdiction::new),
        })
    }
}

impl WorkingTimeStore for SqliteWorkingTimeStore {
    fn find_by_persons_ordered_by_valid_from_desc(
        &self,
        persons: &[PersonId],
    ) -> PersistenceResult<Vec<WorkingTimeConfiguration>> {
        if persons.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; persons.len()].join(", ");
        let sql = format!(
            "SELECT person_id, valid_from, monday, tuesday, wednesday, thursday, friday, \
             saturday, sunday, jurisdiction_override FROM working_times \
             WHERE person_id IN ({placeholders}) ORDER BY valid_from DESC, id ASC"
        );

        let conn = self.connection.lock();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(persons.iter().map(|p| p.0)), |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                [
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, String>(6)?,
                    row.get::<_, String>(7)?,
                    row.get::<_, String>(8)?,
                ],
                row.get::<_, Option<String>>(9)?,
            ))
        })?;

        let mut configurations = Vec::new();
        for row in rows {
            configurations.push(Self::row_to_configuration(row?)?);
        }
        Ok(configurations)
    }
}
