//! Storage of meeting records
use anyhow::Result;
use async_trait::async_trait;
use rusqlite::{OptionalExtension, Row, params};
use tokio_rusqlite::Connection;

use super::models::{MeetingRecord, NewMeeting};

#[async_trait]
pub trait MeetingStore: Send + Sync {
    async fn insert(&self, meeting: NewMeeting) -> Result<MeetingRecord>;
    async fn find_by_id(&self, id: i64) -> Result<Option<MeetingRecord>>;
    async fn update(&self, meeting: &MeetingRecord) -> Result<()>;
    /// Returns false if no meeting had that id
    async fn delete(&self, id: i64) -> Result<bool>;
    async fn find_by_owner(&self, owner_id: i64) -> Result<Vec<MeetingRecord>>;
}

fn meeting_from_row(row: &Row) -> rusqlite::Result<MeetingRecord> {
    Ok(MeetingRecord {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        time: row.get(2)?,
        location: row.get(3)?,
        participants: row.get(4)?,
    })
}

#[async_trait]
impl MeetingStore for Connection {
    async fn insert(&self, meeting: NewMeeting) -> Result<MeetingRecord> {
        let record = self
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO meetings (user_id, time, location, participants) VALUES (?1, ?2, ?3, ?4)",
                    params![
                        meeting.owner_id,
                        meeting.time,
                        meeting.location,
                        meeting.participants
                    ],
                )?;
                Ok(MeetingRecord {
                    id: conn.last_insert_rowid(),
                    owner_id: meeting.owner_id,
                    time: meeting.time,
                    location: meeting.location,
                    participants: meeting.participants,
                })
            })
            .await?;
        Ok(record)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<MeetingRecord>> {
        let record = self
            .call(move |conn| {
                let result = conn
                    .query_row(
                        "SELECT meeting_id, user_id, time, location, participants FROM meetings WHERE meeting_id = ?1",
                        [id],
                        meeting_from_row,
                    )
                    .optional()?;
                Ok(result)
            })
            .await?;
        Ok(record)
    }

    async fn update(&self, meeting: &MeetingRecord) -> Result<()> {
        let meeting = meeting.clone();
        self.call(move |conn| {
            conn.execute(
                "UPDATE meetings SET user_id = ?1, time = ?2, location = ?3, participants = ?4 WHERE meeting_id = ?5",
                params![
                    meeting.owner_id,
                    meeting.time,
                    meeting.location,
                    meeting.participants,
                    meeting.id
                ],
            )?;
            Ok(())
        })
        .await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let deleted = self
            .call(move |conn| {
                let count = conn.execute("DELETE FROM meetings WHERE meeting_id = ?1", [id])?;
                Ok(count > 0)
            })
            .await?;
        Ok(deleted)
    }

    async fn find_by_owner(&self, owner_id: i64) -> Result<Vec<MeetingRecord>> {
        let meetings = self
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT meeting_id, user_id, time, location, participants FROM meetings WHERE user_id = ?1 ORDER BY time, meeting_id",
                )?;
                let rows = stmt
                    .query_map([owner_id], meeting_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(rows)
            })
            .await?;
        Ok(meetings)
    }
}
