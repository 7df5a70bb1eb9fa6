//! Store methods for user records.

use crate::{error::TrackerResult, types::RecordId};
use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::ReportStore;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Staff,
    Director,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Staff    => "staff",
            Self::Director => "director",
            Self::Admin    => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "staff"    => Ok(Self::Staff),
            "director" => Ok(Self::Director),
            "admin"    => Ok(Self::Admin),
            other      => Err(anyhow::anyhow!("unknown user role '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: RecordId,
    pub name: String,
    pub role: UserRole,
    pub email: String,
    #[serde(default)]
    pub daily_available_hours: Option<f64>,
}

type UserRow = (String, String, String, String, Option<f64>);

fn from_row((id, name, role, email, daily_available_hours): UserRow) -> TrackerResult<User> {
    Ok(User {
        id,
        name,
        role: role.parse()?,
        email,
        daily_available_hours,
    })
}

impl ReportStore {
    /// Insert or replace a user record.
    pub fn insert_user(&self, user: &User) -> TrackerResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO app_user (user_id, name, role, email, daily_available_hours)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user.id,
                user.name,
                user.role.as_str(),
                user.email,
                user.daily_available_hours
            ],
        )?;
        Ok(())
    }

    pub fn user(&self, user_id: &str) -> TrackerResult<Option<User>> {
        let row: Option<UserRow> = self
            .conn
            .query_row(
                "SELECT user_id, name, role, email, daily_available_hours
                 FROM app_user WHERE user_id = ?1",
                params![user_id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?)),
            )
            .optional()?;
        row.map(from_row).transpose()
    }

    /// All users ordered by id.
    pub fn users(&self) -> TrackerResult<Vec<User>> {
        let mut stmt = self.conn.prepare(
            "SELECT user_id, name, role, email, daily_available_hours
             FROM app_user ORDER BY user_id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
            })?
            .collect::<Result<Vec<UserRow>, _>>()?;
        rows.into_iter().map(from_row).collect()
    }
}
