//! Inspection records and their outcome status.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Text;
use diesel::{AsExpression, FromSqlRow};
use jiff_diesel::Timestamp;
use serde::{Deserialize, Serialize};

/// Outcome of an inspection, stored as its wire value
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
    AsExpression,
    FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InspectionStatus {
    /// Under review
    #[default]
    EmAnalise,
    Regular,
    Irregular,
}

impl InspectionStatus {
    pub const ALL: [InspectionStatus; 3] = [
        InspectionStatus::EmAnalise,
        InspectionStatus::Regular,
        InspectionStatus::Irregular,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InspectionStatus::EmAnalise => "EM_ANALISE",
            InspectionStatus::Regular => "REGULAR",
            InspectionStatus::Irregular => "IRREGULAR",
        }
    }
}

impl fmt::Display for InspectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InspectionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("\"{}\" is not a valid choice.", s))
    }
}

impl diesel::query_builder::QueryId for InspectionStatus {
    type QueryId = InspectionStatus;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<Text, Pg> for InspectionStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for InspectionStatus {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        s.parse()
            .map_err(|_| format!("Unrecognized inspection status: {}", s).into())
    }
}

#[derive(Debug, Queryable, Selectable, Identifiable, Clone)]
#[diesel(table_name = crate::schema::inspections)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Inspection {
    pub id: i32,
    pub inspector_id: i32,
    pub agency_id: i32,
    /// Set by the database on insert and never rewritten
    pub inspected_at: Timestamp,
    pub title: String,
    pub description: String,
    pub status: InspectionStatus,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::inspections)]
pub struct NewInspection {
    pub inspector_id: i32,
    pub agency_id: i32,
    pub title: String,
    pub description: String,
    pub status: InspectionStatus,
}

/// Changeset for PUT and PATCH. `inspected_at` is not updatable.
#[derive(Debug, AsChangeset, Clone, Default, PartialEq, Eq)]
#[diesel(table_name = crate::schema::inspections)]
pub struct UpdateInspection {
    pub inspector_id: Option<i32>,
    pub agency_id: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<InspectionStatus>,
}

impl UpdateInspection {
    pub fn is_empty(&self) -> bool {
        self.inspector_id.is_none()
            && self.agency_id.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
    }
}

/// An inspection joined with the names shown next to its references.
#[derive(Debug, Clone)]
pub struct InspectionDetails {
    pub inspection: Inspection,
    pub inspector_username: String,
    pub agency_name: String,
}

impl From<(Inspection, String, String)> for InspectionDetails {
    fn from((inspection, inspector_username, agency_name): (Inspection, String, String)) -> Self {
        Self {
            inspection,
            inspector_username,
            agency_name,
        }
    }
}
