//! Domain enums for resumes and resume listing

use serde::{Deserialize, Serialize};
use std::fmt;

/// Application state of a resume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResumeStatus {
    #[default]
    Apply,
    Drop,
    Pass,
    Interview1,
    Interview2,
    FinalPass,
}

impl ResumeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResumeStatus::Apply => "APPLY",
            ResumeStatus::Drop => "DROP",
            ResumeStatus::Pass => "PASS",
            ResumeStatus::Interview1 => "INTERVIEW1",
            ResumeStatus::Interview2 => "INTERVIEW2",
            ResumeStatus::FinalPass => "FINAL_PASS",
        }
    }
}

impl fmt::Display for ResumeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResumeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "APPLY" => Ok(ResumeStatus::Apply),
            "DROP" => Ok(ResumeStatus::Drop),
            "PASS" => Ok(ResumeStatus::Pass),
            "INTERVIEW1" => Ok(ResumeStatus::Interview1),
            "INTERVIEW2" => Ok(ResumeStatus::Interview2),
            "FINAL_PASS" => Ok(ResumeStatus::FinalPass),
            _ => Err(format!("Unknown resume status: {}", s)),
        }
    }
}

/// Resume column a listing can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Title,
    Status,
    ResumeId,
}

impl SortField {
    /// Parse a `sortBy` query value. Unknown or absent values fall back to `createdAt`.
    pub fn normalize(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("updatedAt") => SortField::UpdatedAt,
            Some("title") => SortField::Title,
            Some("status") => SortField::Status,
            Some("resumeId") => SortField::ResumeId,
            _ => SortField::CreatedAt,
        }
    }

    /// `ORDER BY` key over the `resumes` table.
    ///
    /// Text columns compare under the `"C"` collation, i.e. by byte value,
    /// so every store orders mixed-case titles the same way.
    pub fn order_key(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
            SortField::Title => "title COLLATE \"C\"",
            SortField::Status => "status COLLATE \"C\"",
            SortField::ResumeId => "resume_id",
        }
    }
}

/// Listing direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Case-insensitive parse of the `sort` query value; anything but `asc` means `desc`.
    pub fn normalize(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.trim().eq_ignore_ascii_case("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Normalized ordering for a resume listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResumeSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl ResumeSort {
    pub fn from_query(sort_by: Option<&str>, sort: Option<&str>) -> Self {
        Self {
            field: SortField::normalize(sort_by),
            direction: SortDirection::normalize(sort),
        }
    }
}
