// ABOUTME: Athlete entity with its like quota and interaction history
// ABOUTME: Defines AthleteId and the Sex enum with their storage representations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::geo::GeoPoint;

/// Unique, immutable athlete identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AthleteId(Uuid);

impl AthleteId {
    /// Generate a fresh random identifier
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Underlying UUID
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for AthleteId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for AthleteId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for AthleteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for AthleteId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Sex as shown on the athlete profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    /// Male
    Male,
    /// Female
    Female,
    /// Other or undisclosed
    Other,
}

impl Sex {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }

    /// Parse from database string representation (case-insensitive)
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// An athlete eligible to discover and be discovered by other athletes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Athlete {
    /// Unique identifier
    pub id: AthleteId,
    /// Display name
    pub full_name: String,
    /// Login email (private)
    pub email: String,
    /// Profile photo URL
    pub image_url: Option<String>,
    /// Date of birth
    pub birth_date: Option<NaiveDate>,
    /// Sex
    pub sex: Option<Sex>,
    /// Spoken languages
    pub languages: Vec<String>,
    /// Days of the week the athlete trains
    pub training_days: Vec<String>,
    /// Self-declared training experience level
    pub training_experience: Option<String>,
    /// Gym the athlete goes to
    pub gym_id: Option<String>,
    /// Last known position; absent until first set
    pub location: Option<GeoPoint>,
    /// Remaining likes; `None` means the counter was never initialised
    pub remaining_likes: Option<u32>,
    /// Athletes already liked or passed
    pub interacted_with: BTreeSet<AthleteId>,
    /// Subscription grants access to personal trainers
    pub can_see_personal_trainers: bool,
    /// Premium subscription active
    pub is_premium: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Athlete {
    /// Whether the athlete may still like or pass on candidates.
    ///
    /// An unset counter counts as zero.
    #[must_use]
    pub fn has_remaining_likes(&self) -> bool {
        self.remaining_likes.is_some_and(|likes| likes > 0)
    }

    /// Whether `other` was already liked or passed
    #[must_use]
    pub fn has_interacted_with(&self, other: AthleteId) -> bool {
        self.interacted_with.contains(&other)
    }

    /// Ids that must never be offered to this athlete: itself and everyone
    /// it already evaluated
    #[must_use]
    pub fn discovery_exclusions(&self) -> BTreeSet<AthleteId> {
        let mut excluded = self.interacted_with.clone();
        excluded.insert(self.id);
        excluded
    }
}
