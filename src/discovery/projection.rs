// ABOUTME: Outward-facing candidate shape returned by discovery
// ABOUTME: Drops private athlete fields such as email, quota, interactions and coordinates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Athlete, AthleteId, Sex};

/// A discovered athlete as other athletes see it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProjection {
    /// Athlete id
    pub id: AthleteId,
    /// Display name
    pub display_name: String,
    /// Profile photo
    pub image_url: Option<String>,
    /// Date of birth
    pub birth_date: Option<NaiveDate>,
    /// Sex
    pub sex: Option<Sex>,
    /// Spoken languages
    pub languages: Vec<String>,
    /// Training days
    pub training_days: Vec<String>,
    /// Gym the athlete goes to
    pub gym: Option<String>,
    /// Training experience level
    pub training_experience: Option<String>,
    /// Premium badge
    pub is_premium: bool,
    /// Works with personal trainers
    pub can_see_personal_trainers: bool,
}

impl From<Athlete> for CandidateProjection {
    fn from(athlete: Athlete) -> Self {
        Self {
            id: athlete.id,
            display_name: athlete.full_name,
            image_url: athlete.image_url,
            birth_date: athlete.birth_date,
            sex: athlete.sex,
            languages: athlete.languages,
            training_days: athlete.training_days,
            gym: athlete.gym_id,
            training_experience: athlete.training_experience,
            is_premium: athlete.is_premium,
            can_see_personal_trainers: athlete.can_see_personal_trainers,
        }
    }
}
