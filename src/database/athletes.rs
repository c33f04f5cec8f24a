// ABOUTME: Database operations for athletes: registration, profile, location and interactions
// ABOUTME: Also implements the filtered, radius-bounded candidate search used by discovery
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use tracing::{debug, info, instrument, warn};

use super::errors::{DatabaseError, DatabaseResult};
use crate::discovery::{CandidateQuery, FilterValue, SpatialPredicate};
use crate::models::{Athlete, AthleteId, GeoPoint, Sex};

/// Longest accepted display name
const MAX_NAME_LEN: usize = 100;

/// Columns selected for every athlete read, including the interaction set
const ATHLETE_COLUMNS: &str = r"
    a.id, a.full_name, a.email, a.image_url, a.birth_date, a.sex, a.languages,
    a.training_days, a.training_experience, a.gym_id, a.latitude, a.longitude,
    a.remaining_likes, a.can_see_personal_trainers, a.is_premium, a.created_at, a.updated_at,
    (SELECT json_group_array(i.target_id) FROM athlete_interactions i WHERE i.athlete_id = a.id)
        AS interacted_with
";

/// How an athlete evaluated another athlete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    /// Interested in training together
    Like,
    /// Not interested
    Pass,
}

impl InteractionKind {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Pass => "pass",
        }
    }
}

/// Data required to register an athlete
#[derive(Debug, Clone, Default)]
pub struct NewAthlete {
    /// Display name
    pub full_name: String,
    /// Login email, unique across athletes
    pub email: String,
    /// Profile photo URL
    pub image_url: Option<String>,
    /// Date of birth
    pub birth_date: Option<NaiveDate>,
    /// Sex
    pub sex: Option<Sex>,
    /// Spoken languages
    pub languages: Vec<String>,
    /// Training days
    pub training_days: Vec<String>,
    /// Training experience level
    pub training_experience: Option<String>,
    /// Gym the athlete goes to
    pub gym_id: Option<String>,
    /// Initial position, if shared at sign-up
    pub location: Option<GeoPoint>,
    /// Initial like quota
    pub remaining_likes: Option<u32>,
    /// Subscription grants access to personal trainers
    pub can_see_personal_trainers: bool,
    /// Premium subscription active
    pub is_premium: bool,
}

/// Editable profile fields
#[derive(Debug, Clone, Default)]
pub struct AthleteProfileUpdate {
    /// Display name
    pub full_name: String,
    /// Login email
    pub email: String,
    /// Date of birth
    pub birth_date: Option<NaiveDate>,
    /// Sex
    pub sex: Option<Sex>,
    /// Spoken languages
    pub languages: Vec<String>,
    /// Training days
    pub training_days: Vec<String>,
    /// Training experience level
    pub training_experience: Option<String>,
    /// Gym the athlete goes to
    pub gym_id: Option<String>,
}

/// How a filter key maps onto the athletes table
#[derive(Debug, Clone, Copy)]
enum FilterColumn {
    /// Case-insensitive text equality
    Text(&'static str),
    /// Boolean flag
    Flag(&'static str),
    /// Membership in a JSON array column
    ListMember(&'static str),
}

fn filter_column(key: &str) -> Option<FilterColumn> {
    match key {
        "gym" | "gymId" | "gym_id" => Some(FilterColumn::Text("a.gym_id")),
        "sex" | "gender" => Some(FilterColumn::Text("a.sex")),
        "trainingExperience" | "training_experience" => {
            Some(FilterColumn::Text("a.training_experience"))
        }
        "isPremium" | "is_premium" => Some(FilterColumn::Flag("a.is_premium")),
        "language" | "languages" => Some(FilterColumn::ListMember("a.languages")),
        "trainingDays" | "training_days" | "workoutDays" => {
            Some(FilterColumn::ListMember("a.training_days"))
        }
        _ => None,
    }
}

/// Athlete database operations manager
#[derive(Clone)]
pub struct AthletesManager {
    pool: SqlitePool,
}

impl AthletesManager {
    /// Create a new athletes manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Underlying connection pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Register a new athlete
    ///
    /// # Errors
    ///
    /// Returns an error if the profile is invalid, the email is taken, or the
    /// database operation fails
    #[instrument(skip(self, athlete))]
    pub async fn create(&self, athlete: &NewAthlete) -> DatabaseResult<Athlete> {
        let email = normalize_email(&athlete.email);
        validate_profile(&athlete.full_name, &email)?;

        if self.email_taken(&email, None).await? {
            warn!("Registration with an email that is already in use");
            return Err(DatabaseError::AlreadyExists {
                entity_type: "athlete",
                context: "email".to_owned(),
            });
        }

        let id = AthleteId::new();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r"
            INSERT INTO athletes (
                id, full_name, email, image_url, birth_date, sex, languages, training_days,
                training_experience, gym_id, latitude, longitude, remaining_likes,
                can_see_personal_trainers, is_premium, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?16)
            ",
        )
        .bind(id.to_string())
        .bind(athlete.full_name.trim())
        .bind(&email)
        .bind(&athlete.image_url)
        .bind(athlete.birth_date.map(|date| date.to_string()))
        .bind(athlete.sex.map(|sex| sex.as_str()))
        .bind(serde_json::to_string(&athlete.languages)?)
        .bind(serde_json::to_string(&athlete.training_days)?)
        .bind(&athlete.training_experience)
        .bind(&athlete.gym_id)
        .bind(athlete.location.map(|point| point.latitude))
        .bind(athlete.location.map(|point| point.longitude))
        .bind(athlete.remaining_likes.map(i64::from))
        .bind(athlete.can_see_personal_trainers)
        .bind(athlete.is_premium)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| unique_violation(e, "athlete", "email"))?;

        info!(athlete_id = %id, "Athlete successfully created");
        self.get_required(id).await
    }

    /// Get an athlete by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded
    pub async fn get(&self, id: AthleteId) -> DatabaseResult<Option<Athlete>> {
        let sql = format!("SELECT {ATHLETE_COLUMNS} FROM athletes a WHERE a.id = ?1");
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_athlete).transpose()
    }

    /// Get an athlete by id, failing if it does not exist
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if there is no such athlete
    pub async fn get_required(&self, id: AthleteId) -> DatabaseResult<Athlete> {
        self.get(id).await?.ok_or_else(|| DatabaseError::NotFound {
            entity_type: "athlete",
            entity_id: id.to_string(),
        })
    }

    /// Whether `email` belongs to an athlete other than `except`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn email_taken(&self, email: &str, except: Option<AthleteId>) -> DatabaseResult<bool> {
        let owner: Option<String> = sqlx::query_scalar("SELECT id FROM athletes WHERE email = ?1")
            .bind(normalize_email(email))
            .fetch_optional(&self.pool)
            .await?;

        Ok(owner.is_some_and(|owner| except.map_or(true, |id| owner != id.to_string())))
    }

    /// Replace the editable profile fields
    ///
    /// # Errors
    ///
    /// Returns an error if the athlete does not exist, the profile is invalid,
    /// the new email is taken, or the database operation fails
    #[instrument(skip(self, update), fields(athlete_id = %id))]
    pub async fn update_profile(
        &self,
        id: AthleteId,
        update: &AthleteProfileUpdate,
    ) -> DatabaseResult<Athlete> {
        let email = normalize_email(&update.email);
        validate_profile(&update.full_name, &email)?;

        if self.email_taken(&email, Some(id)).await? {
            warn!("Profile update with an email owned by another athlete");
            return Err(DatabaseError::AlreadyExists {
                entity_type: "athlete",
                context: "email".to_owned(),
            });
        }

        let result = sqlx::query(
            r"
            UPDATE athletes SET
                full_name = ?2,
                email = ?3,
                birth_date = ?4,
                sex = ?5,
                languages = ?6,
                training_days = ?7,
                training_experience = ?8,
                gym_id = ?9,
                updated_at = ?10
            WHERE id = ?1
            ",
        )
        .bind(id.to_string())
        .bind(update.full_name.trim())
        .bind(&email)
        .bind(update.birth_date.map(|date| date.to_string()))
        .bind(update.sex.map(|sex| sex.as_str()))
        .bind(serde_json::to_string(&update.languages)?)
        .bind(serde_json::to_string(&update.training_days)?)
        .bind(&update.training_experience)
        .bind(&update.gym_id)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| unique_violation(e, "athlete", "email"))?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound {
                entity_type: "athlete",
                entity_id: id.to_string(),
            });
        }

        info!("Athlete profile updated");
        self.get_required(id).await
    }

    /// Set the athlete's current position
    ///
    /// # Errors
    ///
    /// Returns an error if the athlete does not exist or the update fails
    #[instrument(skip(self, location), fields(athlete_id = %id))]
    pub async fn update_location(
        &self,
        id: AthleteId,
        location: GeoPoint,
    ) -> DatabaseResult<Athlete> {
        let result = sqlx::query(
            "UPDATE athletes SET latitude = ?2, longitude = ?3, updated_at = ?4 WHERE id = ?1",
        )
        .bind(id.to_string())
        .bind(location.latitude)
        .bind(location.longitude)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound {
                entity_type: "athlete",
                entity_id: id.to_string(),
            });
        }

        info!("Athlete location updated");
        self.get_required(id).await
    }

    /// Record that `athlete_id` liked or passed on `target_id`.
    ///
    /// Spends one like and appends the target to the interaction set in a
    /// single transaction. Returns the likes left afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if either athlete is missing, the athlete has no likes
    /// left, the target was already evaluated, or the database operation fails
    #[instrument(skip(self), fields(athlete_id = %athlete_id, target_id = %target_id))]
    pub async fn record_interaction(
        &self,
        athlete_id: AthleteId,
        target_id: AthleteId,
        kind: InteractionKind,
    ) -> DatabaseResult<u32> {
        if athlete_id == target_id {
            return Err(DatabaseError::InvalidData {
                context: "an athlete cannot interact with itself".to_owned(),
            });
        }

        let mut tx = self.pool.begin().await?;

        let target: Option<String> = sqlx::query_scalar("SELECT id FROM athletes WHERE id = ?1")
            .bind(target_id.to_string())
            .fetch_optional(&mut *tx)
            .await?;
        if target.is_none() {
            return Err(DatabaseError::NotFound {
                entity_type: "athlete",
                entity_id: target_id.to_string(),
            });
        }

        let now = Utc::now().to_rfc3339();
        let remaining: Option<i64> = sqlx::query_scalar(
            r"
            UPDATE athletes SET remaining_likes = remaining_likes - 1, updated_at = ?2
            WHERE id = ?1 AND remaining_likes > 0
            RETURNING remaining_likes
            ",
        )
        .bind(athlete_id.to_string())
        .bind(&now)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(remaining) = remaining else {
            let exists: Option<String> = sqlx::query_scalar("SELECT id FROM athletes WHERE id = ?1")
                .bind(athlete_id.to_string())
                .fetch_optional(&mut *tx)
                .await?;
            return Err(if exists.is_some() {
                warn!("Athlete has reached the like limit");
                DatabaseError::QuotaExhausted {
                    athlete_id: athlete_id.to_string(),
                }
            } else {
                DatabaseError::NotFound {
                    entity_type: "athlete",
                    entity_id: athlete_id.to_string(),
                }
            });
        };

        sqlx::query(
            "INSERT INTO athlete_interactions (athlete_id, target_id, kind, created_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(athlete_id.to_string())
        .bind(target_id.to_string())
        .bind(kind.as_str())
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(|e| unique_violation(e, "interaction", &target_id.to_string()))?;

        tx.commit().await?;

        info!(kind = kind.as_str(), remaining, "Interaction recorded");
        u32::try_from(remaining).map_err(|_| DatabaseError::InvalidData {
            context: format!("negative like counter for athlete {athlete_id}"),
        })
    }

    /// Search discovery candidates.
    ///
    /// Exclusions and equality constraints are applied in SQL. A radius is
    /// prefiltered with a bounding box, then checked exactly with haversine
    /// distances and ordered nearest first; ties and non-spatial searches are
    /// ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::UnsupportedFilter`] for keys or values that do
    /// not map onto an athlete attribute, or an error if the query fails
    #[instrument(skip(self, query), fields(excluded = query.excluded.len(), spatial = query.spatial.is_some()))]
    pub async fn search_candidates(
        &self,
        query: &CandidateQuery,
        limit: usize,
    ) -> DatabaseResult<Vec<Athlete>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let excluded: Vec<String> = query.excluded.iter().map(ToString::to_string).collect();

        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {ATHLETE_COLUMNS} FROM athletes a WHERE a.id NOT IN (SELECT value FROM json_each("
        ));
        builder.push_bind(serde_json::to_string(&excluded)?).push("))");

        for (key, value) in &query.equality {
            push_equality(&mut builder, key, value)?;
        }

        if let Some(spatial) = &query.spatial {
            push_bounding_box(&mut builder, spatial);
            builder.push(" ORDER BY a.id");
        } else {
            builder
                .push(" ORDER BY a.id LIMIT ")
                .push_bind(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let rows = builder.build().fetch_all(&self.pool).await?;
        let athletes = rows
            .iter()
            .map(row_to_athlete)
            .collect::<DatabaseResult<Vec<_>>>()?;

        let Some(spatial) = query.spatial else {
            debug!(candidates = athletes.len(), "Candidate search completed");
            return Ok(athletes);
        };

        let scanned = athletes.len();
        let mut nearby: Vec<(f64, Athlete)> = athletes
            .into_iter()
            .filter_map(|athlete| {
                let distance = athlete
                    .location
                    .as_ref()
                    .and_then(|location| spatial.distance_to(location))?;
                Some((distance, athlete))
            })
            .collect();

        nearby.sort_by(|(left_distance, left), (right_distance, right)| {
            left_distance
                .total_cmp(right_distance)
                .then_with(|| left.id.cmp(&right.id))
        });
        nearby.truncate(limit);

        debug!(scanned, candidates = nearby.len(), "Radius search completed");
        Ok(nearby.into_iter().map(|(_, athlete)| athlete).collect())
    }
}

fn push_equality(
    builder: &mut QueryBuilder<'_, Sqlite>,
    key: &str,
    value: &FilterValue,
) -> DatabaseResult<()> {
    let column = filter_column(key).ok_or_else(|| DatabaseError::UnsupportedFilter {
        key: key.to_owned(),
        reason: "not a filterable athlete attribute".to_owned(),
    })?;

    match column {
        FilterColumn::Text(column) => {
            builder
                .push(format!(" AND {column} = "))
                .push_bind(value.as_text())
                .push(" COLLATE NOCASE");
        }
        FilterColumn::Flag(column) => {
            let flag = value
                .as_bool()
                .ok_or_else(|| DatabaseError::UnsupportedFilter {
                    key: key.to_owned(),
                    reason: format!("expected true or false, got '{value}'"),
                })?;
            builder.push(format!(" AND {column} = ")).push_bind(flag);
        }
        FilterColumn::ListMember(column) => {
            builder
                .push(format!(
                    " AND EXISTS (SELECT 1 FROM json_each({column}) WHERE json_each.value = "
                ))
                .push_bind(value.as_text())
                .push(" COLLATE NOCASE)");
        }
    }
    Ok(())
}

fn push_bounding_box(builder: &mut QueryBuilder<'_, Sqlite>, spatial: &SpatialPredicate) {
    let bbox = spatial.origin.bounding_box(spatial.max_distance_meters);

    builder
        .push(" AND a.latitude IS NOT NULL AND a.longitude IS NOT NULL")
        .push(" AND a.latitude BETWEEN ")
        .push_bind(bbox.min_latitude)
        .push(" AND ")
        .push_bind(bbox.max_latitude);

    if let Some((min_longitude, max_longitude)) = bbox.longitude_range {
        builder
            .push(" AND a.longitude BETWEEN ")
            .push_bind(min_longitude)
            .push(" AND ")
            .push_bind(max_longitude);
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_profile(full_name: &str, email: &str) -> DatabaseResult<()> {
    let name = full_name.trim();
    if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
        return Err(DatabaseError::InvalidData {
            context: format!("full name must be 1 to {MAX_NAME_LEN} characters"),
        });
    }

    let well_formed = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'))
        && !email.chars().any(char::is_whitespace);
    if !well_formed {
        return Err(DatabaseError::InvalidData {
            context: "email address is malformed".to_owned(),
        });
    }
    Ok(())
}

fn unique_violation(error: sqlx::Error, entity_type: &'static str, context: &str) -> DatabaseError {
    if let sqlx::Error::Database(db_error) = &error {
        if db_error.is_unique_violation() {
            return DatabaseError::AlreadyExists {
                entity_type,
                context: context.to_owned(),
            };
        }
    }
    error.into()
}

fn parse_athlete_id(value: &str) -> DatabaseResult<AthleteId> {
    value.parse().map_err(|e| DatabaseError::InvalidData {
        context: format!("invalid athlete id '{value}': {e}"),
    })
}

fn parse_timestamp(value: &str) -> DatabaseResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|e| DatabaseError::InvalidData {
            context: format!("invalid timestamp '{value}': {e}"),
        })
}

fn parse_date(value: &str) -> DatabaseResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| DatabaseError::InvalidData {
        context: format!("invalid date '{value}': {e}"),
    })
}

fn row_to_athlete(row: &SqliteRow) -> DatabaseResult<Athlete> {
    let id: String = row.try_get("id")?;
    let birth_date: Option<String> = row.try_get("birth_date")?;
    let sex: Option<String> = row.try_get("sex")?;
    let languages: String = row.try_get("languages")?;
    let training_days: String = row.try_get("training_days")?;
    let latitude: Option<f64> = row.try_get("latitude")?;
    let longitude: Option<f64> = row.try_get("longitude")?;
    let remaining_likes: Option<i64> = row.try_get("remaining_likes")?;
    let interacted_with: String = row.try_get("interacted_with")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    let interacted_with: Vec<String> = serde_json::from_str(&interacted_with)?;
    let remaining_likes = remaining_likes
        .map(u32::try_from)
        .transpose()
        .map_err(|_| DatabaseError::InvalidData {
            context: format!("negative like counter for athlete {id}"),
        })?;

    Ok(Athlete {
        id: parse_athlete_id(&id)?,
        full_name: row.try_get("full_name")?,
        email: row.try_get("email")?,
        image_url: row.try_get("image_url")?,
        birth_date: birth_date.as_deref().map(parse_date).transpose()?,
        sex: sex.as_deref().and_then(Sex::parse),
        languages: serde_json::from_str(&languages)?,
        training_days: serde_json::from_str(&training_days)?,
        training_experience: row.try_get("training_experience")?,
        gym_id: row.try_get("gym_id")?,
        location: latitude
            .zip(longitude)
            .map(|(latitude, longitude)| GeoPoint {
                latitude,
                longitude,
            }),
        remaining_likes,
        interacted_with: interacted_with
            .iter()
            .map(|target| parse_athlete_id(target))
            .collect::<DatabaseResult<BTreeSet<_>>>()?,
        can_see_personal_trainers: row.try_get("can_see_personal_trainers")?,
        is_premium: row.try_get("is_premium")?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}
