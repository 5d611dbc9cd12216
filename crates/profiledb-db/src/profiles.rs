//! Database operations for the `profiles` table.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use profiledb_core::NewProfile;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `profiles` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRow {
    pub id: i64,
    pub public_id: Uuid,
    pub external_id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub profile_url: Option<String>,
    pub avatar_url: Option<String>,
    pub followed_by_viewer: Option<bool>,
    pub is_verified: Option<bool>,
    pub followers_count: Option<i64>,
    pub following_count: Option<i64>,
    pub biography: Option<String>,
    pub public_email: Option<String>,
    pub posts_count: Option<i64>,
    pub phone_country_code: Option<String>,
    pub phone_number: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub is_private: Option<bool>,
    pub is_business: Option<bool>,
    pub external_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const PROFILE_COLUMNS: &str = "id, public_id, external_id, username, full_name, profile_url, \
     avatar_url, followed_by_viewer, is_verified, followers_count, following_count, biography, \
     public_email, posts_count, phone_country_code, phone_number, city, address, is_private, \
     is_business, external_url, created_at, updated_at";

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Return which of `usernames` already exist. Only the `username` column is read.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_existing_usernames(
    pool: &PgPool,
    usernames: &[String],
) -> Result<HashSet<String>, DbError> {
    if usernames.is_empty() {
        return Ok(HashSet::new());
    }

    let rows: Vec<String> = sqlx::query_scalar::<_, String>(
        "SELECT username FROM profiles WHERE username = ANY($1::text[])",
    )
    .bind(usernames)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().collect())
}

/// Insert `profiles` in a single statement, leaving existing usernames untouched.
///
/// Uses `INSERT … SELECT * FROM UNNEST(…) ON CONFLICT (username) DO NOTHING`
/// so the whole batch is one round-trip and the unique constraint, not the
/// caller's earlier lookup, decides what is new. Returns the usernames that
/// were inserted; any candidate missing from the result collided with a row
/// that already existed or with an earlier row of the same batch.
///
/// Boolean columns store only real booleans (see [`profiledb_core::Flag::as_bool`]).
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the statement fails; in that case nothing
/// from this batch was written.
pub async fn insert_profiles_skip_existing(
    pool: &PgPool,
    profiles: &[NewProfile],
) -> Result<Vec<String>, DbError> {
    if profiles.is_empty() {
        return Ok(Vec::new());
    }

    // Collect each column into a parallel Vec for UNNEST binding.
    let n = profiles.len();
    let mut external_ids: Vec<String> = Vec::with_capacity(n);
    let mut usernames: Vec<String> = Vec::with_capacity(n);
    let mut full_names: Vec<Option<String>> = Vec::with_capacity(n);
    let mut profile_urls: Vec<Option<String>> = Vec::with_capacity(n);
    let mut avatar_urls: Vec<Option<String>> = Vec::with_capacity(n);
    let mut followed_by_viewer: Vec<Option<bool>> = Vec::with_capacity(n);
    let mut is_verified: Vec<Option<bool>> = Vec::with_capacity(n);
    let mut followers_counts: Vec<Option<i64>> = Vec::with_capacity(n);
    let mut following_counts: Vec<Option<i64>> = Vec::with_capacity(n);
    let mut biographies: Vec<Option<String>> = Vec::with_capacity(n);
    let mut public_emails: Vec<Option<String>> = Vec::with_capacity(n);
    let mut posts_counts: Vec<Option<i64>> = Vec::with_capacity(n);
    let mut phone_country_codes: Vec<Option<String>> = Vec::with_capacity(n);
    let mut phone_numbers: Vec<Option<String>> = Vec::with_capacity(n);
    let mut cities: Vec<Option<String>> = Vec::with_capacity(n);
    let mut addresses: Vec<Option<String>> = Vec::with_capacity(n);
    let mut is_private: Vec<Option<bool>> = Vec::with_capacity(n);
    let mut is_business: Vec<Option<bool>> = Vec::with_capacity(n);
    let mut external_urls: Vec<Option<String>> = Vec::with_capacity(n);

    for p in profiles {
        external_ids.push(p.external_id.clone());
        usernames.push(p.username.clone());
        full_names.push(p.full_name.clone());
        profile_urls.push(p.profile_url.clone());
        avatar_urls.push(p.avatar_url.clone());
        followed_by_viewer.push(p.followed_by_viewer.as_bool());
        is_verified.push(p.is_verified.as_bool());
        followers_counts.push(p.followers_count);
        following_counts.push(p.following_count);
        biographies.push(p.biography.clone());
        public_emails.push(p.public_email.clone());
        posts_counts.push(p.posts_count);
        phone_country_codes.push(p.phone_country_code.clone());
        phone_numbers.push(p.phone_number.clone());
        cities.push(p.city.clone());
        addresses.push(p.address.clone());
        is_private.push(p.is_private.as_bool());
        is_business.push(p.is_business.as_bool());
        external_urls.push(p.external_url.clone());
    }

    let inserted: Vec<String> = sqlx::query_scalar::<_, String>(
        "INSERT INTO profiles \
             (external_id, username, full_name, profile_url, avatar_url, \
              followed_by_viewer, is_verified, followers_count, following_count, \
              biography, public_email, posts_count, phone_country_code, phone_number, \
              city, address, is_private, is_business, external_url) \
         SELECT * FROM UNNEST(\
              $1::text[], $2::text[], $3::text[], $4::text[], $5::text[], \
              $6::bool[], $7::bool[], $8::int8[], $9::int8[], \
              $10::text[], $11::text[], $12::int8[], $13::text[], $14::text[], \
              $15::text[], $16::text[], $17::bool[], $18::bool[], $19::text[]) \
         ON CONFLICT (username) DO NOTHING \
         RETURNING username",
    )
    .bind(&external_ids)
    .bind(&usernames)
    .bind(&full_names)
    .bind(&profile_urls)
    .bind(&avatar_urls)
    .bind(&followed_by_viewer)
    .bind(&is_verified)
    .bind(&followers_counts)
    .bind(&following_counts)
    .bind(&biographies)
    .bind(&public_emails)
    .bind(&posts_counts)
    .bind(&phone_country_codes)
    .bind(&phone_numbers)
    .bind(&cities)
    .bind(&addresses)
    .bind(&is_private)
    .bind(&is_business)
    .bind(&external_urls)
    .fetch_all(pool)
    .await?;

    Ok(inserted)
}

/// Return every stored profile, oldest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_profiles(pool: &PgPool) -> Result<Vec<ProfileRow>, DbError> {
    let rows = sqlx::query_as::<_, ProfileRow>(&format!(
        "SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY created_at, id"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Return profiles whose username contains `fragment`, ignoring case.
///
/// `fragment` is matched literally; `%`, `_` and regex metacharacters have
/// no special meaning.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn search_profiles_by_username(
    pool: &PgPool,
    fragment: &str,
) -> Result<Vec<ProfileRow>, DbError> {
    let rows = sqlx::query_as::<_, ProfileRow>(&format!(
        "SELECT {PROFILE_COLUMNS} FROM profiles \
         WHERE strpos(lower(username), lower($1)) > 0 \
         ORDER BY username"
    ))
    .bind(fragment)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
