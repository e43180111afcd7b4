use std::collections::{HashMap, HashSet};
use std::time::Instant;

use anyhow::{Context, anyhow};
use aristokrat_core::password::hash_password_with_cost;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};

use super::accounts::{ENTRANCE_RANGES, ResidentAccount, resident_accounts};

const DEFAULT_HASH_COST: u32 = 12;
/// bcrypt's minimum cost; only meant for local development data.
const FAST_HASH_COST: u32 = 4;

#[derive(Debug, Clone)]
pub struct ResidentSeedConfig {
    pub house: i32,
    /// Restore the default password of accounts that already exist.
    pub reset_passwords: bool,
    /// Overwrite address, car number and phone of existing profiles.
    pub reset_profiles: bool,
    pub fast_hash: bool,
}

impl ResidentSeedConfig {
    pub fn new(house: i32) -> Self {
        Self {
            house,
            reset_passwords: false,
            reset_profiles: false,
            fast_hash: false,
        }
    }

    fn hash_cost(&self) -> u32 {
        if self.fast_hash {
            FAST_HASH_COST
        } else {
            DEFAULT_HASH_COST
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResidentSeedReport {
    pub apartments_created: u64,
    pub users_created: u64,
    pub passwords_reset: u64,
    pub profiles_created: u64,
    pub profiles_updated: u64,
}

/// Creates house `config.house`, its eight entrances, every apartment and a
/// resident account with profile per apartment. Everything runs in one
/// transaction.
pub async fn seed_residents(
    db: &PgPool,
    config: ResidentSeedConfig,
) -> anyhow::Result<ResidentSeedReport> {
    let start_time = Instant::now();
    let accounts = resident_accounts();
    let mut report = ResidentSeedReport::default();

    let mut tx = db.begin().await?;

    let entrance_ids = ensure_house(&mut tx, config.house).await?;
    println!("🏠 House №{}: entrances 1..8 ready", config.house);

    report.apartments_created = insert_apartments(&mut tx, &accounts, &entrance_ids).await?;
    println!(
        "   ✓ Apartments: created {}, total {}",
        report.apartments_created,
        accounts.len()
    );

    let usernames: Vec<String> = accounts.iter().map(ResidentAccount::username).collect();
    let existing: HashSet<String> = sqlx::query_scalar::<_, String>(
        "SELECT username FROM users WHERE username = ANY($1)",
    )
    .bind(&usernames)
    .fetch_all(&mut *tx)
    .await?
    .into_iter()
    .collect();

    let (new_accounts, old_accounts): (Vec<ResidentAccount>, Vec<ResidentAccount>) = accounts
        .iter()
        .copied()
        .partition(|account| !existing.contains(&account.username()));

    let new_users = hash_accounts(&new_accounts, config.hash_cost())?;
    report.users_created = insert_users(&mut tx, &new_users).await?;
    println!(
        "   ✓ Users: created {}, total {}",
        report.users_created,
        usernames.len()
    );

    if config.reset_passwords {
        let reset = hash_accounts(&old_accounts, config.hash_cost())?;
        report.passwords_reset = reset_passwords(&mut tx, &reset).await?;
        println!("   ✓ Passwords reset: {}", report.passwords_reset);
    }

    if config.reset_profiles {
        report.profiles_updated = reset_profiles(&mut tx, config.house, &accounts).await?;
        println!("   ✓ Profiles updated: {}", report.profiles_updated);
    }

    report.profiles_created = insert_profiles(&mut tx, config.house, &accounts).await?;
    println!("   ✓ Profiles: created {}", report.profiles_created);

    tx.commit().await?;

    println!("✅ Seeding completed in {:?}", start_time.elapsed());
    println!("   Login: '<apartment>-<entrance>', password: '<apartment>' (e.g. 125-3 / 125)");

    Ok(report)
}

/// Returns entrance ids keyed by entrance number.
async fn ensure_house(
    tx: &mut Transaction<'_, Postgres>,
    house: i32,
) -> anyhow::Result<HashMap<i16, i64>> {
    let house_id: i64 = sqlx::query_scalar(
        "INSERT INTO houses (number) VALUES ($1)
         ON CONFLICT (number) DO UPDATE SET number = EXCLUDED.number
         RETURNING id",
    )
    .bind(house)
    .fetch_one(&mut **tx)
    .await
    .with_context(|| format!("Failed to create house {house}"))?;

    let numbers: Vec<i32> = ENTRANCE_RANGES.iter().map(|(no, _)| i32::from(*no)).collect();
    let rows: Vec<(i64, i32)> = sqlx::query_as(
        "INSERT INTO entrances (house_id, number)
         SELECT $1, n FROM UNNEST($2::INTEGER[]) AS n
         ON CONFLICT (house_id, number) DO UPDATE SET number = EXCLUDED.number
         RETURNING id, number",
    )
    .bind(house_id)
    .bind(&numbers)
    .fetch_all(&mut **tx)
    .await?;

    rows.into_iter()
        .map(|(id, number)| {
            i16::try_from(number)
                .map(|number| (number, id))
                .map_err(|_| anyhow!("Entrance number {number} out of range"))
        })
        .collect()
}

async fn insert_apartments(
    tx: &mut Transaction<'_, Postgres>,
    accounts: &[ResidentAccount],
    entrance_ids: &HashMap<i16, i64>,
) -> anyhow::Result<u64> {
    let mut ids = Vec::with_capacity(accounts.len());
    let mut numbers = Vec::with_capacity(accounts.len());
    for account in accounts {
        let entrance_id = entrance_ids
            .get(&account.entrance)
            .ok_or_else(|| anyhow!("Entrance {} was not created", account.entrance))?;
        ids.push(*entrance_id);
        numbers.push(account.apartment_no());
    }

    let result = sqlx::query(
        "INSERT INTO apartments (entrance_id, number)
         SELECT * FROM UNNEST($1::BIGINT[], $2::TEXT[])
         ON CONFLICT (entrance_id, number) DO NOTHING",
    )
    .bind(&ids)
    .bind(&numbers)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected())
}

/// Hashes each account's password in parallel. Returns `(username, hash)` pairs.
fn hash_accounts(
    accounts: &[ResidentAccount],
    cost: u32,
) -> anyhow::Result<Vec<(String, String)>> {
    accounts
        .par_iter()
        .map(|account| {
            hash_password_with_cost(&account.password(), cost)
                .map(|hash| (account.username(), hash))
                .map_err(|e| e.error)
        })
        .collect()
}

async fn insert_users(
    tx: &mut Transaction<'_, Postgres>,
    users: &[(String, String)],
) -> anyhow::Result<u64> {
    if users.is_empty() {
        return Ok(0);
    }
    let (usernames, hashes): (Vec<&str>, Vec<&str>) = users
        .iter()
        .map(|(username, hash)| (username.as_str(), hash.as_str()))
        .unzip();

    let result = sqlx::query(
        "INSERT INTO users (username, password_hash, is_active)
         SELECT u, h, TRUE FROM UNNEST($1::TEXT[], $2::TEXT[]) AS t(u, h)
         ON CONFLICT (username) DO NOTHING",
    )
    .bind(&usernames)
    .bind(&hashes)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected())
}

/// Restores the default passwords. Their holders report `not_updated` again.
async fn reset_passwords(
    tx: &mut Transaction<'_, Postgres>,
    users: &[(String, String)],
) -> anyhow::Result<u64> {
    if users.is_empty() {
        return Ok(0);
    }
    let (usernames, hashes): (Vec<&str>, Vec<&str>) = users
        .iter()
        .map(|(username, hash)| (username.as_str(), hash.as_str()))
        .unzip();

    let result = sqlx::query(
        "UPDATE users u SET password_hash = t.h, updated_at = NOW()
         FROM UNNEST($1::TEXT[], $2::TEXT[]) AS t(u, h)
         WHERE u.username = t.u",
    )
    .bind(&usernames)
    .bind(&hashes)
    .execute(&mut **tx)
    .await?;

    sqlx::query(
        "UPDATE resident_profiles SET password_status = 'not_updated', updated_at = NOW()
         WHERE user_id IN (SELECT id FROM users WHERE username = ANY($1))",
    )
    .bind(&usernames)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected())
}

struct ProfileColumns {
    usernames: Vec<String>,
    entrances: Vec<i16>,
    apartments: Vec<String>,
}

impl ProfileColumns {
    fn new(accounts: &[ResidentAccount]) -> Self {
        Self {
            usernames: accounts.iter().map(ResidentAccount::username).collect(),
            entrances: accounts.iter().map(|a| a.entrance).collect(),
            apartments: accounts.iter().map(ResidentAccount::apartment_no).collect(),
        }
    }
}

async fn insert_profiles(
    tx: &mut Transaction<'_, Postgres>,
    house: i32,
    accounts: &[ResidentAccount],
) -> anyhow::Result<u64> {
    let columns = ProfileColumns::new(accounts);
    let result = sqlx::query(
        "INSERT INTO resident_profiles
             (user_id, house_number, entrance_no, apartment_no, car_number, phone,
              is_active_resident)
         SELECT u.id, $1, t.entrance_no, t.apartment_no, 'NO', '', TRUE
         FROM UNNEST($2::TEXT[], $3::SMALLINT[], $4::TEXT[])
              AS t(username, entrance_no, apartment_no)
         JOIN users u ON u.username = t.username
         ON CONFLICT (user_id) DO NOTHING",
    )
    .bind(house)
    .bind(&columns.usernames)
    .bind(&columns.entrances)
    .bind(&columns.apartments)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected())
}

async fn reset_profiles(
    tx: &mut Transaction<'_, Postgres>,
    house: i32,
    accounts: &[ResidentAccount],
) -> anyhow::Result<u64> {
    let columns = ProfileColumns::new(accounts);
    let result = sqlx::query(
        "UPDATE resident_profiles rp
         SET house_number = $1, entrance_no = t.entrance_no, apartment_no = t.apartment_no,
             car_number = 'NO', phone = '', is_active_resident = TRUE, updated_at = NOW()
         FROM UNNEST($2::TEXT[], $3::SMALLINT[], $4::TEXT[])
              AS t(username, entrance_no, apartment_no)
         JOIN users u ON u.username = t.username
         WHERE rp.user_id = u.id",
    )
    .bind(house)
    .bind(&columns.usernames)
    .bind(&columns.entrances)
    .bind(&columns.apartments)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_hash_lowers_cost() {
        let mut config = ResidentSeedConfig::new(1);
        assert_eq!(config.hash_cost(), DEFAULT_HASH_COST);
        config.fast_hash = true;
        assert_eq!(config.hash_cost(), FAST_HASH_COST);
    }

    #[test]
    fn test_hash_accounts_pairs_username_with_hash() {
        let accounts = [ResidentAccount {
            entrance: 3,
            apartment: 125,
        }];
        let hashed = hash_accounts(&accounts, FAST_HASH_COST).unwrap();
        assert_eq!(hashed.len(), 1);
        assert_eq!(hashed[0].0, "125-3");
        assert!(aristokrat_core::verify_password("125", &hashed[0].1).unwrap());
    }
}
