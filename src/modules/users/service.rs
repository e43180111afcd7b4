use aristokrat_core::password::MIN_PASSWORD_LENGTH;
use aristokrat_core::{AppError, hash_password, verify_password};
use aristokrat_models::looks_like_email;
use sqlx::PgPool;
use tracing::instrument;

use super::model::{
    ApprovalStatus, ChangePasswordRequest, PasswordStatus, ProfileMe, ResidentProfile,
    StatusResponse, UpdateProfileDto, User, UserResponse,
};

const USER_COLUMNS: &str = "id, username, email, password_hash, first_name, last_name, \
                            is_active, is_admin, created_at, updated_at";

const PROFILE_COLUMNS: &str = "id, user_id, approval_status, password_status, house_number, \
                               entrance_no, apartment_no, car_number, phone, \
                               is_active_resident, created_at, updated_at";

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn find_by_id(db: &PgPool, user_id: i64) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(user_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))
    }

    /// Resolves a login to a user. Email-looking logins are matched against
    /// emails case-insensitively first, then every login is tried as a username.
    #[instrument(skip(db))]
    pub async fn find_by_login(db: &PgPool, login: &str) -> Result<Option<User>, AppError> {
        let login = login.trim();

        if looks_like_email(login) {
            let by_email = sqlx::query_as::<_, User>(&format!(
                "SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1) ORDER BY id LIMIT 1"
            ))
            .bind(login)
            .fetch_optional(db)
            .await?;

            if by_email.is_some() {
                return Ok(by_email);
            }
        }

        let by_username = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(login)
        .fetch_optional(db)
        .await?;

        Ok(by_username)
    }

    #[instrument(skip(db))]
    pub async fn find_profile(
        db: &PgPool,
        user_id: i64,
    ) -> Result<Option<ResidentProfile>, AppError> {
        let profile = sqlx::query_as::<_, ResidentProfile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM resident_profiles WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await?;

        Ok(profile)
    }

    /// Returns the user's profile, creating an empty one on first access.
    #[instrument(skip(db))]
    pub async fn get_or_create_profile(
        db: &PgPool,
        user_id: i64,
    ) -> Result<ResidentProfile, AppError> {
        sqlx::query("INSERT INTO resident_profiles (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(db)
            .await?;

        let profile = sqlx::query_as::<_, ResidentProfile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM resident_profiles WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_one(db)
        .await?;

        Ok(profile)
    }

    #[instrument(skip(db))]
    pub async fn get_user_response(db: &PgPool, user_id: i64) -> Result<UserResponse, AppError> {
        let user = Self::find_by_id(db, user_id).await?;
        let profile = Self::find_profile(db, user_id).await?;
        Ok(UserResponse::new(&user, profile.as_ref()))
    }

    #[instrument(skip(db))]
    pub async fn get_profile_me(db: &PgPool, user_id: i64) -> Result<ProfileMe, AppError> {
        let user = Self::find_by_id(db, user_id).await?;
        let profile = Self::get_or_create_profile(db, user_id).await?;
        Ok(ProfileMe::new(&user, &profile))
    }

    /// Applies a profile update. User and profile fields are written in one
    /// transaction.
    #[instrument(skip(db))]
    pub async fn update_profile(
        db: &PgPool,
        user_id: i64,
        dto: UpdateProfileDto,
    ) -> Result<ProfileMe, AppError> {
        Self::find_by_id(db, user_id).await?;
        Self::get_or_create_profile(db, user_id).await?;

        let mut tx = db.begin().await?;

        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(dto.first_name.as_deref().map(str::trim))
        .bind(dto.last_name.as_deref().map(str::trim))
        .bind(dto.email.as_deref().map(str::trim))
        .fetch_one(&mut *tx)
        .await?;

        let profile = sqlx::query_as::<_, ResidentProfile>(&format!(
            "UPDATE resident_profiles SET
                house_number = CASE WHEN $2 THEN $3 ELSE house_number END,
                entrance_no = CASE WHEN $4 THEN $5 ELSE entrance_no END,
                apartment_no = COALESCE($6, apartment_no),
                car_number = COALESCE($7, car_number),
                phone = COALESCE($8, phone),
                updated_at = NOW()
             WHERE user_id = $1
             RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(user_id)
        .bind(dto.house_number.is_some())
        .bind(dto.house_number.flatten())
        .bind(dto.entrance_no.is_some())
        .bind(dto.entrance_no.flatten())
        .bind(dto.apartment_no.as_deref().map(str::trim))
        .bind(dto.car_number.as_deref().map(str::trim))
        .bind(dto.phone.as_deref().map(str::trim))
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(user_id, "Profile updated");
        Ok(ProfileMe::new(&user, &profile))
    }

    /// Replaces the user's password and marks the profile password as updated.
    ///
    /// Issued tokens stay valid.
    #[instrument(skip(db, dto))]
    pub async fn change_password(
        db: &PgPool,
        user_id: i64,
        dto: ChangePasswordRequest,
    ) -> Result<StatusResponse, AppError> {
        let user = Self::find_by_id(db, user_id).await?;

        if !verify_password(&dto.old_password, &user.password_hash)? {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Current password is incorrect"
            )));
        }
        if dto.new_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }

        let password_hash = hash_password(&dto.new_password)?;

        let mut tx = db.begin().await?;
        Self::store_password_hash(&mut tx, user_id, &password_hash).await?;
        tx.commit().await?;

        tracing::info!(user_id, "Password changed");
        Ok(StatusResponse::new(PasswordStatus::Updated.as_str()))
    }

    /// Writes a new password hash and flips `password_status` to `updated`.
    ///
    /// Every password save on an existing user goes through here.
    pub async fn store_password_hash(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: i64,
        password_hash: &str,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .bind(password_hash)
            .execute(&mut **tx)
            .await?;

        sqlx::query(
            "UPDATE resident_profiles SET password_status = $2, updated_at = NOW()
             WHERE user_id = $1 AND password_status <> $2",
        )
        .bind(user_id)
        .bind(PasswordStatus::Updated.as_str())
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// Defaults to `updated` for users without a profile.
    #[instrument(skip(db))]
    pub async fn password_status(db: &PgPool, user_id: i64) -> Result<StatusResponse, AppError> {
        let status = Self::find_profile(db, user_id)
            .await?
            .map(|p| p.password_status)
            .unwrap_or_else(|| PasswordStatus::Updated.as_str().to_string());
        Ok(StatusResponse::new(status))
    }

    /// Defaults to `accepted` for users without a profile.
    #[instrument(skip(db))]
    pub async fn approval_status(db: &PgPool, user_id: i64) -> Result<StatusResponse, AppError> {
        let status = Self::find_profile(db, user_id)
            .await?
            .map(|p| p.approval_status)
            .unwrap_or_else(|| ApprovalStatus::Accepted.as_str().to_string());
        Ok(StatusResponse::new(status))
    }
}
