//! User operations

use chrono::Utc;
use sqlx::Row;

use crate::error::DbError;
use crate::models::{NewUser, User};
use crate::repository::Database;

impl Database {
    /// Insert a new user
    ///
    /// The UNIQUE constraint on email is the authoritative duplicate check;
    /// a violation is reported as `DbError::Duplicate` so concurrent signups
    /// that both pass the handler's existence check cannot create two rows.
    pub async fn insert_user(&self, user: NewUser) -> Result<User, DbError> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, created_at)
            VALUES (?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(now.to_rfc3339())
        .fetch_one(&self.pool)
        .await;

        let row = match result {
            Ok(row) => row,
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                return Err(DbError::Duplicate(format!(
                    "User '{}' already exists",
                    user.email
                )));
            }
            Err(e) => return Err(e.into()),
        };

        let id: i64 = row.get("id");

        Ok(User {
            id,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
        })
    }

    /// Get a user by email
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        result
            .map(|row| User::try_from(&row).map_err(DbError::from))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_get_user() {
        let db = Database::new_in_memory().await.unwrap();

        let user = db
            .insert_user(NewUser {
                email: "a@x.com".to_string(),
                password_hash: "$argon2id$fake".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(user.email, "a@x.com");

        let found = db.get_user_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.password_hash, "$argon2id$fake");

        assert!(db.get_user_by_email("b@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = Database::new_in_memory().await.unwrap();

        let new_user = NewUser {
            email: "a@x.com".to_string(),
            password_hash: "hash1".to_string(),
        };
        db.insert_user(new_user.clone()).await.unwrap();

        let err = db.insert_user(new_user).await.unwrap_err();
        assert!(matches!(err, DbError::Duplicate(_)));
    }
}
