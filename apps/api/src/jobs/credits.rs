use sqlx::SqlitePool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;

/// Takes one credit from `user_id` and returns the remaining balance.
///
/// The check and the decrement are a single conditional UPDATE, so
/// concurrent charges can never drive the balance below zero. Callers must
/// have confirmed the user exists: a missing user and an empty balance both
/// come back as `InsufficientCredits`.
pub async fn charge_credit(pool: &SqlitePool, user_id: Uuid) -> Result<i64, AppError> {
    let remaining: Option<i64> = sqlx::query_scalar(
        "UPDATE users SET credits = credits - 1 WHERE id = ? AND credits > 0 RETURNING credits",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    match remaining {
        Some(remaining) => {
            info!(user_id = %user_id, remaining, "credit charged");
            Ok(remaining)
        }
        None => {
            warn!(user_id = %user_id, "credit charge refused: balance is zero");
            Err(AppError::InsufficientCredits)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;
    use crate::store;
    use crate::test_support::{seed_user, set_credits, test_pool};

    #[tokio::test]
    async fn charge_decrements_by_one() {
        let pool = test_pool().await;
        let user = seed_user(&pool, "a@example.com", Role::Applicant).await;
        set_credits(&pool, user.id, 3).await;

        assert_eq!(charge_credit(&pool, user.id).await.unwrap(), 2);
        assert_eq!(store::users::credits_of(&pool, user.id).await.unwrap(), Some(2));
    }

    #[tokio::test]
    async fn charge_at_zero_is_refused_and_balance_stays_zero() {
        let pool = test_pool().await;
        let user = seed_user(&pool, "b@example.com", Role::Applicant).await;
        set_credits(&pool, user.id, 0).await;

        let err = charge_credit(&pool, user.id).await.unwrap_err();
        assert!(matches!(err, AppError::InsufficientCredits));
        assert_eq!(store::users::credits_of(&pool, user.id).await.unwrap(), Some(0));
    }

    #[tokio::test]
    async fn concurrent_charges_at_one_credit_succeed_exactly_once() {
        let pool = test_pool().await;
        let user = seed_user(&pool, "c@example.com", Role::Recruiter).await;
        set_credits(&pool, user.id, 1).await;

        let first = tokio::spawn({
            let pool = pool.clone();
            async move { charge_credit(&pool, user.id).await.is_ok() }
        });
        let second = tokio::spawn({
            let pool = pool.clone();
            async move { charge_credit(&pool, user.id).await.is_ok() }
        });
        let successes = [first.await.unwrap(), second.await.unwrap()]
            .into_iter()
            .filter(|ok| *ok)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(store::users::credits_of(&pool, user.id).await.unwrap(), Some(0));
    }
}
