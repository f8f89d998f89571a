//! Subscription and quota state. Every user has at most one active
//! subscription row; users without one are treated as free tier with the
//! default article allowance.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;

pub const FREE_PLAN_ARTICLES: i32 = 3;
pub const PRO_PLAN_ARTICLES: i32 = 50;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Subscription {
    pub user_id: Uuid,
    pub plan_type: String,
    pub status: String,
    pub articles_remaining: i32,
    pub articles_generated: i32,
}

impl Subscription {
    pub fn free_tier(user_id: Uuid) -> Self {
        Self {
            user_id,
            plan_type: "free".to_string(),
            status: "active".to_string(),
            articles_remaining: FREE_PLAN_ARTICLES,
            articles_generated: 0,
        }
    }

    pub fn is_pro(&self) -> bool {
        self.plan_type == "pro"
    }

    /// Pro subscriptions are not metered; free ones spend their allowance.
    pub fn has_quota(&self) -> bool {
        self.is_pro() || self.articles_remaining > 0
    }
}

/// Returns the user's latest active subscription, falling back to an
/// unpersisted free-tier default when no row exists yet.
pub async fn get_active(pool: &PgPool, user_id: Uuid) -> Result<Subscription, AppError> {
    let row = sqlx::query_as::<_, Subscription>(
        r#"
        SELECT user_id, plan_type, status, articles_remaining, articles_generated
        FROM subscriptions
        WHERE user_id = $1 AND status = 'active'
        ORDER BY updated_at DESC
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.unwrap_or_else(|| Subscription::free_tier(user_id)))
}

/// Records one successful generation. Free allowances decrement, pro ones
/// do not; the row is created on first use for users with no history.
pub async fn consume_article(pool: &PgPool, user_id: Uuid) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO subscriptions
            (user_id, plan_type, status, articles_remaining, articles_generated, updated_at)
        VALUES ($1, 'free', 'active', $2 - 1, 1, NOW())
        ON CONFLICT (user_id) DO UPDATE SET
            articles_remaining = CASE
                WHEN subscriptions.plan_type = 'pro' THEN subscriptions.articles_remaining
                ELSE GREATEST(subscriptions.articles_remaining - 1, 0)
            END,
            articles_generated = subscriptions.articles_generated + 1,
            updated_at = NOW()
        "#,
    )
    .bind(user_id)
    .bind(FREE_PLAN_ARTICLES)
    .execute(pool)
    .await?;

    Ok(())
}

/// Upgrades a user to the pro plan after a completed checkout.
pub async fn activate_pro(
    pool: &PgPool,
    user_id: Uuid,
    stripe_customer_id: &str,
    stripe_subscription_id: &str,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO subscriptions
            (user_id, plan_type, status, articles_remaining, articles_generated,
             stripe_customer_id, stripe_subscription_id, updated_at)
        VALUES ($1, 'pro', 'active', $2, 0, $3, $4, NOW())
        ON CONFLICT (user_id) DO UPDATE SET
            plan_type = 'pro',
            status = 'active',
            articles_remaining = $2,
            stripe_customer_id = $3,
            stripe_subscription_id = $4,
            updated_at = NOW()
        "#,
    )
    .bind(user_id)
    .bind(PRO_PLAN_ARTICLES)
    .bind(stripe_customer_id)
    .bind(stripe_subscription_id)
    .execute(pool)
    .await?;

    info!("Activated pro plan for user {user_id}");
    Ok(())
}
