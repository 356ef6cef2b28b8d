use crate::error::AppError;
use crate::model::{NewPayment, Payment, PaymentStatus};
use sqlx::PgPool;

pub struct PaymentService;

impl PaymentService {
    pub async fn create(pool: &PgPool, p: &NewPayment) -> Result<Payment, AppError> {
        let row = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (reservation_id, user_id, amount, payment_method, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(p.reservation_id)
        .bind(p.user_id)
        .bind(p.amount)
        .bind(&p.payment_method)
        .bind(p.status.as_str())
        .fetch_one(pool)
        .await?;
        tracing::info!(payment_id = row.payment_id, reservation_id = p.reservation_id, "payment recorded");
        Ok(row)
    }

    pub async fn find(pool: &PgPool, payment_id: i64) -> Result<Option<Payment>, AppError> {
        let row = sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE payment_id = $1")
            .bind(payment_id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn for_reservation(pool: &PgPool, reservation_id: i64) -> Result<Vec<Payment>, AppError> {
        let rows = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE reservation_id = $1 ORDER BY paid_at DESC",
        )
        .bind(reservation_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn for_user(pool: &PgPool, user_id: i64) -> Result<Vec<Payment>, AppError> {
        let rows = sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE user_id = $1 ORDER BY paid_at DESC")
            .bind(user_id)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn set_status(pool: &PgPool, payment_id: i64, status: PaymentStatus) -> Result<Option<Payment>, AppError> {
        let row = sqlx::query_as::<_, Payment>("UPDATE payments SET status = $1 WHERE payment_id = $2 RETURNING *")
            .bind(status.as_str())
            .bind(payment_id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn delete(pool: &PgPool, payment_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM payments WHERE payment_id = $1")
            .bind(payment_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
