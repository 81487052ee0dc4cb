use sqlx::PgPool;

use crate::models::{ProcessedSale, SalesStatistics};

/// Create the processed_sales table if it does not exist. Called before
/// every insert batch so the first ingestion run bootstraps the schema.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS processed_sales (
            id BIGSERIAL PRIMARY KEY,
            order_id VARCHAR(50),
            product_id VARCHAR(50),
            quantity INT,
            price NUMERIC(10, 2),
            total_amount NUMERIC(10, 2),
            order_date VARCHAR(50),
            process_date DATE,
            report_key VARCHAR(255)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Insert a batch of processed sales with `report_key` attached as
/// provenance. The whole batch commits in one transaction: an error on any
/// row rolls back every row of the batch.
pub async fn insert_processed_sales(
    pool: &PgPool,
    report_key: &str,
    sales: &[ProcessedSale],
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    for sale in sales {
        sqlx::query(
            r#"
            INSERT INTO processed_sales
            (order_id, product_id, quantity, price, total_amount, order_date, process_date, report_key)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&sale.order_id)
        .bind(&sale.product_id)
        .bind(sale.quantity)
        .bind(sale.price)
        .bind(sale.total_amount)
        .bind(&sale.order_date)
        .bind(sale.process_date)
        .bind(report_key)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!(
        "Inserted {} processed sales for report '{}'",
        sales.len(),
        report_key
    );
    Ok(())
}

/// Aggregate statistics over all processed sales. Returns `None` when the
/// table is absent or holds no rows; both map to the empty-state response.
pub async fn fetch_statistics(pool: &PgPool) -> Result<Option<SalesStatistics>, sqlx::Error> {
    let table_count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM information_schema.tables
        WHERE table_schema = 'public' AND table_name = 'processed_sales'
        "#,
    )
    .fetch_one(pool)
    .await?;

    if table_count == 0 {
        return Ok(None);
    }

    let row_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM processed_sales")
        .fetch_one(pool)
        .await?;

    if row_count == 0 {
        return Ok(None);
    }

    let statistics = sqlx::query_as::<_, SalesStatistics>(
        r#"
        SELECT
            COUNT(*) AS total_orders,
            SUM(total_amount) AS total_sales,
            ROUND(AVG(total_amount), 2) AS average_order_value,
            MAX(total_amount) AS max_order_value,
            MIN(total_amount) AS min_order_value
        FROM processed_sales
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(Some(statistics))
}
