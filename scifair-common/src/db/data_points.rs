//! Timestamped measurement rows (`project_data_points`)

use super::rows::{format_timestamp, parse_timestamp, parse_uuid};
use crate::models::{DataPoint, NewDataPoint};
use crate::Result;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

pub async fn insert_data_point(pool: &SqlitePool, new: &NewDataPoint) -> Result<DataPoint> {
    let point = DataPoint {
        id: Uuid::new_v4(),
        project_id: new.project_id,
        metric_name: new.metric_name.clone(),
        value: new.value,
        recorded_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO project_data_points (id, project_id, metric_name, value, recorded_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(point.id.to_string())
    .bind(point.project_id.to_string())
    .bind(&point.metric_name)
    .bind(point.value)
    .bind(format_timestamp(point.recorded_at))
    .execute(pool)
    .await?;

    Ok(point)
}

/// Data points for `project_id` in recording order (oldest first, for charting)
pub async fn list_data_points(pool: &SqlitePool, project_id: Uuid) -> Result<Vec<DataPoint>> {
    let rows = sqlx::query(
        r#"
        SELECT id, project_id, metric_name, value, recorded_at
        FROM project_data_points
        WHERE project_id = ?
        ORDER BY recorded_at ASC, rowid ASC
        "#,
    )
    .bind(project_id.to_string())
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| -> Result<DataPoint> {
            let id: String = row.try_get("id")?;
            let project_id: String = row.try_get("project_id")?;
            let recorded_at: String = row.try_get("recorded_at")?;
            Ok(DataPoint {
                id: parse_uuid(&id)?,
                project_id: parse_uuid(&project_id)?,
                metric_name: row.try_get("metric_name")?,
                value: row.try_get("value")?,
                recorded_at: parse_timestamp(&recorded_at)?,
            })
        })
        .collect()
}
