use sqlx::{postgres::PgRow, FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    entities::resource::{Direction, Resource},
    errors::AppError,
    repositories::store::{FilterValue, SelectQuery},
};

#[derive(Clone)]
pub struct SqlxRepo {
    pub pool: PgPool,
}

impl SqlxRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxRepo { pool }
    }

    pub async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// `SELECT *` over a resource table with the query's filter and ordering.
    ///
    /// Column names come from `&'static str` descriptors, never from request input.
    pub(crate) async fn select_rows<R>(&self, query: &SelectQuery) -> Result<Vec<R>, AppError>
    where
        R: Resource + for<'r> FromRow<'r, PgRow> + Unpin,
    {
        let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT * FROM {}", R::TABLE));

        if let Some(filter) = &query.filter {
            builder.push(" WHERE ").push(filter.column).push(" = ");
            match &filter.value {
                FilterValue::Bool(v) => builder.push_bind(*v),
            };
        }

        builder.push(" ORDER BY ").push(query.order_by.column);
        match query.order_by.direction {
            Direction::Ascending => builder.push(" ASC NULLS LAST"),
            Direction::Descending => builder.push(" DESC NULLS LAST"),
        };

        let rows = builder
            .build_query_as::<R>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    pub(crate) async fn delete_row(&self, table: &'static str, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", table))
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Record not found".into()));
        }

        Ok(())
    }
}
