use anyhow::Context;
use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use super::repo_types::{FoodItem, FoodNutrients};

/// Upper bound on rows returned by a single listing.
const LIST_LIMIT: i64 = 1000;

impl FoodItem {
    pub async fn insert(&self, db: &PgPool) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO foods (id, user_id, name, calories, protein, carbs, fats,
                               serving_size, date, meal_type, created_at, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(self.id)
        .bind(&self.user_id)
        .bind(&self.name)
        .bind(self.calories)
        .bind(self.protein)
        .bind(self.carbs)
        .bind(self.fats)
        .bind(&self.serving_size)
        .bind(self.date)
        .bind(self.meal_type)
        .bind(self.created_at)
        .bind(&self.image_url)
        .execute(db)
        .await
        .context("insert food")?;
        Ok(())
    }

    /// A user's entries, optionally restricted to one date.
    pub async fn list_by_user(
        db: &PgPool,
        user_id: &str,
        date: Option<Date>,
    ) -> anyhow::Result<Vec<FoodItem>> {
        let rows = sqlx::query_as::<_, FoodItem>(
            r#"
            SELECT id, user_id, name, calories,
                   COALESCE(protein, 0) AS protein,
                   COALESCE(carbs, 0)   AS carbs,
                   COALESCE(fats, 0)    AS fats,
                   serving_size, date, meal_type, created_at, image_url
            FROM foods
            WHERE user_id = $1
              AND ($2::date IS NULL OR date = $2)
            ORDER BY created_at ASC
            LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(LIST_LIMIT)
        .fetch_all(db)
        .await
        .context("list foods by user")?;
        Ok(rows)
    }

    /// Returns false when no entry had this id.
    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM foods WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .context("delete food")?;
        Ok(result.rows_affected() > 0)
    }
}

impl FoodNutrients {
    /// Nutrient columns of every entry a user logged on `date`.
    pub async fn list_for_day(
        db: &PgPool,
        user_id: &str,
        date: Date,
    ) -> anyhow::Result<Vec<FoodNutrients>> {
        let rows = sqlx::query_as::<_, FoodNutrients>(
            r#"
            SELECT calories, protein, carbs, fats
            FROM foods
            WHERE user_id = $1 AND date = $2
            LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(LIST_LIMIT)
        .fetch_all(db)
        .await
        .context("list day nutrients")?;
        Ok(rows)
    }
}
