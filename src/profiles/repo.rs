use anyhow::Context;
use sqlx::PgPool;

use super::repo_types::UserProfile;

impl UserProfile {
    /// Find a profile by its id.
    pub async fn find_by_id(db: &PgPool, id: &str) -> anyhow::Result<Option<UserProfile>> {
        let profile = sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT id, name, age, weight, height, gender, activity_level, fitness_goal,
                   daily_calorie_target, protein_target, carbs_target, fats_target, created_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("find profile")?;
        Ok(profile)
    }

    /// Insert this profile as a new row.
    pub async fn insert(&self, db: &PgPool) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO profiles (id, name, age, weight, height, gender, activity_level,
                                  fitness_goal, daily_calorie_target, protein_target,
                                  carbs_target, fats_target, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(&self.id)
        .bind(&self.name)
        .bind(self.age)
        .bind(self.weight)
        .bind(self.height)
        .bind(&self.gender)
        .bind(&self.activity_level)
        .bind(&self.fitness_goal)
        .bind(self.daily_calorie_target)
        .bind(self.protein_target)
        .bind(self.carbs_target)
        .bind(self.fats_target)
        .bind(self.created_at)
        .execute(db)
        .await
        .context("insert profile")?;
        Ok(())
    }

    /// Overwrite every column of the row keyed by `user_id`.
    /// Returns false when no row matched.
    pub async fn overwrite(&self, db: &PgPool, user_id: &str) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE profiles
               SET id = $2, name = $3, age = $4, weight = $5, height = $6, gender = $7,
                   activity_level = $8, fitness_goal = $9, daily_calorie_target = $10,
                   protein_target = $11, carbs_target = $12, fats_target = $13,
                   created_at = $14
             WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(&self.id)
        .bind(&self.name)
        .bind(self.age)
        .bind(self.weight)
        .bind(self.height)
        .bind(&self.gender)
        .bind(&self.activity_level)
        .bind(&self.fitness_goal)
        .bind(self.daily_calorie_target)
        .bind(self.protein_target)
        .bind(self.carbs_target)
        .bind(self.fats_target)
        .bind(self.created_at)
        .execute(db)
        .await
        .context("update profile")?;
        Ok(result.rows_affected() > 0)
    }
}
