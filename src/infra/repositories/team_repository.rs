//! Team repository.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::team::{self, ActiveModel, Entity as TeamEntity};
use crate::domain::{NewTeam, Team};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// All teams ordered by name.
    async fn list(&self) -> AppResult<Vec<Team>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Team>>;

    async fn exists_by_name_ignore_case(&self, name: &str, exclude_id: Option<i64>)
        -> AppResult<bool>;

    async fn create(&self, team: NewTeam) -> AppResult<Team>;

    async fn update(&self, id: i64, team: NewTeam) -> AppResult<Team>;

    async fn delete(&self, id: i64) -> AppResult<()>;
}

pub struct TeamStore {
    db: DatabaseConnection,
}

impl TeamStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn team_not_found(id: i64) -> String {
    format!("Team not found: {}", id)
}

#[async_trait]
impl TeamRepository for TeamStore {
    async fn list(&self) -> AppResult<Vec<Team>> {
        let models = TeamEntity::find()
            .order_by_asc(team::Column::Name)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Team::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Team>> {
        let result = TeamEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Team::from))
    }

    async fn exists_by_name_ignore_case(
        &self,
        name: &str,
        exclude_id: Option<i64>,
    ) -> AppResult<bool> {
        let mut query = TeamEntity::find().filter(
            Expr::expr(Func::lower(Expr::col(team::Column::Name))).eq(name.to_lowercase()),
        );
        if let Some(id) = exclude_id {
            query = query.filter(team::Column::Id.ne(id));
        }

        Ok(query.count(&self.db).await? > 0)
    }

    async fn create(&self, team: NewTeam) -> AppResult<Team> {
        let active_model = ActiveModel {
            name: Set(team.name),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Team::from(model))
    }

    async fn update(&self, id: i64, team: NewTeam) -> AppResult<Team> {
        let existing = TeamEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found(|| team_not_found(id))?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(team.name);

        let model = active.update(&self.db).await?;
        Ok(Team::from(model))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = TeamEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found(team_not_found(id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn test_name_check_excludes_updated_team() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[BTreeMap::from([("num_items", Value::from(0i64))])]])
            .into_connection();
        let store = TeamStore::new(db.clone());

        let exists = store
            .exists_by_name_ignore_case("Minsk BISONS", Some(3))
            .await
            .unwrap();
        assert!(!exists);

        let log = db.into_transaction_log();
        let stmt = &log[0].statements()[0];
        let sql = stmt.sql.to_lowercase();
        assert!(sql.contains(r#"lower("name") = $1"#), "{}", stmt.sql);
        assert!(sql.contains(r#""id" <> $2"#), "{}", stmt.sql);
        assert_eq!(
            stmt.values.clone().unwrap().0,
            vec![Value::from("minsk bisons"), Value::from(3i64)]
        );
    }
}
