use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

/// A geographic location.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "locations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: Option<String>,
    pub municipality: Option<String>,
    pub district: Option<String>,
    pub country: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub modified_date: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stations::Entity")]
    Stations,
}

impl Related<super::stations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stations.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert && self.modified_date.is_not_set() {
            self.modified_date = Set(Some(chrono::Utc::now().date_naive()));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup_db;
    use sea_orm::ActiveModelTrait;

    #[tokio::test]
    async fn insert_stamps_modified_date_once() {
        let db = setup_db().await;
        let today = chrono::Utc::now().date_naive();

        let location = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(Some("Mukono studio".into())),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
        let stamped = location.modified_date.unwrap();
        assert!(stamped >= today);

        let explicit = chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let mut active: ActiveModel = location.into();
        active.modified_date = Set(Some(explicit));
        let updated = active.update(&db).await.unwrap();
        assert_eq!(updated.modified_date, Some(explicit));
    }
}
