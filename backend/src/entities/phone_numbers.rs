use sea_orm::entity::prelude::*;
use sea_orm::{Condition, QueryOrder};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "phone_numbers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// "mobile", "landline", "voip", ...
    pub number_type: Option<String>,
    pub carrier: Option<String>,
    /// Without the leading `+`.
    pub country_code: Option<String>,
    pub area_code: Option<String>,
    pub number: Option<String>,
}

// Stations, calls and messages reference this table from two columns each, so
// their reverse relations go through the helpers on `Model` below.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::people::Entity")]
    Person,
}

impl Related<super::people::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Person.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// `+<country> <area> <number>`, leaving out missing parts.
    pub fn formatted(&self) -> String {
        let mut parts = Vec::with_capacity(3);
        if let Some(cc) = self.country_code.as_deref().filter(|s| !s.is_empty()) {
            parts.push(format!("+{}", cc.trim_start_matches('+')));
        }
        parts.extend(
            [&self.area_code, &self.number]
                .into_iter()
                .filter_map(|part| part.as_deref())
                .filter(|part| !part.is_empty())
                .map(str::to_owned),
        );
        parts.join(" ")
    }

    pub async fn person<C>(&self, db: &C) -> Result<Option<super::people::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        self.find_related(super::people::Entity).one(db).await
    }

    /// The station using this number for its cloud service, if any.
    pub async fn cloud_station<C>(&self, db: &C) -> Result<Option<super::stations::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        super::stations::Entity::find()
            .filter(super::stations::Column::CloudPhoneId.eq(self.id))
            .one(db)
            .await
    }

    /// The station whose transmitter uses this number, if any.
    pub async fn transmitter_station<C>(&self, db: &C) -> Result<Option<super::stations::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        super::stations::Entity::find()
            .filter(super::stations::Column::TransmitterPhoneId.eq(self.id))
            .one(db)
            .await
    }

    /// Calls placed from or received on this number, oldest first.
    pub fn calls(&self) -> Select<super::calls::Entity> {
        use super::calls::Column;
        super::calls::Entity::find()
            .filter(
                Condition::any()
                    .add(Column::FromPhoneNumberId.eq(self.id))
                    .add(Column::ToPhoneNumberId.eq(self.id)),
            )
            .order_by_asc(Column::StartTime)
            .order_by_asc(Column::Id)
    }

    /// Messages sent from or to this number, oldest first.
    pub fn messages(&self) -> Select<super::messages::Entity> {
        use super::messages::Column;
        super::messages::Entity::find()
            .filter(
                Condition::any()
                    .add(Column::FromPhoneNumberId.eq(self.id))
                    .add(Column::ToPhoneNumberId.eq(self.id)),
            )
            .order_by_asc(Column::SendTime)
            .order_by_asc(Column::Id)
    }
}
