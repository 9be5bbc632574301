use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "languages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Human readable name, e.g. "English".
    pub name: Option<String>,
    /// Two letter code, e.g. "en".
    pub iso639_1: Option<String>,
    /// Three letter code, e.g. "eng".
    pub iso639_2: Option<String>,
    /// IETF locale, e.g. "en-US".
    pub locale_code: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::programs::Entity")]
    Programs,
    #[sea_orm(has_many = "super::station_languages::Entity")]
    StationLanguages,
    #[sea_orm(has_many = "super::person_languages::Entity")]
    PersonLanguages,
}

impl Related<super::programs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Programs.def()
    }
}

impl Related<super::station_languages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StationLanguages.def()
    }
}

impl Related<super::person_languages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PersonLanguages.def()
    }
}

impl Related<super::stations::Entity> for Entity {
    fn to() -> RelationDef {
        super::station_languages::Relation::Station.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::station_languages::Relation::Language.def().rev())
    }
}

impl Related<super::people::Entity> for Entity {
    fn to() -> RelationDef {
        super::person_languages::Relation::Person.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::person_languages::Relation::Language.def().rev())
    }
}

impl Entity {
    pub fn find_by_iso639_1(code: &str) -> Select<Entity> {
        Self::find().filter(Column::Iso6391.eq(code.to_ascii_lowercase()))
    }
}

impl ActiveModelBehavior for ActiveModel {}
