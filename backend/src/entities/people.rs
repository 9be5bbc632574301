use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Anyone connected to a station: hosts, owners, listeners who call in.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "people")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub additional_contact: Option<String>,
    #[sea_orm(unique)]
    pub phone_id: Option<Uuid>,
    pub gender_code: Option<i32>,
    pub privacy_code: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::phone_numbers::Entity",
        from = "Column::PhoneId",
        to = "super::phone_numbers::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Phone,
    #[sea_orm(has_many = "super::roles::Entity")]
    Roles,
    #[sea_orm(has_many = "super::person_languages::Entity")]
    PersonLanguages,
}

impl Related<super::phone_numbers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Phone.def()
    }
}

impl Related<super::roles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Roles.def()
    }
}

impl Related<super::person_languages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PersonLanguages.def()
    }
}

impl Related<super::languages::Entity> for Entity {
    fn to() -> RelationDef {
        super::person_languages::Relation::Language.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::person_languages::Relation::Person.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// ISO/IEC 5218 style codes stored in `gender_code`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn code(self) -> i32 {
        match self {
            Gender::Male => 1,
            Gender::Female => 2,
            Gender::Other => 9,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Gender::Male),
            2 => Some(Gender::Female),
            9 => Some(Gender::Other),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Privacy {
    Public,
    Private,
}

impl Privacy {
    pub fn code(self) -> i32 {
        match self {
            Privacy::Public => 0,
            Privacy::Private => 1,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Privacy::Public),
            1 => Some(Privacy::Private),
            _ => None,
        }
    }
}

impl Model {
    pub fn gender(&self) -> Option<Gender> {
        self.gender_code.and_then(Gender::from_code)
    }

    pub fn privacy(&self) -> Option<Privacy> {
        self.privacy_code.and_then(Privacy::from_code)
    }

    /// Title and name parts that are present, space separated.
    pub fn display_name(&self) -> String {
        [
            &self.title,
            &self.first_name,
            &self.middle_name,
            &self.last_name,
        ]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }

    pub async fn languages<C>(&self, db: &C) -> Result<Vec<super::languages::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        self.find_related(super::languages::Entity).all(db).await
    }
}
