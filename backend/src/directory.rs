//! Stations, people and the many-to-many links between them and languages,
//! network admins and padding content.
//!
//! Every multi-row write runs in one transaction so a failure leaves no
//! partial link sets behind.

use std::collections::BTreeSet;

use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::entities::{
    network_admins, network_paddings, people, person_languages, station_languages, stations,
};
use crate::error::{Error, Result, ValidationError};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct NewStation {
    /// Generated when absent.
    pub id: Option<Uuid>,
    pub name: String,
    pub about: Option<String>,
    pub frequency: Option<f64>,
    /// Generated when absent.
    pub api_key: Option<String>,
    pub owner_id: Option<Uuid>,
    pub network_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub cloud_phone_id: Option<Uuid>,
    pub transmitter_phone_id: Option<Uuid>,
    pub language_ids: Vec<Uuid>,
}

/// Inserts a station together with its languages.
pub async fn create_station<C>(db: &C, new: NewStation) -> Result<stations::Model>
where
    C: TransactionTrait,
{
    if new.name.trim().is_empty() {
        return Err(ValidationError::Blank { field: "name" }.into());
    }

    let txn = db.begin().await?;
    let station = stations::ActiveModel {
        id: Set(new.id.unwrap_or_else(Uuid::new_v4)),
        name: Set(new.name),
        about: Set(new.about),
        frequency: Set(new.frequency),
        api_key: new.api_key.map(Set).unwrap_or(NotSet),
        owner_id: Set(new.owner_id),
        network_id: Set(new.network_id),
        location_id: Set(new.location_id),
        cloud_phone_id: Set(new.cloud_phone_id),
        transmitter_phone_id: Set(new.transmitter_phone_id),
    }
    .insert(&txn)
    .await?;
    insert_station_languages(&txn, station.id, &new.language_ids).await?;
    txn.commit().await?;

    info!(station_id = %station.id, name = %station.name, "station created");
    Ok(station)
}

pub async fn get_station<C>(db: &C, id: Uuid) -> Result<stations::Model>
where
    C: ConnectionTrait,
{
    stations::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "station",
            id,
        })
}

pub async fn find_station_by_api_key<C>(db: &C, api_key: &str) -> Result<Option<stations::Model>>
where
    C: ConnectionTrait,
{
    let station = stations::Entity::find()
        .filter(stations::Column::ApiKey.eq(api_key))
        .one(db)
        .await?;
    Ok(station)
}

/// Replaces the station's language set.
pub async fn set_station_languages<C>(db: &C, station_id: Uuid, language_ids: &[Uuid]) -> Result<()>
where
    C: TransactionTrait + ConnectionTrait,
{
    get_station(db, station_id).await?;

    let txn = db.begin().await?;
    station_languages::Entity::delete_many()
        .filter(station_languages::Column::StationId.eq(station_id))
        .exec(&txn)
        .await?;
    insert_station_languages(&txn, station_id, language_ids).await?;
    txn.commit().await?;

    info!(%station_id, count = language_ids.len(), "station languages replaced");
    Ok(())
}

async fn insert_station_languages<C>(db: &C, station_id: Uuid, language_ids: &[Uuid]) -> Result<()>
where
    C: ConnectionTrait,
{
    let rows: Vec<_> = distinct(language_ids)
        .map(|language_id| station_languages::ActiveModel {
            station_id: Set(station_id),
            language_id: Set(language_id),
        })
        .collect();
    if !rows.is_empty() {
        station_languages::Entity::insert_many(rows).exec(db).await?;
    }
    Ok(())
}

/// Replaces the languages a person speaks.
pub async fn set_person_languages<C>(db: &C, person_id: Uuid, language_ids: &[Uuid]) -> Result<()>
where
    C: TransactionTrait + ConnectionTrait,
{
    people::Entity::find_by_id(person_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "person",
            id: person_id,
        })?;

    let txn = db.begin().await?;
    person_languages::Entity::delete_many()
        .filter(person_languages::Column::PersonId.eq(person_id))
        .exec(&txn)
        .await?;
    let rows: Vec<_> = distinct(language_ids)
        .map(|language_id| person_languages::ActiveModel {
            person_id: Set(person_id),
            language_id: Set(language_id),
        })
        .collect();
    if !rows.is_empty() {
        person_languages::Entity::insert_many(rows).exec(&txn).await?;
    }
    txn.commit().await?;
    Ok(())
}

pub async fn add_network_admin<C>(db: &C, network_id: Uuid, user_id: Uuid) -> Result<()>
where
    C: ConnectionTrait,
{
    network_admins::ActiveModel {
        network_id: Set(network_id),
        user_id: Set(user_id),
    }
    .insert(db)
    .await?;
    info!(%network_id, %user_id, "network admin added");
    Ok(())
}

/// Makes a piece of padding content available to a network's stations.
pub async fn add_network_padding<C>(db: &C, network_id: Uuid, padding_content_id: Uuid) -> Result<()>
where
    C: ConnectionTrait,
{
    network_paddings::ActiveModel {
        network_id: Set(network_id),
        padding_content_id: Set(padding_content_id),
    }
    .insert(db)
    .await?;
    Ok(())
}

fn distinct(ids: &[Uuid]) -> impl Iterator<Item = Uuid> {
    ids.iter().copied().collect::<BTreeSet<_>>().into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{languages, networks, padding_contents, recordings, scheduled_blocks, users};
    use crate::test_support::{insert_language, insert_phone, insert_station, setup_db};
    use chrono::NaiveTime;
    use sea_orm::ModelTrait;
    use std::collections::HashSet;

    fn named(name: &str) -> NewStation {
        NewStation {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn stations_get_distinct_api_keys() {
        let db = setup_db().await;
        let a = create_station(&db, named("Radio One")).await.unwrap();
        let b = create_station(&db, named("Radio Two")).await.unwrap();

        assert!(!a.api_key.is_empty());
        assert_ne!(a.api_key, b.api_key);

        let found = find_station_by_api_key(&db, &b.api_key).await.unwrap();
        assert_eq!(found.map(|s| s.id), Some(b.id));
    }

    #[tokio::test]
    async fn duplicate_api_key_is_rejected() {
        let db = setup_db().await;
        let first = NewStation {
            api_key: Some("shared".into()),
            ..named("Radio One")
        };
        create_station(&db, first.clone()).await.unwrap();

        let err = create_station(&db, NewStation { name: "Radio Two".into(), ..first })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::IntegrityViolation(_)));
        let all = stations::Entity::find().all(&db).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn languages_round_trip_as_a_set() {
        let db = setup_db().await;
        let en = insert_language(&db, "English", "en").await;
        let fr = insert_language(&db, "French", "fr").await;
        let sw = insert_language(&db, "Swahili", "sw").await;

        let station = create_station(
            &db,
            NewStation {
                language_ids: vec![en.id, fr.id, en.id],
                ..named("Radio Bilingue")
            },
        )
        .await
        .unwrap();

        let ids = |langs: Vec<languages::Model>| langs.into_iter().map(|l| l.id).collect::<HashSet<_>>();
        let got = ids(station.languages(&db).await.unwrap());
        assert_eq!(got, HashSet::from([en.id, fr.id]));

        set_station_languages(&db, station.id, &[sw.id]).await.unwrap();
        let got = ids(station.languages(&db).await.unwrap());
        assert_eq!(got, HashSet::from([sw.id]));

        let stations_speaking_sw = sw.find_related(stations::Entity).all(&db).await.unwrap();
        assert_eq!(stations_speaking_sw.len(), 1);
    }

    #[tokio::test]
    async fn failed_language_insert_rolls_back_station() {
        let db = setup_db().await;
        let err = create_station(
            &db,
            NewStation {
                language_ids: vec![Uuid::new_v4()],
                ..named("Radio Ghost")
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::IntegrityViolation(_)));
        assert!(stations::Entity::find().all(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_references() {
        let db = setup_db().await;
        let err = create_station(
            &db,
            NewStation {
                network_id: Some(Uuid::new_v4()),
                ..named("Radio Nowhere")
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::IntegrityViolation(_)));

        let err = set_station_languages(&db, Uuid::new_v4(), &[]).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { entity: "station", .. }));

        let err = create_station(&db, named(" ")).await.unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::Blank { .. })));
    }

    #[tokio::test]
    async fn phone_roles_are_exclusive() {
        let db = setup_db().await;
        let phone = insert_phone(&db, "700111222").await;
        let station = create_station(
            &db,
            NewStation {
                cloud_phone_id: Some(phone.id),
                ..named("Radio Cloud")
            },
        )
        .await
        .unwrap();

        let err = create_station(
            &db,
            NewStation {
                cloud_phone_id: Some(phone.id),
                ..named("Radio Copy")
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::IntegrityViolation(_)));

        assert_eq!(station.cloud_phone(&db).await.unwrap(), Some(phone.clone()));
        assert_eq!(station.transmitter_phone(&db).await.unwrap(), None);
        assert_eq!(phone.cloud_station(&db).await.unwrap().map(|s| s.id), Some(station.id));
        assert_eq!(phone.transmitter_station(&db).await.unwrap(), None);
    }

    #[tokio::test]
    async fn network_links() {
        let db = setup_db().await;
        let network = networks::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set("Community Radio Network".into()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set("amina".into()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        add_network_admin(&db, network.id, user.id).await.unwrap();
        let err = add_network_admin(&db, network.id, user.id).await.unwrap_err();
        assert!(matches!(err, Error::IntegrityViolation(_)));
        let admins = network.find_related(users::Entity).all(&db).await.unwrap();
        assert_eq!(admins, vec![user]);

        let station = insert_station(&db, "Radio Padding").await;
        let block = scheduled_blocks::ActiveModel {
            id: Set(Uuid::new_v4()),
            station_id: Set(station.id),
            name: Set("Ads".into()),
            recurrence: Set(None),
            start_time: Set(NaiveTime::from_hms_opt(7, 0, 0).unwrap()),
            end_time: Set(NaiveTime::from_hms_opt(8, 0, 0).unwrap()),
        }
        .insert(&db)
        .await
        .unwrap();
        let recording = recordings::ActiveModel {
            id: Set(Uuid::new_v4()),
            url: Set(Some("https://cdn.example.org/psa.mp3".into())),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
        let padding = padding_contents::ActiveModel {
            id: Set(Uuid::new_v4()),
            recording_id: Set(recording.id),
            block_id: Set(block.id),
        }
        .insert(&db)
        .await
        .unwrap();

        add_network_padding(&db, network.id, padding.id).await.unwrap();
        let networks_for_padding = padding.find_related(networks::Entity).all(&db).await.unwrap();
        assert_eq!(networks_for_padding.len(), 1);
        assert_eq!(networks_for_padding[0].id, network.id);
    }

    #[tokio::test]
    async fn person_languages_replace() {
        let db = setup_db().await;
        let en = insert_language(&db, "English", "en").await;
        let lg = insert_language(&db, "Luganda", "lg").await;
        let person = people::ActiveModel {
            id: Set(Uuid::new_v4()),
            first_name: Set(Some("Okello".into())),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        set_person_languages(&db, person.id, &[en.id, lg.id]).await.unwrap();
        set_person_languages(&db, person.id, &[lg.id]).await.unwrap();
        let spoken = person.languages(&db).await.unwrap();
        assert_eq!(spoken, vec![lg]);

        let err = set_person_languages(&db, Uuid::new_v4(), &[]).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { entity: "person", .. }));
    }
}
