//! JSON seed documents: loading them into a database and exporting a
//! database back out in the same shape.
//!
//! Rows are matched by id when the document carries one, otherwise by name
//! (languages by ISO 639-1 code), and updated in place. Cross references use
//! names so documents stay editable by hand.

use std::collections::HashMap;

use chrono::{DateTime, NaiveTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::directory::{self, NewStation};
use crate::entities::program_types::ProgramDefinition;
use crate::entities::{
    languages, locations, networks, program_types, programs, scheduled_blocks, scheduled_programs,
    stations,
};
use crate::error::{Error, ValidationError};
use crate::recurrence::RecurrenceRule;
use crate::schedule::{self, NewScheduledBlock, NewScheduledProgram};

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("unknown {kind}: {name}")]
    UnknownReference { kind: &'static str, name: String },

    #[error(transparent)]
    Storage(#[from] Error),
}

impl From<DbErr> for SeedError {
    fn from(err: DbErr) -> Self {
        SeedError::Storage(err.into())
    }
}

impl From<ValidationError> for SeedError {
    fn from(err: ValidationError) -> Self {
        SeedError::Storage(err.into())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SeedData {
    #[serde(default)]
    pub languages: Vec<SeedLanguage>,
    #[serde(default)]
    pub networks: Vec<SeedNetwork>,
    #[serde(default)]
    pub locations: Vec<SeedLocation>,
    #[serde(default)]
    pub program_types: Vec<SeedProgramType>,
    #[serde(default)]
    pub programs: Vec<SeedProgram>,
    #[serde(default)]
    pub stations: Vec<SeedStation>,
    #[serde(default)]
    pub blocks: Vec<SeedBlock>,
    #[serde(default)]
    pub scheduled_programs: Vec<SeedScheduledProgram>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SeedLanguage {
    pub id: Option<Uuid>,
    pub name: String,
    pub iso639_1: Option<String>,
    pub iso639_2: Option<String>,
    pub locale_code: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SeedNetwork {
    pub id: Option<Uuid>,
    pub name: String,
    pub about: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SeedLocation {
    pub id: Option<Uuid>,
    pub name: String,
    pub municipality: Option<String>,
    pub district: Option<String>,
    pub country: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SeedProgramType {
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub definition: ProgramDefinition,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SeedProgram {
    pub id: Option<Uuid>,
    pub name: String,
    pub duration: Option<NaiveTime>,
    pub update_recurrence: Option<String>,
    /// ISO 639-1 code, or the language's name or id when it has no code.
    pub language_code: Option<String>,
    pub program_type_name: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SeedStation {
    pub id: Option<Uuid>,
    pub name: String,
    pub about: Option<String>,
    pub frequency: Option<f64>,
    /// Kept across export and re-seed so device credentials survive.
    pub api_key: Option<String>,
    pub network_name: Option<String>,
    pub location_name: Option<String>,
    /// Same reference format as [`SeedProgram::language_code`].
    #[serde(default)]
    pub language_codes: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SeedBlock {
    pub station_name: String,
    pub name: String,
    pub recurrence: Option<String>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SeedScheduledProgram {
    pub station_name: String,
    pub program_name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// The reference written for a language: its code, else its name, else its id.
fn language_ref(language: &languages::Model) -> String {
    language
        .iso639_1
        .clone()
        .filter(|code| !code.is_empty())
        .or_else(|| language.name.clone().filter(|name| !name.is_empty()))
        .unwrap_or_else(|| language.id.to_string())
}

/// Name to id lookups filled as each section is upserted.
#[derive(Default)]
struct Ids {
    languages: HashMap<String, Uuid>,
    networks: HashMap<String, Uuid>,
    locations: HashMap<String, Uuid>,
    program_types: HashMap<String, Uuid>,
    programs: HashMap<String, Uuid>,
    stations: HashMap<String, Uuid>,
}

impl Ids {
    fn language(&self, reference: &str) -> Result<Uuid, SeedError> {
        self.languages
            .get(reference)
            .or_else(|| self.languages.get(&reference.to_ascii_lowercase()))
            .copied()
            .ok_or_else(|| SeedError::UnknownReference {
                kind: "language",
                name: reference.to_string(),
            })
    }
}

fn lookup(map: &HashMap<String, Uuid>, kind: &'static str, name: &str) -> Result<Uuid, SeedError> {
    map.get(name).copied().ok_or_else(|| SeedError::UnknownReference {
        kind,
        name: name.to_string(),
    })
}

/// Upserts every section of `seed`, in dependency order.
pub async fn import(db: &DatabaseConnection, seed: SeedData) -> Result<(), SeedError> {
    let mut ids = Ids::default();

    for language in seed.languages {
        let model = upsert_language(db, language).await?;
        if let Some(code) = model.iso639_1.as_deref().filter(|c| !c.is_empty()) {
            ids.languages.insert(code.to_ascii_lowercase(), model.id);
        }
        if let Some(name) = model.name.clone() {
            ids.languages.entry(name).or_insert(model.id);
        }
        ids.languages.insert(model.id.to_string(), model.id);
    }
    for network in seed.networks {
        let (name, id) = upsert_network(db, network).await?;
        ids.networks.insert(name, id);
    }
    for location in seed.locations {
        let (name, id) = upsert_location(db, location).await?;
        ids.locations.insert(name, id);
    }
    for program_type in seed.program_types {
        let (name, id) = upsert_program_type(db, program_type).await?;
        ids.program_types.insert(name, id);
    }
    for program in seed.programs {
        let (name, id) = upsert_program(db, program, &ids).await?;
        ids.programs.insert(name, id);
    }
    for station in seed.stations {
        let (name, id) = upsert_station(db, station, &ids).await?;
        ids.stations.insert(name, id);
    }
    for block in seed.blocks {
        upsert_block(db, block, &ids).await?;
    }
    for slot in seed.scheduled_programs {
        upsert_scheduled_program(db, slot, &ids).await?;
    }

    info!(stations = ids.stations.len(), programs = ids.programs.len(), "seed imported");
    Ok(())
}

async fn upsert_language(
    db: &DatabaseConnection,
    language: SeedLanguage,
) -> Result<languages::Model, SeedError> {
    let existing = match (language.id, language.iso639_1.as_deref()) {
        (Some(id), _) => languages::Entity::find_by_id(id).one(db).await?,
        (None, Some(code)) => languages::Entity::find_by_iso639_1(code).one(db).await?,
        (None, None) => {
            languages::Entity::find()
                .filter(languages::Column::Name.eq(language.name.clone()))
                .one(db)
                .await?
        }
    };
    let code = language.iso639_1.map(|c| c.to_ascii_lowercase());

    let model = if let Some(existing) = existing {
        let mut active: languages::ActiveModel = existing.into();
        active.name = Set(Some(language.name));
        active.iso639_1 = Set(code);
        active.iso639_2 = Set(language.iso639_2);
        active.locale_code = Set(language.locale_code);
        active.update(db).await?
    } else {
        languages::ActiveModel {
            id: Set(language.id.unwrap_or_else(Uuid::new_v4)),
            name: Set(Some(language.name)),
            iso639_1: Set(code),
            iso639_2: Set(language.iso639_2),
            locale_code: Set(language.locale_code),
        }
        .insert(db)
        .await?
    };
    Ok(model)
}

async fn upsert_network(
    db: &DatabaseConnection,
    network: SeedNetwork,
) -> Result<(String, Uuid), SeedError> {
    let existing = if let Some(id) = network.id {
        networks::Entity::find_by_id(id).one(db).await?
    } else {
        networks::Entity::find()
            .filter(networks::Column::Name.eq(network.name.clone()))
            .one(db)
            .await?
    };

    let id = if let Some(existing) = existing {
        let mut active: networks::ActiveModel = existing.into();
        active.name = Set(network.name.clone());
        active.about = Set(network.about);
        active.update(db).await?.id
    } else {
        networks::ActiveModel {
            id: Set(network.id.unwrap_or_else(Uuid::new_v4)),
            name: Set(network.name.clone()),
            about: Set(network.about),
        }
        .insert(db)
        .await?
        .id
    };
    Ok((network.name, id))
}

async fn upsert_location(
    db: &DatabaseConnection,
    location: SeedLocation,
) -> Result<(String, Uuid), SeedError> {
    let existing = if let Some(id) = location.id {
        locations::Entity::find_by_id(id).one(db).await?
    } else {
        locations::Entity::find()
            .filter(locations::Column::Name.eq(location.name.clone()))
            .one(db)
            .await?
    };

    let is_new = existing.is_none();
    let mut active: locations::ActiveModel = match existing {
        Some(existing) => existing.into(),
        None => locations::ActiveModel {
            id: Set(location.id.unwrap_or_else(Uuid::new_v4)),
            ..Default::default()
        },
    };
    active.name = Set(Some(location.name.clone()));
    active.municipality = Set(location.municipality);
    active.district = Set(location.district);
    active.country = Set(location.country);
    active.address_line1 = Set(location.address_line1);
    active.address_line2 = Set(location.address_line2);
    active.latitude = Set(location.latitude);
    active.longitude = Set(location.longitude);

    let model = if is_new {
        active.insert(db).await?
    } else {
        active.update(db).await?
    };
    Ok((location.name, model.id))
}

async fn upsert_program_type(
    db: &DatabaseConnection,
    program_type: SeedProgramType,
) -> Result<(String, Uuid), SeedError> {
    let existing = if let Some(id) = program_type.id {
        program_types::Entity::find_by_id(id).one(db).await?
    } else {
        program_types::Entity::find()
            .filter(program_types::Column::Name.eq(program_type.name.clone()))
            .one(db)
            .await?
    };

    let id = if let Some(existing) = existing {
        let mut active: program_types::ActiveModel = existing.into();
        active.name = Set(program_type.name.clone());
        active.description = Set(program_type.description);
        active.definition = Set(program_type.definition);
        active.update(db).await?.id
    } else {
        program_types::ActiveModel {
            id: Set(program_type.id.unwrap_or_else(Uuid::new_v4)),
            name: Set(program_type.name.clone()),
            description: Set(program_type.description),
            definition: Set(program_type.definition),
        }
        .insert(db)
        .await?
        .id
    };
    Ok((program_type.name, id))
}

async fn upsert_program(
    db: &DatabaseConnection,
    program: SeedProgram,
    ids: &Ids,
) -> Result<(String, Uuid), SeedError> {
    let program_type_id = lookup(&ids.program_types, "program type", &program.program_type_name)?;
    let language_id = match program.language_code.as_deref() {
        Some(reference) => Some(ids.language(reference)?),
        None => None,
    };
    if let Some(rule) = program.update_recurrence.as_deref() {
        rule.parse::<RecurrenceRule>().map_err(ValidationError::from)?;
    }

    let existing = if let Some(id) = program.id {
        programs::Entity::find_by_id(id).one(db).await?
    } else {
        programs::Entity::find()
            .filter(programs::Column::Name.eq(program.name.clone()))
            .one(db)
            .await?
    };

    let id = if let Some(existing) = existing {
        let mut active: programs::ActiveModel = existing.into();
        active.name = Set(program.name.clone());
        active.duration = Set(program.duration);
        active.update_recurrence = Set(program.update_recurrence);
        active.language_id = Set(language_id);
        active.program_type_id = Set(program_type_id);
        active.update(db).await?.id
    } else {
        programs::ActiveModel {
            id: Set(program.id.unwrap_or_else(Uuid::new_v4)),
            name: Set(program.name.clone()),
            duration: Set(program.duration),
            update_recurrence: Set(program.update_recurrence),
            language_id: Set(language_id),
            program_type_id: Set(program_type_id),
        }
        .insert(db)
        .await?
        .id
    };
    Ok((program.name, id))
}

async fn upsert_station(
    db: &DatabaseConnection,
    station: SeedStation,
    ids: &Ids,
) -> Result<(String, Uuid), SeedError> {
    let network_id = match station.network_name.as_deref() {
        Some(name) => Some(lookup(&ids.networks, "network", name)?),
        None => None,
    };
    let location_id = match station.location_name.as_deref() {
        Some(name) => Some(lookup(&ids.locations, "location", name)?),
        None => None,
    };
    let language_ids = station
        .language_codes
        .iter()
        .map(|reference| ids.language(reference))
        .collect::<Result<Vec<_>, _>>()?;

    let existing = if let Some(id) = station.id {
        stations::Entity::find_by_id(id).one(db).await?
    } else {
        stations::Entity::find()
            .filter(stations::Column::Name.eq(station.name.clone()))
            .one(db)
            .await?
    };

    let id = if let Some(existing) = existing {
        let mut active: stations::ActiveModel = existing.into();
        active.name = Set(station.name.clone());
        active.about = Set(station.about);
        active.frequency = Set(station.frequency);
        if let Some(api_key) = station.api_key {
            active.api_key = Set(api_key);
        }
        active.network_id = Set(network_id);
        active.location_id = Set(location_id);
        let id = active.update(db).await?.id;
        directory::set_station_languages(db, id, &language_ids).await?;
        id
    } else {
        directory::create_station(
            db,
            NewStation {
                id: station.id,
                name: station.name.clone(),
                about: station.about,
                frequency: station.frequency,
                api_key: station.api_key,
                network_id,
                location_id,
                language_ids,
                ..Default::default()
            },
        )
        .await?
        .id
    };
    Ok((station.name, id))
}

async fn upsert_block(db: &DatabaseConnection, block: SeedBlock, ids: &Ids) -> Result<(), SeedError> {
    let station_id = lookup(&ids.stations, "station", &block.station_name)?;
    let existing = scheduled_blocks::Entity::find()
        .filter(scheduled_blocks::Column::StationId.eq(station_id))
        .filter(scheduled_blocks::Column::Name.eq(block.name.clone()))
        .one(db)
        .await?;

    let new = NewScheduledBlock {
        station_id,
        name: block.name,
        recurrence: block.recurrence,
        start_time: block.start_time,
        end_time: block.end_time,
    };

    if let Some(existing) = existing {
        new.validate()?;
        let mut active: scheduled_blocks::ActiveModel = existing.into();
        active.recurrence = Set(new.recurrence);
        active.start_time = Set(new.start_time);
        active.end_time = Set(new.end_time);
        active.update(db).await?;
    } else {
        schedule::add_scheduled_block(db, new).await?;
    }
    Ok(())
}

async fn upsert_scheduled_program(
    db: &DatabaseConnection,
    slot: SeedScheduledProgram,
    ids: &Ids,
) -> Result<(), SeedError> {
    let station_id = lookup(&ids.stations, "station", &slot.station_name)?;
    let program_id = lookup(&ids.programs, "program", &slot.program_name)?;

    let existing = scheduled_programs::Entity::find()
        .filter(scheduled_programs::Column::StationId.eq(station_id))
        .filter(scheduled_programs::Column::ProgramId.eq(program_id))
        .filter(scheduled_programs::Column::Start.eq(slot.start))
        .one(db)
        .await?;

    if let Some(existing) = existing {
        if slot.end <= slot.start {
            return Err(ValidationError::empty_window(slot.start, slot.end).into());
        }
        let mut active: scheduled_programs::ActiveModel = existing.into();
        active.end = Set(slot.end);
        active.update(db).await?;
    } else {
        schedule::add_scheduled_program(
            db,
            NewScheduledProgram {
                station_id,
                program_id,
                start: slot.start,
                end: slot.end,
            },
        )
        .await?;
    }
    Ok(())
}

/// Reads the whole database into a seed document, sections sorted by name.
pub async fn export(db: &DatabaseConnection) -> Result<SeedData, Error> {
    let language_rows = languages::Entity::find().all(db).await?;
    let language_refs: HashMap<Uuid, String> = language_rows
        .iter()
        .map(|l| (l.id, language_ref(l)))
        .collect();
    let mut languages_out: Vec<SeedLanguage> = language_rows
        .into_iter()
        .map(|l| SeedLanguage {
            id: Some(l.id),
            name: l.name.unwrap_or_default(),
            iso639_1: l.iso639_1,
            iso639_2: l.iso639_2,
            locale_code: l.locale_code,
        })
        .collect();
    languages_out.sort_by(|a, b| a.name.cmp(&b.name));

    let mut networks_out: Vec<SeedNetwork> = networks::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|n| SeedNetwork {
            id: Some(n.id),
            name: n.name,
            about: n.about,
        })
        .collect();
    networks_out.sort_by(|a, b| a.name.cmp(&b.name));

    let mut locations_out: Vec<SeedLocation> = locations::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|l| SeedLocation {
            id: Some(l.id),
            name: l.name.unwrap_or_default(),
            municipality: l.municipality,
            district: l.district,
            country: l.country,
            address_line1: l.address_line1,
            address_line2: l.address_line2,
            latitude: l.latitude,
            longitude: l.longitude,
        })
        .collect();
    locations_out.sort_by(|a, b| a.name.cmp(&b.name));

    let program_type_rows = program_types::Entity::find().all(db).await?;
    let program_type_names: HashMap<Uuid, String> = program_type_rows
        .iter()
        .map(|t| (t.id, t.name.clone()))
        .collect();
    let mut program_types_out: Vec<SeedProgramType> = program_type_rows
        .into_iter()
        .map(|t| SeedProgramType {
            id: Some(t.id),
            name: t.name,
            description: t.description,
            definition: t.definition,
        })
        .collect();
    program_types_out.sort_by(|a, b| a.name.cmp(&b.name));

    let network_names: HashMap<Uuid, String> = networks::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|n| (n.id, n.name))
        .collect();
    let location_names: HashMap<Uuid, String> = locations::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .filter_map(|l| Some((l.id, l.name?)))
        .collect();

    let program_rows = programs::Entity::find().all(db).await?;
    let program_names: HashMap<Uuid, String> =
        program_rows.iter().map(|p| (p.id, p.name.clone())).collect();
    let mut programs_out: Vec<SeedProgram> = program_rows
        .into_iter()
        .map(|p| SeedProgram {
            id: Some(p.id),
            name: p.name,
            duration: p.duration,
            update_recurrence: p.update_recurrence,
            language_code: p.language_id.and_then(|id| language_refs.get(&id).cloned()),
            program_type_name: program_type_names
                .get(&p.program_type_id)
                .cloned()
                .unwrap_or_default(),
        })
        .collect();
    programs_out.sort_by(|a, b| a.name.cmp(&b.name));

    let mut station_names: HashMap<Uuid, String> = HashMap::new();
    let mut stations_out = Vec::new();
    for s in stations::Entity::find().all(db).await? {
        let mut codes: Vec<String> = s.languages(db).await?.iter().map(language_ref).collect();
        codes.sort();
        station_names.insert(s.id, s.name.clone());
        stations_out.push(SeedStation {
            id: Some(s.id),
            name: s.name,
            about: s.about,
            frequency: s.frequency,
            api_key: Some(s.api_key),
            network_name: s.network_id.and_then(|id| network_names.get(&id).cloned()),
            location_name: s.location_id.and_then(|id| location_names.get(&id).cloned()),
            language_codes: codes,
        });
    }
    stations_out.sort_by(|a, b| a.name.cmp(&b.name));

    let blocks_out: Vec<SeedBlock> = scheduled_blocks::Entity::find()
        .order_by_asc(scheduled_blocks::Column::StartTime)
        .order_by_asc(scheduled_blocks::Column::Name)
        .all(db)
        .await?
        .into_iter()
        .filter_map(|b| {
            Some(SeedBlock {
                station_name: station_names.get(&b.station_id)?.clone(),
                name: b.name,
                recurrence: b.recurrence,
                start_time: b.start_time,
                end_time: b.end_time,
            })
        })
        .collect();

    let scheduled_out: Vec<SeedScheduledProgram> = scheduled_programs::Entity::find()
        .order_by_asc(scheduled_programs::Column::Start)
        .order_by_asc(scheduled_programs::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .filter_map(|slot| {
            Some(SeedScheduledProgram {
                station_name: station_names.get(&slot.station_id)?.clone(),
                program_name: program_names.get(&slot.program_id)?.clone(),
                start: slot.start,
                end: slot.end,
            })
        })
        .collect();

    Ok(SeedData {
        languages: languages_out,
        networks: networks_out,
        locations: locations_out,
        program_types: program_types_out,
        programs: programs_out,
        stations: stations_out,
        blocks: blocks_out,
        scheduled_programs: scheduled_out,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup_db;
    use chrono::TimeZone;

    fn document() -> SeedData {
        serde_json::from_str(include_str!("../seed_data.json")).unwrap()
    }

    #[tokio::test]
    async fn export_then_import_keeps_keys_and_languages() {
        let source = setup_db().await;
        let mut seed = document();
        // A language known only by name.
        seed.languages.push(SeedLanguage {
            id: None,
            name: "Lugbara".into(),
            iso639_1: None,
            iso639_2: Some("lgg".into()),
            locale_code: None,
        });
        seed.stations[0].language_codes.push("Lugbara".into());
        seed.programs[0].language_code = Some("Lugbara".into());
        import(&source, seed).await.unwrap();

        let exported = export(&source).await.unwrap();
        let station = &exported.stations[0];
        let api_key = station.api_key.clone().unwrap();
        assert_eq!(station.language_codes, vec!["Lugbara", "en", "lg"]);
        let farmers = exported.programs.iter().find(|p| p.name == "Farmers Hour").unwrap();
        assert_eq!(farmers.language_code.as_deref(), Some("Lugbara"));

        let target = setup_db().await;
        import(&target, exported.clone()).await.unwrap();
        let restored = stations::Entity::find().one(&target).await.unwrap().unwrap();
        assert_eq!(restored.api_key, api_key);
        assert_eq!(restored.languages(&target).await.unwrap().len(), 3);

        assert_eq!(export(&target).await.unwrap(), exported);
    }

    #[tokio::test]
    async fn reimport_updates_in_place() {
        let db = setup_db().await;
        import(&db, document()).await.unwrap();

        let mut seed = document();
        seed.locations[0].district = Some("Central".into());
        seed.scheduled_programs[0].end = Utc.with_ymd_and_hms(2024, 6, 3, 7, 5, 0).unwrap();
        import(&db, seed).await.unwrap();

        let all = locations::Entity::find().all(&db).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].district.as_deref(), Some("Central"));
        assert!(all[0].modified_date.is_some());
        assert_eq!(stations::Entity::find().all(&db).await.unwrap().len(), 1);
        assert_eq!(scheduled_blocks::Entity::find().all(&db).await.unwrap().len(), 2);
        let slots = scheduled_programs::Entity::find().all(&db).await.unwrap();
        assert_eq!(slots.len(), 2);
        assert!(slots.iter().any(|s| s.end == Utc.with_ymd_and_hms(2024, 6, 3, 7, 5, 0).unwrap()));
    }

    #[tokio::test]
    async fn unknown_references_are_reported() {
        let db = setup_db().await;
        let mut seed = document();
        seed.stations[0].language_codes.push("xx".into());
        let err = import(&db, seed).await.unwrap_err();
        assert!(matches!(
            err,
            SeedError::UnknownReference { kind: "language", ref name } if name == "xx"
        ));
    }
}
