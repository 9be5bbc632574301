use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Stations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Stations::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Stations::Name).string().not_null())
                    .col(ColumnDef::new(Stations::About).text())
                    .col(ColumnDef::new(Stations::Frequency).double())
                    .col(ColumnDef::new(Stations::ApiKey).string().not_null().unique_key())
                    .col(ColumnDef::new(Stations::OwnerId).uuid())
                    .col(ColumnDef::new(Stations::NetworkId).uuid())
                    .col(ColumnDef::new(Stations::LocationId).uuid())
                    .col(ColumnDef::new(Stations::CloudPhoneId).uuid().unique_key())
                    .col(ColumnDef::new(Stations::TransmitterPhoneId).uuid().unique_key())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-station-owner_id")
                            .from(Stations::Table, Stations::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-station-network_id")
                            .from(Stations::Table, Stations::NetworkId)
                            .to(Networks::Table, Networks::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-station-location_id")
                            .from(Stations::Table, Stations::LocationId)
                            .to(Locations::Table, Locations::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-station-cloud_phone_id")
                            .from(Stations::Table, Stations::CloudPhoneId)
                            .to(PhoneNumbers::Table, PhoneNumbers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-station-transmitter_phone_id")
                            .from(Stations::Table, Stations::TransmitterPhoneId)
                            .to(PhoneNumbers::Table, PhoneNumbers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StationLanguages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(StationLanguages::StationId).uuid().not_null())
                    .col(ColumnDef::new(StationLanguages::LanguageId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(StationLanguages::StationId)
                            .col(StationLanguages::LanguageId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-station_language-station_id")
                            .from(StationLanguages::Table, StationLanguages::StationId)
                            .to(Stations::Table, Stations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-station_language-language_id")
                            .from(StationLanguages::Table, StationLanguages::LanguageId)
                            .to(Languages::Table, Languages::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StationAnalytics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StationAnalytics::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StationAnalytics::StationId).uuid().not_null())
                    .col(
                        ColumnDef::new(StationAnalytics::CreatedTime)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(StationAnalytics::BatteryLevel).double())
                    .col(ColumnDef::new(StationAnalytics::CpuLoad).double())
                    .col(ColumnDef::new(StationAnalytics::MemoryUtilization).double())
                    .col(ColumnDef::new(StationAnalytics::StorageUsage).double())
                    .col(ColumnDef::new(StationAnalytics::GsmConnectivity).double())
                    .col(ColumnDef::new(StationAnalytics::HeadphonePlug).boolean())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-station_analytic-station_id")
                            .from(StationAnalytics::Table, StationAnalytics::StationId)
                            .to(Stations::Table, Stations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(People::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(People::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(People::Title).string_len(8))
                    .col(ColumnDef::new(People::FirstName).string())
                    .col(ColumnDef::new(People::MiddleName).string())
                    .col(ColumnDef::new(People::LastName).string())
                    .col(ColumnDef::new(People::Email).string())
                    .col(ColumnDef::new(People::AdditionalContact).string())
                    .col(ColumnDef::new(People::PhoneId).uuid().unique_key())
                    .col(ColumnDef::new(People::GenderCode).integer())
                    .col(ColumnDef::new(People::PrivacyCode).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-person-phone_id")
                            .from(People::Table, People::PhoneId)
                            .to(PhoneNumbers::Table, PhoneNumbers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PersonLanguages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PersonLanguages::PersonId).uuid().not_null())
                    .col(ColumnDef::new(PersonLanguages::LanguageId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(PersonLanguages::PersonId)
                            .col(PersonLanguages::LanguageId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-person_language-person_id")
                            .from(PersonLanguages::Table, PersonLanguages::PersonId)
                            .to(People::Table, People::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-person_language-language_id")
                            .from(PersonLanguages::Table, PersonLanguages::LanguageId)
                            .to(Languages::Table, Languages::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Roles::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Roles::Name).string())
                    .col(ColumnDef::new(Roles::PersonId).uuid().not_null())
                    .col(ColumnDef::new(Roles::StationId).uuid())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-role-person_id")
                            .from(Roles::Table, Roles::PersonId)
                            .to(People::Table, People::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-role-station_id")
                            .from(Roles::Table, Roles::StationId)
                            .to(Stations::Table, Stations::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Roles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PersonLanguages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(People::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StationAnalytics::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StationLanguages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Stations::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Networks {
    Table,
    Id,
}

#[derive(Iden)]
enum Locations {
    Table,
    Id,
}

#[derive(Iden)]
enum Languages {
    Table,
    Id,
}

#[derive(Iden)]
enum PhoneNumbers {
    Table,
    Id,
}

#[derive(Iden)]
enum Stations {
    Table,
    Id,
    Name,
    About,
    Frequency,
    ApiKey,
    OwnerId,
    NetworkId,
    LocationId,
    CloudPhoneId,
    TransmitterPhoneId,
}

#[derive(Iden)]
enum StationLanguages {
    Table,
    StationId,
    LanguageId,
}

#[derive(Iden)]
enum StationAnalytics {
    Table,
    Id,
    StationId,
    CreatedTime,
    BatteryLevel,
    CpuLoad,
    MemoryUtilization,
    StorageUsage,
    GsmConnectivity,
    HeadphonePlug,
}

#[derive(Iden)]
enum People {
    Table,
    Id,
    Title,
    FirstName,
    MiddleName,
    LastName,
    Email,
    AdditionalContact,
    PhoneId,
    GenderCode,
    PrivacyCode,
}

#[derive(Iden)]
enum PersonLanguages {
    Table,
    PersonId,
    LanguageId,
}

#[derive(Iden)]
enum Roles {
    Table,
    Id,
    Name,
    PersonId,
    StationId,
}
