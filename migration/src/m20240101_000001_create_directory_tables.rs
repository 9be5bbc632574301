use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Username).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Email).string())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Locations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Locations::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Locations::Name).string())
                    .col(ColumnDef::new(Locations::Municipality).string())
                    .col(ColumnDef::new(Locations::District).string())
                    .col(ColumnDef::new(Locations::Country).string())
                    .col(ColumnDef::new(Locations::AddressLine1).string())
                    .col(ColumnDef::new(Locations::AddressLine2).string())
                    .col(ColumnDef::new(Locations::Latitude).double())
                    .col(ColumnDef::new(Locations::Longitude).double())
                    .col(ColumnDef::new(Locations::ModifiedDate).date())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Languages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Languages::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Languages::Name).string())
                    .col(ColumnDef::new(Languages::Iso6391).string_len(2))
                    .col(ColumnDef::new(Languages::Iso6392).string_len(3))
                    .col(ColumnDef::new(Languages::LocaleCode).string_len(10))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PhoneNumbers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PhoneNumbers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(PhoneNumbers::NumberType).string_len(30))
                    .col(ColumnDef::new(PhoneNumbers::Carrier).string())
                    .col(ColumnDef::new(PhoneNumbers::CountryCode).string_len(3))
                    .col(ColumnDef::new(PhoneNumbers::AreaCode).string_len(8))
                    .col(ColumnDef::new(PhoneNumbers::Number).string_len(20))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Networks::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Networks::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Networks::Name).string().not_null())
                    .col(ColumnDef::new(Networks::About).text())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(NetworkAdmins::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(NetworkAdmins::NetworkId).uuid().not_null())
                    .col(ColumnDef::new(NetworkAdmins::UserId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(NetworkAdmins::NetworkId)
                            .col(NetworkAdmins::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-network_admin-network_id")
                            .from(NetworkAdmins::Table, NetworkAdmins::NetworkId)
                            .to(Networks::Table, Networks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-network_admin-user_id")
                            .from(NetworkAdmins::Table, NetworkAdmins::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NetworkAdmins::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Networks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PhoneNumbers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Languages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Locations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    CreatedAt,
}

#[derive(Iden)]
enum Locations {
    Table,
    Id,
    Name,
    Municipality,
    District,
    Country,
    #[iden = "address_line1"]
    AddressLine1,
    #[iden = "address_line2"]
    AddressLine2,
    Latitude,
    Longitude,
    ModifiedDate,
}

#[derive(Iden)]
enum Languages {
    Table,
    Id,
    Name,
    #[iden = "iso639_1"]
    Iso6391,
    #[iden = "iso639_2"]
    Iso6392,
    LocaleCode,
}

#[derive(Iden)]
enum PhoneNumbers {
    Table,
    Id,
    NumberType,
    Carrier,
    CountryCode,
    AreaCode,
    Number,
}

#[derive(Iden)]
enum Networks {
    Table,
    Id,
    Name,
    About,
}

#[derive(Iden)]
enum NetworkAdmins {
    Table,
    NetworkId,
    UserId,
}
