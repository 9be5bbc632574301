use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Calls::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Calls::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Calls::CallUuid).string_len(100))
                    .col(ColumnDef::new(Calls::StartTime).timestamp_with_time_zone())
                    .col(ColumnDef::new(Calls::EndTime).timestamp_with_time_zone())
                    .col(ColumnDef::new(Calls::FromPhoneNumberId).uuid())
                    .col(ColumnDef::new(Calls::ToPhoneNumberId).uuid())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-call-from_phone_number_id")
                            .from(Calls::Table, Calls::FromPhoneNumberId)
                            .to(PhoneNumbers::Table, PhoneNumbers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-call-to_phone_number_id")
                            .from(Calls::Table, Calls::ToPhoneNumberId)
                            .to(PhoneNumbers::Table, PhoneNumbers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Messages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Messages::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Messages::MessageUuid).string_len(100))
                    .col(ColumnDef::new(Messages::SendTime).timestamp_with_time_zone())
                    .col(ColumnDef::new(Messages::Text).string_len(200))
                    .col(ColumnDef::new(Messages::FromPhoneNumberId).uuid())
                    .col(ColumnDef::new(Messages::ToPhoneNumberId).uuid())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-message-from_phone_number_id")
                            .from(Messages::Table, Messages::FromPhoneNumberId)
                            .to(PhoneNumbers::Table, PhoneNumbers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-message-to_phone_number_id")
                            .from(Messages::Table, Messages::ToPhoneNumberId)
                            .to(PhoneNumbers::Table, PhoneNumbers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Messages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Calls::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Iden)]
enum PhoneNumbers {
    Table,
    Id,
}

#[derive(Iden)]
enum Calls {
    Table,
    Id,
    CallUuid,
    StartTime,
    EndTime,
    FromPhoneNumberId,
    ToPhoneNumberId,
}

#[derive(Iden)]
enum Messages {
    Table,
    Id,
    MessageUuid,
    SendTime,
    Text,
    FromPhoneNumberId,
    ToPhoneNumberId,
}
