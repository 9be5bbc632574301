use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProgramTypes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ProgramTypes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(ProgramTypes::Name).string().not_null())
                    .col(ColumnDef::new(ProgramTypes::Description).text().not_null())
                    .col(ColumnDef::new(ProgramTypes::Definition).json_binary().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Programs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Programs::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Programs::Name).string().not_null())
                    .col(ColumnDef::new(Programs::Duration).time())
                    .col(ColumnDef::new(Programs::UpdateRecurrence).text())
                    .col(ColumnDef::new(Programs::LanguageId).uuid())
                    .col(ColumnDef::new(Programs::ProgramTypeId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-program-language_id")
                            .from(Programs::Table, Programs::LanguageId)
                            .to(Languages::Table, Languages::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-program-program_type_id")
                            .from(Programs::Table, Programs::ProgramTypeId)
                            .to(ProgramTypes::Table, ProgramTypes::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Recordings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Recordings::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Recordings::Url).string_len(160))
                    .col(ColumnDef::new(Recordings::LocalFile).string())
                    .col(
                        ColumnDef::new(Recordings::CreatedTime)
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
                    .table(Episodes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Episodes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Episodes::ProgramId).uuid().not_null())
                    .col(ColumnDef::new(Episodes::RecordingId).uuid())
                    .col(
                        ColumnDef::new(Episodes::CreatedTime)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-episode-program_id")
                            .from(Episodes::Table, Episodes::ProgramId)
                            .to(Programs::Table, Programs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-episode-recording_id")
                            .from(Episodes::Table, Episodes::RecordingId)
                            .to(Recordings::Table, Recordings::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ScheduledBlocks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScheduledBlocks::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ScheduledBlocks::StationId).uuid().not_null())
                    .col(ColumnDef::new(ScheduledBlocks::Name).string().not_null())
                    .col(ColumnDef::new(ScheduledBlocks::Recurrence).text())
                    .col(ColumnDef::new(ScheduledBlocks::StartTime).time().not_null())
                    .col(ColumnDef::new(ScheduledBlocks::EndTime).time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-scheduled_block-station_id")
                            .from(ScheduledBlocks::Table, ScheduledBlocks::StationId)
                            .to(Stations::Table, Stations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ScheduledPrograms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScheduledPrograms::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ScheduledPrograms::StationId).uuid().not_null())
                    .col(ColumnDef::new(ScheduledPrograms::ProgramId).uuid().not_null())
                    .col(
                        ColumnDef::new(ScheduledPrograms::Start)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScheduledPrograms::End)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-scheduled_program-station_id")
                            .from(ScheduledPrograms::Table, ScheduledPrograms::StationId)
                            .to(Stations::Table, Stations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-scheduled_program-program_id")
                            .from(ScheduledPrograms::Table, ScheduledPrograms::ProgramId)
                            .to(Programs::Table, Programs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PaddingContents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PaddingContents::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PaddingContents::RecordingId).uuid().not_null())
                    .col(ColumnDef::new(PaddingContents::BlockId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-padding_content-recording_id")
                            .from(PaddingContents::Table, PaddingContents::RecordingId)
                            .to(Recordings::Table, Recordings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-padding_content-block_id")
                            .from(PaddingContents::Table, PaddingContents::BlockId)
                            .to(ScheduledBlocks::Table, ScheduledBlocks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(NetworkPaddings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(NetworkPaddings::NetworkId).uuid().not_null())
                    .col(
                        ColumnDef::new(NetworkPaddings::PaddingContentId)
                            .uuid()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(NetworkPaddings::NetworkId)
                            .col(NetworkPaddings::PaddingContentId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-network_padding-network_id")
                            .from(NetworkPaddings::Table, NetworkPaddings::NetworkId)
                            .to(Networks::Table, Networks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-network_padding-padding_content_id")
                            .from(NetworkPaddings::Table, NetworkPaddings::PaddingContentId)
                            .to(PaddingContents::Table, PaddingContents::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NetworkPaddings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PaddingContents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ScheduledPrograms::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ScheduledBlocks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Episodes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Recordings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Programs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProgramTypes::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Iden)]
enum Languages {
    Table,
    Id,
}

#[derive(Iden)]
enum Networks {
    Table,
    Id,
}

#[derive(Iden)]
enum Stations {
    Table,
    Id,
}

#[derive(Iden)]
enum ProgramTypes {
    Table,
    Id,
    Name,
    Description,
    Definition,
}

#[derive(Iden)]
enum Programs {
    Table,
    Id,
    Name,
    Duration,
    UpdateRecurrence,
    LanguageId,
    ProgramTypeId,
}

#[derive(Iden)]
enum Recordings {
    Table,
    Id,
    Url,
    LocalFile,
    CreatedTime,
}

#[derive(Iden)]
enum Episodes {
    Table,
    Id,
    ProgramId,
    RecordingId,
    CreatedTime,
}

#[derive(Iden)]
enum ScheduledBlocks {
    Table,
    Id,
    StationId,
    Name,
    Recurrence,
    StartTime,
    EndTime,
}

#[derive(Iden)]
enum ScheduledPrograms {
    Table,
    Id,
    StationId,
    ProgramId,
    Start,
    End,
}

#[derive(Iden)]
enum PaddingContents {
    Table,
    Id,
    RecordingId,
    BlockId,
}

#[derive(Iden)]
enum NetworkPaddings {
    Table,
    NetworkId,
    PaddingContentId,
}
