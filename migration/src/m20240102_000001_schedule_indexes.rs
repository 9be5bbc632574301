use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx-scheduled_program-station_id-start")
                    .table(ScheduledPrograms::Table)
                    .col(ScheduledPrograms::StationId)
                    .col(ScheduledPrograms::Start)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-scheduled_program-station_id-end")
                    .table(ScheduledPrograms::Table)
                    .col(ScheduledPrograms::StationId)
                    .col(ScheduledPrograms::End)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-scheduled_block-station_id-start_time")
                    .table(ScheduledBlocks::Table)
                    .col(ScheduledBlocks::StationId)
                    .col(ScheduledBlocks::StartTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-station_analytic-station_id-created_time")
                    .table(StationAnalytics::Table)
                    .col(StationAnalytics::StationId)
                    .col(StationAnalytics::CreatedTime)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx-station_analytic-station_id-created_time")
                    .table(StationAnalytics::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx-scheduled_block-station_id-start_time")
                    .table(ScheduledBlocks::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx-scheduled_program-station_id-end")
                    .table(ScheduledPrograms::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx-scheduled_program-station_id-start")
                    .table(ScheduledPrograms::Table)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }
}

#[derive(Iden)]
enum ScheduledPrograms {
    Table,
    StationId,
    Start,
    End,
}

#[derive(Iden)]
enum ScheduledBlocks {
    Table,
    StationId,
    StartTime,
}

#[derive(Iden)]
enum StationAnalytics {
    Table,
    StationId,
    CreatedTime,
}
