use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tutorials::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tutorials::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Tutorials::Title).string().not_null())
                    .col(ColumnDef::new(Tutorials::Description).text().null())
                    .col(
                        ColumnDef::new(Tutorials::Published)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Tutorials::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Tutorials::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Backs the published listing.
        manager
            .create_index(
                Index::create()
                    .name("idx_tutorials_published")
                    .table(Tutorials::Table)
                    .col(Tutorials::Published)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tutorials::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Tutorials {
    Table,
    Id,
    Title,
    Description,
    Published,
    CreatedAt,
    UpdatedAt,
}
