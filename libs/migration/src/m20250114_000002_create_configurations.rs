use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Configurations::Table)
                    .if_not_exists()
                    .col(pk_uuid(Configurations::Id))
                    .col(string(Configurations::Name))
                    .col(string_null(Configurations::Description))
                    .col(uuid(Configurations::Owner))
                    .col(boolean(Configurations::IsPublic).default(false))
                    .col(
                        ColumnDef::new(Configurations::ShareToken)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(json(Configurations::CurrentVersion))
                    .col(json(Configurations::Versions))
                    .col(
                        timestamp_with_time_zone(Configurations::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Configurations::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_configurations_owner")
                    .table(Configurations::Table)
                    .col(Configurations::Owner)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_configurations_is_public")
                    .table(Configurations::Table)
                    .col(Configurations::IsPublic)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Configurations::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Configurations {
    Table,
    Id,
    Name,
    Description,
    Owner,
    IsPublic,
    ShareToken,
    CurrentVersion,
    Versions,
    CreatedAt,
    UpdatedAt,
}
