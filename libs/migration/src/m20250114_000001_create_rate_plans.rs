use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RatePlans::Table)
                    .if_not_exists()
                    .col(pk_uuid(RatePlans::Id))
                    .col(json(RatePlans::SystemCapacity))
                    .col(json(RatePlans::MonthlyCost))
                    .col(json(RatePlans::EnvironmentSizeDefinitions))
                    .col(json(RatePlans::Fees))
                    .col(json(RatePlans::CloudCosts))
                    .col(
                        timestamp_with_time_zone(RatePlans::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(uuid_null(RatePlans::UpdatedBy))
                    .to_owned(),
            )
            .await?;

        // The authoritative plan is the latest by update time
        manager
            .create_index(
                Index::create()
                    .name("idx_rate_plans_updated_at")
                    .table(RatePlans::Table)
                    .col(RatePlans::UpdatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RatePlans::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum RatePlans {
    Table,
    Id,
    SystemCapacity,
    MonthlyCost,
    EnvironmentSizeDefinitions,
    Fees,
    CloudCosts,
    UpdatedAt,
    UpdatedBy,
}
