//! Secondary indexes for the `partner` table.
//! The permalink is the human-readable lookup key and must stay unique.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_partner_permalink")
                    .table(Partner::Table)
                    .col(Partner::Permalink)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_partner_permalink").table(Partner::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Partner { Table, Permalink }
