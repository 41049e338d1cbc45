//! Create `partner` table.
//! Stores partner organizations with branding metadata and the
//! serialized website link list.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Partner::Table)
                    .if_not_exists()
                    .col(big_integer(Partner::Id).auto_increment().primary_key())
                    .col(string_len_null(Partner::Name, 150))
                    .col(string_len_null(Partner::PrimaryHashtag, 200))
                    .col(string_len_null(Partner::SecondaryHashtag, 200))
                    .col(string_len_null(Partner::LogoUrl, 500))
                    .col(string_len_null(Partner::LinkMeta, 300))
                    .col(string_len_null(Partner::LinkX, 300))
                    .col(string_len_null(Partner::LinkInstagram, 300))
                    .col(text_null(Partner::CurrentProjects))
                    .col(string_len_null(Partner::Permalink, 300))
                    .col(text(Partner::WebsiteLinks))
                    .col(timestamp_with_time_zone(Partner::CreatedAt))
                    .col(timestamp_with_time_zone(Partner::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Partner::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Partner {
    Table,
    Id,
    Name,
    PrimaryHashtag,
    SecondaryHashtag,
    LogoUrl,
    LinkMeta,
    LinkX,
    LinkInstagram,
    CurrentProjects,
    Permalink,
    WebsiteLinks,
    CreatedAt,
    UpdatedAt,
}
