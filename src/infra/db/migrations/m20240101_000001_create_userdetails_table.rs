//! Migration: Create the userdetails table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Userdetails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Userdetails::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Userdetails::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Userdetails::Password).string().not_null())
                    .col(ColumnDef::new(Userdetails::Address).string().not_null())
                    .col(ColumnDef::new(Userdetails::Pincode).big_integer().not_null())
                    .col(ColumnDef::new(Userdetails::PhoneNumber).big_integer().not_null())
                    .col(ColumnDef::new(Userdetails::Mail).string().not_null())
                    .col(
                        ColumnDef::new(Userdetails::Status)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Userdetails::IsAdmin)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Userdetails::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Userdetails::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Userdetails::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Userdetails {
    Table,
    Id,
    Username,
    Password,
    Address,
    Pincode,
    PhoneNumber,
    Mail,
    Status,
    #[iden = "isadmin"]
    IsAdmin,
    CreatedAt,
    UpdatedAt,
}
