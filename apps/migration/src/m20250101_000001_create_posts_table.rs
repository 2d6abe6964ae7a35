use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Posts {
    Table,
    PostId,
    UserId,
    PostType,
    Content,
    Category,
    Embedding,
    IsVisible,
    CreatedAt,
}

const IDX_TYPE_CREATED_AT: &str = "idx_posts_post_type_created_at";
const IDX_USER_CREATED_AT: &str = "idx_posts_user_id_created_at";

fn create_posts() -> TableCreateStatement {
    Table::create()
        .table(Posts::Table)
        .if_not_exists()
        .col(ColumnDef::new(Posts::PostId).uuid().not_null().primary_key())
        .col(ColumnDef::new(Posts::UserId).string().not_null())
        .col(ColumnDef::new(Posts::PostType).string_len(32).not_null())
        .col(ColumnDef::new(Posts::Content).text().not_null())
        .col(ColumnDef::new(Posts::Category).string_len(32).not_null())
        .col(
            ColumnDef::new(Posts::Embedding)
                .json_binary()
                .not_null()
                .default(Expr::cust("'[]'::jsonb")),
        )
        .col(
            ColumnDef::new(Posts::IsVisible)
                .boolean()
                .not_null()
                .default(true),
        )
        .col(
            ColumnDef::new(Posts::CreatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .to_owned()
}

/// Backs listing by type in recency order.
fn index_by_type() -> IndexCreateStatement {
    Index::create()
        .if_not_exists()
        .name(IDX_TYPE_CREATED_AT)
        .table(Posts::Table)
        .col(Posts::PostType)
        .col(Posts::CreatedAt)
        .to_owned()
}

/// Backs "my posts".
fn index_by_user() -> IndexCreateStatement {
    Index::create()
        .if_not_exists()
        .name(IDX_USER_CREATED_AT)
        .table(Posts::Table)
        .col(Posts::UserId)
        .col(Posts::CreatedAt)
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(create_posts()).await?;
        manager.create_index(index_by_type()).await?;
        manager.create_index(index_by_user()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await
    }
}
