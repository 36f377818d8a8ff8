use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sections::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sections::Name).string().not_null())
                    .col(ColumnDef::new(Sections::Description).string().null())
                    .col(ColumnDef::new(Sections::UserId).integer().null())
                    .col(ColumnDef::new(Sections::CreatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sections_user")
                            .from(Sections::Table, Sections::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sections_name_user")
                    .table(Sections::Table)
                    .col(Sections::Name)
                    .col(Sections::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(NodeTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NodeTypes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(NodeTypes::Name).string().not_null())
                    .col(ColumnDef::new(NodeTypes::Description).string().null())
                    .col(ColumnDef::new(NodeTypes::SectionId).integer().not_null())
                    .col(ColumnDef::new(NodeTypes::UserId).integer().null())
                    .col(ColumnDef::new(NodeTypes::CreatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_node_types_section")
                            .from(NodeTypes::Table, NodeTypes::SectionId)
                            .to(Sections::Table, Sections::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_node_types_user")
                            .from(NodeTypes::Table, NodeTypes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_node_types_name_section")
                    .table(NodeTypes::Table)
                    .col(NodeTypes::Name)
                    .col(NodeTypes::SectionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Nodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Nodes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Nodes::Name).string().not_null())
                    .col(ColumnDef::new(Nodes::Description).string().null())
                    .col(ColumnDef::new(Nodes::TypeId).integer().not_null())
                    .col(ColumnDef::new(Nodes::UserId).integer().null())
                    .col(ColumnDef::new(Nodes::CreatedAt).timestamp_with_time_zone().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_nodes_type")
                            .from(Nodes::Table, Nodes::TypeId)
                            .to(NodeTypes::Table, NodeTypes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_nodes_user")
                            .from(Nodes::Table, Nodes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_nodes_name_type")
                    .table(Nodes::Table)
                    .col(Nodes::Name)
                    .col(Nodes::TypeId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SectionNode::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(SectionNode::SectionId).integer().not_null())
                    .col(ColumnDef::new(SectionNode::NodeId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .name("unique_section_node")
                            .col(SectionNode::SectionId)
                            .col(SectionNode::NodeId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_section_node_section")
                            .from(SectionNode::Table, SectionNode::SectionId)
                            .to(Sections::Table, Sections::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_section_node_node")
                            .from(SectionNode::Table, SectionNode::NodeId)
                            .to(Nodes::Table, Nodes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(NodeNode::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(NodeNode::Node1Id).integer().not_null())
                    .col(ColumnDef::new(NodeNode::Node2Id).integer().not_null())
                    .col(ColumnDef::new(NodeNode::UserId).integer().null())
                    .primary_key(
                        Index::create()
                            .name("unique_node_node")
                            .col(NodeNode::Node1Id)
                            .col(NodeNode::Node2Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_node_node_source")
                            .from(NodeNode::Table, NodeNode::Node1Id)
                            .to(Nodes::Table, Nodes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_node_node_target")
                            .from(NodeNode::Table, NodeNode::Node2Id)
                            .to(Nodes::Table, Nodes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_node_node_user")
                            .from(NodeNode::Table, NodeNode::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NodeNode::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SectionNode::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Nodes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(NodeTypes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sections::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Sections {
    Table,
    Id,
    Name,
    Description,
    UserId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum NodeTypes {
    Table,
    Id,
    Name,
    Description,
    SectionId,
    UserId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Nodes {
    Table,
    Id,
    Name,
    Description,
    TypeId,
    UserId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SectionNode {
    Table,
    SectionId,
    NodeId,
}

#[derive(DeriveIden)]
enum NodeNode {
    Table,
    Node1Id,
    Node2Id,
    UserId,
}
