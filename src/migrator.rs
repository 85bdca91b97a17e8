use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_inspection_calls_table::Migration),
            Box::new(m20250101_000002_create_sequence_counters_table::Migration),
            Box::new(m20250101_000003_create_raw_material_tables::Migration),
            Box::new(m20250101_000004_create_process_tables::Migration),
            Box::new(m20250101_000005_create_final_tables::Migration),
        ]
    }
}

// Migration implementations

mod m20250101_000001_create_inspection_calls_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000001_create_inspection_calls_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(InspectionCalls::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InspectionCalls::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InspectionCalls::IcNumber)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(InspectionCalls::Stage).string().not_null())
                        .col(ColumnDef::new(InspectionCalls::PoNo).string().not_null())
                        .col(ColumnDef::new(InspectionCalls::PoSerialNo).string().null())
                        .col(ColumnDef::new(InspectionCalls::VendorName).string().null())
                        .col(ColumnDef::new(InspectionCalls::CompanyName).string().null())
                        .col(ColumnDef::new(InspectionCalls::UnitName).string().null())
                        .col(
                            ColumnDef::new(InspectionCalls::PlaceOfInspection)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(InspectionCalls::DesiredInspectionDate)
                                .date()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(InspectionCalls::ActualInspectionDate)
                                .date()
                                .null(),
                        )
                        .col(ColumnDef::new(InspectionCalls::Remarks).text().null())
                        .col(
                            ColumnDef::new(InspectionCalls::Status)
                                .string()
                                .not_null()
                                .default("PENDING"),
                        )
                        .col(ColumnDef::new(InspectionCalls::CreatedBy).string().null())
                        .col(
                            ColumnDef::new(InspectionCalls::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InspectionCalls::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inspection_calls_stage_status")
                        .table(InspectionCalls::Table)
                        .col(InspectionCalls::Stage)
                        .col(InspectionCalls::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inspection_calls_po_no")
                        .table(InspectionCalls::Table)
                        .col(InspectionCalls::PoNo)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inspection_calls_created_at")
                        .table(InspectionCalls::Table)
                        .col(InspectionCalls::CreatedAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InspectionCalls::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum InspectionCalls {
        Table,
        Id,
        IcNumber,
        Stage,
        PoNo,
        PoSerialNo,
        VendorName,
        CompanyName,
        UnitName,
        PlaceOfInspection,
        DesiredInspectionDate,
        ActualInspectionDate,
        Remarks,
        Status,
        CreatedBy,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250101_000002_create_sequence_counters_table {

    use chrono::{Datelike, Utc};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000002_create_sequence_counters_table"
        }
    }

    const SEED: [(&str, &str); 3] = [
        ("RAW_MATERIAL", "RM-IC"),
        ("PROCESS", "PROC-IC"),
        ("FINAL", "FINAL-IC"),
    ];

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(IcSequenceCounters::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(IcSequenceCounters::CallType)
                                .string()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(IcSequenceCounters::Prefix).string().not_null())
                        .col(
                            ColumnDef::new(IcSequenceCounters::CurrentYear)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(IcSequenceCounters::CurrentSequence)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(IcSequenceCounters::LastIssued).string().null())
                        .col(
                            ColumnDef::new(IcSequenceCounters::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            let now = Utc::now();
            let mut seed = Query::insert();
            seed.into_table(IcSequenceCounters::Table)
                .columns([
                    IcSequenceCounters::CallType,
                    IcSequenceCounters::Prefix,
                    IcSequenceCounters::CurrentYear,
                    IcSequenceCounters::CurrentSequence,
                    IcSequenceCounters::UpdatedAt,
                ])
                .on_conflict(
                    OnConflict::column(IcSequenceCounters::CallType)
                        .do_nothing()
                        .to_owned(),
                );
            for (call_type, prefix) in SEED {
                seed.values([
                    call_type.into(),
                    prefix.into(),
                    now.year().into(),
                    0i32.into(),
                    now.into(),
                ])
                .map_err(|e| DbErr::Migration(e.to_string()))?;
            }

            manager.exec_stmt(seed).await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(IcSequenceCounters::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum IcSequenceCounters {
        Table,
        CallType,
        Prefix,
        CurrentYear,
        CurrentSequence,
        LastIssued,
        UpdatedAt,
    }
}

mod m20250101_000003_create_raw_material_tables {

    use super::m20250101_000001_create_inspection_calls_table::InspectionCalls;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000003_create_raw_material_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(RmInspectionDetails::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(RmInspectionDetails::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(RmInspectionDetails::CallId)
                                .uuid()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(RmInspectionDetails::ItemDescription)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(RmInspectionDetails::ItemQuantity)
                                .decimal_len(14, 3)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(RmInspectionDetails::TotalOfferedQty)
                                .decimal_len(14, 3)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(RmInspectionDetails::TotalAcceptedQty)
                                .decimal_len(14, 3)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(RmInspectionDetails::UnitOfMeasurement)
                                .string()
                                .not_null()
                                .default("MT"),
                        )
                        .col(
                            ColumnDef::new(RmInspectionDetails::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_rm_inspection_details_call_id")
                                .from(RmInspectionDetails::Table, RmInspectionDetails::CallId)
                                .to(InspectionCalls::Table, InspectionCalls::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(RmHeatQuantities::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(RmHeatQuantities::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(RmHeatQuantities::RmDetailId).uuid().not_null())
                        .col(ColumnDef::new(RmHeatQuantities::HeatNumber).string().not_null())
                        .col(ColumnDef::new(RmHeatQuantities::Manufacturer).string().null())
                        .col(
                            ColumnDef::new(RmHeatQuantities::OfferedQty)
                                .decimal_len(14, 3)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(RmHeatQuantities::AcceptedQty)
                                .decimal_len(14, 3)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(RmHeatQuantities::RejectedQty)
                                .decimal_len(14, 3)
                                .null(),
                        )
                        .col(ColumnDef::new(RmHeatQuantities::TcNumber).string().null())
                        .col(ColumnDef::new(RmHeatQuantities::TcDate).date().null())
                        .col(
                            ColumnDef::new(RmHeatQuantities::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_rm_heat_quantities_rm_detail_id")
                                .from(RmHeatQuantities::Table, RmHeatQuantities::RmDetailId)
                                .to(RmInspectionDetails::Table, RmInspectionDetails::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("uq_rm_heat_quantities_detail_heat")
                        .table(RmHeatQuantities::Table)
                        .col(RmHeatQuantities::RmDetailId)
                        .col(RmHeatQuantities::HeatNumber)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(RmHeatQuantities::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(RmInspectionDetails::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum RmInspectionDetails {
        Table,
        Id,
        CallId,
        ItemDescription,
        ItemQuantity,
        TotalOfferedQty,
        TotalAcceptedQty,
        UnitOfMeasurement,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum RmHeatQuantities {
        Table,
        Id,
        RmDetailId,
        HeatNumber,
        Manufacturer,
        OfferedQty,
        AcceptedQty,
        RejectedQty,
        TcNumber,
        TcDate,
        CreatedAt,
    }
}

mod m20250101_000004_create_process_tables {

    use super::m20250101_000001_create_inspection_calls_table::InspectionCalls;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000004_create_process_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ProcessInspectionDetails::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProcessInspectionDetails::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProcessInspectionDetails::CallId)
                                .uuid()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(ProcessInspectionDetails::RmIcNumber)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProcessInspectionDetails::HeatNumber)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProcessInspectionDetails::LotNumber)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProcessInspectionDetails::Manufacturer)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ProcessInspectionDetails::OfferedQty)
                                .decimal_len(14, 3)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProcessInspectionDetails::TotalAcceptedQtyRm)
                                .decimal_len(14, 3)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProcessInspectionDetails::UnitOfMeasurement)
                                .string()
                                .not_null()
                                .default("MT"),
                        )
                        .col(
                            ColumnDef::new(ProcessInspectionDetails::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_process_inspection_details_call_id")
                                .from(
                                    ProcessInspectionDetails::Table,
                                    ProcessInspectionDetails::CallId,
                                )
                                .to(InspectionCalls::Table, InspectionCalls::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_process_inspection_details_heat")
                        .table(ProcessInspectionDetails::Table)
                        .col(ProcessInspectionDetails::RmIcNumber)
                        .col(ProcessInspectionDetails::HeatNumber)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ProcessRmMappings::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProcessRmMappings::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProcessRmMappings::ProcessDetailId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ProcessRmMappings::RmCallId).uuid().not_null())
                        .col(
                            ColumnDef::new(ProcessRmMappings::RmIcNumber)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProcessRmMappings::HeatNumber)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ProcessRmMappings::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_process_rm_mappings_process_detail_id")
                                .from(ProcessRmMappings::Table, ProcessRmMappings::ProcessDetailId)
                                .to(
                                    ProcessInspectionDetails::Table,
                                    ProcessInspectionDetails::Id,
                                )
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_process_rm_mappings_rm_call_id")
                                .from(ProcessRmMappings::Table, ProcessRmMappings::RmCallId)
                                .to(InspectionCalls::Table, InspectionCalls::Id)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ProcessRmMappings::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ProcessInspectionDetails::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum ProcessInspectionDetails {
        Table,
        Id,
        CallId,
        RmIcNumber,
        HeatNumber,
        LotNumber,
        Manufacturer,
        OfferedQty,
        TotalAcceptedQtyRm,
        UnitOfMeasurement,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum ProcessRmMappings {
        Table,
        Id,
        ProcessDetailId,
        RmCallId,
        RmIcNumber,
        HeatNumber,
        CreatedAt,
    }
}

mod m20250101_000005_create_final_tables {

    use super::m20250101_000001_create_inspection_calls_table::InspectionCalls;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000005_create_final_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(FinalInspectionDetails::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(FinalInspectionDetails::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FinalInspectionDetails::CallId)
                                .uuid()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(FinalInspectionDetails::ProductDescription)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(FinalInspectionDetails::TotalLots)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(FinalInspectionDetails::TotalOfferedQty)
                                .decimal_len(14, 3)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(FinalInspectionDetails::UnitOfMeasurement)
                                .string()
                                .not_null()
                                .default("MT"),
                        )
                        .col(
                            ColumnDef::new(FinalInspectionDetails::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_final_inspection_details_call_id")
                                .from(FinalInspectionDetails::Table, FinalInspectionDetails::CallId)
                                .to(InspectionCalls::Table, InspectionCalls::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(FinalLotDetails::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(FinalLotDetails::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FinalLotDetails::FinalDetailId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(FinalLotDetails::LotNumber).string().not_null())
                        .col(ColumnDef::new(FinalLotDetails::HeatNumber).string().null())
                        .col(
                            ColumnDef::new(FinalLotDetails::OfferedQty)
                                .decimal_len(14, 3)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(FinalLotDetails::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_final_lot_details_final_detail_id")
                                .from(FinalLotDetails::Table, FinalLotDetails::FinalDetailId)
                                .to(FinalInspectionDetails::Table, FinalInspectionDetails::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("uq_final_lot_details_detail_lot")
                        .table(FinalLotDetails::Table)
                        .col(FinalLotDetails::FinalDetailId)
                        .col(FinalLotDetails::LotNumber)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(FinalProcessMappings::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(FinalProcessMappings::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FinalProcessMappings::FinalDetailId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FinalProcessMappings::ProcessCallId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FinalProcessMappings::ProcessIcNumber)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(FinalProcessMappings::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_final_process_mappings_final_detail_id")
                                .from(
                                    FinalProcessMappings::Table,
                                    FinalProcessMappings::FinalDetailId,
                                )
                                .to(FinalInspectionDetails::Table, FinalInspectionDetails::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_final_process_mappings_process_call_id")
                                .from(
                                    FinalProcessMappings::Table,
                                    FinalProcessMappings::ProcessCallId,
                                )
                                .to(InspectionCalls::Table, InspectionCalls::Id)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("uq_final_process_mappings_detail_process")
                        .table(FinalProcessMappings::Table)
                        .col(FinalProcessMappings::FinalDetailId)
                        .col(FinalProcessMappings::ProcessCallId)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(FinalProcessMappings::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(FinalLotDetails::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(FinalInspectionDetails::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum FinalInspectionDetails {
        Table,
        Id,
        CallId,
        ProductDescription,
        TotalLots,
        TotalOfferedQty,
        UnitOfMeasurement,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum FinalLotDetails {
        Table,
        Id,
        FinalDetailId,
        LotNumber,
        HeatNumber,
        OfferedQty,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum FinalProcessMappings {
        Table,
        Id,
        FinalDetailId,
        ProcessCallId,
        ProcessIcNumber,
        CreatedAt,
    }
}
