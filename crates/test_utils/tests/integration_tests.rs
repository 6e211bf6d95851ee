//! Cross-crate integration tests
//!
//! These run against a disposable PostgreSQL container and exercise the
//! repositories together with the settlement aggregator. They require a
//! Docker daemon and are ignored by default.

use chrono::{TimeZone, Utc};

use domain_accident::normalize::canonicalize;
use domain_accident::{parse_message, AccidentStatus};
use domain_settlement::{
    aggregate_by_month, aggregate_by_workshop, LaborCostTable, MonthKey, SettlementStatus,
};
use domain_vehicle::sheet::read_vehicles;
use domain_vehicle::{Vehicle, VehicleGrade};
use domain_workshop::sheet::read_workshops;
use infra_db::{
    AccidentRepository, DatabaseError, RecordFilter, Role, StatusFilter, UserRepository,
    VehicleRepository, WorkshopRepository,
};
use test_utils::{
    assert_aggregate_consistent, assert_board_order, assert_monthly_consistent,
    create_isolated_test_database, get_shared_test_database, AccidentRecordBuilder,
    MessageFixtures, PayloadFixtures, SheetFixtures, WorkshopBuilder,
};

#[test]
fn intake_fixtures_parse() {
    let draft = parse_message(MessageFixtures::insurer_handoff());
    assert_eq!(draft.customer_name.as_deref(), Some("김민준"));
    assert_eq!(draft.phone.as_deref(), Some("010-1234-5678"));
    assert_eq!(draft.car_number.as_deref(), Some("12가3456"));
    assert_eq!(draft.damage_type, "앞유리");
    assert!(draft.deductible.is_some());
    assert!(draft.address.as_deref().unwrap().starts_with("서울시"));

    let terse = parse_message(MessageFixtures::terse_handoff());
    assert_eq!(terse.car_number.as_deref(), Some("34나5678"));
    assert_eq!(terse.damage_type, "뒤유리");
}

#[tokio::test]
#[ignore = "requires docker"]
async fn legacy_payloads_and_sheets_import() {
    let db = create_isolated_test_database().await.unwrap();
    let records = AccidentRepository::new(db.pool().clone());

    let record = canonicalize(&PayloadFixtures::full_record()).unwrap();
    let saved = records.upsert(&record).await.unwrap();
    assert_eq!(saved.case_no.as_str(), "2025-1042");

    // The camelCase exporter shape lands on the same row, legacy status and all
    let record = canonicalize(&PayloadFixtures::camel_case_record()).unwrap();
    let updated = records.upsert(&record).await.unwrap();
    assert_eq!(updated.id, saved.id);
    assert_eq!(updated.status, AccidentStatus::Received);

    let minimal = canonicalize(&PayloadFixtures::minimal_record()).unwrap();
    assert_eq!(
        records.upsert(&minimal).await.unwrap().case_no.as_str(),
        "2025-0001"
    );

    let vehicles = VehicleRepository::new(db.pool().clone());
    let parsed = read_vehicles(SheetFixtures::vehicle_sheet().as_bytes()).unwrap();
    assert_eq!(vehicles.import(&parsed).await.unwrap(), 3);

    let workshops = WorkshopRepository::new(db.pool().clone());
    let parsed = read_workshops(SheetFixtures::workshop_sheet().as_bytes()).unwrap();
    assert_eq!(parsed.len(), 2);
    for workshop in &parsed {
        workshops.upsert(workshop).await.unwrap();
    }
    assert_eq!(workshops.list_all().await.unwrap().len(), 2);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn upsert_revives_and_updates_by_case_no() {
    let db = create_isolated_test_database().await.unwrap();
    let repo = AccidentRepository::new(db.pool().clone());

    let first = AccidentRecordBuilder::new("IT-100")
        .customer("김민준", "010-1234-5678")
        .build();
    let saved = repo.upsert(&first).await.unwrap();
    assert_eq!(saved.case_no.as_str(), "IT-100");

    repo.soft_delete(saved.id).await.unwrap();
    assert!(repo.find_by_case_no("IT-100").await.unwrap().is_none());

    // Re-importing the same case number revives the row
    let second = AccidentRecordBuilder::new("IT-100")
        .status(AccidentStatus::Assigned)
        .build();
    let revived = repo.upsert(&second).await.unwrap();
    assert!(!revived.is_deleted);
    assert_eq!(revived.status, AccidentStatus::Assigned);

    // Still one row for the case number
    let found = repo.find_by_case_no("IT-100").await.unwrap().unwrap();
    assert_eq!(found.id, saved.id);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn list_orders_by_priority_then_recency() {
    let db = create_isolated_test_database().await.unwrap();
    let repo = AccidentRepository::new(db.pool().clone());

    let statuses = [
        AccidentStatus::Received,
        AccidentStatus::PendingSettlement,
        AccidentStatus::Completed,
        AccidentStatus::Closed,
    ];
    for (i, status) in statuses.iter().enumerate() {
        let record = AccidentRecordBuilder::new(&format!("IT-20{i}"))
            .status(*status)
            .created_at(Utc.with_ymd_and_hms(2025, 8, 1 + i as u32, 9, 0, 0).unwrap())
            .build();
        repo.upsert(&record).await.unwrap();
    }

    let page = repo.list(&RecordFilter::default(), 1, 50).await.unwrap();
    assert_eq!(page.total, 4);
    assert_board_order(&page.records);
    // 정산대기 carries the most urgent priority
    assert_eq!(page.records[0].status, AccidentStatus::PendingSettlement);

    // A page far past the end is empty, not an arithmetic fault
    let far = repo
        .list(&RecordFilter::default(), u32::MAX, 50)
        .await
        .unwrap();
    assert_eq!(far.total, 4);
    assert!(far.records.is_empty());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn pre_settlement_pseudo_filter() {
    let db = create_isolated_test_database().await.unwrap();
    let repo = AccidentRepository::new(db.pool().clone());

    for (i, status) in AccidentStatus::ALL.iter().enumerate() {
        let record = AccidentRecordBuilder::new(&format!("IT-30{i}"))
            .status(*status)
            .build();
        repo.upsert(&record).await.unwrap();
    }

    let filter = RecordFilter {
        status: Some(StatusFilter::PreSettlement),
        ..Default::default()
    };
    let page = repo.list(&filter, 1, 50).await.unwrap();
    assert_eq!(page.total, 4);
    for record in &page.records {
        assert!(!matches!(
            record.status,
            AccidentStatus::Settled | AccidentStatus::Closed | AccidentStatus::PendingSettlement
        ));
    }
}

#[tokio::test]
#[ignore = "requires docker"]
async fn settlement_flow_end_to_end() {
    let db = create_isolated_test_database().await.unwrap();
    let records = AccidentRepository::new(db.pool().clone());
    let vehicles = VehicleRepository::new(db.pool().clone());

    let avante = vehicles
        .upsert(&Vehicle::new("현대", "아반떼", VehicleGrade::Small).unwrap())
        .await
        .unwrap();

    let a1 = AccidentRecordBuilder::new("IT-401")
        .status(AccidentStatus::Completed)
        .workshop("강남공업사")
        .vehicle(avante.id)
        .build();
    let a2 = AccidentRecordBuilder::new("IT-402")
        .status(AccidentStatus::Completed)
        .workshop("강남공업사")
        .car("34나5678", "기아 중형 세단")
        .build();
    let a1 = records.upsert(&a1).await.unwrap();
    records.upsert(&a2).await.unwrap();

    // The workshop filter narrows the snapshot
    let scoped = records
        .settlement_candidates(Some("강남공업사"))
        .await
        .unwrap();
    assert_eq!(scoped.len(), 2);
    assert!(records
        .settlement_candidates(Some("다른공업사"))
        .await
        .unwrap()
        .is_empty());

    let grades = vehicles.grade_index().await.unwrap();
    let candidates = records.settlement_candidates(None).await.unwrap();
    let report = aggregate_by_workshop(&candidates, &grades, &LaborCostTable::default());

    assert_eq!(report.len(), 1);
    let group = &report[0];
    assert_aggregate_consistent(group);
    assert_eq!(group.small_count, 1);
    assert_eq!(group.medium_count, 1);
    assert_eq!(group.status, SettlementStatus::Unsettled);

    // Settle one member, report goes partial
    let settled = records.mark_settled(&[a1.id]).await.unwrap();
    assert_eq!(settled, 1);

    let candidates = records.settlement_candidates(None).await.unwrap();
    let report = aggregate_by_workshop(&candidates, &grades, &LaborCostTable::default());
    assert_eq!(report[0].status, SettlementStatus::PartiallySettled);

    // Monthly view over the same snapshot reconciles
    let monthly = aggregate_by_month(
        &candidates,
        MonthKey::of(a1.created_at),
        &grades,
        &LaborCostTable::default(),
    );
    assert_monthly_consistent(&monthly);
    assert_eq!(monthly.total_count, 2);
    assert_eq!(monthly.workshop_count, 1);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn workshop_coordinates_round_trip() {
    let db = create_isolated_test_database().await.unwrap();
    let repo = WorkshopRepository::new(db.pool().clone());

    let workshop = WorkshopBuilder::new("강남공업사")
        .address("서울시 강남구 논현로 10 3층")
        .build();
    let saved = repo.upsert(&workshop).await.unwrap();

    let pending = repo.missing_coordinates().await.unwrap();
    assert_eq!(pending.len(), 1);

    repo.set_coordinates(saved.id, domain_workshop::GeoPoint { lat: 37.51, lng: 127.02 })
        .await
        .unwrap();
    assert!(repo.missing_coordinates().await.unwrap().is_empty());

    // A closed shop drops out of assignment but stays on the books
    let closed = WorkshopBuilder::new("휴업공업사").inactive().build();
    repo.upsert(&closed).await.unwrap();

    let active = repo.list_active().await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].name, "강남공업사");
    assert_eq!(repo.list_all().await.unwrap().len(), 2);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn user_roster_round_trip() {
    let db = create_isolated_test_database().await.unwrap();
    let repo = UserRepository::new(db.pool().clone());

    let invited = repo
        .invite("ops@example.com", Some("운영자"), Role::User)
        .await
        .unwrap();
    assert_eq!(invited.role, Role::User);
    assert!(invited.is_active);

    let found = repo.find_by_email("ops@example.com").await.unwrap().unwrap();
    assert_eq!(found.id, invited.id);

    // Re-inviting the same address is an error, not an overwrite
    let err = repo
        .invite("ops@example.com", None, Role::Admin)
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::DuplicateEntry(_)));

    repo.set_role(invited.id, Role::Admin).await.unwrap();
    repo.deactivate(invited.id).await.unwrap();

    let roster = repo.list().await.unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].role, Role::Admin);
    assert!(!roster[0].is_active);

    assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires docker"]
async fn dashboard_stats_buckets() {
    let db = get_shared_test_database().await;
    db.clear_data().await.unwrap();
    let repo = AccidentRepository::new(db.pool().clone());

    let seed = [
        ("IT-501", AccidentStatus::Received),
        ("IT-502", AccidentStatus::Assigned),
        ("IT-503", AccidentStatus::Scheduled),
        ("IT-504", AccidentStatus::Completed),
        ("IT-505", AccidentStatus::Settled),
        ("IT-506", AccidentStatus::Closed),
    ];
    for (case_no, status) in seed {
        repo.upsert(&AccidentRecordBuilder::new(case_no).status(status).build())
            .await
            .unwrap();
    }

    let stats = repo.dashboard_stats(None, None).await.unwrap();
    assert_eq!(stats.total, 6);
    assert_eq!(stats.new, 1);
    assert_eq!(stats.in_progress, 2);
    assert_eq!(stats.done, 2);
}
