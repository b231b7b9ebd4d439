use chrono::NaiveDate;
use proptest::prelude::*;
use circulation::borrowers::domain::Borrower;
use circulation::catalog::domain::CatalogItem;
use circulation::core::domain::Configuration;
use circulation::core::events::DomainEventType;
use circulation::core::library::BorrowOutcome;
use circulation::gateway::memory::publisher::MemoryPublisher;
use circulation::ledger::Ledger;
use circulation::statistics::LibraryStatistics;
use circulation::utils::date::add_days;

fn day0() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()
}

fn ledger_with(items: &[(&str, &str)], borrowers: Vec<Borrower>) -> (Ledger, MemoryPublisher) {
    let publisher = MemoryPublisher::new();
    let mut ledger = Ledger::new(&Configuration::new("City Library"), Box::new(publisher.clone()));
    for (id, title) in items {
        ledger.add_item(CatalogItem::book(id, title, 2020, "author", "isbn", 100).unwrap()).unwrap();
    }
    for borrower in borrowers {
        ledger.add_borrower(borrower).unwrap();
    }
    (ledger, publisher)
}

fn student(id: &str) -> Borrower {
    Borrower::student(id, format!("student {}", id).as_str(), "s@example.com", "S1").unwrap()
}

#[test]
fn test_student_cannot_borrow_fourth_item() {
    let items = [("B1", "One"), ("B2", "Two"), ("B3", "Three"), ("B4", "Four")];
    let (mut ledger, _) = ledger_with(&items, vec![student("U1")]);
    for (n, (id, _)) in items.iter().take(3).enumerate() {
        let record_id = format!("R{}", n + 1);
        assert!(ledger.borrow("U1", id, record_id.as_str(), day0(), add_days(day0(), 14).unwrap()).unwrap());
    }
    assert!(!ledger.borrow("U1", "B4", "R4", day0(), add_days(day0(), 14).unwrap()).unwrap());
    assert_eq!(3, ledger.records().len());
    assert_eq!(3, ledger.borrower("U1").unwrap().borrowed_count());
    assert!(ledger.item("B4").unwrap().is_available());
}

#[test]
fn test_overdue_fee_after_thirty_days() {
    let (mut ledger, _) = ledger_with(&[("B1", "Clean Code")], vec![student("U1")]);
    assert!(ledger.borrow("U1", "B1", "R1", day0(), add_days(day0(), 14).unwrap()).unwrap());
    let as_of = add_days(day0(), 30).unwrap();
    let record = ledger.record("R1").unwrap();
    assert!(record.is_overdue(as_of));
    assert_eq!(8.0, record.late_fee(as_of));
}

#[test]
fn test_borrow_many_reports_each_outcome_in_input_order() {
    let items = [("B1", "Taken"), ("B2", "Held"), ("B3", "Held"), ("B4", "Free"), ("B5", "Spare")];
    let (mut ledger, _) = ledger_with(&items, vec![student("U1"), student("U2")]);
    assert!(ledger.borrow("U2", "B1", "R1", day0(), add_days(day0(), 14).unwrap()).unwrap());
    assert!(ledger.borrow("U1", "B2", "R2", day0(), add_days(day0(), 14).unwrap()).unwrap());
    assert!(ledger.borrow("U1", "B3", "R3", day0(), add_days(day0(), 14).unwrap()).unwrap());

    let outcomes = ledger.borrow_many("U1", &["B1", "B4", "B5"], 14, day0()).unwrap();
    assert_eq!(vec![BorrowOutcome::Unavailable, BorrowOutcome::Success, BorrowOutcome::LimitReached], outcomes);
    assert_eq!(3, ledger.borrower("U1").unwrap().borrowed_count());
    assert_eq!(4, ledger.records().len());
    assert_eq!(add_days(day0(), 14).unwrap(), ledger.records()[3].due_date());
    assert!(ledger.item("B5").unwrap().is_available());
}

#[test]
fn test_borrow_many_checks_availability_before_limit() {
    let items = [("B1", "Taken"), ("B2", "Held"), ("B3", "Held"), ("B4", "Held"), ("B5", "Free")];
    let (mut ledger, _) = ledger_with(&items, vec![student("U1"), student("U2")]);
    assert!(ledger.borrow("U2", "B1", "R1", day0(), add_days(day0(), 14).unwrap()).unwrap());
    for (n, id) in ["B2", "B3", "B4"].iter().enumerate() {
        let record_id = format!("R{}", n + 2);
        assert!(ledger.borrow("U1", id, record_id.as_str(), day0(), add_days(day0(), 14).unwrap()).unwrap());
    }

    let outcomes = ledger.borrow_many("U1", &["B1", "B5"], 14, day0()).unwrap();
    assert_eq!(vec![BorrowOutcome::Unavailable, BorrowOutcome::LimitReached], outcomes);

    assert!(ledger.return_item("U1", "B2", day0()).unwrap());
    let outcomes = ledger.borrow_many("U1", &["B5", "B5"], 14, day0()).unwrap();
    assert_eq!(vec![BorrowOutcome::Success, BorrowOutcome::Unavailable], outcomes);
    assert!(ledger.borrow_many("U2", &[], 14, day0()).unwrap().is_empty());
}

#[test]
fn test_aggregate_sums_fees_for_same_borrower() {
    let items = [("B1", "One"), ("B2", "Two")];
    let (mut ledger, _) = ledger_with(&items, vec![student("U1"), student("U2")]);
    assert!(ledger.borrow("U1", "B1", "R1", day0(), add_days(day0(), 14).unwrap()).unwrap());
    assert!(ledger.borrow("U1", "B2", "R2", day0(), add_days(day0(), 21).unwrap()).unwrap());
    let as_of = add_days(day0(), 30).unwrap();
    let expected = ledger.record("R1").unwrap().late_fee(as_of) + ledger.record("R2").unwrap().late_fee(as_of);
    let fees = ledger.aggregate_overdue_fees(as_of);
    assert_eq!(expected, fees["U1"]);
    assert_eq!(12.5, fees["U1"]);
    assert!(!fees.contains_key("U2"));
}

#[test]
fn test_find_by_title_is_case_insensitive() {
    let (ledger, _) = ledger_with(&[("B1", "Clean Code"), ("B2", "Effective Java")], vec![]);
    let found: Vec<&str> = ledger.find_by_title("clean").into_iter().map(|item| item.item_id.as_str()).collect();
    assert_eq!(vec!["B1"], found);
}

#[test]
fn test_round_trip_restores_availability() {
    let (mut ledger, publisher) = ledger_with(&[("B1", "Clean Code")], vec![student("U1")]);
    assert!(ledger.borrow("U1", "B1", "R1", day0(), add_days(day0(), 14).unwrap()).unwrap());
    assert!(ledger.return_item("U1", "B1", add_days(day0(), 2).unwrap()).unwrap());
    assert!(ledger.item("B1").unwrap().is_available());
    assert!(!ledger.borrower("U1").unwrap().holds("B1"));
    assert!(!ledger.return_item("U1", "B1", add_days(day0(), 3).unwrap()).unwrap());
    let kinds: Vec<DomainEventType> = publisher.events().iter().map(|event| event.kind).collect();
    assert_eq!(vec![DomainEventType::Added, DomainEventType::Closed], kinds);
}

#[test]
fn test_detailed_report_uses_first_overdue_record() {
    let items = [("B1", "Recent"), ("B2", "Ancient")];
    let (mut ledger, _) = ledger_with(&items, vec![student("U1")]);
    let as_of = add_days(day0(), 60).unwrap();
    assert!(ledger.borrow("U1", "B1", "R1", add_days(day0(), 40).unwrap(), add_days(day0(), 50).unwrap()).unwrap());
    assert!(ledger.borrow("U1", "B2", "R2", day0(), add_days(day0(), 5).unwrap()).unwrap());
    let report = LibraryStatistics::new(&ledger).detailed_report(as_of);
    assert!(report.contains("Overdue Items: 2"));
    assert!(report.contains("  Item: Recent\n"));
    assert!(report.contains("  Days Overdue: 10\n"));
    assert!(report.contains("URGENT: Item 'Recent' is 10 days overdue! Fee: €5.00."));
}

#[derive(Debug, Clone)]
enum Step {
    Borrow(usize, usize),
    Return(usize, usize),
    Close(usize),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0usize..3, 0usize..12).prop_map(|(b, i)| Step::Borrow(b, i)),
        (0usize..3, 0usize..12).prop_map(|(b, i)| Step::Return(b, i)),
        (0usize..40).prop_map(Step::Close),
    ]
}

proptest! {
    #[test]
    fn test_ledger_invariants_hold(steps in prop::collection::vec(step(), 1..60)) {
        let publisher = MemoryPublisher::new();
        let mut ledger = Ledger::new(&Configuration::new("prop"), Box::new(publisher));
        for i in 0..12 {
            let id = format!("I{}", i);
            ledger.add_item(CatalogItem::book(id.as_str(), "t", 2000, "a", "i", 1).unwrap()).unwrap();
        }
        ledger.add_borrower(Borrower::student("S0", "s0", "e", "1").unwrap()).unwrap();
        ledger.add_borrower(Borrower::student("S1", "s1", "e", "2").unwrap()).unwrap();
        ledger.add_borrower(Borrower::professor("P0", "p0", "e", "CS").unwrap()).unwrap();
        let borrower_ids = ["S0", "S1", "P0"];

        for (n, step) in steps.iter().enumerate() {
            let as_of = add_days(day0(), n as i64).unwrap();
            match step {
                Step::Borrow(b, i) => {
                    let item_id = format!("I{}", i);
                    let record_id = format!("R{}", n);
                    ledger.borrow(borrower_ids[*b], item_id.as_str(), record_id.as_str(), as_of, add_days(as_of, 3).unwrap()).unwrap();
                }
                Step::Return(b, i) => {
                    let item_id = format!("I{}", i);
                    ledger.return_item(borrower_ids[*b], item_id.as_str(), as_of).unwrap();
                }
                Step::Close(r) => {
                    if let Some(record_id) = ledger.records().get(*r).map(|record| record.record_id.to_string()) {
                        let before = ledger.record(record_id.as_str()).unwrap().returned_on();
                        ledger.mark_record_returned(record_id.as_str(), as_of).unwrap();
                        if before.is_some() {
                            prop_assert_eq!(before, ledger.record(record_id.as_str()).unwrap().returned_on());
                        }
                    }
                }
            }

            for borrower in ledger.borrowers() {
                prop_assert!(borrower.borrowed_count() <= borrower.max_borrow_limit());
            }
            for item in ledger.items() {
                let open = ledger.records().iter().filter(|record| record.is_open() && record.item_id == item.item_id).count();
                prop_assert!(open <= 1);
                prop_assert_eq!(item.is_available(), open == 0);
            }
            for record in ledger.records().iter().filter(|record| record.is_open()) {
                prop_assert!(ledger.borrower(record.borrower_id.as_str()).unwrap().holds(record.item_id.as_str()));
            }
        }
    }
}
