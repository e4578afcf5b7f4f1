use super::*;
use crate::test_support::result_of;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    day(2025, 3, 15)
}

fn loaded(ids: &[i64], total: u64) -> SearchCoordinator {
    let mut coordinator = SearchCoordinator::new(SearchCriteria::default());
    let ticket = coordinator.start();
    coordinator.complete(ticket.seq, Ok::<_, String>(result_of(ids, total)));
    coordinator
}

#[test]
fn new_coordinator_is_idle_and_empty() {
    let coordinator = SearchCoordinator::new(SearchCriteria::default());
    assert_eq!(coordinator.status(), &SearchStatus::Idle);
    assert!(coordinator.result().is_empty());
    assert_eq!(coordinator.selected_id(), None);
    assert_eq!(coordinator.latest_seq(), 0);
}

#[test]
fn start_enters_loading_with_current_criteria() {
    let mut coordinator = SearchCoordinator::new(SearchCriteria::default());
    let ticket = coordinator.start();
    assert_eq!(ticket.seq, 1);
    assert_eq!(ticket.criteria, SearchCriteria::default());
    assert_eq!(coordinator.status(), &SearchStatus::Loading);
}

#[test]
fn success_auto_selects_first_sighting() {
    let coordinator = loaded(&[10, 11, 12], 3);
    assert_eq!(coordinator.status(), &SearchStatus::Loaded);
    assert_eq!(coordinator.selected_id(), Some(SightingId(10)));
    assert_eq!(coordinator.selected().map(|s| s.id), Some(SightingId(10)));
}

#[test]
fn empty_success_selects_nothing() {
    let coordinator = loaded(&[], 0);
    assert_eq!(coordinator.status(), &SearchStatus::Loaded);
    assert_eq!(coordinator.selected_id(), None);
}

#[test]
fn existing_selection_is_left_untouched_on_success() {
    let mut coordinator = SearchCoordinator::new(SearchCriteria::default());
    let ticket = coordinator.start();
    coordinator.selection.select(&crate::test_support::sighting(12));
    coordinator.complete(ticket.seq, Ok::<_, String>(result_of(&[10, 11, 12], 3)));
    assert_eq!(coordinator.selected_id(), Some(SightingId(12)));
}

#[test]
fn failure_empties_result_and_sets_message() {
    let mut coordinator = loaded(&[1, 2], 2);
    let ticket = coordinator.change_page(2).unwrap();
    let applied = coordinator.complete(ticket.seq, Err::<SearchResult, _>("timeout"));

    assert_eq!(applied, Completion::Applied);
    assert_eq!(coordinator.result().total_count, 0);
    assert!(coordinator.result().sightings.is_empty());
    assert_eq!(coordinator.selected_id(), None);
    match coordinator.status() {
        SearchStatus::Failed { message } => {
            assert!(!message.is_empty());
            assert_eq!(message, FETCH_FAILED_MESSAGE);
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[test]
fn new_attempt_clears_error_before_it_resolves() {
    let mut coordinator = SearchCoordinator::new(SearchCriteria::default());
    let ticket = coordinator.start();
    coordinator.complete(ticket.seq, Err::<SearchResult, _>("down"));
    assert!(matches!(coordinator.status(), SearchStatus::Failed { .. }));

    coordinator
        .submit_search("Orca", None, None, today())
        .unwrap();
    assert_eq!(coordinator.status(), &SearchStatus::Loading);
}

#[test]
fn submit_resets_page_and_clears_selection() {
    let mut coordinator = loaded(&[1, 2, 3], 450);
    coordinator.change_page(3).unwrap();
    let ticket = coordinator.latest_seq();
    coordinator.complete(ticket, Ok::<_, String>(result_of(&[7, 8], 450)));
    coordinator.select(Some(SightingId(8))).unwrap();

    let ticket = coordinator
        .submit_search("  Blue Whale ", Some(day(2025, 1, 1)), None, today())
        .unwrap();

    assert_eq!(ticket.criteria.page_number, 1);
    assert_eq!(ticket.criteria.taxon_name, "Blue Whale");
    assert_eq!(ticket.criteria.date_from, Some(day(2025, 1, 1)));
    assert_eq!(coordinator.selected_id(), None);
    assert_eq!(coordinator.status(), &SearchStatus::Loading);
}

#[test]
fn change_page_preserves_other_criteria_and_clears_selection() {
    let mut coordinator = SearchCoordinator::new(SearchCriteria::default());
    let ticket = coordinator
        .submit_search("Orca", Some(day(2025, 1, 1)), Some(day(2025, 2, 1)), today())
        .unwrap();
    coordinator.complete(ticket.seq, Ok::<_, String>(result_of(&[1, 2], 401)));
    assert_eq!(coordinator.selected_id(), Some(SightingId(1)));

    let ticket = coordinator.change_page(2).unwrap();

    assert_eq!(ticket.criteria.taxon_name, "Orca");
    assert_eq!(ticket.criteria.date_from, Some(day(2025, 1, 1)));
    assert_eq!(ticket.criteria.date_to, Some(day(2025, 2, 1)));
    assert_eq!(ticket.criteria.page_number, 2);
    assert_eq!(coordinator.selected_id(), None);
}

#[test]
fn rejected_mutation_leaves_state_untouched() {
    let mut coordinator = loaded(&[1, 2], 2);
    let before_seq = coordinator.latest_seq();

    assert_eq!(
        coordinator.submit_search("   ", None, None, today()),
        Err(CriteriaError::EmptyTaxonName)
    );
    assert_eq!(
        coordinator.change_page(0),
        Err(CriteriaError::InvalidPage(0))
    );
    assert!(matches!(
        coordinator.submit_search("Orca", Some(day(2025, 3, 1)), Some(day(2025, 2, 1)), today()),
        Err(CriteriaError::InvertedDateRange { .. })
    ));
    assert!(matches!(
        coordinator.submit_search("Orca", None, Some(day(2025, 3, 16)), today()),
        Err(CriteriaError::FutureDate { .. })
    ));

    assert_eq!(coordinator.latest_seq(), before_seq);
    assert_eq!(coordinator.criteria(), &SearchCriteria::default());
    assert_eq!(coordinator.status(), &SearchStatus::Loaded);
    assert_eq!(coordinator.selected_id(), Some(SightingId(1)));
}

#[test]
fn later_search_wins_over_slower_earlier_one() {
    let mut coordinator = loaded(&[1], 1);
    let blue = coordinator
        .submit_search("Blue Whale", None, None, today())
        .unwrap();
    let orca = coordinator.submit_search("Orca", None, None, today()).unwrap();

    assert_eq!(
        coordinator.complete(orca.seq, Ok::<_, String>(result_of(&[500, 501], 2))),
        Completion::Applied
    );
    assert_eq!(
        coordinator.complete(blue.seq, Ok::<_, String>(result_of(&[900], 1))),
        Completion::Stale
    );

    assert_eq!(coordinator.criteria().taxon_name, "Orca");
    let ids: Vec<_> = coordinator.result().sightings.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![SightingId(500), SightingId(501)]);
    assert_eq!(coordinator.selected_id(), Some(SightingId(500)));
}

#[test]
fn stale_failure_does_not_mark_later_search_failed() {
    let mut coordinator = SearchCoordinator::new(SearchCriteria::default());
    let first = coordinator.start();
    let second = coordinator.change_page(2).unwrap();

    assert_eq!(
        coordinator.complete(first.seq, Err::<SearchResult, _>("slow failure")),
        Completion::Stale
    );
    assert_eq!(coordinator.status(), &SearchStatus::Loading);

    coordinator.complete(second.seq, Ok::<_, String>(result_of(&[3], 201)));
    assert_eq!(coordinator.status(), &SearchStatus::Loaded);
}

#[test]
fn duplicate_completion_is_stale() {
    let mut coordinator = SearchCoordinator::new(SearchCriteria::default());
    let ticket = coordinator.start();
    coordinator.complete(ticket.seq, Ok::<_, String>(result_of(&[1], 1)));
    assert_eq!(
        coordinator.complete(ticket.seq, Ok::<_, String>(result_of(&[2], 1))),
        Completion::Stale
    );
    assert_eq!(coordinator.result().sightings[0].id, SightingId(1));
}

#[test]
fn select_requires_membership_in_current_result() {
    let mut coordinator = loaded(&[1, 2, 3], 3);

    coordinator.select(Some(SightingId(3))).unwrap();
    assert_eq!(coordinator.selected_id(), Some(SightingId(3)));

    assert_eq!(
        coordinator.select(Some(SightingId(42))),
        Err(SelectionError::NotInResult(SightingId(42)))
    );
    assert_eq!(coordinator.selected_id(), Some(SightingId(3)));

    coordinator.select(None).unwrap();
    assert_eq!(coordinator.selected_id(), None);
}
