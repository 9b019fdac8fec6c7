//! End-to-end screen scenarios driven through `handle_event`, the same entry
//! point the plugin shim uses.

use std::time::Duration;

use super::{handle_event, Action, AppState, CatalogOrigin, Event, FRAME_INTERVAL};
use crate::domain::{Coordinate, Cuisine, FilterState, Region, TruckId};
use crate::location::Permission;
use crate::worker::{WorkerMessage, WorkerResponse};
use crate::{initialize, Config};

fn send(state: &mut AppState, event: Event) -> (bool, Vec<Action>) {
    handle_event(state, &event).unwrap()
}

fn frame() -> Event {
    Event::Tick {
        elapsed: Duration::from_secs_f64(FRAME_INTERVAL),
    }
}

fn visible_names(state: &AppState) -> Vec<&str> {
    state.filtered_trucks.iter().map(|t| t.name.as_str()).collect()
}

fn default_region() -> Region {
    Region::centered(Coordinate::new(37.78825, -122.4324), 0.01)
}

fn located_config() -> Config {
    Config {
        location: Some(Coordinate::new(40.7128, -74.006)),
        ..Config::default()
    }
}

fn location_request_id(actions: &[Action]) -> u64 {
    actions
        .iter()
        .find_map(|a| match a {
            Action::PostToWorker(WorkerMessage::ResolveLocation { request_id, .. }) => Some(*request_id),
            _ => None,
        })
        .expect("location request posted")
}

#[test]
fn category_and_search_filters_apply_to_both_surfaces() {
    let mut state = initialize(&Config::default());

    send(
        &mut state,
        Event::SetFilter(FilterState {
            search_text: String::new(),
            category: Some(Cuisine::Tacos),
        }),
    );
    assert_eq!(visible_names(&state), vec!["Taco Town"]);

    send(
        &mut state,
        Event::SetFilter(FilterState {
            search_text: "veg".to_string(),
            category: None,
        }),
    );
    assert_eq!(visible_names(&state), vec!["Vegan Vibes"]);

    let vm = state.compute_viewmodel(30, 100);
    assert_eq!(vm.cards.len(), 1);
    assert_eq!(vm.map.markers.len(), 1);
    assert_eq!(vm.map.markers[0].id, TruckId(3));
}

#[test]
fn typing_a_query_filters_live() {
    let mut state = initialize(&Config::default());
    send(&mut state, Event::SearchMode);
    for c in "BURG".chars() {
        send(&mut state, Event::Char(c));
    }
    assert_eq!(visible_names(&state), vec!["Burger Boss"]);

    send(&mut state, Event::Escape);
    assert_eq!(visible_names(&state).len(), 3);
}

#[test]
fn marker_tap_pulses_only_that_marker() {
    let mut state = initialize(&Config::default());

    let (render, actions) = send(&mut state, Event::SelectFromMap(TruckId(2)));
    assert!(render);
    assert_eq!(actions, vec![Action::ScheduleFrame(FRAME_INTERVAL)]);
    assert_eq!(state.selected_truck_id(), Some(TruckId(2)));
    assert!(state.overlay_visible());

    let mut peak = 1.0_f64;
    let mut frames = 0;
    loop {
        let (_, actions) = send(&mut state, frame());
        frames += 1;

        let scale = state.emphasis_scale(TruckId(2));
        assert!((1.0..=1.5).contains(&scale));
        peak = peak.max(scale);
        assert!((state.emphasis_scale(TruckId(1)) - 1.0).abs() < f64::EPSILON);
        assert!((state.emphasis_scale(TruckId(3)) - 1.0).abs() < f64::EPSILON);

        if actions.is_empty() {
            break;
        }
        assert!(frames < 120, "animation never settled");
    }

    assert!((peak - 1.5).abs() < f64::EPSILON);
    assert!((state.emphasis_scale(TruckId(2)) - 1.0).abs() < f64::EPSILON);
    assert!(state.overlay_visible());
}

#[test]
fn card_tap_focuses_the_map_without_overlay() {
    let mut state = initialize(&Config::default());
    send(&mut state, Event::SelectFromList(TruckId(3)));
    assert!(!state.overlay_visible());

    for _ in 0..20 {
        send(&mut state, frame());
    }
    let region = state.viewport_region();
    assert_eq!(region.center(), Coordinate::new(37.78725, -122.4334));
    assert!((region.latitude_delta - 0.005).abs() < 1e-12);
}

#[test]
fn escape_dismisses_overlay_and_clears_selection() {
    let mut state = initialize(&Config::default());
    send(&mut state, Event::SelectFromMap(TruckId(1)));
    assert!(state.compute_viewmodel(30, 100).overlay.is_some());

    let (render, _) = send(&mut state, Event::Escape);
    assert!(render);
    assert!(!state.overlay_visible());
    assert_eq!(state.selected_truck_id(), None);
    assert!(state.compute_viewmodel(30, 100).overlay.is_none());

    let (render, _) = send(&mut state, Event::DismissOverlay);
    assert!(!render);
}

#[test]
fn unknown_truck_ids_are_ignored() {
    let mut state = initialize(&Config::default());
    let (render, actions) = send(&mut state, Event::SelectFromMap(TruckId(42)));
    assert!(!render);
    assert!(actions.is_empty());
    assert_eq!(state.selected_truck_id(), None);
    assert!(!state.overlay_visible());
}

#[test]
fn denied_permission_keeps_the_default_region() {
    let mut state = initialize(&located_config());
    let (_, actions) = send(&mut state, Event::PermissionResult { granted: false });
    assert!(actions.is_empty());

    for _ in 0..60 {
        send(&mut state, frame());
        assert_eq!(state.viewport_region(), default_region());
    }
}

#[test]
fn resolved_location_seeds_the_viewport_once() {
    let mut state = initialize(&located_config());
    let (_, actions) = send(&mut state, Event::PermissionResult { granted: true });
    let request_id = location_request_id(&actions);
    assert_eq!(state.viewport_region(), default_region());

    let device = Coordinate::new(40.7128, -74.006);
    let (render, _) = send(
        &mut state,
        Event::WorkerResponse(WorkerResponse::LocationResolved {
            request_id,
            permission: Permission::Granted,
            coordinate: Some(device),
        }),
    );
    assert!(render);
    assert_eq!(state.viewport_region(), Region::centered(device, 0.01));

    let (render, _) = send(
        &mut state,
        Event::WorkerResponse(WorkerResponse::LocationResolved {
            request_id,
            permission: Permission::Granted,
            coordinate: Some(Coordinate::new(0.0, 0.0)),
        }),
    );
    assert!(!render);
    assert_eq!(state.viewport_region(), Region::centered(device, 0.01));
}

#[test]
fn stale_location_answers_are_discarded() {
    let mut state = initialize(&located_config());
    let (_, actions) = send(&mut state, Event::PermissionResult { granted: true });
    let request_id = location_request_id(&actions);

    send(
        &mut state,
        Event::WorkerResponse(WorkerResponse::LocationResolved {
            request_id: request_id + 1,
            permission: Permission::Granted,
            coordinate: Some(Coordinate::new(1.0, 1.0)),
        }),
    );
    assert_eq!(state.viewport_region(), default_region());
}

#[test]
fn missing_catalog_file_falls_back_to_builtin() {
    let config = Config {
        catalog_file: Some("~/trucks.json".to_string()),
        ..Config::default()
    };
    let mut state = initialize(&config);
    assert!(state.filtered_trucks.is_empty());

    let (_, actions) = send(&mut state, Event::PermissionResult { granted: true });
    assert!(matches!(
        actions.as_slice(),
        [Action::PostToWorker(WorkerMessage::LoadCatalog { path, .. })] if path == "~/trucks.json"
    ));

    send(
        &mut state,
        Event::WorkerResponse(WorkerResponse::CatalogFailed {
            message: "not found".to_string(),
        }),
    );
    assert_eq!(state.catalog_origin, CatalogOrigin::Fallback);
    assert_eq!(visible_names(&state), vec!["Taco Town", "Burger Boss", "Vegan Vibes"]);
}
