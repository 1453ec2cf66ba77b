//! Integration tests for the hash router
//!
//! These tests verify:
//! 1. Matching scenarios and first-match-wins dispatch
//! 2. Navigation by name and the navigate/route round trip
//! 3. Teardown of the outgoing view before the incoming handler runs
//! 4. Failure reporting through the notice channel
//! 5. The async listen loop driven by location changes

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use proptest::prelude::*;
use rstest::{fixture, rstest};
use tokio::task::LocalSet;
use wayfinder_lifecycle::{Teardown, TeardownSet};
use wayfinder_router::{
	Location, MemoryLocation, Navigator, Notice, NoticeKind, RouteDefinition, RouteOutcome,
	RouteParams, Router, RouterError,
};

type Log = Rc<RefCell<Vec<String>>>;
type Notices = Rc<RefCell<Vec<Notice>>>;

struct Harness {
	router: Router,
	location: Rc<MemoryLocation>,
	log: Log,
	notices: Notices,
}

/// Route that logs `mount:<name>` and, on teardown, `unmount:<name>`.
fn logged_route(log: &Log, name: &'static str, pattern: &str) -> RouteDefinition {
	let log = log.clone();
	RouteDefinition::new(name, pattern, move |_: &Navigator, params: &RouteParams| {
		let mut entry = format!("mount:{name}");
		for (key, value) in params.iter() {
			entry.push_str(&format!(" {key}={value}"));
		}
		log.borrow_mut().push(entry);

		let log = log.clone();
		Teardown::from_fn(move || log.borrow_mut().push(format!("unmount:{name}")))
	})
}

fn harness(hash: &str, routes: impl FnOnce(&Log) -> Vec<RouteDefinition>) -> Harness {
	let log: Log = Rc::new(RefCell::new(Vec::new()));
	let notices: Notices = Rc::new(RefCell::new(Vec::new()));
	let (location, _changes) = MemoryLocation::new(hash);

	let sink = notices.clone();
	let router = Router::builder()
		.routes(routes(&log))
		.on_unmatched(move |notice| sink.borrow_mut().push(notice.clone()))
		.build(location.clone())
		.unwrap();

	Harness {
		router,
		location,
		log,
		notices,
	}
}

#[fixture]
fn chat() -> Harness {
	harness("#/", |log| {
		vec![
			logged_route(log, "home", "/"),
			logged_route(log, "room", "/room/:slug"),
		]
	})
}

// ============================================================================
// Matching
// ============================================================================

/// `#/room/general` mounts `room` with `slug=general`
#[rstest]
fn test_room_location_matches_room(chat: Harness) {
	chat.location.set_hash("/room/general");
	let outcome = chat.router.route();

	assert_eq!(
		outcome,
		RouteOutcome::Mounted {
			route: "room".to_string(),
			params: [("slug", "general")].into_iter().collect(),
		}
	);
	assert_eq!(*chat.log.borrow(), vec!["mount:room slug=general"]);
}

/// An unknown path warns and leaves the mounted view in place
#[rstest]
fn test_unmatched_path_warns_without_teardown(chat: Harness) {
	chat.router.route();
	chat.location.set_hash("/unknown/path");
	let outcome = chat.router.route();

	assert_eq!(
		outcome,
		RouteOutcome::Unmatched {
			path: "/unknown/path".to_string()
		}
	);
	assert_eq!(*chat.log.borrow(), vec!["mount:home"]);
	assert_eq!(chat.router.current_route().as_deref(), Some("home"));

	let notices = chat.notices.borrow();
	assert_eq!(notices.len(), 1);
	assert_eq!(notices[0].kind, NoticeKind::Warning);
	assert!(notices[0].message().contains("/unknown/path"));
}

/// Overlapping patterns: the earlier registration handles the path
#[rstest]
#[case(vec![("room", "/room/:slug"), ("lobby", "/room/lobby")], "room")]
#[case(vec![("lobby", "/room/lobby"), ("room", "/room/:slug")], "lobby")]
fn test_first_match_wins(#[case] routes: Vec<(&'static str, &'static str)>, #[case] expected: &str) {
	let h = harness("#/room/lobby", |log| {
		routes
			.iter()
			.map(|&(name, pattern)| logged_route(log, name, pattern))
			.collect()
	});

	h.router.route();
	assert_eq!(h.router.current_route().as_deref(), Some(expected));
	assert_eq!(h.log.borrow().len(), 1);
}

// ============================================================================
// Navigation
// ============================================================================

/// `navigate("room", {slug: "general"})` writes `#/room/general`
#[rstest]
fn test_navigate_sets_location(chat: Harness) {
	let path = chat
		.router
		.navigate("room", [("slug", "general")])
		.unwrap();

	assert_eq!(path, "/room/general");
	assert_eq!(chat.location.hash(), "#/room/general");
	// Routing happens on the change signal, not inside navigate
	assert!(chat.log.borrow().is_empty());
}

/// Navigating to an unregistered name fails and leaves the location alone
#[rstest]
fn test_navigate_unknown_route_fails(chat: Harness) {
	let error = chat.router.navigator().navigate_to("settings").unwrap_err();
	assert_eq!(error, RouterError::RouteNotFound("settings".to_string()));
	assert_eq!(chat.location.hash(), "#/");
}

proptest! {
	/// Parameters written by navigate come back unchanged from route
	#[test]
	fn prop_navigate_route_round_trip(
		slug in "[a-z0-9_-]{1,16}",
		member in "[A-Za-z0-9.]{1,16}",
	) {
		let h = harness("#/", |log| {
			vec![
				logged_route(log, "home", "/"),
				logged_route(log, "member", "/room/:slug/members/:member"),
			]
		});

		h.router
			.navigate("member", [("slug", slug.as_str()), ("member", member.as_str())])
			.unwrap();
		let outcome = h.router.route();

		let expected: RouteParams = [("slug", slug.as_str()), ("member", member.as_str())]
			.into_iter()
			.collect();
		prop_assert_eq!(
			outcome,
			RouteOutcome::Mounted { route: "member".to_string(), params: expected }
		);
	}
}

// ============================================================================
// Teardown
// ============================================================================

/// The outgoing view is fully torn down before the next handler runs
#[rstest]
fn test_teardown_runs_before_next_handler(chat: Harness) {
	chat.router.route();
	chat.router.navigate("room", [("slug", "general")]).unwrap();
	chat.router.route();
	chat.router.navigator().navigate_to("home").unwrap();
	chat.router.route();

	assert_eq!(
		*chat.log.borrow(),
		vec![
			"mount:home",
			"unmount:home",
			"mount:room slug=general",
			"unmount:room",
			"mount:home",
		]
	);
}

/// Every callback of the set runs once on transition, even after one throws
#[rstest]
fn test_teardown_set_completes_despite_throwing_callback() {
	let runs: Log = Rc::new(RefCell::new(Vec::new()));
	let handle = runs.clone();

	let h = harness("#/", move |log| {
		vec![
			RouteDefinition::new("list", "/", move |_: &Navigator, _: &RouteParams| {
				let set = TeardownSet::new();
				let a = handle.clone();
				set.add(Teardown::from_fn(move || {
					a.borrow_mut().push("a".to_string());
					panic!("a failed");
				}));
				for name in ["b", "c"] {
					let log = handle.clone();
					set.add(Teardown::from_fn(move || log.borrow_mut().push(name.to_string())));
				}
				set
			}),
			logged_route(log, "room", "/room/:slug"),
		]
	});

	h.router.route();
	h.location.set_hash("/room/general");
	h.router.route();
	h.location.set_hash("/room/random");
	h.router.route();

	assert_eq!(*runs.borrow(), vec!["a", "b", "c"]);
	let notices = h.notices.borrow();
	assert_eq!(notices.len(), 1);
	assert_eq!(notices[0].kind, NoticeKind::Error);
	assert!(notices[0].message().contains("a failed"));
}

/// The same route with new parameters remounts the view
#[rstest]
fn test_same_route_different_params_remounts(chat: Harness) {
	chat.location.set_hash("/room/general");
	chat.router.route();
	chat.location.set_hash("/room/random");
	chat.router.route();

	assert_eq!(
		*chat.log.borrow(),
		vec![
			"mount:room slug=general",
			"unmount:room",
			"mount:room slug=random",
		]
	);
}

// ============================================================================
// Handler failures
// ============================================================================

/// A throwing `room` handler reports an error; home still works afterwards
#[rstest]
#[case::panics(true)]
#[case::returns_error(false)]
fn test_handler_failure_then_navigate_home(#[case] panics: bool) {
	let h = harness("#/", move |log| {
		vec![
			logged_route(log, "home", "/"),
			RouteDefinition::new(
				"room",
				"/room/:slug",
				move |_: &Navigator, params: &RouteParams| -> anyhow::Result<()> {
					if panics {
						panic!("room {} exploded", params.get("slug").unwrap_or_default());
					}
					anyhow::bail!("room {} unavailable", params.get("slug").unwrap_or_default())
				},
			),
		]
	});

	h.router.route();
	h.router.navigate("room", [("slug", "general")]).unwrap();
	let outcome = h.router.route();

	assert_eq!(
		outcome,
		RouteOutcome::HandlerFailed {
			route: "room".to_string()
		}
	);
	assert_eq!(h.router.current_route(), None);
	{
		let notices = h.notices.borrow();
		assert_eq!(notices.len(), 1);
		assert_eq!(notices[0].kind, NoticeKind::Error);
		assert!(notices[0].message().contains("room"));
		assert!(matches!(notices[0].error, RouterError::Handler { .. }));
	}

	h.router.navigator().navigate_to("home").unwrap();
	let outcome = h.router.route();

	assert!(matches!(outcome, RouteOutcome::Mounted { .. }));
	assert_eq!(h.router.current_route().as_deref(), Some("home"));
	// The failed view registered nothing, so only home was ever torn down
	assert_eq!(
		*h.log.borrow(),
		vec!["mount:home", "unmount:home", "mount:home"]
	);
	assert_eq!(h.notices.borrow().len(), 1);
}

// ============================================================================
// Listen loop
// ============================================================================

/// Location changes drive routing through the async loop
#[tokio::test(start_paused = true)]
async fn test_listen_routes_each_change() {
	LocalSet::new()
		.run_until(async {
			let log: Log = Rc::new(RefCell::new(Vec::new()));
			let (location, changes) = MemoryLocation::new("#/");
			let router = Rc::new(
				Router::builder()
					.route(logged_route(&log, "home", "/"))
					.route(logged_route(&log, "room", "/room/:slug"))
					.build(location.clone())
					.unwrap(),
			);

			let runner = Rc::clone(&router);
			let task = tokio::task::spawn_local(async move { runner.run(changes).await });
			tokio::time::sleep(Duration::from_millis(1)).await;
			assert_eq!(router.current_route().as_deref(), Some("home"));

			router.navigate("room", [("slug", "general")]).unwrap();
			tokio::time::sleep(Duration::from_millis(1)).await;
			assert_eq!(router.current_route().as_deref(), Some("room"));

			// Same hash: no change signal, no remount
			router.navigate("room", [("slug", "general")]).unwrap();
			tokio::time::sleep(Duration::from_millis(1)).await;

			task.abort();
			assert_eq!(
				*log.borrow(),
				vec!["mount:home", "unmount:home", "mount:room slug=general"]
			);
		})
		.await;
}

/// A handler that navigates during setup is routed by the next loop turn
#[tokio::test(start_paused = true)]
async fn test_listen_follows_redirect_from_handler() {
	LocalSet::new()
		.run_until(async {
			let log: Log = Rc::new(RefCell::new(Vec::new()));
			let redirects = Rc::new(Cell::new(0));
			let counter = redirects.clone();
			let (location, changes) = MemoryLocation::new("#/old-home");
			let router = Rc::new(
				Router::builder()
					.route(RouteDefinition::new(
						"legacy",
						"/old-home",
						move |nav: &Navigator, _: &RouteParams| {
							counter.set(counter.get() + 1);
							nav.navigate_to("home").map(|_| ())
						},
					))
					.route(logged_route(&log, "home", "/"))
					.build(location.clone())
					.unwrap(),
			);

			let runner = Rc::clone(&router);
			let task = tokio::task::spawn_local(async move { runner.run(changes).await });
			tokio::time::sleep(Duration::from_millis(1)).await;
			task.abort();

			assert_eq!(redirects.get(), 1);
			assert_eq!(location.hash(), "#/");
			assert_eq!(router.current_route().as_deref(), Some("home"));
			assert_eq!(*log.borrow(), vec!["mount:home"]);
		})
		.await;
}
