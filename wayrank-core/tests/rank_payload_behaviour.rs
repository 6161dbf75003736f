//! Behavioural tests for turning boundary payloads into `RankRequest`s.

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use wayrank_core::{PointInput, Profile, RankError, RankPayload, RankRequest};

#[fixture]
fn payload() -> RefCell<Option<RankPayload>> {
    RefCell::new(None)
}

#[fixture]
fn result() -> RefCell<Option<Result<RankRequest, RankError>>> {
    RefCell::new(None)
}

fn text(value: &str) -> PointInput {
    PointInput::Text(value.to_owned())
}

fn unlabelled(count: usize) -> Vec<PointInput> {
    (0..count)
        .map(|i| text(&format!("35.7{i}, 51.4{i}")))
        .collect()
}

#[given("a payload with one labelled and three unlabelled destinations")]
fn given_mixed(#[from(payload)] payload: &RefCell<Option<RankPayload>>) {
    let mut destinations = unlabelled(4);
    destinations[1] = PointInput::Structured {
        lat: 35.68,
        lon: 51.42,
        label: Some("Museum".to_owned()),
    };
    *payload.borrow_mut() = Some(RankPayload {
        origin: text("35.70,51.40"),
        destinations,
        profile: Profile::Car,
        return_to_origin: false,
    });
}

#[given("a payload with 3 destinations")]
fn given_three(#[from(payload)] payload: &RefCell<Option<RankPayload>>) {
    *payload.borrow_mut() = Some(RankPayload {
        origin: text("35.70,51.40"),
        destinations: unlabelled(3),
        profile: Profile::Car,
        return_to_origin: false,
    });
}

#[given("a payload whose origin is \"91,0\"")]
fn given_bad_origin(#[from(payload)] payload: &RefCell<Option<RankPayload>>) {
    *payload.borrow_mut() = Some(RankPayload {
        origin: text("91,0"),
        destinations: unlabelled(4),
        profile: Profile::Car,
        return_to_origin: false,
    });
}

#[when("I normalise the payload")]
fn when_normalise(
    #[from(payload)] payload: &RefCell<Option<RankPayload>>,
    #[from(result)] result: &RefCell<Option<Result<RankRequest, RankError>>>,
) {
    let payload = payload.borrow_mut().take().expect("payload set");
    *result.borrow_mut() = Some(RankRequest::try_from(payload));
}

#[then("the destinations are labelled \"Destination 1\", \"Museum\", \"Destination 3\", \"Destination 4\"")]
fn then_labels(#[from(result)] result: &RefCell<Option<Result<RankRequest, RankError>>>) {
    let borrow = result.borrow();
    let request = borrow
        .as_ref()
        .expect("result set")
        .as_ref()
        .expect("valid request");
    let labels: Vec<_> = request.destinations.iter().map(|p| p.label()).collect();
    assert_eq!(
        labels,
        ["Destination 1", "Museum", "Destination 3", "Destination 4"]
    );
    assert_eq!(request.origin.label(), "Origin");
}

#[then("a destination count error is returned")]
fn then_count_error(#[from(result)] result: &RefCell<Option<Result<RankRequest, RankError>>>) {
    let borrow = result.borrow();
    let err = borrow
        .as_ref()
        .expect("result set")
        .as_ref()
        .expect_err("count error");
    assert_eq!(
        *err,
        RankError::DestinationCount {
            expected: 4,
            found: 3
        }
    );
}

#[then("an invalid point error is returned")]
fn then_point_error(#[from(result)] result: &RefCell<Option<Result<RankRequest, RankError>>>) {
    let borrow = result.borrow();
    let err = borrow
        .as_ref()
        .expect("result set")
        .as_ref()
        .expect_err("point error");
    assert!(matches!(err, RankError::InvalidPoint { label, .. } if label == "Origin"));
}

#[scenario(path = "tests/features/rank_payload.feature", index = 0)]
fn mixed_points_resolve(
    payload: RefCell<Option<RankPayload>>,
    result: RefCell<Option<Result<RankRequest, RankError>>>,
) {
    let _ = (payload, result);
}

#[scenario(path = "tests/features/rank_payload.feature", index = 1)]
fn three_destinations_rejected(
    payload: RefCell<Option<RankPayload>>,
    result: RefCell<Option<Result<RankRequest, RankError>>>,
) {
    let _ = (payload, result);
}

#[scenario(path = "tests/features/rank_payload.feature", index = 2)]
fn bad_origin_rejected(
    payload: RefCell<Option<RankPayload>>,
    result: RefCell<Option<Result<RankRequest, RankError>>>,
) {
    let _ = (payload, result);
}
