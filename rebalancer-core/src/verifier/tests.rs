use num_bigint::BigUint;
use rstest::rstest;

use super::*;
use crate::{address::decode_and_pad_address, MessageGenerator, RouteInfo};

const MULTISIG: &str = "celestia1multisig";
const TOKEN_ID: &str = "0x1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef";
const RECIPIENT: &str = "0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb0";
const RECIPIENT_BECH32: &str = "celestia1wskntnrxxnq9x2f95wuyf0y7wk2lp04swtxwxs";

fn route(tx_id: &str, domain: u32, recipient: &str, amount: &str, amount_override: Option<&str>) -> Route {
    Route {
        source_tx_id: tx_id.to_owned(),
        source_height: 1,
        sender: "celestia1user".to_owned(),
        amount: amount.to_owned(),
        denom: "utia".to_owned(),
        raw_metadata: None,
        route_info: Some(RouteInfo::new(
            domain,
            recipient.to_owned(),
            TOKEN_ID.to_owned(),
            amount_override.map(str::to_owned),
        )),
    }
}

fn route_set(routes: Vec<Route>) -> RouteSet {
    let mut set = RouteSet::new(MULTISIG);
    routes.into_iter().for_each(|r| set.push(r));
    set
}

fn generate(set: &RouteSet) -> CandidateMessages {
    MessageGenerator::new(MULTISIG).generate(set).unwrap().into()
}

fn assert_consistent(report: &VerificationReport) {
    assert_eq!(
        report.valid,
        report.matched_count == report.total_routes && report.errors.is_empty()
    );
}

#[test]
fn generated_message_matches_its_route() {
    // Given
    let route = route("AA", 1380012617, RECIPIENT, "1000000", None);
    let set = route_set(vec![route.clone()]);

    // When
    let candidates = generate(&set);

    // Then
    assert!(RouteVerifier::matches(&candidates.messages[0], &route));
    let report = RouteVerifier.verify(&set, &candidates);
    assert!(report.valid);
    assert_eq!(report.matched_count, 1);
    assert_eq!(report.total_routes, 1);
    assert!(report.warnings.is_empty());
}

#[test]
fn routes_to_different_domains_do_not_cross_match() {
    // Given
    let to_celestia = route("AA", 1380012617, RECIPIENT, "1000000", None);
    let to_polygon = route("BB", 137, RECIPIENT, "1000000", None);
    let set = route_set(vec![to_celestia.clone(), to_polygon.clone()]);

    // When
    let candidates = generate(&set);

    // Then
    let [first, second] = &candidates.messages[..] else {
        panic!("expected two messages");
    };
    assert!(RouteVerifier::matches(first, &to_celestia));
    assert!(!RouteVerifier::matches(first, &to_polygon));
    assert!(RouteVerifier::matches(second, &to_polygon));
    assert!(!RouteVerifier::matches(second, &to_celestia));

    let report = RouteVerifier.verify(&set, &candidates);
    assert!(report.valid);
    assert_eq!(report.matched_count, 2);
}

#[test]
fn override_amount_is_required() {
    // Given a route with base amount 1000000 and override 400000
    let route = route("AA", 137, RECIPIENT, "1000000", Some("400000"));
    let mut message = MessageGenerator::new(MULTISIG).message(&route).unwrap();

    // Then only the override amount matches
    assert_eq!(message.amount, BigUint::from(400_000u32));
    assert!(RouteVerifier::matches(&message, &route));
    message.amount = BigUint::from(1_000_000u32);
    assert!(!RouteVerifier::matches(&message, &route));
}

#[test]
fn bech32_recipient_matches_padded_hex() {
    let route = route("AA", 137, RECIPIENT_BECH32, "5", None);
    let mut message = MessageGenerator::new(MULTISIG).message(&route).unwrap();
    message.recipient = decode_and_pad_address(RECIPIENT).unwrap();

    assert!(RouteVerifier::matches(&message, &route));
}

#[test]
fn token_id_comparison_ignores_case_and_prefix() {
    let mut route = route("AA", 137, RECIPIENT, "5", None);
    let message = MessageGenerator::new(MULTISIG).message(&route).unwrap();

    route.route_info.as_mut().unwrap().token_id = TOKEN_ID[2..].to_uppercase();

    assert!(RouteVerifier::matches(&message, &route));
}

#[rstest]
#[case::domain(|m: &mut OutboundMessage| m.destination_domain = 1)]
#[case::amount(|m: &mut OutboundMessage| m.amount += 1u32)]
#[case::token_id(|m: &mut OutboundMessage| m.token_id = [0xee; 32].into())]
#[case::recipient(|m: &mut OutboundMessage| m.recipient = [0x01; 32].into())]
fn any_differing_field_is_a_mismatch(#[case] tamper: fn(&mut OutboundMessage)) {
    let route = route("AA", 137, RECIPIENT, "5", None);
    let mut message = MessageGenerator::new(MULTISIG).message(&route).unwrap();

    tamper(&mut message);

    assert!(!RouteVerifier::matches(&message, &route));
}

#[test]
fn undecodable_expected_recipient_is_a_mismatch() {
    let mut route = route("AA", 137, RECIPIENT, "5", None);
    let message = MessageGenerator::new(MULTISIG).message(&route).unwrap();

    route.route_info.as_mut().unwrap().recipient = "celestia1broken".to_owned();

    assert!(!RouteVerifier::matches(&message, &route));
}

#[test]
fn reports_every_unmatched_route() {
    // Given two routes and one message fulfilling only the first
    let set = route_set(vec![
        route("AA", 137, RECIPIENT, "5", None),
        route("BB", 1, RECIPIENT, "6", None),
    ]);
    let mut candidates = generate(&set);
    candidates.messages.truncate(1);

    // When
    let report = RouteVerifier.verify(&set, &candidates);

    // Then
    assert!(!report.valid);
    assert_eq!(report.matched_count, 1);
    assert_eq!(report.total_routes, 2);
    assert_eq!(report.errors.len(), 2);
    assert!(report.errors[0].contains("count mismatch"));
    assert!(report.errors[1].contains("tx BB"));
    assert!(report.errors[1].contains("ethereum (1)"));
    assert!(report.errors[1].contains("amount 6"));
    assert_consistent(&report);
}

#[test]
fn one_message_cannot_satisfy_two_routes() {
    // Given two identical routes and only one message fulfilling them
    let set = route_set(vec![
        route("AA", 137, RECIPIENT, "5", None),
        route("BB", 137, RECIPIENT, "5", None),
    ]);
    let mut candidates = generate(&set);
    candidates.messages[1].amount = BigUint::from(999u32);

    // When
    let report = RouteVerifier.verify(&set, &candidates);

    // Then
    assert!(!report.valid);
    assert_eq!(report.matched_count, 1);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("amount 999"));
    assert_consistent(&report);
}

#[test]
fn order_of_messages_does_not_matter() {
    let set = route_set(vec![
        route("AA", 137, RECIPIENT, "5", None),
        route("BB", 1, RECIPIENT, "6", None),
    ]);
    let mut candidates = generate(&set);
    candidates.messages.reverse();

    let report = RouteVerifier.verify(&set, &candidates);

    assert!(report.valid);
    assert_eq!(report.matched_count, 2);
}

#[test]
fn route_without_info_is_an_error() {
    let mut set = route_set(vec![route("AA", 137, RECIPIENT, "5", None)]);
    let candidates = generate(&set);
    set.routes[0].route_info = None;

    let report = RouteVerifier.verify(&set, &candidates);

    assert!(!report.valid);
    assert_eq!(report.matched_count, 0);
    assert!(report.errors[0].contains("missing route info"));
    assert_consistent(&report);
}

#[test]
fn foreign_sender_and_decode_findings_are_warnings() {
    let set = route_set(vec![route("AA", 137, RECIPIENT, "5", None)]);
    let mut candidates = generate(&set);
    candidates.messages[0].sender = "celestia1someoneelse".to_owned();
    candidates
        .warnings
        .push("message 1: ignoring /cosmos.bank.v1beta1.MsgSend".to_owned());

    let report = RouteVerifier.verify(&set, &candidates);

    assert!(report.valid);
    assert_eq!(report.warnings.len(), 2);
    assert!(report.warnings.iter().any(|w| w.contains("celestia1someoneelse")));
}

#[test]
fn empty_sets_verify() {
    let set = route_set(Vec::new());

    let report = RouteVerifier.verify(&set, &CandidateMessages::default());

    assert!(report.valid);
    assert_eq!(report.total_routes, 0);
    assert_consistent(&report);
}
