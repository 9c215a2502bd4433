//! Tests for the route parser.

use crate::grammar::{Action, Domain, Severity};
use crate::route::*;

#[test]
fn test_parse_path_route() {
    let route = parse("incident/discover/id-1/critical");

    assert_eq!(route.domain(), Domain::Incident);
    assert_eq!(route.action(), Action::Discover);
    assert_eq!(route.identifier(), "id-1");
    assert_eq!(route.severity(), Severity::Critical);
    assert_eq!(route.origin(), RouteOrigin::Parsed);
}

#[test]
fn test_parse_leading_slash() {
    let route = parse("/mesh/drain/node-7/high");
    assert_eq!(route.domain(), Domain::Mesh);
    assert_eq!(route.action(), Action::Drain);
    assert_eq!(route.origin(), RouteOrigin::Parsed);
}

#[test]
fn test_parse_command_route() {
    let route = parse("rollback:policy:emergency");

    assert_eq!(route.action(), Action::Rollback);
    assert_eq!(route.domain(), Domain::Policy);
    assert_eq!(route.severity(), Severity::Emergency);
    assert_eq!(route.identifier(), FALLBACK_IDENTIFIER);
    assert_eq!(route.origin(), RouteOrigin::Parsed);
}

#[test]
fn test_parse_key_route() {
    let route = parse("incident:discover:low:id-a");

    assert_eq!(route.domain(), Domain::Incident);
    assert_eq!(route.action(), Action::Discover);
    assert_eq!(route.severity(), Severity::Low);
    assert_eq!(route.identifier(), "id-a");
    assert_eq!(route.to_key(), "incident:discover:low:id-a");
}

#[test]
fn test_not_a_route_uses_path_fallback() {
    let route = parse("not-a-route");

    assert_eq!(route, Grammar::Path.fallback());
    assert!(route.is_fallback());
    assert_eq!(format!("/{}", route), PATH_FALLBACK);
}

#[test]
fn test_colon_fallback_matches_constant() {
    let route = parse("a:b:c:d:e");
    assert_eq!(route, Grammar::Command.fallback());
    assert_eq!(
        format!("{}:{}:{}", route.action(), route.domain(), route.severity()),
        COMMAND_FALLBACK
    );
}

#[test]
fn test_wrong_field_counts() {
    for raw in [
        "",
        "   ",
        "incident/discover",
        "incident/discover/id/low/extra",
        "incident/discover/id/low/",
        "a:b",
        "only:one:two:three:four",
    ] {
        let route = parse(raw);
        assert!(route.is_fallback(), "expected fallback for {:?}", raw);
    }
}

#[test]
fn test_unknown_members_coerced_to_defaults() {
    let route = parse("galaxy/teleport/x/apocalyptic");

    assert_eq!(route.domain(), Domain::Recovery);
    assert_eq!(route.action(), Action::Assess);
    assert_eq!(route.severity(), Severity::Low);
    assert_eq!(route.identifier(), "x");
    assert_eq!(route.origin(), RouteOrigin::Coerced);
}

#[test]
fn test_empty_identifier_coerced() {
    let route = parse("cache/patch//medium");
    assert_eq!(route.identifier(), FALLBACK_IDENTIFIER);
    assert_eq!(route.origin(), RouteOrigin::Coerced);
}

#[test]
fn test_parse_is_case_and_space_tolerant() {
    let route = parse("  Incident / DISCOVER / id-1 / Critical  ");
    assert_eq!(route, parse("incident/discover/id-1/critical"));
}

#[test]
fn test_parse_is_total_on_garbage() {
    for raw in ["💥/🔥/✨/🌊", "::::", "////", "\u{0}", "日本:語", "/"] {
        let route = parse(raw);
        assert!(Domain::ALL.contains(&route.domain()));
        assert!(Action::ALL.contains(&route.action()));
        assert!(Severity::ALL.contains(&route.severity()));
        assert!(!route.identifier().is_empty());
    }
}

#[test]
fn test_parser_aliases_and_defaults() {
    let parser = RouteParser::new()
        .with_domain_alias("K8S", Domain::Mesh)
        .with_action_alias("rb", Action::Rollback)
        .with_default_severity(Severity::Medium);

    let route = parser.parse("k8s/rb/pod-1/unknown");
    assert_eq!(route.domain(), Domain::Mesh);
    assert_eq!(route.action(), Action::Rollback);
    assert_eq!(route.severity(), Severity::Medium);
    assert_eq!(route.origin(), RouteOrigin::Coerced);

    let aliased_only = parser.parse("k8s/rb/pod-1/low");
    assert_eq!(aliased_only.origin(), RouteOrigin::Parsed);
}

#[test]
fn test_parse_explicit_grammar() {
    let parser = RouteParser::new();
    // three fields is a Command, not a Key
    assert!(parser
        .parse_grammar("rollback:policy:high", Grammar::Key)
        .is_fallback());
    assert!(!parser
        .parse_grammar("rollback:policy:high", Grammar::Command)
        .is_fallback());
}

#[test]
fn test_display_round_trips_through_parser() {
    let route = Route::new(Domain::Fabric, Action::Restart, "sw-3", Severity::High);
    assert_eq!(route.to_string(), "fabric/restart/sw-3/high");
    assert_eq!(parse(&route.to_string()), route);
    assert_eq!(parse(&route.to_key()), route);
}

#[test]
fn test_grammar_detection() {
    assert_eq!(Grammar::detect("a/b/c/d"), Grammar::Path);
    assert_eq!(Grammar::detect("a:b:c"), Grammar::Command);
    assert_eq!(Grammar::detect("a:b:c:d"), Grammar::Key);
    assert_eq!(Grammar::detect("a:b"), Grammar::Command);
    assert_eq!(Grammar::detect("plain"), Grammar::Path);
}

#[test]
fn test_key_round_trip_with_colon_identifier() {
    let route = parse("incident/discover/a:b/low");
    assert_eq!(route.identifier(), "a:b");

    let key = route.to_key();
    assert_eq!(key, "incident:discover:low:a%3Ab");
    assert_eq!(Grammar::detect(&key), Grammar::Key);
    assert_eq!(parse(&key), route);
}

#[test]
fn test_key_round_trip_with_percent_identifier() {
    let route = parse("mesh/deploy/50%:x/high");
    assert_eq!(route.to_key(), "mesh:deploy:high:50%25%3Ax");
    assert_eq!(parse(&route.to_key()), route);
}

#[test]
fn test_key_identifier_without_escapes_is_kept() {
    assert_eq!(parse("mesh:deploy:low:100%").identifier(), "100%");
    assert_eq!(parse("mesh:deploy:low:a%3ab").identifier(), "a:b");
}
