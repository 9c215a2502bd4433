//! Route catalog fixtures.
//!
//! # Example
//!
//! ```
//! use routeforge_core::RouteCatalog;
//! use routeforge_test::catalog::{volume_batch, INCIDENT_CATALOG};
//!
//! assert_eq!(INCIDENT_CATALOG.routes().len(), 6);
//! assert_eq!(volume_batch("quota", 41).len(), 41);
//! ```

use routeforge_core::StaticCatalog;

/// Well-formed incident-handling routes, one per rule family.
pub static INCIDENT_ROUTES: &[&str] = &[
    "incident/discover/id-1/critical",
    "incident/shutdown/id-2/low",
    "incident/drain/id-3/medium",
    "incident/rollback/id-4/emergency",
    "incident/verify/id-5/low",
    "incident/notify/id-6/low",
];

pub static INCIDENT_CATALOG: StaticCatalog = StaticCatalog::new("incident", INCIDENT_ROUTES);

/// Inputs the parser must absorb into a fallback route.
pub static MALFORMED_ROUTES: &[&str] = &[
    "",
    "not-a-route",
    "incident/discover",
    "a:b",
    "too/many/fields/in/this/route",
];

/// A mix of grammars, coerced members and malformed input.
pub static MIXED_ROUTES: &[&str] = &[
    "mesh/deploy/svc-a/low",
    "rollback:policy:critical",
    "storage:snapshot:high:vol-9",
    "galaxy/teleport/x/apocalyptic",
    "not-a-route",
    "network/freeze/edge-1/medium",
    "audit/reconcile/ledger/low",
    "/telemetry/observe/sensor-2/emergency",
];

pub static MIXED_CATALOG: StaticCatalog = StaticCatalog::new("mixed", MIXED_ROUTES);

/// `count` well-formed standard routes in one domain.
pub fn volume_batch(domain: &str, count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("{}/discover/item-{}/low", domain, i))
        .collect()
}
