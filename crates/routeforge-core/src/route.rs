//! Routes and the route parser.
//!
//! A route encodes a domain, an action, an identifier and a severity in one
//! of three delimited grammars. Parsing is total: wrong field counts yield the
//! grammar's fallback route and unknown members are coerced to the parser's
//! default members.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::grammar::{Action, Domain, Severity, Vocabulary};

/// Fallback for the `Path` grammar.
pub const PATH_FALLBACK: &str = "/recovery/assess/fallback/low";

/// Fallback for the colon-delimited grammars.
pub const COMMAND_FALLBACK: &str = "boot:incident:low";

/// Identifier used when a grammar carries none or the field is empty.
pub const FALLBACK_IDENTIFIER: &str = "fallback";

/// Route string grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grammar {
    /// `domain/action/identifier/severity`, optional leading `/`.
    Path,
    /// `action:domain:severity`.
    Command,
    /// `domain:action:severity:identifier`.
    Key,
}

impl Grammar {
    /// Picks the grammar a raw (trimmed) route is written in.
    ///
    /// Anything containing `/` is `Path`; three colons is `Key`; any other
    /// colon count is `Command`; input without a delimiter is `Path`.
    pub fn detect(raw: &str) -> Grammar {
        if raw.contains('/') {
            return Grammar::Path;
        }
        match raw.matches(':').count() {
            0 => Grammar::Path,
            3 => Grammar::Key,
            _ => Grammar::Command,
        }
    }

    pub const fn delimiter(self) -> char {
        match self {
            Grammar::Path => '/',
            Grammar::Command | Grammar::Key => ':',
        }
    }

    pub const fn field_count(self) -> usize {
        match self {
            Grammar::Path | Grammar::Key => 4,
            Grammar::Command => 3,
        }
    }

    /// Route substituted when the field count does not match.
    pub fn fallback(self) -> Route {
        match self {
            Grammar::Path => Route {
                domain: Domain::Recovery,
                action: Action::Assess,
                identifier: FALLBACK_IDENTIFIER.to_string(),
                severity: Severity::Low,
                origin: RouteOrigin::Fallback,
            },
            Grammar::Command | Grammar::Key => Route {
                domain: Domain::Incident,
                action: Action::Boot,
                identifier: FALLBACK_IDENTIFIER.to_string(),
                severity: Severity::Low,
                origin: RouteOrigin::Fallback,
            },
        }
    }
}

/// How a route came out of the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteOrigin {
    /// Every field matched.
    #[default]
    Parsed,
    /// Field count matched, at least one field was replaced by a default.
    Coerced,
    /// Field count did not match; this is the grammar's fallback route.
    Fallback,
}

/// A parsed route.
///
/// # Examples
///
/// ```
/// use routeforge_core::{parse, Action, Domain, Severity};
///
/// let route = parse("incident/discover/id-1/critical");
/// assert_eq!(route.domain(), Domain::Incident);
/// assert_eq!(route.action(), Action::Discover);
/// assert_eq!(route.identifier(), "id-1");
/// assert_eq!(route.severity(), Severity::Critical);
/// assert_eq!(route.to_key(), "incident:discover:critical:id-1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Route {
    domain: Domain,
    action: Action,
    identifier: String,
    severity: Severity,
    #[serde(default)]
    origin: RouteOrigin,
}

impl Route {
    /// Creates a cleanly parsed route from its components.
    pub fn new(
        domain: Domain,
        action: Action,
        identifier: impl Into<String>,
        severity: Severity,
    ) -> Self {
        let identifier = identifier.into();
        let (identifier, origin) = if identifier.trim().is_empty() {
            (FALLBACK_IDENTIFIER.to_string(), RouteOrigin::Coerced)
        } else {
            (identifier, RouteOrigin::Parsed)
        };
        Self {
            domain,
            action,
            identifier,
            severity,
            origin,
        }
    }

    #[inline]
    pub fn domain(&self) -> Domain {
        self.domain
    }

    #[inline]
    pub fn action(&self) -> Action {
        self.action
    }

    #[inline]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[inline]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[inline]
    pub fn origin(&self) -> RouteOrigin {
        self.origin
    }

    /// Returns true if this route is a grammar fallback.
    pub fn is_fallback(&self) -> bool {
        self.origin == RouteOrigin::Fallback
    }

    /// Renders the route in `Key` form: `domain:action:severity:identifier`.
    ///
    /// `:` and `%` in the identifier are written as `%3A` and `%25`, so the
    /// key always has four fields and parses back to the same route.
    pub fn to_key(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.domain,
            self.action,
            self.severity,
            escape_key_identifier(&self.identifier)
        )
    }
}

impl fmt::Display for Route {
    /// Renders the route in `Path` form: `domain/action/identifier/severity`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.domain, self.action, self.identifier, self.severity
        )
    }
}

/// Route parser with configurable default members and alias tables.
///
/// # Examples
///
/// ```
/// use routeforge_core::{Domain, RouteOrigin, RouteParser, Severity};
///
/// let parser = RouteParser::new()
///     .with_severity_alias("sev1", Severity::Critical)
///     .with_default_domain(Domain::Incident);
///
/// let route = parser.parse("unknown/discover/x/sev1");
/// assert_eq!(route.domain(), Domain::Incident);
/// assert_eq!(route.severity(), Severity::Critical);
/// assert_eq!(route.origin(), RouteOrigin::Coerced);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteParser {
    default_domain: Domain,
    default_action: Action,
    default_severity: Severity,
    domain_aliases: HashMap<String, Domain>,
    action_aliases: HashMap<String, Action>,
    severity_aliases: HashMap<String, Severity>,
}

impl RouteParser {
    /// Creates a parser with the built-in default members and no aliases.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_domain(mut self, domain: Domain) -> Self {
        self.default_domain = domain;
        self
    }

    pub fn with_default_action(mut self, action: Action) -> Self {
        self.default_action = action;
        self
    }

    pub fn with_default_severity(mut self, severity: Severity) -> Self {
        self.default_severity = severity;
        self
    }

    /// Maps an extra spelling onto an existing domain.
    pub fn with_domain_alias(mut self, alias: impl AsRef<str>, domain: Domain) -> Self {
        self.domain_aliases
            .insert(alias.as_ref().trim().to_ascii_lowercase(), domain);
        self
    }

    /// Maps an extra spelling onto an existing action.
    pub fn with_action_alias(mut self, alias: impl AsRef<str>, action: Action) -> Self {
        self.action_aliases
            .insert(alias.as_ref().trim().to_ascii_lowercase(), action);
        self
    }

    /// Maps an extra spelling onto an existing severity.
    pub fn with_severity_alias(mut self, alias: impl AsRef<str>, severity: Severity) -> Self {
        self.severity_aliases
            .insert(alias.as_ref().trim().to_ascii_lowercase(), severity);
        self
    }

    pub fn default_domain(&self) -> Domain {
        self.default_domain
    }

    pub fn default_action(&self) -> Action {
        self.default_action
    }

    pub fn default_severity(&self) -> Severity {
        self.default_severity
    }

    /// Parses a raw route, detecting its grammar.
    pub fn parse(&self, raw: &str) -> Route {
        let trimmed = raw.trim();
        self.parse_grammar(trimmed, Grammar::detect(trimmed))
    }

    /// Parses a raw route against an explicit grammar.
    pub fn parse_grammar(&self, raw: &str, grammar: Grammar) -> Route {
        let raw = raw.trim();
        let body = match grammar {
            Grammar::Path => raw.strip_prefix('/').unwrap_or(raw),
            Grammar::Command | Grammar::Key => raw,
        };
        let fields: Vec<&str> = body.split(grammar.delimiter()).map(str::trim).collect();

        if fields.len() != grammar.field_count() {
            debug!(
                raw,
                ?grammar,
                fields = fields.len(),
                "route field count mismatch, using fallback"
            );
            return grammar.fallback();
        }

        let (domain, action, identifier, severity) = match grammar {
            Grammar::Path => (fields[0], fields[1], Cow::Borrowed(fields[2]), fields[3]),
            Grammar::Command => (
                fields[1],
                fields[0],
                Cow::Borrowed(FALLBACK_IDENTIFIER),
                fields[2],
            ),
            Grammar::Key => (fields[0], fields[1], unescape_key_identifier(fields[3]), fields[2]),
        };

        let mut coerced = false;
        let domain = resolve(domain, &self.domain_aliases, self.default_domain, &mut coerced);
        let action = resolve(action, &self.action_aliases, self.default_action, &mut coerced);
        let severity = resolve(
            severity,
            &self.severity_aliases,
            self.default_severity,
            &mut coerced,
        );
        let identifier = if identifier.is_empty() {
            coerced = true;
            FALLBACK_IDENTIFIER.to_string()
        } else {
            identifier.into_owned()
        };

        if coerced {
            debug!(raw, "route members coerced to defaults");
        }

        Route {
            domain,
            action,
            identifier,
            severity,
            origin: if coerced {
                RouteOrigin::Coerced
            } else {
                RouteOrigin::Parsed
            },
        }
    }
}

fn escape_key_identifier(identifier: &str) -> Cow<'_, str> {
    if identifier.contains([':', '%']) {
        Cow::Owned(identifier.replace('%', "%25").replace(':', "%3A"))
    } else {
        Cow::Borrowed(identifier)
    }
}

fn unescape_key_identifier(field: &str) -> Cow<'_, str> {
    if !field.contains('%') {
        return Cow::Borrowed(field);
    }
    let mut out = String::with_capacity(field.len());
    let mut rest = field;
    while let Some(i) = rest.find('%') {
        out.push_str(&rest[..i]);
        let tail = &rest[i..];
        match tail.get(1..3) {
            Some(code) if code.eq_ignore_ascii_case("3A") => {
                out.push(':');
                rest = &tail[3..];
            }
            Some("25") => {
                out.push('%');
                rest = &tail[3..];
            }
            _ => {
                out.push('%');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn resolve<T: Vocabulary>(
    text: &str,
    aliases: &HashMap<String, T>,
    default: T,
    coerced: &mut bool,
) -> T {
    if let Some(member) = T::lookup(text) {
        return member;
    }
    if let Some(member) = aliases.get(&text.to_ascii_lowercase()) {
        return *member;
    }
    *coerced = true;
    default
}

/// Parses a raw route with the built-in vocabulary defaults.
///
/// Never fails: see [`RouteParser::parse`].
///
/// # Examples
///
/// ```
/// use routeforge_core::{parse, Grammar};
///
/// assert_eq!(parse("not-a-route"), Grammar::Path.fallback());
/// ```
pub fn parse(raw: &str) -> Route {
    RouteParser::new().parse(raw)
}
