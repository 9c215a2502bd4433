//! Route catalogs: data sources that expose a list of route strings.

/// A source of raw route strings.
///
/// # Examples
///
/// ```
/// use routeforge_core::{RouteCatalog, StaticCatalog};
///
/// static ROUTES: &[&str] = &["incident/discover/a/low", "mesh/drain/b/high"];
/// let catalog = StaticCatalog::new("demo", ROUTES);
/// assert_eq!(catalog.routes().len(), 2);
/// assert_eq!(vec!["x/y/z/low"].routes(), vec!["x/y/z/low".to_string()]);
/// ```
pub trait RouteCatalog {
    /// Every route in catalog order.
    fn routes(&self) -> Vec<String>;
}

impl RouteCatalog for Vec<String> {
    fn routes(&self) -> Vec<String> {
        self.clone()
    }
}

impl RouteCatalog for Vec<&str> {
    fn routes(&self) -> Vec<String> {
        self.iter().map(|s| s.to_string()).collect()
    }
}

impl RouteCatalog for [&str] {
    fn routes(&self) -> Vec<String> {
        self.iter().map(|s| s.to_string()).collect()
    }
}

impl RouteCatalog for [String] {
    fn routes(&self) -> Vec<String> {
        self.to_vec()
    }
}

impl<C: RouteCatalog + ?Sized> RouteCatalog for &C {
    fn routes(&self) -> Vec<String> {
        (**self).routes()
    }
}

/// A named catalog backed by a static slice.
#[derive(Debug, Clone, Copy)]
pub struct StaticCatalog {
    name: &'static str,
    routes: &'static [&'static str],
}

impl StaticCatalog {
    pub const fn new(name: &'static str, routes: &'static [&'static str]) -> Self {
        Self { name, routes }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl RouteCatalog for StaticCatalog {
    fn routes(&self) -> Vec<String> {
        self.routes.iter().map(|s| s.to_string()).collect()
    }
}
