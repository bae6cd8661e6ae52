//! Route information results.

/// Full description of one route (`routeinfo`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteInfo {
    /// Route identifier, e.g. "ROUTE 1".
    pub route_id: String,
    /// Human-readable name, e.g. "Antioch - SFIA/Millbrae".
    pub name: String,
    pub abbr: String,
    pub number: Option<u32>,
    pub origin: String,
    pub destination: String,
    pub color: String,
    pub hex_color: String,
    /// Station abbreviations served, in order.
    pub stations: Vec<String>,
}

/// One entry of the route list (`routes`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSummary {
    pub route_id: String,
    pub name: String,
    pub abbr: String,
    pub number: Option<u32>,
    pub color: String,
}
