//! Shipping zones and destination matching.

use crate::ids::ZoneId;
use crate::shipping::ShippingMethod;
use serde::{Deserialize, Serialize};

/// Where a cart ships to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
    /// State or province code.
    pub state: Option<String>,
    /// City name.
    pub city: Option<String>,
    /// Postal or ZIP code.
    pub postal_code: Option<String>,
}

impl Destination {
    /// Create a destination with just a country.
    pub fn country(code: impl Into<String>) -> Self {
        Self {
            country: code.into(),
            state: None,
            city: None,
            postal_code: None,
        }
    }

    /// Set the state.
    pub fn in_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Set the postal code.
    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }
}

/// A named destination-matching rule bundling one or more priced methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingZone {
    /// Unique zone identifier.
    pub id: ZoneId,
    /// Display name.
    pub name: String,
    /// ISO-2 country codes served, matched case-sensitively.
    pub countries: Vec<String>,
    /// State/province codes served; empty means all states.
    pub states: Vec<String>,
    /// Postal code patterns; a single `*` matches any characters, otherwise
    /// exact case-insensitive equality. Empty means all postal codes.
    pub postal_codes: Vec<String>,
    /// Disabled zones never match.
    pub enabled: bool,
    /// Higher priority zones are checked and preferred first.
    pub priority: i32,
    /// Priced methods available in this zone.
    pub methods: Vec<ShippingMethod>,
}

impl ShippingZone {
    /// Create an enabled zone covering the given countries.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        countries: Vec<&str>,
    ) -> Self {
        Self {
            id: ZoneId::new(id),
            name: name.into(),
            countries: countries.into_iter().map(String::from).collect(),
            states: Vec::new(),
            postal_codes: Vec::new(),
            enabled: true,
            priority: 0,
            methods: Vec::new(),
        }
    }

    /// Restrict the zone to the given states.
    pub fn with_states(mut self, states: Vec<&str>) -> Self {
        self.states = states.into_iter().map(String::from).collect();
        self
    }

    /// Restrict the zone to the given postal code patterns.
    pub fn with_postal_codes(mut self, patterns: Vec<&str>) -> Self {
        self.postal_codes = patterns.into_iter().map(String::from).collect();
        self
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Add a method.
    pub fn with_method(mut self, method: ShippingMethod) -> Self {
        self.methods.push(method);
        self
    }

    /// Whether this zone serves the destination.
    ///
    /// Country membership is required; state and postal constraints apply
    /// only when both the constraint and the destination field are present.
    /// A zone with no state or postal constraint matches on country alone.
    pub fn matches(&self, destination: &Destination) -> bool {
        if !self.enabled {
            return false;
        }
        if !self.countries.iter().any(|c| c == &destination.country) {
            return false;
        }
        if !self.states.is_empty() {
            if let Some(state) = &destination.state {
                if !self.states.iter().any(|s| s == state) {
                    return false;
                }
            }
        }
        if !self.postal_codes.is_empty() {
            if let Some(postal_code) = &destination.postal_code {
                let any = self
                    .postal_codes
                    .iter()
                    .any(|pattern| postal_pattern_matches(pattern, postal_code));
                if !any {
                    return false;
                }
            }
        }
        true
    }
}

/// Match a postal code against a pattern.
///
/// A single `*` in the pattern stands for any run of characters; without
/// one, the comparison is exact. Both forms ignore case.
pub fn postal_pattern_matches(pattern: &str, postal_code: &str) -> bool {
    let pattern = pattern.to_lowercase();
    let code = postal_code.to_lowercase();
    match pattern.find('*') {
        Some(pos) => {
            let prefix = &pattern[..pos];
            let suffix = &pattern[pos + 1..];
            code.len() >= prefix.len() + suffix.len()
                && code.starts_with(prefix)
                && code.ends_with(suffix)
        }
        None => pattern == code,
    }
}

/// Select the zones serving a destination, ordered by priority descending.
///
/// The result is deterministic: zones with equal priority keep their
/// configured order. Matching zones are not deduplicated or merged; a
/// destination may legitimately sit in several zones at once (e.g., a broad
/// "domestic" and a narrow "regional" zone) and all their enabled methods
/// are rate candidates.
pub fn match_zones<'a>(
    destination: &Destination,
    zones: &'a [ShippingZone],
) -> Vec<&'a ShippingZone> {
    let mut matched: Vec<&ShippingZone> =
        zones.iter().filter(|z| z.matches(destination)).collect();
    matched.sort_by_key(|z| std::cmp::Reverse(z.priority));
    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_match() {
        let zone = ShippingZone::new("us", "United States", vec!["US"]);
        assert!(zone.matches(&Destination::country("US")));
        assert!(!zone.matches(&Destination::country("CA")));
        // Country codes are case-sensitive ISO-2.
        assert!(!zone.matches(&Destination::country("us")));
    }

    #[test]
    fn test_disabled_zone_never_matches() {
        let mut zone = ShippingZone::new("us", "United States", vec!["US"]);
        zone.enabled = false;
        assert!(!zone.matches(&Destination::country("US")));
    }

    #[test]
    fn test_state_constraint() {
        let zone = ShippingZone::new("west", "West Coast", vec!["US"])
            .with_states(vec!["CA", "OR", "WA"]);
        assert!(zone.matches(&Destination::country("US").in_state("CA")));
        assert!(!zone.matches(&Destination::country("US").in_state("NY")));
        // No state on the destination: constraint is not applied.
        assert!(zone.matches(&Destination::country("US")));
    }

    #[test]
    fn test_postal_wildcard() {
        assert!(postal_pattern_matches("100*", "10001"));
        assert!(!postal_pattern_matches("100*", "20001"));
        assert!(postal_pattern_matches("*01", "10001"));
        assert!(postal_pattern_matches("SW1A*", "sw1a 1aa"));
        assert!(postal_pattern_matches("94102", "94102"));
        assert!(!postal_pattern_matches("94102", "94103"));
    }

    #[test]
    fn test_postal_constraint_on_zone() {
        let zone = ShippingZone::new("nyc", "New York City", vec!["US"])
            .with_postal_codes(vec!["100*", "101*"]);
        assert!(zone.matches(&Destination::country("US").with_postal_code("10001")));
        assert!(!zone.matches(&Destination::country("US").with_postal_code("90210")));
    }

    #[test]
    fn test_multiple_zones_match_in_priority_order() {
        let domestic = ShippingZone::new("domestic", "Domestic", vec!["US"]).with_priority(1);
        let regional = ShippingZone::new("regional", "Regional", vec!["US"])
            .with_states(vec!["CA"])
            .with_priority(10);
        let international = ShippingZone::new("intl", "International", vec!["GB", "DE"]);

        let zones = vec![domestic, regional, international];
        let destination = Destination::country("US").in_state("CA");
        let matched = match_zones(&destination, &zones);

        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].id.as_str(), "regional");
        assert_eq!(matched[1].id.as_str(), "domestic");
    }

    #[test]
    fn test_match_is_deterministic() {
        let zones = vec![
            ShippingZone::new("a", "A", vec!["US"]),
            ShippingZone::new("b", "B", vec!["US"]),
        ];
        let destination = Destination::country("US");
        let first: Vec<_> = match_zones(&destination, &zones)
            .iter()
            .map(|z| z.id.clone())
            .collect();
        let second: Vec<_> = match_zones(&destination, &zones)
            .iter()
            .map(|z| z.id.clone())
            .collect();
        assert_eq!(first, second);
        // Equal priority keeps configured order.
        assert_eq!(first[0].as_str(), "a");
    }
}
