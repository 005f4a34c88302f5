//! Zone-based shipping method catalog.
//!
//! Zones group geographic match rules with the shipping methods offered
//! there. The catalog is read-only configuration, loaded from a JSON file
//! at startup.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use deferred_shipping_core::{Money, ZoneId};

use crate::models::Address;

/// Display label for the worldwide catch-all zone when it is offered
/// alongside address-matched zones.
pub const DEFAULT_ZONE_LABEL: &str = "Default Zone";

/// Error loading the zone catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(String),
    #[error("failed to parse catalog file: {0}")]
    Parse(String),
}

/// A geographic match rule for a zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ZoneLocation {
    /// Exact country code match (e.g. "US").
    Country { code: String },
    /// Exact compound "country:state" match (e.g. "US:CA").
    State { code: String },
    /// Postcode prefix match.
    Postcode { code: String },
}

impl ZoneLocation {
    /// Whether this rule matches the given address.
    #[must_use]
    pub fn matches(&self, address: &Address) -> bool {
        match self {
            Self::Country { code } => *code == address.country,
            Self::State { code } => {
                *code == format!("{}:{}", address.country, address.state)
            }
            Self::Postcode { code } => address.postcode.starts_with(code.as_str()),
        }
    }
}

/// A configured shipping method within a zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingMethod {
    pub id: String,
    pub title: String,
    /// Base cost; absent is treated as zero.
    #[serde(default)]
    pub cost: Option<Money>,
    /// Weight-keyed cost table, "threshold:cost,threshold:cost,...".
    #[serde(default)]
    pub weight_costs: Option<String>,
    /// Item-count-keyed cost table, same format.
    #[serde(default)]
    pub item_costs: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

const fn default_enabled() -> bool {
    true
}

impl ShippingMethod {
    /// Base cost with absent configuration coerced to zero.
    #[must_use]
    pub fn base_cost(&self) -> Money {
        self.cost.unwrap_or(Money::ZERO)
    }
}

/// A shipping zone: location rules plus the methods offered there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingZone {
    pub id: ZoneId,
    pub name: String,
    #[serde(default)]
    pub locations: Vec<ZoneLocation>,
    #[serde(default)]
    pub methods: Vec<ShippingMethod>,
}

impl ShippingZone {
    /// Whether any location rule matches the address.
    ///
    /// The first matching rule short-circuits. The worldwide zone carries
    /// no rules and never matches here; it is appended separately.
    #[must_use]
    pub fn matches(&self, address: &Address) -> bool {
        self.locations.iter().any(|loc| loc.matches(address))
    }

    /// The enabled methods of this zone.
    pub fn enabled_methods(&self) -> impl Iterator<Item = &ShippingMethod> {
        self.methods.iter().filter(|m| m.enabled)
    }
}

/// One zone's worth of candidate methods, labeled for display.
#[derive(Debug, Clone)]
pub struct ZoneMethods<'a> {
    pub zone_label: &'a str,
    pub methods: Vec<&'a ShippingMethod>,
}

/// The full zone configuration.
#[derive(Debug, Clone, Default)]
pub struct ZoneCatalog {
    zones: Vec<ShippingZone>,
}

impl ZoneCatalog {
    /// Build a catalog from configured zones.
    #[must_use]
    pub const fn new(zones: Vec<ShippingZone>) -> Self {
        Self { zones }
    }

    /// Load the catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw =
            std::fs::read_to_string(path).map_err(|e| CatalogError::Io(e.to_string()))?;
        let zones: Vec<ShippingZone> =
            serde_json::from_str(&raw).map_err(|e| CatalogError::Parse(e.to_string()))?;
        tracing::info!(zones = zones.len(), "Loaded shipping zone catalog");
        Ok(Self::new(zones))
    }

    /// The worldwide catch-all zone, if configured.
    #[must_use]
    pub fn worldwide(&self) -> Option<&ShippingZone> {
        self.zones.iter().find(|z| z.id.is_worldwide())
    }

    /// Enabled methods grouped by zone for the destination address.
    ///
    /// Every specific zone whose rules match the address contributes its
    /// enabled methods. The worldwide zone is then ALWAYS appended under
    /// [`DEFAULT_ZONE_LABEL`], even when a specific zone already matched,
    /// so a method configured in both places appears twice. Callers must
    /// not deduplicate.
    #[must_use]
    pub fn methods_for_address(&self, address: &Address) -> Vec<ZoneMethods<'_>> {
        let mut groups: Vec<ZoneMethods<'_>> = self
            .zones
            .iter()
            .filter(|zone| !zone.id.is_worldwide() && zone.matches(address))
            .map(|zone| ZoneMethods {
                zone_label: zone.name.as_str(),
                methods: zone.enabled_methods().collect(),
            })
            .collect();

        if let Some(worldwide) = self.worldwide() {
            groups.push(ZoneMethods {
                zone_label: DEFAULT_ZONE_LABEL,
                methods: worldwide.enabled_methods().collect(),
            });
        }

        groups
    }

    /// Enabled methods of every configured zone, worldwide zone last.
    ///
    /// Used to populate the provisional selection form, which is shown
    /// before the shopper has committed a destination address.
    #[must_use]
    pub fn all_methods(&self) -> Vec<ZoneMethods<'_>> {
        let mut groups: Vec<ZoneMethods<'_>> = self
            .zones
            .iter()
            .filter(|zone| !zone.id.is_worldwide())
            .map(|zone| ZoneMethods {
                zone_label: zone.name.as_str(),
                methods: zone.enabled_methods().collect(),
            })
            .collect();

        if let Some(worldwide) = self.worldwide() {
            groups.push(ZoneMethods {
                zone_label: worldwide.name.as_str(),
                methods: worldwide.enabled_methods().collect(),
            });
        }

        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(id: &str, cost: &str) -> ShippingMethod {
        ShippingMethod {
            id: id.to_string(),
            title: id.to_string(),
            cost: Some(cost.parse().expect("valid cost")),
            weight_costs: None,
            item_costs: None,
            enabled: true,
        }
    }

    fn us_address() -> Address {
        Address {
            country: "US".to_string(),
            state: "CA".to_string(),
            postcode: "94107".to_string(),
            city: "San Francisco".to_string(),
            address_1: "1 Main St".to_string(),
            address_2: String::new(),
        }
    }

    fn catalog() -> ZoneCatalog {
        ZoneCatalog::new(vec![
            ShippingZone {
                id: ZoneId::new(1),
                name: "United States".to_string(),
                locations: vec![ZoneLocation::Country {
                    code: "US".to_string(),
                }],
                methods: vec![method("us_standard", "8.00"), {
                    let mut disabled = method("us_express", "20.00");
                    disabled.enabled = false;
                    disabled
                }],
            },
            ShippingZone {
                id: ZoneId::new(2),
                name: "California".to_string(),
                locations: vec![ZoneLocation::State {
                    code: "US:CA".to_string(),
                }],
                methods: vec![method("ca_courier", "5.00")],
            },
            ShippingZone {
                id: ZoneId::WORLDWIDE,
                name: "Everywhere Else".to_string(),
                locations: vec![],
                methods: vec![method("intl_post", "25.00")],
            },
        ])
    }

    #[test]
    fn test_location_matching() {
        let addr = us_address();
        assert!(ZoneLocation::Country { code: "US".into() }.matches(&addr));
        assert!(!ZoneLocation::Country { code: "GB".into() }.matches(&addr));
        assert!(ZoneLocation::State { code: "US:CA".into() }.matches(&addr));
        assert!(!ZoneLocation::State { code: "US:NY".into() }.matches(&addr));
        assert!(ZoneLocation::Postcode { code: "941".into() }.matches(&addr));
        assert!(!ZoneLocation::Postcode { code: "10".into() }.matches(&addr));
    }

    #[test]
    fn test_default_zone_always_appended() {
        // Both specific zones match the address AND the worldwide zone is
        // still appended, with no deduplication across groups.
        let catalog = catalog();
        let groups = catalog.methods_for_address(&us_address());
        assert_eq!(groups.len(), 3);

        let last = groups.last().expect("worldwide group");
        assert_eq!(last.zone_label, DEFAULT_ZONE_LABEL);
        assert_eq!(last.methods.len(), 1);
    }

    #[test]
    fn test_unmatched_address_still_gets_default_zone() {
        let addr = Address {
            country: "JP".to_string(),
            ..Address::default()
        };
        let catalog = catalog();
        let groups = catalog.methods_for_address(&addr);
        assert_eq!(groups.len(), 1);
        assert_eq!(
            groups.first().expect("group").zone_label,
            DEFAULT_ZONE_LABEL
        );
    }

    #[test]
    fn test_duplicate_method_ids_not_deduped() {
        let mut zones = catalog();
        // Configure the same method id in the California zone and worldwide.
        zones.zones.get_mut(1).expect("zone").methods = vec![method("intl_post", "5.00")];

        let groups = zones.methods_for_address(&us_address());
        let ids: Vec<&str> = groups
            .iter()
            .flat_map(|g| g.methods.iter().map(|m| m.id.as_str()))
            .collect();
        assert_eq!(
            ids.iter().filter(|id| **id == "intl_post").count(),
            2,
            "method configured in two zones must appear twice"
        );
    }

    #[test]
    fn test_disabled_methods_excluded() {
        let catalog = catalog();
        let groups = catalog.methods_for_address(&us_address());
        let ids: Vec<&str> = groups
            .iter()
            .flat_map(|g| g.methods.iter().map(|m| m.id.as_str()))
            .collect();
        assert!(!ids.contains(&"us_express"));
        assert!(ids.contains(&"us_standard"));
    }

    #[test]
    fn test_all_methods_uses_configured_worldwide_name() {
        let catalog = catalog();
        let groups = catalog.all_methods();
        assert_eq!(groups.len(), 3);
        assert_eq!(
            groups.last().expect("worldwide group").zone_label,
            "Everywhere Else"
        );
    }
}
