//! Currency service models: the per-service base configuration (amount, unit, presets and
//! server prices) and the nested package pricing tree edited by
//! [`PricingEditor`](crate::client::editor::PricingEditor).

use serde::{Deserialize, Serialize};

use crate::{
    client::{
        error::api::ApiError,
        schema::{validate_each, Check, FieldSchema, FieldValue, Validate, ValidationError},
    },
    model::payload::{encode_json, IntoRequestBody, RequestBody},
};

/// Preset amounts offered when a service has none configured yet
pub const DEFAULT_PRESET_AMOUNTS: [f64; 2] = [500.0, 1000.0];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerRegion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

/// Price of the base amount of currency on one game server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerPrice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub region: Option<ServerRegion>,
}

/// Base configuration of a currency service, used both as response and as update payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyConfigDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub service_id: String,
    pub amount: f64,
    pub unit: String,
    #[serde(default)]
    pub presets: Vec<Preset>,
    #[serde(default)]
    pub servers: Vec<ServerPrice>,
}

/// Servers sharing one region, in the order they were first seen
#[derive(Debug, Clone, PartialEq)]
pub struct RegionGroup<'a> {
    pub region_id: Option<String>,
    pub name: String,
    pub servers: Vec<&'a ServerPrice>,
}

impl CurrencyConfigDto {
    /// Fill in the default presets when none are configured
    pub fn with_default_presets(mut self) -> Self {
        if self.presets.is_empty() {
            self.presets = DEFAULT_PRESET_AMOUNTS
                .iter()
                .map(|&amount| Preset { id: None, amount })
                .collect();
        }
        self
    }

    /// Price of `quantity` units on `server`, scaled from the price of the base amount.
    ///
    /// Returns `None` when the base amount is zero since no per-unit price exists.
    pub fn price_for(&self, server: &ServerPrice, quantity: f64) -> Option<f64> {
        if self.amount <= 0.0 {
            return None;
        }

        Some(server.price * quantity / self.amount)
    }

    /// Price of every preset on `server`, in preset order
    pub fn preset_prices(&self, server: &ServerPrice) -> Vec<(f64, Option<f64>)> {
        self.presets
            .iter()
            .map(|preset| (preset.amount, self.price_for(server, preset.amount)))
            .collect()
    }

    /// Group servers by region; servers without a region end up in "No Region"
    pub fn servers_by_region(&self) -> Vec<RegionGroup<'_>> {
        let mut groups: Vec<RegionGroup<'_>> = Vec::new();

        for server in &self.servers {
            let (region_id, name) = match &server.region {
                Some(region) => (
                    Some(region.id.clone().unwrap_or_else(|| region.name.clone())),
                    region.name.clone(),
                ),
                None => (None, "No Region".to_string()),
            };

            match groups.iter_mut().find(|group| group.region_id == region_id) {
                Some(group) => group.servers.push(server),
                None => groups.push(RegionGroup {
                    region_id,
                    name,
                    servers: vec![server],
                }),
            }
        }

        groups
    }
}

const CONFIG_SCHEMA: &[FieldSchema] = &[
    FieldSchema::new("serviceId", &[Check::required("Service ID is required")]),
    FieldSchema::new(
        "amount",
        &[Check::min(0.0, "Amount must be a positive number")],
    ),
    FieldSchema::new("unit", &[Check::required("Unit is required")]),
];

const PRESET_SCHEMA: &[FieldSchema] = &[FieldSchema::new(
    "amount",
    &[Check::min(0.0, "Amount must be a positive number")],
)];

const SERVER_SCHEMA: &[FieldSchema] = &[
    FieldSchema::new("name", &[Check::required("Name is required")]),
    FieldSchema::new(
        "price",
        &[Check::min(0.0, "Price must be a positive number")],
    ),
];

impl Validate for CurrencyConfigDto {
    fn schema(&self) -> &'static [FieldSchema] {
        CONFIG_SCHEMA
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "serviceId" => FieldValue::Text(&self.service_id),
            "amount" => FieldValue::Number(self.amount),
            "unit" => FieldValue::Text(&self.unit),
            _ => FieldValue::Absent,
        }
    }

    fn validate_nested(&self) -> Result<(), ValidationError> {
        validate_each("presets", &self.presets)?;
        validate_each("servers", &self.servers)
    }
}

impl Validate for Preset {
    fn schema(&self) -> &'static [FieldSchema] {
        PRESET_SCHEMA
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "amount" => FieldValue::Number(self.amount),
            _ => FieldValue::Absent,
        }
    }
}

impl Validate for ServerPrice {
    fn schema(&self) -> &'static [FieldSchema] {
        SERVER_SCHEMA
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => FieldValue::Text(&self.name),
            "price" => FieldValue::Number(self.price),
            _ => FieldValue::Absent,
        }
    }
}

impl IntoRequestBody for CurrencyConfigDto {
    fn into_body(self) -> Result<RequestBody, ApiError> {
        encode_json(&self)
    }
}

/// One purchasable package of in-game currency with its regional prices.
///
/// The serde names match the shape the API expects for package submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyPackage {
    pub amount: u64,
    pub unit: String,
    #[serde(rename = "server")]
    pub countries: Vec<Country>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    #[serde(rename = "country")]
    pub name: String,
    #[serde(rename = "region")]
    pub regions: Vec<Region>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    #[serde(rename = "subregion")]
    pub subregions: Vec<Subregion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subregion {
    pub name: String,
    #[serde(rename = "price")]
    pub prices: Vec<Price>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    #[serde(rename = "price")]
    pub amount: f64,
    #[serde(rename = "currency")]
    pub currency_code: String,
}

const PACKAGE_SCHEMA: &[FieldSchema] = &[
    FieldSchema::new("amount", &[Check::min(1.0, "Amount must be at least 1")]),
    FieldSchema::new("unit", &[Check::required("Unit is required")]),
    FieldSchema::new(
        "countries",
        &[Check::min_items(1, "At least one country is required")],
    ),
];

const COUNTRY_SCHEMA: &[FieldSchema] = &[
    FieldSchema::new("name", &[Check::required("Country name is required")]),
    FieldSchema::new(
        "regions",
        &[Check::min_items(1, "At least one region is required")],
    ),
];

const REGION_SCHEMA: &[FieldSchema] = &[
    FieldSchema::new("name", &[Check::required("Region name is required")]),
    FieldSchema::new(
        "subregions",
        &[Check::min_items(1, "At least one subregion is required")],
    ),
];

const SUBREGION_SCHEMA: &[FieldSchema] = &[
    FieldSchema::new("name", &[Check::required("Subregion name is required")]),
    FieldSchema::new(
        "prices",
        &[Check::min_items(1, "At least one price is required")],
    ),
];

const PRICE_SCHEMA: &[FieldSchema] = &[
    FieldSchema::new("amount", &[Check::min(0.01, "Price must be at least 0.01")]),
    FieldSchema::new(
        "currencyCode",
        &[
            Check::required("Currency code is required"),
            Check::currency_code("Currency code must be 3 uppercase letters"),
        ],
    ),
];

impl Validate for CurrencyPackage {
    fn schema(&self) -> &'static [FieldSchema] {
        PACKAGE_SCHEMA
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "amount" => FieldValue::Number(self.amount as f64),
            "unit" => FieldValue::Text(&self.unit),
            "countries" => FieldValue::Items(self.countries.len()),
            _ => FieldValue::Absent,
        }
    }

    fn validate_nested(&self) -> Result<(), ValidationError> {
        validate_each("countries", &self.countries)
    }
}

impl Validate for Country {
    fn schema(&self) -> &'static [FieldSchema] {
        COUNTRY_SCHEMA
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => FieldValue::Text(&self.name),
            "regions" => FieldValue::Items(self.regions.len()),
            _ => FieldValue::Absent,
        }
    }

    fn validate_nested(&self) -> Result<(), ValidationError> {
        validate_each("regions", &self.regions)
    }
}

impl Validate for Region {
    fn schema(&self) -> &'static [FieldSchema] {
        REGION_SCHEMA
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => FieldValue::Text(&self.name),
            "subregions" => FieldValue::Items(self.subregions.len()),
            _ => FieldValue::Absent,
        }
    }

    fn validate_nested(&self) -> Result<(), ValidationError> {
        validate_each("subregions", &self.subregions)
    }
}

impl Validate for Subregion {
    fn schema(&self) -> &'static [FieldSchema] {
        SUBREGION_SCHEMA
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => FieldValue::Text(&self.name),
            "prices" => FieldValue::Items(self.prices.len()),
            _ => FieldValue::Absent,
        }
    }

    fn validate_nested(&self) -> Result<(), ValidationError> {
        validate_each("prices", &self.prices)
    }
}

impl Validate for Price {
    fn schema(&self) -> &'static [FieldSchema] {
        PRICE_SCHEMA
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "amount" => FieldValue::Number(self.amount),
            "currencyCode" => FieldValue::Text(&self.currency_code),
            _ => FieldValue::Absent,
        }
    }
}

/// The complete list of packages submitted for one service
pub struct PackageList<'a>(pub &'a [CurrencyPackage]);

const PACKAGE_LIST_SCHEMA: &[FieldSchema] = &[FieldSchema::new(
    "packages",
    &[Check::min_items(
        1,
        "At least one currency package is required",
    )],
)];

impl Validate for PackageList<'_> {
    fn schema(&self) -> &'static [FieldSchema] {
        PACKAGE_LIST_SCHEMA
    }

    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "packages" => FieldValue::Items(self.0.len()),
            _ => FieldValue::Absent,
        }
    }

    fn validate_nested(&self) -> Result<(), ValidationError> {
        validate_each("packages", self.0)
    }
}

/// Validate a package list, reporting the first incomplete or invalid path depth-first
pub fn validate_packages(packages: &[CurrencyPackage]) -> Result<(), ValidationError> {
    PackageList(packages).validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CurrencyConfigDto {
        CurrencyConfigDto {
            id: None,
            service_id: "7".to_string(),
            amount: 100.0,
            unit: "Gold".to_string(),
            presets: Vec::new(),
            servers: vec![
                ServerPrice {
                    id: None,
                    name: "Area 52".to_string(),
                    price: 2.0,
                    region: Some(ServerRegion {
                        id: Some("r1".to_string()),
                        name: "US".to_string(),
                    }),
                },
                ServerPrice {
                    id: None,
                    name: "Legacy".to_string(),
                    price: 1.0,
                    region: None,
                },
                ServerPrice {
                    id: None,
                    name: "Stormrage".to_string(),
                    price: 3.0,
                    region: Some(ServerRegion {
                        id: Some("r1".to_string()),
                        name: "US".to_string(),
                    }),
                },
            ],
        }
    }

    #[test]
    fn default_presets_fill_empty_list_only() {
        let config = config().with_default_presets();
        let amounts: Vec<f64> = config.presets.iter().map(|p| p.amount).collect();
        assert_eq!(amounts, vec![500.0, 1000.0]);

        let mut custom = self::config();
        custom.presets.push(Preset {
            id: None,
            amount: 250.0,
        });
        assert_eq!(custom.with_default_presets().presets.len(), 1);
    }

    #[test]
    fn prices_scale_from_base_amount() {
        let config = config().with_default_presets();
        let server = &config.servers[0];

        assert_eq!(config.price_for(server, 500.0), Some(10.0));
        assert_eq!(
            config.preset_prices(server),
            vec![(500.0, Some(10.0)), (1000.0, Some(20.0))]
        );

        let mut zero = config.clone();
        zero.amount = 0.0;
        assert_eq!(zero.price_for(server, 500.0), None);
    }

    #[test]
    fn servers_group_by_region_in_first_seen_order() {
        let config = config();
        let groups = config.servers_by_region();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "US");
        assert_eq!(groups[0].servers.len(), 2);
        assert_eq!(groups[1].name, "No Region");
        assert_eq!(groups[1].region_id, None);
    }

    #[test]
    fn package_wire_shape_matches_api() {
        let package = CurrencyPackage {
            amount: 500,
            unit: "Gold".to_string(),
            countries: vec![Country {
                name: "US".to_string(),
                regions: vec![Region {
                    name: "West".to_string(),
                    subregions: vec![Subregion {
                        name: "California".to_string(),
                        prices: vec![Price {
                            amount: 4.99,
                            currency_code: "USD".to_string(),
                        }],
                    }],
                }],
            }],
        };

        let json = serde_json::to_value(&package).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "amount": 500,
                "unit": "Gold",
                "server": [{
                    "country": "US",
                    "region": [{
                        "name": "West",
                        "subregion": [{
                            "name": "California",
                            "price": [{ "price": 4.99, "currency": "USD" }]
                        }]
                    }]
                }]
            })
        );
    }

    #[test]
    fn empty_package_list_is_rejected() {
        let err = validate_packages(&[]).unwrap_err();
        assert_eq!(err.path, "packages");
    }
}
