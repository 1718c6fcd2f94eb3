use crate::client::editor::path::Level;

/// Scalar fields of a pricing tree node
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum NodeData {
    Package { amount: u64, unit: String },
    /// Countries, regions and subregions only carry a name
    Named(String),
    Price { amount: f64, currency_code: String },
}

impl NodeData {
    /// Blank fields for a node the user has just added
    pub(crate) fn default_for(level: Level) -> Self {
        match level {
            Level::Package => NodeData::Package {
                amount: 0,
                unit: String::new(),
            },
            Level::Country | Level::Region | Level::Subregion => NodeData::Named(String::new()),
            Level::Price => NodeData::Price {
                amount: 0.0,
                currency_code: String::new(),
            },
        }
    }
}

/// Replacement of one scalar field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    /// Package amount, e.g. 500
    Amount(u64),
    /// Package unit, e.g. "Gold"
    Unit(String),
    /// Country, region or subregion name
    Name(String),
    /// Price amount, e.g. 4.99
    Price(f64),
    /// ISO currency code of a price, e.g. "USD"
    CurrencyCode(String),
}

impl FieldUpdate {
    pub fn field(&self) -> &'static str {
        match self {
            FieldUpdate::Amount(_) => "amount",
            FieldUpdate::Unit(_) => "unit",
            FieldUpdate::Name(_) => "name",
            FieldUpdate::Price(_) => "price",
            FieldUpdate::CurrencyCode(_) => "currencyCode",
        }
    }

    /// Apply to `data`; returns the field name back when `data` has no such field
    pub(crate) fn apply(self, data: &mut NodeData) -> Result<(), &'static str> {
        let field = self.field();

        match (self, data) {
            (FieldUpdate::Amount(value), NodeData::Package { amount, .. }) => *amount = value,
            (FieldUpdate::Unit(value), NodeData::Package { unit, .. }) => *unit = value,
            (FieldUpdate::Name(value), NodeData::Named(name)) => *name = value,
            (FieldUpdate::Price(value), NodeData::Price { amount, .. }) => *amount = value,
            (FieldUpdate::CurrencyCode(value), NodeData::Price { currency_code, .. }) => {
                *currency_code = value
            }
            _ => return Err(field),
        }

        Ok(())
    }
}
