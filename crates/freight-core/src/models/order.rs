//! Freight order data models.

use std::ops::Deref;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Ordered text lines of a single document.
///
/// Line order is meaningful: extractors treat proximity as relatedness.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentLines(Vec<String>);

impl DocumentLines {
    /// Wrap already-segmented lines.
    pub fn new(lines: Vec<String>) -> Self {
        Self(lines)
    }

    /// Split raw text into lines, keeping blank lines so indices stay stable.
    pub fn from_text(text: &str) -> Self {
        Self(text.lines().map(str::to_string).collect())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl Deref for DocumentLines {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<String>> for DocumentLines {
    fn from(lines: Vec<String>) -> Self {
        Self(lines)
    }
}

impl<'a> FromIterator<&'a str> for DocumentLines {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(str::to_string).collect())
    }
}

/// A complete freight order as extracted from one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    /// Ordering customer.
    pub customer: CustomerInfo,

    /// Customer's order reference.
    pub order_reference: String,

    /// Pickup points, in document order.
    pub loading_locations: Vec<LocationEntry>,

    /// Drop-off points, in document order.
    pub destination_locations: Vec<LocationEntry>,

    /// Cargo lines. Never empty once the record has been built.
    pub cargos: Vec<CargoEntry>,

    /// Truck/trailer plate numbers joined with " / ".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_numbers: Option<String>,

    /// Agreed freight price.
    #[serde(default, flatten)]
    pub freight: Option<FreightCharge>,

    /// Lower-cased source filename (empty string when unknown).
    pub attachment_filenames: Vec<String>,
}

impl ExtractedRecord {
    /// Check the minimum completeness rules.
    ///
    /// Conditions are checked in a fixed order so the reported error is
    /// deterministic when several fields are missing.
    pub fn validate(&self) -> Result<(), ExtractionError> {
        if self.customer.details.company.trim().is_empty() {
            return Err(ExtractionError::MissingCustomer);
        }
        if self.order_reference.trim().is_empty() {
            return Err(ExtractionError::MissingOrderReference);
        }
        if self.loading_locations.is_empty() {
            return Err(ExtractionError::NoLoadingLocation);
        }
        if self.destination_locations.is_empty() {
            return Err(ExtractionError::NoDestinationLocation);
        }
        Ok(())
    }

    /// Total number of packages across all cargo lines.
    pub fn package_total(&self) -> u64 {
        self.cargos.iter().map(|c| u64::from(c.package_count)).sum()
    }
}

/// Which side of the shipment the customer is on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerSide {
    Shipper,
    Consignee,
    #[default]
    None,
}

/// Customer block of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub side: CustomerSide,
    pub details: CustomerDetails,
}

impl CustomerInfo {
    /// Customer with an unknown side.
    pub fn company(company: impl Into<String>) -> Self {
        Self {
            side: CustomerSide::None,
            details: CustomerDetails {
                company: company.into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub company: String,
}

/// A loading or delivery stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationEntry {
    pub company_address: CompanyAddress,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<LocationTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyAddress {
    pub company: String,
}

/// Time window of a stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationTime {
    /// ISO-8601 timestamp.
    pub datetime_from: String,
}

/// A single cargo line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CargoEntry {
    pub title: String,
    pub package_count: u32,
    pub package_type: PackageType,
}

impl CargoEntry {
    /// Placeholder cargo used when a document lists none.
    pub fn general(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            package_count: 1,
            package_type: PackageType::Other,
        }
    }
}

/// Canonical package type codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageType {
    /// EUR/EPAL pallet.
    Epal,
    /// Generic pallet.
    Pallet,
    /// Single-use or non-standard pallet.
    PalletOther,
    /// Carton or loose load.
    Carton,
    #[default]
    Other,
}

impl PackageType {
    /// Code as stored on the order.
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageType::Epal => "epal",
            PackageType::Pallet => "pallet",
            PackageType::PalletOther => "pallet_other",
            PackageType::Carton => "carton",
            PackageType::Other => "other",
        }
    }
}

impl std::fmt::Display for PackageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Freight price and its currency, always present together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreightCharge {
    #[serde(with = "rust_decimal::serde::float")]
    pub freight_price: Decimal,
    pub freight_currency: Currency,
}

/// Currencies recognized next to a freight amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Eur,
    Usd,
    Gbp,
    Pln,
}

impl Currency {
    /// Parse a three-letter code, ignoring case.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "EUR" => Some(Currency::Eur),
            "USD" => Some(Currency::Usd),
            "GBP" => Some(Currency::Gbp),
            "PLN" => Some(Currency::Pln),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
            Currency::Pln => "PLN",
        }
    }
}
