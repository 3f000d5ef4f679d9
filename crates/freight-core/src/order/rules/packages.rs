//! Package type classification from free-text cargo descriptions.

use crate::models::order::PackageType;

/// Ordered substring table. Earlier entries win over later, more generic ones.
pub const PACKAGE_TYPE_TABLE: &[(&str, PackageType)] = &[
    ("EW-Paletten", PackageType::PalletOther),
    ("EPAL", PackageType::Epal),
    ("EUR", PackageType::Epal),
    ("Euro", PackageType::Epal),
    ("Pallet", PackageType::Pallet),
    ("Paletten", PackageType::Pallet),
    ("Ladung", PackageType::Carton),
    ("Karton", PackageType::Carton),
    ("Carton", PackageType::Carton),
    ("Stück", PackageType::Other),
    ("Pcs", PackageType::Other),
    ("Pieces", PackageType::Other),
    ("Other", PackageType::Other),
    ("GITTER", PackageType::Other),
    ("Box", PackageType::Other),
];

/// Maps cargo descriptions to canonical package types.
pub struct PackageClassifier {
    table: &'static [(&'static str, PackageType)],
}

impl PackageClassifier {
    pub fn new() -> Self {
        Self {
            table: PACKAGE_TYPE_TABLE,
        }
    }

    /// Classify a description by case-insensitive substring lookup.
    pub fn classify(&self, description: &str) -> PackageType {
        let haystack = description.to_lowercase();
        self.table
            .iter()
            .find(|(key, _)| haystack.contains(&key.to_lowercase()))
            .map(|(_, package_type)| *package_type)
            .unwrap_or(PackageType::Other)
    }
}

impl Default for PackageClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify a description with the default table.
pub fn classify_package(description: &str) -> PackageType {
    PackageClassifier::new().classify(description)
}
