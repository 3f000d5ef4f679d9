//! Rule-based field extractors for freight orders.

pub mod cargo;
pub mod customer;
pub mod dates;
pub mod freight;
pub mod locations;
pub mod packages;
pub mod patterns;
pub mod reference;
pub mod transport;

pub use cargo::{extract_cargos, CargoExtractor};
pub use customer::{extract_customer, CustomerExtractor};
pub use dates::{parse_datetime, DateParser};
pub use freight::{extract_freight, parse_amount, FreightExtractor};
pub use locations::{LocationContextExtractor, LocationExtractor, LocationRole};
pub use packages::{classify_package, PackageClassifier};
pub use reference::{extract_order_reference, OrderReferenceExtractor};
pub use transport::{extract_transport_numbers, TransportNumberExtractor};

/// Trait for field extractors working over document lines.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from the whole document.
    fn extract(&self, lines: &[String]) -> Self::Output;
}

/// A value together with the line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LineMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Index of the source line.
    pub line: usize,
}

impl<T> LineMatch<T> {
    pub fn new(value: T, line: usize) -> Self {
        Self { value, line }
    }
}
