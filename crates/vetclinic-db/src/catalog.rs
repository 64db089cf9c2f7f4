//! # Static Catalog Definitions
//!
//! The clinic's starting catalog: vaccines, medications, supplies, and pet
//! foods, plus the price list for billable appointment services. Seeding
//! (see [`crate::seed`]) maps each entry to an inventory row with a fixed
//! starting stock per category: 50 units for medicines and supplies, 30 for
//! foods.

use vetclinic_core::{Money, NewInventoryItem};

/// One entry of the starting inventory catalog.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub price_centavos: i64,
    pub stock: i64,
    pub category: &'static str,
    pub brand: &'static str,
    pub animal_type: &'static str,
    pub dosage: &'static str,
    pub expiration_date: &'static str,
}

impl CatalogEntry {
    /// Converts the entry into an insertable inventory item.
    pub fn to_new_item(&self) -> NewInventoryItem {
        NewInventoryItem {
            name: self.name.to_string(),
            price_centavos: self.price_centavos,
            stock: self.stock,
            category: self.category.to_string(),
            brand: self.brand.to_string(),
            animal_type: self.animal_type.to_string(),
            dosage: self.dosage.to_string(),
            expiration_date: self.expiration_date.to_string(),
        }
    }
}

const fn medicine(
    name: &'static str,
    price_centavos: i64,
    category: &'static str,
    animal_type: &'static str,
    dosage: &'static str,
    expiration_date: &'static str,
) -> CatalogEntry {
    CatalogEntry {
        name,
        price_centavos,
        stock: 50,
        category,
        brand: "Generic",
        animal_type,
        dosage,
        expiration_date,
    }
}

const fn food(
    name: &'static str,
    price_centavos: i64,
    animal_type: &'static str,
    expiration_date: &'static str,
) -> CatalogEntry {
    CatalogEntry {
        name,
        price_centavos,
        stock: 30,
        category: "Pet Food",
        brand: "Premium",
        animal_type,
        dosage: "N/A",
        expiration_date,
    }
}

/// The starting inventory catalog.
pub const CATALOG: &[CatalogEntry] = &[
    // Dog medicines & supplies
    medicine("Rabies Vaccine (1 dose)", 35_000, "Dog Medicines", "Dog", "1ml", "2 years"),
    medicine("DHPP Vaccine (1 dose)", 45_000, "Dog Medicines", "Dog", "1ml", "1 year"),
    medicine("Amoxicillin 500mg (tablet)", 2_500, "Dog Medicines", "Dog", "1 tablet", "2 years"),
    medicine("Carprofen 100mg (tablet)", 3_500, "Dog Medicines", "Dog", "1 tablet", "2 years"),
    medicine("Sterile Bandage 5cm x 5m", 15_000, "Dog Medicines", "All", "N/A", "5 years"),
    // Cat medicines
    medicine("FVR Vaccine (1 dose)", 40_000, "Cat Medicines", "Cat", "1ml", "1 year"),
    medicine("Clindamycin 75mg (capsule)", 3_000, "Cat Medicines", "Cat", "1 capsule", "2 years"),
    // Pet foods
    food("Premium Dog Dry Food 5kg", 85_000, "Dog", "2 years"),
    food("Puppy Dry Food 3kg", 65_000, "Dog", "2 years"),
    food("Dog Wet Food Cans (12 pack)", 48_000, "Dog", "1 year"),
    food("Adult Cat Dry Food 2kg", 55_000, "Cat", "2 years"),
    food("Cat Wet Food Pouches (12 pack)", 42_000, "Cat", "1 year"),
];

/// Billable appointment services and their unit prices (centavos).
pub const SERVICES: &[(&str, i64)] = &[
    ("Consultation", 50_000),
    ("Vaccination", 80_000),
    ("Surgery", 250_000),
    ("Grooming", 60_000),
    ("Checkup", 40_000),
    ("Dental Cleaning", 120_000),
    ("X-Ray", 150_000),
    ("Blood Test", 80_000),
    ("Emergency Care", 200_000),
    ("Vaccine Booster", 60_000),
    ("Spay/Neuter", 300_000),
    ("Microchipping", 80_000),
];

/// Looks up the unit price for a billable service.
pub fn service_price(name: &str) -> Option<Money> {
    SERVICES
        .iter()
        .find(|(service, _)| *service == name)
        .map(|(_, centavos)| Money::from_centavos(*centavos))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_stock_per_category() {
        for entry in CATALOG {
            let expected = if entry.category == "Pet Food" { 30 } else { 50 };
            assert_eq!(entry.stock, expected, "{}", entry.name);
        }
    }

    #[test]
    fn test_catalog_names_unique() {
        let mut names: Vec<&str> = CATALOG.iter().map(|e| e.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CATALOG.len());
    }

    #[test]
    fn test_service_price_lookup() {
        assert_eq!(service_price("Consultation"), Some(Money::from_centavos(50_000)));
        assert_eq!(service_price("Spay/Neuter"), Some(Money::from_centavos(300_000)));
        assert_eq!(service_price("Time Travel"), None);
    }

    #[test]
    fn test_to_new_item() {
        let item = CATALOG[0].to_new_item();
        assert_eq!(item.name, "Rabies Vaccine (1 dose)");
        assert_eq!(item.price().centavos(), 35_000);
        assert_eq!(item.stock, 50);
    }
}
