use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// A single product sale record, as published by the seed dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: String,
    pub sold: bool,
    pub date_of_sale: DateTime<Utc>,
}

impl Transaction {
    /// Month of sale (1-12), taken in UTC.
    pub fn sale_month(&self) -> u32 {
        self.date_of_sale.month()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_dataset_record() {
        let json = r#"{
            "id": 1,
            "title": "Fjallraven  - Foldsack No. 1 Backpack, Fits 15 Laptops",
            "price": 329.85,
            "description": "Your perfect pack for everyday use and walks in the forest.",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "sold": false,
            "dateOfSale": "2021-11-27T20:29:54+05:30"
        }"#;

        let t: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(t.id, 1);
        assert_eq!(t.category, "men's clothing");
        assert!(!t.sold);
        assert_eq!(t.sale_month(), 11);
    }

    #[test]
    fn test_sale_month_is_taken_in_utc() {
        // Midnight on the 1st in India is still the previous month in UTC
        let json = r#"{
            "id": 2, "title": "t", "price": 10, "description": "d",
            "category": "c", "image": "", "sold": true,
            "dateOfSale": "2022-03-01T00:00:00+05:30"
        }"#;

        let t: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(t.sale_month(), 2);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = r#"{
            "id": 3, "title": "t", "price": 10.5, "description": "d",
            "category": "c", "image": "i", "sold": true,
            "dateOfSale": "2021-07-14T10:00:00Z"
        }"#;
        let t: Transaction = serde_json::from_str(json).unwrap();

        let value = serde_json::to_value(&t).unwrap();
        assert!(value.get("dateOfSale").is_some());
        assert!(value.get("date_of_sale").is_none());
    }
}
