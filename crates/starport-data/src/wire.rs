//! Wire format of the listing service.

use serde::{Deserialize, Serialize};
use starport_commerce::{
    catalog::{ListingPage, Price, Product},
    Cursor, ProductId,
};

/// One product as sent by the service. Extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    #[serde(default)]
    pub cost_in_credits: Price,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Product::new(ProductId::new(record.name), record.cost_in_credits)
    }
}

/// A listing page as sent by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingResponse {
    pub count: u64,
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<ProductRecord>,
}

impl From<ListingResponse> for ListingPage {
    fn from(response: ListingResponse) -> Self {
        ListingPage {
            items: response.results.into_iter().map(Product::from).collect(),
            cursor: response.next.map(Cursor::new),
            previous: response.previous.map(Cursor::new),
            total_count: response.count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_ONE: &str = r#"{
        "count": 36,
        "next": "https://swapi.dev/api/starships/?page=2",
        "previous": null,
        "results": [
            {"name": "CR90 corvette", "model": "CR90 corvette", "cost_in_credits": "3500000"},
            {"name": "Death Star", "cost_in_credits": "1000000000000"},
            {"name": "Millennium Falcon", "cost_in_credits": "unknown"}
        ]
    }"#;

    #[test]
    fn test_decode_page() {
        let response: ListingResponse = serde_json::from_str(PAGE_ONE).unwrap();
        let page = ListingPage::from(response);

        assert_eq!(page.total_count, 36);
        assert_eq!(page.len(), 3);
        assert_eq!(
            page.cursor,
            Some(Cursor::new("https://swapi.dev/api/starships/?page=2"))
        );
        assert_eq!(page.previous, None);
        assert_eq!(page.items[0].price, Price::Credits(3_500_000.0));
        assert_eq!(page.items[2].price, Price::Unavailable);
    }

    #[test]
    fn test_decode_last_page() {
        let json = r#"{"count": 1, "next": null, "previous": "p1", "results": []}"#;
        let page = ListingPage::from(serde_json::from_str::<ListingResponse>(json).unwrap());
        assert!(!page.has_more());
        assert!(page.is_empty());
    }

    #[test]
    fn test_missing_price_is_unavailable() {
        let json = r#"{"count": 1, "next": null, "results": [{"name": "Ghost"}]}"#;
        let response: ListingResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.results[0].cost_in_credits, Price::Unavailable);
    }

    #[test]
    fn test_missing_results_is_error() {
        let json = r#"{"count": 1, "next": null}"#;
        assert!(serde_json::from_str::<ListingResponse>(json).is_err());
    }
}
