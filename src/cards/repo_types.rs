use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

/// Product card shown in the shop listings.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Card {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Validated fields for a new card.
#[derive(Debug, Clone)]
pub struct NewCard {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub category: Option<String>,
}

/// Validated partial update; `None` leaves the field unchanged.
/// `category: Some(None)` clears the category.
#[derive(Debug, Clone, Default)]
pub struct CardChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub category: Option<Option<String>>,
}

impl CardChanges {
    pub fn apply(self, card: &mut Card) {
        if let Some(title) = self.title {
            card.title = title;
        }
        if let Some(description) = self.description {
            card.description = description;
        }
        if let Some(price) = self.price {
            card.price = price;
        }
        if let Some(image) = self.image {
            card.image = image;
        }
        if let Some(category) = self.category {
            card.category = category;
        }
    }
}
