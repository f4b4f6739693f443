use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::cards::repo_types::{Card, CardChanges, NewCard};

/// In-memory card catalog; listing preserves insertion order.
#[derive(Default)]
pub struct CardStore {
    cards: RwLock<Vec<Card>>,
}

impl CardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All cards, or only those whose category matches exactly.
    pub async fn list(&self, category: Option<&str>) -> Vec<Card> {
        let cards = self.cards.read().await;
        cards
            .iter()
            .filter(|c| category.map_or(true, |want| c.category.as_deref() == Some(want)))
            .cloned()
            .collect()
    }

    pub async fn get(&self, id: Uuid) -> Option<Card> {
        self.cards.read().await.iter().find(|c| c.id == id).cloned()
    }

    pub async fn insert(&self, new_card: NewCard) -> Card {
        let card = Card {
            id: Uuid::new_v4(),
            title: new_card.title,
            description: new_card.description,
            price: new_card.price,
            image: new_card.image,
            category: new_card.category,
            created_at: OffsetDateTime::now_utc(),
        };
        self.cards.write().await.push(card.clone());
        card
    }

    pub async fn update(&self, id: Uuid, changes: CardChanges) -> Option<Card> {
        let mut cards = self.cards.write().await;
        let card = cards.iter_mut().find(|c| c.id == id)?;
        changes.apply(card);
        Some(card.clone())
    }

    /// Returns whether a card was removed.
    pub async fn remove(&self, id: Uuid) -> bool {
        let mut cards = self.cards.write().await;
        let before = cards.len();
        cards.retain(|c| c.id != id);
        cards.len() != before
    }
}
