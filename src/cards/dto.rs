use serde::Deserialize;

use crate::cards::{
    error::CardError,
    repo_types::{CardChanges, NewCard},
};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
}

/// Price as sent by clients: HTML number inputs post strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

impl PriceInput {
    fn parse(self) -> Result<f64, CardError> {
        let value = match self {
            PriceInput::Number(n) => n,
            PriceInput::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| CardError::Validation("price must be a number".into()))?,
        };
        if !value.is_finite() || value < 0.0 {
            return Err(CardError::Validation(
                "price must be a non-negative number".into(),
            ));
        }
        Ok(value)
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct CreateCardRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<PriceInput>,
    pub image: Option<String>,
    pub category: Option<String>,
}

/// Same fields as create, all optional.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateCardRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<PriceInput>,
    pub image: Option<String>,
    pub category: Option<String>,
}

fn non_empty(field: &str, value: String) -> Result<String, CardError> {
    if value.trim().is_empty() {
        Err(CardError::Validation(format!("{field} must not be empty")))
    } else {
        Ok(value)
    }
}

fn require(field: &str, value: Option<String>) -> Result<String, CardError> {
    non_empty(field, value.unwrap_or_default())
}

/// An empty category means "no category", on create and on update alike.
fn optional_category(value: String) -> Option<String> {
    Some(value).filter(|c| !c.is_empty())
}

impl CreateCardRequest {
    pub fn validate(self) -> Result<NewCard, CardError> {
        Ok(NewCard {
            title: require("title", self.title)?,
            description: require("description", self.description)?,
            price: self
                .price
                .ok_or_else(|| CardError::Validation("price must not be empty".into()))?
                .parse()?,
            image: require("image", self.image)?,
            category: self.category.and_then(optional_category),
        })
    }
}

impl UpdateCardRequest {
    pub fn validate(self) -> Result<CardChanges, CardError> {
        Ok(CardChanges {
            title: self.title.map(|v| non_empty("title", v)).transpose()?,
            description: self
                .description
                .map(|v| non_empty("description", v))
                .transpose()?,
            price: self.price.map(PriceInput::parse).transpose()?,
            image: self.image.map(|v| non_empty("image", v)).transpose()?,
            category: self.category.map(optional_category),
        })
    }
}
