use serde::{Deserialize, Serialize};
use std::fmt;

use crate::card::{Card, CardId};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Column {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: ColumnId::new(id),
            title: title.into(),
            cards: Vec::new(),
        }
    }

    pub fn position_of(&self, card_id: &CardId) -> Option<usize> {
        self.cards.iter().position(|c| &c.id == card_id)
    }

    pub fn contains(&self, card_id: &CardId) -> bool {
        self.position_of(card_id).is_some()
    }

    pub fn has_text(&self, text: &str) -> bool {
        self.cards.iter().any(|c| c.text == text)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
