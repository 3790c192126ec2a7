use crate::model::card::{Card, CardRow};
use crate::model::ids::{CardId, TopicId};

/// Immutable card catalog for a session batch.
///
/// The catalog is produced by an external collaborator (a published sheet in
/// the original deployment) and consumed read-only; a refresh replaces the
/// whole value. Row order is preserved because it breaks due-date ties during
/// session assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    cards: Vec<Card>,
}

/// Result of ingesting an external row sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogIngest {
    pub catalog: Catalog,
    /// Rows excluded because a mandatory field was blank.
    pub skipped: usize,
}

impl Catalog {
    #[must_use]
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Builds a catalog from an external row sequence.
    ///
    /// Rows missing any of topic/category/question/answer are skipped rather
    /// than failing the whole batch; ids are assigned positionally.
    #[must_use]
    pub fn from_rows(rows: impl IntoIterator<Item = CardRow>) -> CatalogIngest {
        let mut cards = Vec::new();
        let mut skipped = 0;

        for (index, row) in rows.into_iter().enumerate() {
            match Card::from_row(CardId::from_row_index(index), row) {
                Ok(card) => cards.push(card),
                Err(_) => skipped += 1,
            }
        }

        CatalogIngest {
            catalog: Self { cards },
            skipped,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id() == id)
    }

    /// Number of catalog cards under the given topic.
    ///
    /// This is the authoritative per-topic total; outcome tallies never
    /// contribute to it.
    #[must_use]
    pub fn topic_total(&self, topic_id: &TopicId) -> usize {
        self.cards.iter().filter(|c| c.topic_id() == topic_id).count()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<CardRow> {
        vec![
            CardRow::new("antro", "Doutrinas", "Q1", "A1").with_level(2),
            CardRow::new("", "Doutrinas", "Q2", "A2"),
            CardRow::new("bib", "Doutrinas", "Q3", "A3"),
            CardRow::new("antro", "Doutrinas", "Q4", ""),
            CardRow::new("antro", "Doutrinas", "Q5", "A5"),
        ]
    }

    #[test]
    fn ingest_skips_invalid_rows_and_keeps_order() {
        let ingest = Catalog::from_rows(rows());
        assert_eq!(ingest.skipped, 2);
        assert_eq!(ingest.catalog.len(), 3);

        let questions: Vec<_> = ingest.catalog.iter().map(Card::question).collect();
        assert_eq!(questions, ["Q1", "Q3", "Q5"]);
    }

    #[test]
    fn ingest_assigns_positional_ids() {
        let ingest = Catalog::from_rows(rows());
        // Ids track the source row index, including skipped rows.
        assert!(ingest.catalog.get(&CardId::new("card-0")).is_some());
        assert!(ingest.catalog.get(&CardId::new("card-2")).is_some());
        assert!(ingest.catalog.get(&CardId::new("card-1")).is_none());
    }

    #[test]
    fn topic_total_counts_catalog_not_tallies() {
        let ingest = Catalog::from_rows(rows());
        assert_eq!(ingest.catalog.topic_total(&TopicId::new("antro")), 2);
        assert_eq!(ingest.catalog.topic_total(&TopicId::new("bib")), 1);
        assert_eq!(ingest.catalog.topic_total(&TopicId::new("escat")), 0);
    }

    #[test]
    fn empty_feed_yields_empty_catalog() {
        let ingest = Catalog::from_rows(Vec::new());
        assert!(ingest.catalog.is_empty());
        assert_eq!(ingest.skipped, 0);
    }
}
