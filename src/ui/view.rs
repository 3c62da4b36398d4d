use crate::domain::BookDoc;
use crate::modules::integrations::openlibrary;
use crate::services::{SearchSettings, SearchState};

pub const LOADING_TEXT: &str = "Loading books...";
/// Shown in place of a missing author list or publish year
pub const PLACEHOLDER: &str = "N/A";

/// What the results area shows for a given state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Loading,
    Message(String),
    Grid(Vec<BookCard>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCard {
    pub title: String,
    pub authors: String,
    pub first_published: String,
    /// None when the record carries no catalog key
    pub link: Option<String>,
}

impl BookCard {
    pub fn from_doc(doc: &BookDoc, link_base: &str) -> Self {
        let authors = match doc.author_name.as_deref() {
            Some(names) if !names.is_empty() => names.join(", "),
            _ => PLACEHOLDER.to_string(),
        };

        Self {
            title: doc.title.clone(),
            authors,
            first_published: doc
                .first_publish_year
                .map(|year| year.to_string())
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            link: doc
                .key
                .as_deref()
                .map(|key| openlibrary::detail_url(link_base, key)),
        }
    }
}

/// Pure mapping from state to view. Loading wins over everything else; an
/// empty result list shows the message; otherwise the first
/// `display_limit` results become cards, in catalog order.
pub fn render(state: &SearchState, settings: &SearchSettings) -> View {
    if state.loading {
        return View::Loading;
    }

    if state.books.is_empty() {
        return View::Message(state.message.clone());
    }

    View::Grid(
        state
            .books
            .iter()
            .take(settings.display_limit)
            .map(|doc| BookCard::from_doc(doc, &settings.link_base))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::SearchEvent;
    use crate::services::search_state::{PROMPT_MESSAGE, TOO_SHORT_MESSAGE};

    fn dune() -> BookDoc {
        BookDoc {
            title: "Dune".into(),
            author_name: Some(vec!["Frank Herbert".into()]),
            first_publish_year: Some(1965),
            key: Some("/works/OL1".into()),
        }
    }

    fn state_with(books: Vec<BookDoc>) -> SearchState {
        let mut state = SearchState::default();
        state.apply(SearchEvent::Typed("book".into()));
        let request = state
            .apply(SearchEvent::Committed("book".into()))
            .unwrap();
        state.apply(SearchEvent::Resolved {
            seq: request.seq,
            outcome: Ok(books),
        });
        state
    }

    #[test]
    fn test_initial_prompt() {
        let view = render(&SearchState::default(), &SearchSettings::default());
        assert_eq!(view, View::Message(PROMPT_MESSAGE.into()));
    }

    #[test]
    fn test_loading_suppresses_message_and_grid() {
        let mut state = state_with(vec![dune()]);
        state.apply(SearchEvent::Committed("dune messiah".into()));
        assert!(state.loading);
        assert_eq!(render(&state, &SearchSettings::default()), View::Loading);
    }

    #[test]
    fn test_short_query_message() {
        let mut state = SearchState::default();
        state.apply(SearchEvent::Committed("zz".into()));
        assert_eq!(
            render(&state, &SearchSettings::default()),
            View::Message(TOO_SHORT_MESSAGE.into())
        );
    }

    #[test]
    fn test_card_fields() {
        let view = render(&state_with(vec![dune()]), &SearchSettings::default());
        assert_eq!(
            view,
            View::Grid(vec![BookCard {
                title: "Dune".into(),
                authors: "Frank Herbert".into(),
                first_published: "1965".into(),
                link: Some("https://openlibrary.org/works/OL1".into()),
            }])
        );
    }

    #[test]
    fn test_card_placeholders() {
        let bare = BookDoc {
            title: "Anonymous".into(),
            ..Default::default()
        };
        let card = BookCard::from_doc(&bare, "https://openlibrary.org");
        assert_eq!(card.authors, PLACEHOLDER);
        assert_eq!(card.first_published, PLACEHOLDER);
        assert_eq!(card.link, None);

        let empty_authors = BookDoc {
            author_name: Some(vec![]),
            ..bare
        };
        let card = BookCard::from_doc(&empty_authors, "https://openlibrary.org");
        assert_eq!(card.authors, PLACEHOLDER);
    }

    #[test]
    fn test_authors_are_comma_joined() {
        let doc = BookDoc {
            title: "Good Omens".into(),
            author_name: Some(vec!["Terry Pratchett".into(), "Neil Gaiman".into()]),
            ..Default::default()
        };
        let card = BookCard::from_doc(&doc, "https://openlibrary.org");
        assert_eq!(card.authors, "Terry Pratchett, Neil Gaiman");
    }

    #[test]
    fn test_grid_is_truncated_in_order() {
        let books: Vec<BookDoc> = (0..35)
            .map(|i| BookDoc {
                title: format!("Volume {}", i),
                ..Default::default()
            })
            .collect();
        let state = state_with(books);

        let View::Grid(cards) = render(&state, &SearchSettings::default()) else {
            panic!("expected a grid");
        };
        assert_eq!(cards.len(), 20);
        assert_eq!(cards[0].title, "Volume 0");
        assert_eq!(cards[19].title, "Volume 19");
        // The full list is kept in state, only the display is cut
        assert_eq!(state.books.len(), 35);

        let narrow = SearchSettings {
            display_limit: 3,
            ..Default::default()
        };
        let View::Grid(cards) = render(&state, &narrow) else {
            panic!("expected a grid");
        };
        assert_eq!(cards.len(), 3);
    }
}
