//! Renderers for the widget: HTML markup and plain text for terminals.

use std::fmt::Write;

use super::view::{BookCard, LOADING_TEXT, View};

pub const HEADING: &str = "Book Finder";
pub const TAGLINE: &str = "Find your favorite books by title.";
pub const INPUT_PLACEHOLDER: &str = "Search by title...";
pub const LINK_LABEL: &str = "View Book";

/// Full widget markup: header with the search input, then the results area
pub fn render_html(input: &str, view: &View) -> String {
    let mut html = String::new();
    html.push_str("<div class=\"book-finder\">\n");
    html.push_str("  <div class=\"header\">\n");
    let _ = writeln!(html, "    <h1>{}</h1>", HEADING);
    let _ = writeln!(html, "    <p>{}</p>", TAGLINE);
    let _ = writeln!(
        html,
        "    <input type=\"text\" placeholder=\"{}\" value=\"{}\" />",
        INPUT_PLACEHOLDER,
        escape_html(input)
    );
    html.push_str("  </div>\n");

    html.push_str("  <div class=\"results\">\n");
    match view {
        View::Loading => {
            let _ = writeln!(html, "    <p>{}</p>", LOADING_TEXT);
        }
        View::Message(message) => {
            let _ = writeln!(html, "    <p class=\"message\">{}</p>", escape_html(message));
        }
        View::Grid(cards) => {
            html.push_str("    <div class=\"book-grid\">\n");
            for card in cards {
                write_card_html(&mut html, card);
            }
            html.push_str("    </div>\n");
        }
    }
    html.push_str("  </div>\n");
    html.push_str("</div>\n");
    html
}

fn write_card_html(html: &mut String, card: &BookCard) {
    html.push_str("      <div class=\"book-card\">\n");
    let _ = writeln!(html, "        <h3>{}</h3>", escape_html(&card.title));
    let _ = writeln!(
        html,
        "        <p><strong>Author:</strong> {}</p>",
        escape_html(&card.authors)
    );
    let _ = writeln!(
        html,
        "        <p><strong>First Published:</strong> {}</p>",
        escape_html(&card.first_published)
    );
    if let Some(link) = &card.link {
        let _ = writeln!(
            html,
            "        <a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"cta-button\">{}</a>",
            escape_html(link),
            LINK_LABEL
        );
    }
    html.push_str("      </div>\n");
}

/// Plain-text rendering of the results area
pub fn render_text(view: &View) -> String {
    match view {
        View::Loading => format!("{}\n", LOADING_TEXT),
        View::Message(message) => format!("{}\n", message),
        View::Grid(cards) => {
            let mut out = String::new();
            for (i, card) in cards.iter().enumerate() {
                let _ = writeln!(out, "{:>2}. {}", i + 1, card.title);
                let _ = writeln!(out, "    Author: {}", card.authors);
                let _ = writeln!(out, "    First Published: {}", card.first_published);
                if let Some(link) = &card.link {
                    let _ = writeln!(out, "    {}", link);
                }
            }
            out
        }
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune_card() -> BookCard {
        BookCard {
            title: "Dune".into(),
            authors: "Frank Herbert".into(),
            first_published: "1965".into(),
            link: Some("https://openlibrary.org/works/OL1".into()),
        }
    }

    #[test]
    fn test_header_is_always_rendered() {
        let html = render_html("du", &View::Message("hello".into()));
        assert!(html.contains("<h1>Book Finder</h1>"));
        assert!(html.contains("<p>Find your favorite books by title.</p>"));
        assert!(html.contains("placeholder=\"Search by title...\""));
        assert!(html.contains("value=\"du\""));
        assert!(html.contains("<p class=\"message\">hello</p>"));
        assert!(!html.contains("book-grid"));
    }

    #[test]
    fn test_loading_markup() {
        let html = render_html("dune", &View::Loading);
        assert!(html.contains("<p>Loading books...</p>"));
        assert!(!html.contains("class=\"message\""));
        assert!(!html.contains("book-card"));
    }

    #[test]
    fn test_card_markup() {
        let html = render_html("dune", &View::Grid(vec![dune_card()]));
        assert_eq!(html.matches("class=\"book-card\"").count(), 1);
        assert!(html.contains("<h3>Dune</h3>"));
        assert!(html.contains("<strong>Author:</strong> Frank Herbert"));
        assert!(html.contains("<strong>First Published:</strong> 1965"));
        assert!(html.contains(
            "<a href=\"https://openlibrary.org/works/OL1\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"cta-button\">View Book</a>"
        ));
    }

    #[test]
    fn test_card_without_link() {
        let card = BookCard {
            link: None,
            ..dune_card()
        };
        let html = render_html("dune", &View::Grid(vec![card]));
        assert!(!html.contains("<a "));
    }

    #[test]
    fn test_text_is_escaped() {
        let card = BookCard {
            title: "<script>alert('x')</script> & \"more\"".into(),
            ..dune_card()
        };
        let html = render_html("a<b", &View::Grid(vec![card]));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; &quot;more&quot;"));
        assert!(html.contains("value=\"a&lt;b\""));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_render_text() {
        assert_eq!(render_text(&View::Loading), "Loading books...\n");
        assert_eq!(render_text(&View::Message("nope".into())), "nope\n");

        let text = render_text(&View::Grid(vec![dune_card()]));
        assert_eq!(
            text,
            " 1. Dune\n    Author: Frank Herbert\n    First Published: 1965\n    https://openlibrary.org/works/OL1\n"
        );
    }
}
