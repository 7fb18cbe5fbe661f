use bookapi::{Author, Book};

/// Books whose title, denormalized author name, or decimal year
/// contain the term, case-insensitively. A blank term is unfiltered.
pub fn filter_books(term: &str, books: &[Book]) -> Vec<Book> {
    let term = term.trim();
    if term.is_empty() {
        return books.to_vec();
    }
    let term = term.to_lowercase();
    books
        .iter()
        .filter(|b| {
            b.title.to_lowercase().contains(&term)
                || b.author_name
                    .as_deref()
                    .unwrap_or("")
                    .to_lowercase()
                    .contains(&term)
                || b.year.to_string().contains(&term)
        })
        .cloned()
        .collect()
}

/// Authors whose name contains the term, case-insensitively.
pub fn filter_authors(term: &str, authors: &[Author]) -> Vec<Author> {
    let term = term.trim();
    if term.is_empty() {
        return authors.to_vec();
    }
    let term = term.to_lowercase();
    authors
        .iter()
        .filter(|a| a.name.to_lowercase().contains(&term))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: i64, title: &str, year: i32, author_name: Option<&str>) -> Book {
        Book {
            id,
            title: title.to_string(),
            year,
            author_id: None,
            author_name: author_name.map(str::to_string),
            isbn: None,
            cover_url: None,
            description: None,
            info_link: None,
        }
    }

    fn author(id: i64, name: &str) -> Author {
        Author {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn blank_term_is_unfiltered() {
        let books = vec![book(1, "Dune", 1965, None), book(2, "Hyperion", 1989, None)];
        assert_eq!(filter_books("", &books), books);
        assert_eq!(filter_books("   ", &books), books);
    }

    #[test]
    fn matches_title_case_insensitively() {
        let books = vec![book(1, "Dune", 1965, None), book(2, "Hyperion", 1989, None)];
        let hits = filter_books("dUnE", &books);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
    }

    #[test]
    fn matches_denormalized_author_name() {
        let books = vec![
            book(1, "Dune", 1965, Some("Frank Herbert")),
            book(2, "Hyperion", 1989, Some("Dan Simmons")),
        ];
        let hits = filter_books("herbert", &books);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
    }

    #[test]
    fn matches_year_substring() {
        let books = vec![book(1, "Dune", 1965, None), book(2, "Hyperion", 1989, None)];
        let hits = filter_books("196", &books);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);

        assert_eq!(filter_books("19", &books).len(), 2);
    }

    #[test]
    fn books_without_author_name_still_match_title() {
        let books = vec![book(1, "Annihilation", 2014, None)];
        assert_eq!(filter_books("annihilation", &books).len(), 1);
        assert!(filter_books("vandermeer", &books).is_empty());
    }

    #[test]
    fn no_match_yields_empty() {
        let books = vec![book(1, "Dune", 1965, Some("Frank Herbert"))];
        assert!(filter_books("solaris", &books).is_empty());
    }

    #[test]
    fn filters_authors_by_name() {
        let authors = vec![author(1, "Frank Herbert"), author(2, "Dan Simmons")];
        assert_eq!(filter_authors("", &authors), authors);

        let hits = filter_authors("SIMM", &authors);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);
    }
}
