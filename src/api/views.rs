//! Server-rendered HTML pages

use crate::infrastructure::session::Flash;
use crate::models::Book;

const STYLE: &str = "body{font-family:sans-serif;max-width:56rem;margin:2rem auto;padding:0 1rem}\
.flash{padding:.5rem 1rem;margin:.5rem 0;border-radius:4px}\
.flash.success{background:#e3f6e3}.flash.error{background:#fbe3e3}\
.book{display:flex;gap:1rem;align-items:flex-start;border-bottom:1px solid #ddd;padding:1rem 0}\
.book img{width:80px}";

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        STYLE,
        body
    )
}

fn render_flashes(flashes: &[Flash]) -> String {
    flashes
        .iter()
        .map(|f| {
            format!(
                "<div class=\"flash {}\">{}</div>",
                f.category.as_str(),
                escape_html(&f.message)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn login_page(flashes: &[Flash]) -> String {
    let body = format!(
        r#"<h1>Bookshelf</h1>
{}
<form method="post" action="/login">
  <p><label>Username <input type="text" name="username" required></label></p>
  <p><label>Password <input type="password" name="password" required></label></p>
  <p><button type="submit">Login</button></p>
</form>"#,
        render_flashes(flashes)
    );
    layout("Login - Bookshelf", &body)
}

fn render_book(book: &Book) -> String {
    let cover = book
        .thumbnail
        .as_deref()
        .map(|url| {
            format!(
                "<img src=\"{}\" alt=\"Cover of {}\">",
                escape_html(url),
                escape_html(&book.title)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div class="book">
  {cover}
  <div>
    <h3>{title}</h3>
    <p>by {author}</p>
    <p>ISBN {isbn} &middot; {pages} pages &middot; rating {rating:.1}</p>
    <form method="post" action="/delete/{id}"><button type="submit">Delete</button></form>
  </div>
</div>"#,
        cover = cover,
        title = escape_html(&book.title),
        author = escape_html(&book.author),
        isbn = escape_html(&book.isbn),
        pages = book.page_count,
        rating = book.average_rating,
        id = book.id,
    )
}

pub fn index_page(username: &str, books: &[Book], flashes: &[Flash]) -> String {
    let list = if books.is_empty() {
        "<p>No books yet. Add one by ISBN above.</p>".to_string()
    } else {
        books.iter().map(render_book).collect::<Vec<_>>().join("\n")
    };

    let body = format!(
        r#"<h1>{username}'s books</h1>
<p><a href="/logout">Logout</a></p>
{flashes}
<form method="post" action="/search">
  <label>ISBN <input type="text" name="isbn" placeholder="9780441013593"></label>
  <button type="submit">Add book</button>
</form>
{list}"#,
        username = escape_html(username),
        flashes = render_flashes(flashes),
        list = list,
    );
    layout("My books - Bookshelf", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::session::FlashCategory;

    fn sample_book() -> Book {
        Book {
            id: 5,
            user_id: 1,
            isbn: "9780441013593".into(),
            title: "Dune <Deluxe>".into(),
            author: "Frank Herbert".into(),
            page_count: 412,
            average_rating: 4.5,
            thumbnail: None,
            created_at: "2024-01-01T00:00:00Z".into(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#x27;"
        );
    }

    #[test]
    fn test_index_page_lists_books_escaped() {
        let html = index_page("alice", &[sample_book()], &[]);
        assert!(html.contains("Dune &lt;Deluxe&gt;"));
        assert!(html.contains("action=\"/delete/5\""));
        assert!(html.contains("rating 4.5"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_index_page_renders_thumbnail_and_flashes() {
        let mut book = sample_book();
        book.thumbnail = Some("http://example.com/t.jpg".into());
        let flashes = vec![Flash {
            category: FlashCategory::Success,
            message: "Book \"Dune\" added successfully!".into(),
        }];

        let html = index_page("alice", &[book], &flashes);
        assert!(html.contains("<img src=\"http://example.com/t.jpg\""));
        assert!(html.contains("class=\"flash success\""));
        assert!(html.contains("Book &quot;Dune&quot; added successfully!"));
    }

    #[test]
    fn test_login_page_has_form() {
        let html = login_page(&[]);
        assert!(html.contains("action=\"/login\""));
        assert!(html.contains("name=\"password\""));
    }
}
