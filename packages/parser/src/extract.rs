use std::sync::LazyLock;

use scraper::{Html, Selector};

/// Name stored when the document has no `<title>` element.
pub const DEFAULT_NAME: &str = "No name";
/// Description stored when the document has no usable description meta tag.
pub const DEFAULT_DESCRIPTION: &str = "No description";

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("title selector is valid"));
static DESCRIPTION_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[name="description"]"#).expect("description selector is valid")
});

/// Name and description extracted from an HTML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    pub name: String,
    pub description: String,
}

/// Extract the page name and description from raw HTML.
///
/// The name is the trimmed text of the first `<title>`, or [`DEFAULT_NAME`]
/// when there is none. The description is the trimmed `content` of the first
/// `<meta name="description">`; a missing tag, a missing attribute and a
/// blank value all yield [`DEFAULT_DESCRIPTION`]. Parsing is lenient, so
/// malformed markup only ever degrades to the defaults.
pub fn extract_metadata(html: &str) -> PageMetadata {
    let document = Html::parse_document(html);

    let name = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|title| title.text().collect::<String>().trim().to_string())
        .unwrap_or_else(|| DEFAULT_NAME.to_string());

    let description = document
        .select(&DESCRIPTION_SELECTOR)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(str::trim)
        .filter(|content| !content.is_empty())
        .unwrap_or(DEFAULT_DESCRIPTION)
        .to_string();

    PageMetadata { name, description }
}
