use scraper::{ElementRef, Html, Selector};

const PRICE_CLASS_TOKENS: &[&str] = &["price", "prijs", "amount", "bedrag"];

const PRODUCT_CLASS_TOKENS: &[&str] = &["product", "artikel", "item"];

const STRIPPED_TAGS: &str = "script, style";

/// Written in place of the product section when no element matches.
pub const NO_PRODUCT_SECTION: &str = "None";

/// Cuts a product page down to the fragments that matter for extraction:
/// every price-like element, plus the first product-like container.
#[derive(Debug, Clone, Default)]
pub struct ContentReducer;

impl ContentReducer {
    pub fn new() -> Self {
        Self
    }

    pub fn reduce(&self, html: &str) -> String {
        let mut document = Html::parse_document(html);
        strip_non_content(&mut document);

        let price_elements = self.price_elements(&document);
        let product_section = self
            .product_section(&document)
            .unwrap_or_else(|| NO_PRODUCT_SECTION.to_string());

        format!(
            "Price-related elements:\n{}\n\nProduct section:\n{}\n",
            price_elements.join(" "),
            product_section
        )
    }

    fn price_elements(&self, document: &Html) -> Vec<String> {
        classed_elements(document)
            .filter(|el| class_matches(el, PRICE_CLASS_TOKENS))
            .map(|el| el.html())
            .collect()
    }

    fn product_section(&self, document: &Html) -> Option<String> {
        classed_elements(document)
            .find(|el| class_matches(el, PRODUCT_CLASS_TOKENS))
            .map(|el| el.html())
    }
}

fn strip_non_content(document: &mut Html) {
    let Ok(selector) = Selector::parse(STRIPPED_TAGS) else {
        return;
    };

    let ids: Vec<_> = document.select(&selector).map(|el| el.id()).collect();
    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

fn classed_elements(document: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    let selector = Selector::parse("[class]").ok();
    let elements: Vec<ElementRef<'_>> = match selector {
        Some(sel) => document.select(&sel).collect(),
        None => Vec::new(),
    };
    elements.into_iter()
}

fn class_matches(element: &ElementRef<'_>, tokens: &[&str]) -> bool {
    element
        .value()
        .attr("class")
        .map(|class| {
            let lower = class.to_lowercase();
            tokens.iter().any(|token| lower.contains(token))
        })
        .unwrap_or(false)
}
