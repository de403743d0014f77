use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::classify::ContactLine;
use super::page::squash;
use crate::record::{Contact, DetailRecord};

static NAME_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".info-box-content h4 a").unwrap());
static CONTACT_BOX: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".box-body").unwrap());
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

/// Detail-page links on a listing page, resolved against `base`, in
/// discovery order.
pub fn listing_links(doc: &Html, base: &Url) -> Vec<String> {
    doc.select(&NAME_LINK)
        .filter_map(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .filter_map(|href| base.join(href).ok())
        .map(String::from)
        .collect()
}

pub fn parse_detail(doc: &Html, link: &str) -> DetailRecord {
    let name = doc
        .select(&NAME_LINK)
        .next()
        .map(|a| squash(a.text()))
        .unwrap_or_default();
    let lines = contact_lines(doc);

    DetailRecord {
        name,
        link: link.to_string(),
        contact: Contact::from_lines(&lines),
    }
}

/// Paragraphs of the first `.box-body`; none when the page has no box.
pub fn contact_lines(doc: &Html) -> Vec<ContactLine> {
    let Some(body) = doc.select(&CONTACT_BOX).next() else {
        return Vec::new();
    };
    body.select(&PARAGRAPH).map(paragraph_line).collect()
}

fn paragraph_line(p: ElementRef) -> ContactLine {
    ContactLine {
        text: squash(p.text()),
        href: p
            .select(&ANCHOR)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETAIL: &str = r#"<html><body>
      <div class="info-box-content"><h4><a href="/espositore/acme">  Acme Foods Srl </a></h4></div>
      <div class="box-body">
        <p>Via Emilia 10, 43100 Parma</p>
        <p>+39 0521 123456</p>
        <p><a href="mailto:info@acme.it">info@acme.it</a></p>
        <p><a href="https://www.acme.it">www.acme.it</a></p>
      </div>
      <div class="box-body"><p>altro@ignorato.it</p></div>
    </body></html>"#;

    #[test]
    fn detail_contact_block() {
        let doc = Html::parse_document(DETAIL);
        let d = parse_detail(&doc, "https://catalogo.example/espositore/acme");
        assert_eq!(d.name, "Acme Foods Srl");
        assert_eq!(d.link, "https://catalogo.example/espositore/acme");
        assert_eq!(d.contact.address, "Via Emilia 10, 43100 Parma");
        assert_eq!(d.contact.phone, "+39 0521 123456");
        assert_eq!(d.contact.email, "info@acme.it");
        assert_eq!(d.contact.website, "www.acme.it");
    }

    #[test]
    fn detail_fixture_keeps_last_address_line() {
        let html = std::fs::read_to_string("tests/fixtures/detail.html").unwrap();
        let d = parse_detail(&Html::parse_document(&html), "https://x.example/acme-foods");
        assert_eq!(d.name, "Acme Foods Srl");
        assert_eq!(d.contact.address, "43126 Parma (PR)");
        assert_eq!(d.contact.phone, "+39 0521 123456");
        assert_eq!(d.contact.email, "info@acmefoods.it");
        assert_eq!(d.contact.website, "www.acmefoods.it");
    }

    #[test]
    fn missing_blocks_degrade_to_empty() {
        let doc = Html::parse_document("<html><body><p>404</p></body></html>");
        let d = parse_detail(&doc, "https://x.example/a");
        assert!(d.name.is_empty());
        assert!(d.contact.is_empty());
    }

    #[test]
    fn links_resolved_in_order() {
        let doc = Html::parse_document(
            r#"<div class="info-box-content"><h4><a href="/e/1">Uno</a></h4></div>
               <div class="info-box-content"><h4><a href="https://other.example/e/2">Due</a></h4></div>
               <div class="info-box-content"><h4><a>Senza link</a></h4></div>
               <div class="info-box-content"><h4><a href="e/3">Tre</a></h4></div>"#,
        );
        let base = Url::parse("https://catalogo.example/manifestazione/cibus-2024/?pag=2").unwrap();
        assert_eq!(
            listing_links(&doc, &base),
            [
                "https://catalogo.example/e/1",
                "https://other.example/e/2",
                "https://catalogo.example/manifestazione/cibus-2024/e/3",
            ]
        );
    }
}
