use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::page::squash;
use super::patterns::parse_location;
use crate::record::{ExhibitorRecord, ExhibitorType};

const VOCABULARY: &[&str] = &["exhibitor", "espositor", "stand", "company", "azienda"];

static ALL_ELEMENTS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body *").unwrap());
static NAME_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a, h1, h2, h3, h4, strong, b, em").unwrap());

/// One record per element whose tag or class names an exhibitor container.
pub fn extract_structured(doc: &Html) -> Vec<ExhibitorRecord> {
    doc.select(&ALL_ELEMENTS)
        .filter(|el| is_container(el))
        .filter_map(|el| element_record(&el))
        .collect()
}

fn is_container(el: &ElementRef) -> bool {
    let value = el.value();
    matches_vocabulary(value.name()) || value.classes().any(matches_vocabulary)
}

fn matches_vocabulary(s: &str) -> bool {
    let lower = s.to_lowercase();
    VOCABULARY.iter().any(|kw| lower.contains(kw))
}

fn element_record(el: &ElementRef) -> Option<ExhibitorRecord> {
    let name = el
        .select(&NAME_SELECTOR)
        .next()
        .map(|n| squash(n.text()))
        .unwrap_or_default();
    let full_text = squash(el.text());
    let (pavilion, stand) = parse_location(&full_text);

    if name.is_empty() && pavilion.is_empty() {
        return None;
    }
    Some(ExhibitorRecord {
        name,
        pavilion,
        stand,
        kind: ExhibitorType::detect(&full_text),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cards_become_records() {
        let doc = Html::parse_document(
            r#"<body><ul>
              <li class="exhibitor-card"><h3>Acme Foods</h3><p>Padiglione 4 - Stand A 12</p></li>
              <li class="Exhibitor-Card"><a href="/b">Beta Snacks</a><span>Marchio</span>
                  <p>Padiglione 12-14 - Stand B 5</p></li>
            </ul></body>"#,
        );
        let recs = extract_structured(&doc);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].name, "Acme Foods");
        assert_eq!(recs[0].pavilion, "4");
        assert_eq!(recs[0].stand, "A 12");
        assert_eq!(recs[0].kind, ExhibitorType::Exhibitor);
        assert_eq!(recs[1].name, "Beta Snacks");
        assert_eq!(recs[1].pavilion, "12-14");
        assert_eq!(recs[1].kind, ExhibitorType::Brand);
    }

    #[test]
    fn first_name_element_in_document_order() {
        let doc = Html::parse_document(
            r#"<body><div class="azienda"><strong>Gamma Spa</strong><h2>Altro</h2></div></body>"#,
        );
        let recs = extract_structured(&doc);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].name, "Gamma Spa");
        assert!(recs[0].pavilion.is_empty());
    }

    #[test]
    fn unidentified_elements_dropped() {
        let doc = Html::parse_document(
            r#"<body><div class="stand-banner"><p>Benvenuti</p></div></body>"#,
        );
        assert!(extract_structured(&doc).is_empty());
    }

    #[test]
    fn pavilion_without_name_is_kept() {
        let doc = Html::parse_document(
            r#"<body><div class="stand-info">Padiglione 6 - Stand F 2 Co-espositore</div></body>"#,
        );
        let recs = extract_structured(&doc);
        assert_eq!(recs.len(), 1);
        assert!(recs[0].name.is_empty());
        assert_eq!(recs[0].kind, ExhibitorType::CoExhibitor);
    }

    #[test]
    fn wrapper_reads_type_from_whole_list() {
        let doc = Html::parse_document(
            r#"<body><div class="exhibitor-list">
              <div class="exhibitor-card"><h3>Acme Foods</h3><p>Padiglione 4 - Stand A 12</p></div>
              <div class="exhibitor-card"><h3>Beta</h3><p>Marchio</p><p>Padiglione 2 - Stand B 5</p></div>
            </div></body>"#,
        );
        let recs = extract_structured(&doc);
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].key(), recs[1].key());
        assert_eq!(recs[0].kind, ExhibitorType::Brand);
        assert_eq!(recs[1].kind, ExhibitorType::Exhibitor);

        // The wrapper comes first in document order, so it wins dedup.
        let kept = crate::parser::normalize::normalize(recs);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].name, "Acme Foods");
        assert_eq!(kept[0].kind, ExhibitorType::Brand);
        assert_eq!(kept[1].name, "Beta");
    }

    #[test]
    fn no_matching_elements() {
        let doc = Html::parse_document("<body><p>Padiglione 4 - Stand A 12</p></body>");
        assert!(extract_structured(&doc).is_empty());
    }
}
