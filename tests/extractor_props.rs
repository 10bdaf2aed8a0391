//! Property tests for the feature extractor
//!
//! Documents are generated from a small grammar of blocks, children and
//! whitespace, and the report is checked against a direct model of the
//! sticky-weight rules.

use cap_features::{extract_reader, extract_str, parse_report, FeatureBlock};
use proptest::prelude::*;

/// A child element of a block: optional weight, text content
#[derive(Debug, Clone)]
struct Child {
    weight: Option<u16>,
    text: String,
}

fn child_strategy() -> impl Strategy<Value = Child> {
    (proptest::option::of(0u16..1000), "[a-z][a-z0-9_]{0,8}")
        .prop_map(|(weight, text)| Child { weight, text })
}

fn doc_strategy() -> impl Strategy<Value = Vec<Vec<Child>>> {
    proptest::collection::vec(proptest::collection::vec(child_strategy(), 0..5), 0..4)
}

fn render(blocks: &[Vec<Child>], indent: bool) -> String {
    let nl = if indent { "\n  " } else { "" };
    let mut xml = String::from("<doc>");
    for block in blocks {
        xml.push_str(nl);
        xml.push_str("<cap_features>");
        for child in block {
            xml.push_str(nl);
            match child.weight {
                Some(w) => xml.push_str(&format!(r#"<f weight="{}">{}</f>"#, w, child.text)),
                None => xml.push_str(&format!("<f>{}</f>", child.text)),
            }
        }
        xml.push_str(nl);
        xml.push_str("</cap_features>");
    }
    xml.push_str("<tail>ignored</tail></doc>");
    xml
}

/// Expected report: one weight cell for the whole document
fn model(blocks: &[Vec<Child>]) -> String {
    let mut weight = String::new();
    let mut out = String::new();
    for block in blocks {
        out.push_str("cap_features\n");
        for child in block {
            if let Some(w) = child.weight {
                weight = w.to_string();
            }
            out.push_str(&format!("    {} {}\n", child.text, weight));
        }
    }
    out
}

proptest! {
    #[test]
    fn report_matches_model(blocks in doc_strategy(), indent in any::<bool>()) {
        let report = extract_str(&render(&blocks, indent)).unwrap();
        prop_assert_eq!(report, model(&blocks));
    }

    #[test]
    fn whitespace_does_not_change_report(blocks in doc_strategy()) {
        let compact = extract_str(&render(&blocks, false)).unwrap();
        let indented = extract_str(&render(&blocks, true)).unwrap();
        prop_assert_eq!(compact, indented);
    }

    #[test]
    fn documents_are_independent(first in doc_strategy(), second in doc_strategy()) {
        let a = render(&first, true);
        let b = render(&second, true);

        let mut out = Vec::new();
        extract_reader(a.as_bytes(), &mut out).unwrap();
        extract_reader(b.as_bytes(), &mut out).unwrap();

        let expected = format!("{}{}", extract_str(&a).unwrap(), extract_str(&b).unwrap());
        prop_assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn report_reads_back(blocks in doc_strategy()) {
        let report = extract_str(&render(&blocks, true)).unwrap();
        let parsed = parse_report(report.as_bytes()).unwrap();

        prop_assert_eq!(parsed.len(), blocks.len());
        let rendered: String = parsed.iter().map(FeatureBlock::to_string).collect();
        prop_assert_eq!(rendered, report);
    }
}
