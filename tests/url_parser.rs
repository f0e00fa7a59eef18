use std::collections::BTreeMap;

use appnav::deeplink::{Url, UrlError};
use appnav::navigation::{Configuration, TabConfiguration};

fn url(segments: &[&str], parameters: &[(&str, &str)]) -> Url {
    Url {
        path_segments: segments.iter().map(|s| s.to_string()).collect(),
        parameters: parameters
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>(),
    }
}

#[test]
fn rendered_links_parse_back_to_the_same_url() {
    let cases = [
        url(&[], &[]),
        url(&["tabs"], &[]),
        url(&["tabs", "about"], &[("ref", "mail")]),
        url(&["onboarding"], &[("page", "2"), ("utm", "x")]),
    ];
    for original in cases {
        let raw = original.to_deep_link("app", "example.com");
        assert_eq!(Url::parse(&raw).unwrap(), original, "link {}", raw);
    }
}

#[test]
fn consuming_segments_shrinks_until_empty() {
    let mut current = Url::parse("app://x/a/b/c?k=v").unwrap();
    let mut seen = Vec::new();
    loop {
        let before = current.path_segments.len();
        let (segment, rest) = current.consume_path_segment();
        match segment {
            Some(segment) => {
                assert_eq!(rest.path_segments.len(), before - 1);
                seen.push(segment);
                current = rest;
            }
            None => {
                assert_eq!(rest, Url::default());
                break;
            }
        }
    }
    assert_eq!(seen, vec!["a", "b", "c"]);
}

#[test]
fn malformed_query_is_an_error() {
    assert_eq!(
        Url::parse("app://x/tabs?a=1&oops"),
        Err(UrlError::MalformedParameter {
            pair: "oops".to_string()
        })
    );
}

#[test]
fn deep_link_resolves_nested_tab() {
    let link = Url::parse("app://x/tabs/about").unwrap();
    let config = Configuration::from_deep_link(&link);
    let Configuration::Tabs { deep_link } = &config else {
        panic!("expected tabs, got {:?}", config);
    };
    assert_eq!(
        TabConfiguration::from_deep_link(deep_link.as_ref()),
        TabConfiguration::About
    );
}

#[test]
fn onboarding_page_comes_from_query() {
    let link = Url::parse("app://x/onboarding?page=1").unwrap();
    assert_eq!(
        Configuration::from_deep_link(&link),
        Configuration::Onboarding { page: 1 }
    );
}
