use lore::config::SearchConfig;
use lore::pipeline::{BuildOptions, build_index};
use lore::search::{EntityIndex, FacetFilter, SearchFilters, SearchHit, SearchRequest};

use crate::common::Fixture;

fn built_index() -> (Fixture, EntityIndex) {
    let fixture = Fixture::catalogue();
    let options = BuildOptions {
        entities_dir: fixture.entities_dir(),
        extension: "json".to_string(),
        output_dir: fixture.index_dir(),
        max_hops: 2,
        parallel: true,
        writer_heap_bytes: 50_000_000,
    };
    build_index(&options).unwrap();
    let index = EntityIndex::open(&fixture.index_dir()).unwrap();
    (fixture, index)
}

fn exact() -> SearchConfig {
    SearchConfig {
        fuzzy: false,
        ..SearchConfig::default()
    }
}

fn query(text: &str) -> SearchRequest {
    SearchRequest {
        query: text.to_string(),
        filters: SearchFilters::default(),
        limit: 20,
    }
}

fn ids(hits: &[SearchHit]) -> Vec<String> {
    let mut ids: Vec<String> = hits.iter().map(|hit| hit.record.id.clone()).collect();
    ids.sort();
    ids
}

#[test]
fn test_director_name_finds_linked_entities() {
    let (_fixture, index) = built_index();
    let hits = index.search(&query("Nolan"), &exact()).unwrap();
    assert_eq!(ids(&hits), vec!["cobb", "inception", "nolan"]);
}

#[test]
fn test_two_hop_location_reaches_director_and_film() {
    let (_fixture, index) = built_index();
    let hits = index.search(&query("England"), &exact()).unwrap();
    // inception is three hops from england and must not match
    assert_eq!(ids(&hits), vec!["england", "london", "nolan"]);
}

#[test]
fn test_name_outranks_related_mention() {
    let (_fixture, index) = built_index();
    let hits = index.search(&query("Inception"), &exact()).unwrap();
    assert_eq!(hits[0].record.id, "inception");
    assert!(ids(&hits).contains(&"cobb".to_string()));
}

#[test]
fn test_alias_and_body_are_searchable() {
    let (_fixture, index) = built_index();
    let hits = index.search(&query("Origen"), &exact()).unwrap();
    assert_eq!(ids(&hits), vec!["inception"]);

    let hits = index.search(&query("layered"), &exact()).unwrap();
    assert_eq!(ids(&hits), vec!["inception"]);
}

#[test]
fn test_category_filter_matches_child_tags() {
    let (_fixture, index) = built_index();
    let mut request = query("");
    request.filters.tag = Some("franchise".to_string());
    let hits = index.search(&request, &exact()).unwrap();
    assert_eq!(ids(&hits), vec!["batmobile", "dark-knight"]);
}

#[test]
fn test_inherited_facet_filter() {
    let (_fixture, index) = built_index();
    let mut request = query("");
    request.filters.facets = vec![FacetFilter::parse("genre=heist").unwrap()];
    let hits = index.search(&request, &exact()).unwrap();
    assert_eq!(ids(&hits), vec!["cobb", "inception"]);

    request.filters.kind = Some("character".to_string());
    let hits = index.search(&request, &exact()).unwrap();
    assert_eq!(ids(&hits), vec!["cobb"]);
}

#[test]
fn test_limit_caps_results() {
    let (_fixture, index) = built_index();
    let mut request = query("");
    request.limit = 3;
    let hits = index.search(&request, &exact()).unwrap();
    assert_eq!(hits.len(), 3);
}

#[test]
fn test_fuzzy_matching_tolerates_typos() {
    let (_fixture, index) = built_index();
    let hits = index.search(&query("Incepton"), &SearchConfig::default()).unwrap();
    assert!(ids(&hits).contains(&"inception".to_string()));
}
