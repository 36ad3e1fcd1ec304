use lore::document::DocumentAssembler;
use lore::entity::FacetValue;
use lore::pipeline::{BuildOptions, build_index, load_store};
use lore::search::EntityIndex;
use lore::LoreError;

use crate::common::Fixture;

fn options(fixture: &Fixture) -> BuildOptions {
    BuildOptions {
        entities_dir: fixture.entities_dir(),
        extension: "json".to_string(),
        output_dir: fixture.index_dir(),
        max_hops: 2,
        parallel: true,
        writer_heap_bytes: 50_000_000,
    }
}

#[test]
fn test_build_writes_every_entity() {
    let fixture = Fixture::catalogue();
    let report = build_index(&options(&fixture)).unwrap();

    assert_eq!(report.files_read, 7);
    assert!(report.rejected.is_empty());
    assert_eq!(report.documents, 7);
    // england and dark-knight have no outgoing edges
    assert_eq!(report.with_related, 5);

    let index = EntityIndex::open(&fixture.index_dir()).unwrap();
    assert_eq!(index.document_count(), 7);
}

#[test]
fn test_character_inherits_movie_facets() {
    let fixture = Fixture::catalogue();
    let (store, _) = load_store(&options(&fixture)).unwrap();
    let cobb = DocumentAssembler::new(&store).assemble(store.get("cobb").unwrap());

    assert_eq!(
        cobb.stored.facets["genre"],
        FacetValue::List(vec![
            "drama".to_string(),
            "sci-fi".to_string(),
            "heist".to_string()
        ])
    );
    // own scalar wins over the inherited one
    assert_eq!(cobb.stored.facets["era"], FacetValue::Text("1990s".to_string()));
    assert_eq!(cobb.stored.facets["mindBending"], FacetValue::Flag(true));
    assert!(cobb.document.facet_text.contains("2010s"));
}

#[test]
fn test_related_names_stop_after_two_hops() {
    let fixture = Fixture::catalogue();
    let (store, _) = load_store(&options(&fixture)).unwrap();
    let assembler = DocumentAssembler::new(&store);

    let inception = assembler.assemble(store.get("inception").unwrap());
    assert_eq!(inception.document.related, "Christopher Nolan London");
    assert!(!inception.document.related.contains("England"));

    let cobb = assembler.assemble(store.get("cobb").unwrap());
    assert_eq!(cobb.document.related, "Inception Christopher Nolan");

    let deeper = DocumentAssembler::new(&store).with_max_hops(3);
    let inception = deeper.assemble(store.get("inception").unwrap());
    assert!(inception.document.related.contains("England"));
}

#[test]
fn test_dangling_relationship_is_ignored() {
    let fixture = Fixture::catalogue();
    let (store, _) = load_store(&options(&fixture)).unwrap();
    let batmobile = DocumentAssembler::new(&store).assemble(store.get("batmobile").unwrap());

    assert_eq!(batmobile.document.related, "The Dark Knight");
    assert_eq!(
        batmobile.stored.facets["franchise"],
        FacetValue::Text("batman".to_string())
    );
    assert_eq!(batmobile.stored.relationships.len(), 2);
}

#[test]
fn test_malformed_files_are_skipped() {
    let fixture = Fixture::catalogue();
    fixture.write_raw("broken.json", "{ not json");
    fixture.write_raw(
        "bad-facet.json",
        r#"{"id":"x","type":"movie","name":"X","facets":{"rating":7}}"#,
    );
    fixture.write_raw("notes.txt", "ignored");

    let report = build_index(&options(&fixture)).unwrap();
    assert_eq!(report.files_read, 9);
    assert_eq!(report.rejected.len(), 2);
    assert_eq!(report.documents, 7);
}

#[test]
fn test_rebuild_replaces_previous_index() {
    let fixture = Fixture::catalogue();
    build_index(&options(&fixture)).unwrap();
    std::fs::remove_file(fixture.entities_dir().join("england.json")).unwrap();

    let report = build_index(&options(&fixture)).unwrap();
    assert_eq!(report.documents, 6);
    let index = EntityIndex::open(&fixture.index_dir()).unwrap();
    assert_eq!(index.document_count(), 6);
}

#[test]
fn test_sequential_build_matches_parallel() {
    let fixture = Fixture::catalogue();
    let (store, _) = load_store(&options(&fixture)).unwrap();
    let assembler = DocumentAssembler::new(&store);

    let parallel = assembler.assemble_all(&store, true);
    let sequential = assembler.assemble_all(&store, false);
    let ids = |docs: &[lore::document::AssembledEntity]| {
        docs.iter()
            .map(|d| (d.document.id.clone(), d.document.related.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(ids(&parallel), ids(&sequential));
}

#[test]
fn test_missing_entities_dir_is_not_found() {
    let fixture = Fixture::new();
    let mut options = options(&fixture);
    options.entities_dir = fixture.root().join("does-not-exist");
    let err = build_index(&options).unwrap_err();
    assert!(matches!(err, LoreError::NotFound(_)));
}
