use std::fs;
use std::path::Path;

use wordnet_db::{LoadMode, WordNet};
use wordnet_types::Pos;

const PREAMBLE: &str = "  1 WordNet Release 3.0\n  2 \n";

fn write_dict(dir: &Path) {
    fs::write(
        dir.join("index.noun"),
        format!(
            "{PREAMBLE}cat n 1 1 @ 1 0 02121620\n\
child n 1 0 1 1 09917593\n\
network n 2 1 @ 2 1 08434259 03820728\n"
        ),
    )
    .unwrap();
    fs::write(
        dir.join("index.verb"),
        format!("{PREAMBLE}run v 1 1 @ 1 1 01926311\n"),
    )
    .unwrap();
    fs::write(dir.join("index.adj"), PREAMBLE).unwrap();
    fs::write(dir.join("index.adv"), PREAMBLE).unwrap();
}

#[test]
fn loads_lemmas_with_both_modes() {
    let tempdir = tempfile::tempdir().unwrap();
    write_dict(tempdir.path());

    for mode in [LoadMode::Mmap, LoadMode::Owned] {
        let wn = WordNet::load_with_mode(tempdir.path(), mode).expect("load dict");
        assert_eq!(wn.lemma_count_for(Pos::Noun), 3);
        assert_eq!(wn.lemma_count(), 4);
        assert!(wn.lemma_exists(Pos::Noun, "network"));
        assert!(wn.lemma_exists(Pos::Verb, "run"));
        assert!(!wn.lemma_exists(Pos::Noun, "run"));
    }
}

#[test]
fn missing_index_file_is_an_error() {
    let tempdir = tempfile::tempdir().unwrap();
    write_dict(tempdir.path());
    fs::remove_file(tempdir.path().join("index.adv")).unwrap();

    let err = WordNet::load(tempdir.path()).err().expect("load should fail");
    assert!(err.to_string().contains("index.adv"));
}
