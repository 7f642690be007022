use std::env;
use std::path::PathBuf;

use paper_nouns::LanguageResources;
use wordnet_db::LoadMode;

fn resources_dir() -> Option<PathBuf> {
    env::var("NLTK_DATA").ok().map(PathBuf::from)
}

#[test]
fn loads_installed_nltk_data() {
    let Some(dir) = resources_dir() else {
        eprintln!("skipping: NLTK_DATA not set");
        return;
    };
    let resources = LanguageResources::load(&dir, LoadMode::Mmap).expect("load nltk data");

    assert!(resources.stopwords.contains("the"));
    assert!(!resources.stopwords.contains("The"));
    assert_eq!(resources.lemmatizer.lemmatize("networks"), "network");
    assert_eq!(resources.lemmatizer.lemmatize("children"), "child");

    let tagged = resources.tagger.tag(&["network", "data"]);
    assert_eq!(tagged.len(), 2);
}
