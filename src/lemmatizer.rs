use wordnet_db::WordNet;
use wordnet_morphy::Morphy;
use wordnet_types::Pos;

/// Noun-default WordNet lemmatizer.
pub struct Lemmatizer {
    wordnet: WordNet,
    morphy: Morphy,
}

impl Lemmatizer {
    pub fn new(wordnet: WordNet, morphy: Morphy) -> Self {
        Self { wordnet, morphy }
    }

    /// Base form of `word` read as a noun.
    pub fn lemmatize(&self, word: &str) -> String {
        self.lemmatize_as(word, Pos::Noun)
    }

    /// Shortest existing base form (first wins on ties), or `word` itself
    /// when WordNet knows none.
    pub fn lemmatize_as(&self, word: &str, pos: Pos) -> String {
        let candidates = self
            .morphy
            .lemmas_for(pos, word, |p, lemma| self.wordnet.lemma_exists(p, lemma));
        candidates
            .iter()
            .min_by_key(|c| c.lemma.len())
            .map(|c| c.lemma.to_string())
            .unwrap_or_else(|| word.to_string())
    }

    pub fn wordnet(&self) -> &WordNet {
        &self.wordnet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lemmatizer() -> Lemmatizer {
        let wordnet = WordNet::from_lemmas([
            (Pos::Noun, "network"),
            (Pos::Noun, "data"),
            (Pos::Noun, "datum"),
            (Pos::Noun, "class"),
            (Pos::Noun, "child"),
            (Pos::Noun, "gas"),
            (Pos::Noun, "ga"),
            (Pos::Verb, "learn"),
        ]);
        let morphy = Morphy::default()
            .with_exceptions(Pos::Noun, [("data", &["datum"][..]), ("children", &["child"][..])]);
        Lemmatizer::new(wordnet, morphy)
    }

    #[test]
    fn plural_nouns_reduce_to_base_form() {
        let lem = lemmatizer();
        assert_eq!(lem.lemmatize("networks"), "network");
        assert_eq!(lem.lemmatize("classes"), "class");
        assert_eq!(lem.lemmatize("children"), "child");
    }

    #[test]
    fn shortest_candidate_wins() {
        let lem = lemmatizer();
        assert_eq!(lem.lemmatize("data"), "data");
        assert_eq!(lem.lemmatize("gas"), "ga");
    }

    #[test]
    fn doubled_plural_needs_a_second_rule_round() {
        let lem = lemmatizer();
        assert_eq!(lem.lemmatize("gasses"), "gas");
    }

    #[test]
    fn unknown_and_capitalised_forms_pass_through() {
        let lem = lemmatizer();
        assert_eq!(lem.lemmatize("transformers"), "transformers");
        assert_eq!(lem.lemmatize("Networks"), "Networks");
        assert_eq!(lem.lemmatize("learning"), "learning");
        assert_eq!(lem.lemmatize_as("learning", Pos::Verb), "learn");
    }
}
