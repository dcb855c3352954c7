#![cfg(feature = "serde")]

extern crate rand;
extern crate succinct_trie;

use rand::{Rng, SeedableRng, StdRng};
use succinct_trie::{
    Alphabet, Artifact, DirectoryConfig, Error, FrozenTrie, Stream, Trie, TrieConfig, FID,
};

const WORDS: &[&str] = &["apple", "orange", "alphapha", "lamp", "hello", "jello", "quiz"];

fn build(words: &[&str]) -> Trie {
    let mut trie = Trie::new();
    for word in words {
        trie.insert(word).unwrap();
    }
    trie
}

fn random_words(rng: &mut StdRng, n: usize) -> Vec<String> {
    let alphabet: Vec<char> = "abcdefghijklmnopqrstuvwxyz ".chars().collect();
    let mut words: Vec<String> = (0..n)
        .map(|_| {
            let len = rng.gen_range(1, 16);
            (0..len)
                .map(|_| alphabet[rng.gen_range(0, alphabet.len())])
                .collect()
        })
        .collect();
    words.sort();
    words.dedup();
    words
}

#[test]
fn seven_words_through_packed_strings() {
    let trie = build(WORDS);
    assert_eq!(trie.node_count(), 37);

    let data = trie.encode().get_data();
    let config = TrieConfig::default();
    let directory = trie.freeze(config.directory).unwrap().directory().get_data();
    let ft = FrozenTrie::from_data(&data, &directory, trie.node_count(), &config).unwrap();

    for word in WORDS {
        assert!(ft.lookup(word));
    }
    for word in ["alp", "app", "zzz", "appl", "applea", "", "hell", "jelly"] {
        assert!(!ft.lookup(word), "{word}");
    }
    assert_eq!(ft.suggest("a", 10).unwrap(), ["apple", "alphapha"]);
}

#[test]
fn structure_matches_node_count() {
    let ft = build(WORDS).freeze(DirectoryConfig::default()).unwrap();
    let rd = ft.directory();
    assert_eq!(rd.total_bits(), 2 * 37 + 1);
    // every node but the root is one child edge, the root closes its own group
    assert_eq!(rd.ones(Stream::LastSibling), rd.ones(Stream::HasChildren));
    assert_eq!(rd.stream(Stream::LastSibling).len(), 37);
    assert_eq!(rd.stream(Stream::HasChildren).len(), 38);
}

#[test]
fn large_random_list() {
    let mut rng: StdRng = SeedableRng::from_seed([0; 32]);
    let words = random_words(&mut rng, 20_000);
    let probes = random_words(&mut rng, 5_000);

    let mut trie = Trie::new();
    for word in &words {
        trie.insert(word).unwrap();
    }
    for config in [DirectoryConfig::default(), DirectoryConfig::new(64, 8).unwrap()] {
        let ft = trie.freeze(config).unwrap();
        for word in &words {
            assert!(ft.lookup(word), "{word}");
        }
        for probe in &probes {
            assert_eq!(ft.lookup(probe), words.binary_search(probe).is_ok(), "{probe:?}");
        }
    }
}

#[test]
fn build_is_deterministic() {
    let mut forward = Trie::new();
    let mut backward = Trie::new();
    for word in WORDS {
        forward.insert(word).unwrap();
    }
    for word in WORDS.iter().rev() {
        backward.insert(word).unwrap();
    }
    let config = DirectoryConfig::default();
    let a = Artifact::build(&forward, &config).unwrap().to_json().unwrap();
    let b = Artifact::build(&backward, &config).unwrap().to_json().unwrap();
    assert_eq!(a, b);
}

#[test]
fn artifact_file_round_trip() {
    let config = TrieConfig::default();
    let artifact = Artifact::build(&build(WORDS), &config.directory).unwrap();

    let mut file = Vec::new();
    artifact.write_to(&mut file).unwrap();
    let json = String::from_utf8(file).unwrap();
    assert!(json.starts_with(r#"{"nodeCount":37,"#));

    let ft = Artifact::from_json(&json).unwrap().freeze(&config).unwrap();
    for word in WORDS {
        assert!(ft.lookup(word));
    }
}

#[test]
fn malformed_artifacts() {
    let config = TrieConfig::default();
    let good = Artifact::build(&build(WORDS), &config.directory).unwrap();

    let mut wrong_count = good.clone();
    wrong_count.node_count = 40;
    assert!(matches!(wrong_count.freeze(&config), Err(Error::Malformed(_))));

    let mut short_trie = good.clone();
    short_trie.trie.pop();
    assert!(matches!(short_trie.freeze(&config), Err(Error::Malformed(_))));

    let mut bad_symbol = good.clone();
    bad_symbol.directory.push('=');
    assert!(matches!(bad_symbol.freeze(&config), Err(Error::Malformed(_))));

    assert!(matches!(
        Artifact::from_json(r#"{"nodeCount":37,"trie":""}"#),
        Err(Error::Malformed(_))
    ));
}

#[test]
fn custom_alphabet() {
    let chars = "abcdeghijklmnoprstuvyāīūṁṃŋṇṅñṭḍḷ…'’° -";
    let mut trie = Trie::with_alphabet(Alphabet::new(chars).unwrap());
    for word in ["dhammaṃ", "buddha", "saṅgha", "sīla"] {
        trie.insert(word).unwrap();
    }
    assert!(matches!(trie.insert("fox"), Err(Error::UnknownCharacter('f'))));

    let config = TrieConfig {
        alphabet: chars.to_string(),
        ..TrieConfig::default()
    };
    let artifact = Artifact::build(&trie, &config.directory).unwrap();
    let ft = artifact.freeze(&config).unwrap();
    assert!(ft.lookup("saṅgha"));
    assert!(ft.lookup("sīla"));
    assert!(!ft.lookup("sīl"));
    assert!(!ft.lookup("fox"));
    assert_eq!(ft.suggest("s", 5).unwrap(), ["sīla", "saṅgha"]);
}
