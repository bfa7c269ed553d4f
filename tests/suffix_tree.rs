//! Library-level properties of construction and search.

use fxtree::query::Searcher;
use fxtree::source::{StringSource, SymbolSource, symbols_from_str};
use fxtree::tree::{
    DEFAULT_TERMINATOR, Offset, SuffixTree, Symbol, Ukkonen, verify, verify_finished,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn build(text: &str) -> SuffixTree<StringSource> {
    Ukkonen::build(StringSource::new(text)).unwrap()
}

/// Offsets where `query` occurs in `text`, every suffix for an empty query
fn naive_search(text: &str, query: &str) -> Vec<Offset> {
    let haystack: Vec<char> = text.chars().collect();
    let needle: Vec<char> = query.chars().collect();
    if needle.is_empty() {
        return (0..=haystack.len() as Offset).collect();
    }
    haystack
        .windows(needle.len())
        .enumerate()
        .filter(|(_, w)| *w == needle.as_slice())
        .map(|(i, _)| i as Offset)
        .collect()
}

/// Symbols of the finished tree's sequence: the text and the terminator
fn terminated(text: &str) -> Vec<Symbol> {
    let mut symbols = symbols_from_str(text);
    symbols.push(DEFAULT_TERMINATOR);
    symbols
}

fn random_text(rng: &mut StdRng, alphabet: &[u8], len: usize) -> String {
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect()
}

#[test]
fn test_mississippi_round_trip() {
    let tree = build("mississippi$");
    assert_eq!(tree.search_str("i"), vec![1, 4, 7, 10]);
    assert_eq!(tree.search_str("s"), vec![2, 3, 5, 6]);
    assert_eq!(tree.search_str("ip"), vec![7]);
    assert_eq!(tree.search_str("$"), vec![11]);
    verify_finished(&tree).unwrap();
}

#[test]
fn test_every_suffix_is_found() {
    for text in ["abcabxabcd", "a$b$", "$$$"] {
        let tree = build(text);
        let full = terminated(text);
        for i in 0..full.len() {
            let found = tree.search(&full[i..]);
            assert!(found.contains(&(i as Offset)), "{text:?} suffix {i} missing: {found:?}");
        }
    }
}

#[test]
fn test_text_containing_dollar() {
    let tree = build("a$xa");
    assert_eq!(tree.search_str("a"), vec![0, 3]);
    verify_finished(&tree).unwrap();

    let tree = build("price: 5$ or 5");
    assert_eq!(tree.search_str("5"), vec![7, 13]);
    assert_eq!(tree.search_str("$"), vec![8]);

    let tree = build("a$b$");
    verify_finished(&tree).unwrap();
    assert_eq!(tree.search_str("$"), vec![1, 3]);
}

#[test]
fn test_repeated_search_is_stable() {
    let tree = build("abracadabra");
    let searcher = Searcher::new(&tree);
    let query = symbols_from_str("abra");
    let first = searcher.search(&query);
    let second = searcher.search(&query);
    assert_eq!(first, vec![0, 7]);
    assert_eq!(first, second);
}

#[test]
fn test_misses_are_empty_not_errors() {
    let tree = build("banana");
    assert!(tree.search_str("bananas").is_empty());
    assert!(tree.search_str("banana$banana").is_empty());
    assert!(tree.search_str("z").is_empty());
    assert!(tree.search(&[0x1F600]).is_empty());
    assert!(!tree.contains(&symbols_from_str("nab")));
    assert!(tree.contains(&symbols_from_str("nan")));
}

#[test]
fn test_unicode_text() {
    let tree = build("naïve naïveté");
    assert_eq!(tree.search_str("ïve"), vec![2, 8]);
    assert_eq!(tree.search_str("té"), vec![11]);
    verify_finished(&tree).unwrap();
}

#[test]
fn test_incremental_matches_batch() {
    let text = "abaababaabaab";
    let mut engine = Ukkonen::new(StringSource::new(text));
    let mut steps = 0;
    while engine.extend().unwrap() {
        steps += 1;
        verify(engine.tree()).unwrap();
    }
    assert_eq!(steps, text.len());
    engine.finish().unwrap();

    let batch = build(text);
    assert_eq!(engine.tree().node_count(), batch.node_count());
    for query in ["a", "ab", "aab", "baab", "abaab", "bab"] {
        assert_eq!(engine.tree().search_str(query), batch.search_str(query), "{query}");
    }
}

#[test]
fn test_size_hint_from_string_source() {
    let source = StringSource::new("hello");
    assert_eq!(source.size_hint(), Some(5));
}

#[test]
fn test_randomized_differential() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for round in 0..200 {
        let alphabet: &[u8] = if round % 2 == 0 { b"ab$" } else { b"acgt$" };
        let len = rng.gen_range(0..60);
        let text = random_text(&mut rng, alphabet, len);
        let tree = build(&text);

        verify_finished(&tree).unwrap_or_else(|e| panic!("{text:?}: {e}"));

        // completeness
        let full = terminated(&text);
        for i in 0..full.len() {
            assert_eq!(tree.search(&full[i..]), vec![i as Offset], "{text:?} suffix {i}");
        }

        // random substrings and random probes
        for _ in 0..20 {
            let query = if !text.is_empty() && rng.gen_range(0..2) == 0 {
                let start = rng.gen_range(0..text.len());
                let end = rng.gen_range(start..=text.len());
                text[start..end].to_string()
            } else {
                let probe_len = rng.gen_range(0..6);
                random_text(&mut rng, alphabet, probe_len)
            };
            assert_eq!(
                tree.search_str(&query),
                naive_search(&text, &query),
                "{text:?} query {query:?}"
            );
        }
    }
}

#[test]
fn test_randomized_batch_search() {
    let mut rng = StdRng::seed_from_u64(7);
    let text = random_text(&mut rng, b"acgt", 2_000);
    let tree = build(&text);

    let queries: Vec<String> = (0..200)
        .map(|_| {
            let len = rng.gen_range(1..8);
            random_text(&mut rng, b"acgt", len)
        })
        .collect();
    let encoded: Vec<Vec<u32>> = queries.iter().map(|q| symbols_from_str(q)).collect();

    let results = Searcher::new(&tree).with_parallel_threshold(16).search_many(&encoded);
    for (query, found) in queries.iter().zip(&results) {
        assert_eq!(found, &naive_search(&text, query), "{query}");
    }
}
