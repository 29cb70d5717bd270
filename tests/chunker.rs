use doc_assistant::chunker::chunk;

fn words(s: &str) -> Vec<&str> {
    s.split_whitespace().collect()
}

#[test]
fn empty_input_yields_no_chunks() {
    assert!(chunk("", 10).is_empty());
    assert!(chunk("", 0).is_empty());
    assert!(chunk("  \n\t ", 10).is_empty());
}

#[test]
fn preserves_word_sequence() {
    let text = "Lorem ipsum dolor  sit amet,\nconsectetur adipiscing elit,\tsed do eiusmod tempor \
                incididunt ut labore et dolore magna aliqua.";
    for max in [1, 5, 12, 20, 40, 1000] {
        let chunks = chunk(text, max);
        let rebuilt = chunks.join(" ");
        assert_eq!(words(&rebuilt), words(text), "max={max}");
    }
}

#[test]
fn chunks_respect_size_bound() {
    let text = (0..200).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");
    let max = 25;
    for c in chunk(&text, max) {
        let single_word = c.split_whitespace().count() == 1;
        assert!(single_word || c.chars().count() <= max + 1, "chunk too long: {c:?}");
    }
}

#[test]
fn oversized_word_is_its_own_chunk() {
    let chunks = chunk("a supercalifragilistic b", 5);
    assert_eq!(chunks, vec!["a", "supercalifragilistic", "b"]);
}

#[test]
fn zero_limit_gives_one_chunk_per_word() {
    assert_eq!(chunk("one two three", 0), vec!["one", "two", "three"]);
}

#[test]
fn collapses_whitespace_inside_chunks() {
    assert_eq!(chunk("a\n\nb\tc", 100), vec!["a b c"]);
}
