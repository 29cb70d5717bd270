/// Greedy word packing: words are appended to the open chunk until the next
/// one would push it past `max_chunk_size` characters.
///
/// `current_size` counts each admitted word plus one separator, so the bound
/// is approximate by one character. A chunk with no words always admits the
/// next word, which means a word longer than the limit becomes a chunk of
/// its own and a limit of zero yields one chunk per word.
pub fn chunk(text: &str, max_chunk_size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_size = 0usize;

    for word in text.split_whitespace() {
        let len = word.chars().count();
        if !current.is_empty() && current_size + len > max_chunk_size {
            chunks.push(current.join(" "));
            current.clear();
            current.push(word);
            current_size = len;
        } else {
            current.push(word);
            current_size += len + 1;
        }
    }

    if !current.is_empty() {
        chunks.push(current.join(" "));
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_until_limit() {
        // "aaa bbb" accumulates 8 before "ccc"; 8 + 3 > 10 closes the chunk.
        let chunks = chunk("aaa bbb ccc", 10);
        assert_eq!(chunks, vec!["aaa bbb", "ccc"]);
    }

    #[test]
    fn counts_chars_not_bytes() {
        let chunks = chunk("ééé ééé", 7);
        assert_eq!(chunks, vec!["ééé ééé"]);
    }
}
