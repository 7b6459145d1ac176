/*!
 * Tests for translation text segmentation
 */

use srdsync::translation::chunk_text;

#[test]
fn test_chunk_text_withParagraphsUnderLimit_shouldRejoinExactly() {
    let text = "First paragraph of modest size.\n\nSecond paragraph, also small.\n\nThird one.";
    let chunks = chunk_text(text, 40);

    for chunk in &chunks {
        assert!(chunk.chars().count() <= 40, "oversized chunk: {:?}", chunk);
    }

    // Every break lands on a paragraph boundary, so the blank-line rejoin
    // reconstructs the input exactly.
    assert_eq!(chunks.join("\n\n"), text);
}

#[test]
fn test_chunk_text_withShortText_shouldReturnSingleChunk() {
    let text = "Short enough to travel whole.";
    assert_eq!(chunk_text(text, 350), vec![text.to_string()]);
}

#[test]
fn test_chunk_text_withOversizedParagraph_shouldSplitOnSentences() {
    let text = "The first sentence is here. The second sentence follows it! Is this the third? Indeed it is.";
    let chunks = chunk_text(text, 35);

    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert!(chunk.chars().count() <= 35, "oversized chunk: {:?}", chunk);
    }

    // Punctuation stays with the sentence it closes.
    assert!(chunks[0].ends_with('.'));
    let rejoined = chunks.join(" ");
    assert!(rejoined.contains("second sentence follows it!"));
    assert!(rejoined.contains("Is this the third?"));
}

#[test]
fn test_chunk_text_withSingleOversizedSentence_shouldHardTruncate() {
    let sentence = "a".repeat(500);
    let chunks = chunk_text(&sentence, 100);

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].chars().count(), 100);
}

#[test]
fn test_chunk_text_withGreedyAccumulation_shouldFillChunksBeforeStartingNew() {
    // Four 10-char paragraphs with a 24-char limit: two fit per chunk
    // (10 + 2 separator + 10).
    let text = "aaaaaaaaaa\n\nbbbbbbbbbb\n\ncccccccccc\n\ndddddddddd";
    let chunks = chunk_text(text, 24);

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0], "aaaaaaaaaa\n\nbbbbbbbbbb");
    assert_eq!(chunks[1], "cccccccccc\n\ndddddddddd");
}

#[test]
fn test_chunk_text_withEmptyText_shouldReturnNoChunks() {
    assert!(chunk_text("", 350).is_empty());
}
