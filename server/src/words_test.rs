use super::*;

use std::io::Write;

fn five() -> WordStore {
    WordStore::parse("a,b,c,d,e").expect("parse")
}

// =============================================================================
// parse / load
// =============================================================================

#[test]
fn parse_trims_and_skips_empty_entries() {
    let store = WordStore::parse(" apple , banana,,cherry \n\n date,\n").expect("parse");
    assert_eq!(&*store.words, ["apple", "banana", "cherry", "date"]);
}

#[test]
fn parse_keeps_duplicates_in_order() {
    let store = WordStore::parse("to,be,or\nnot,to,be").expect("parse");
    assert_eq!(&*store.words, ["to", "be", "or", "not", "to", "be"]);
}

#[test]
fn parse_empty_text_gives_empty_store() {
    let store = WordStore::parse("").expect("parse");
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
}

#[test]
fn parse_rejects_sentinel_word() {
    let err = WordStore::parse("a,b,EOF,c").expect_err("reserved");
    assert!(matches!(err, WordsError::ReservedWord { index: 2 }));
}

#[test]
fn parse_rejects_overlong_word() {
    let longest = "x".repeat(pages::MAX_WORD_LEN);
    let store = WordStore::parse(&format!("a,{longest}")).expect("at limit");
    assert_eq!(store.len(), 2);

    let text = format!("a,b,{longest}y");
    let err = WordStore::parse(&text).expect_err("too long");
    assert!(matches!(
        err,
        WordsError::WordTooLong { index: 2, len } if len == pages::MAX_WORD_LEN + 1
    ));
}

#[test]
fn load_reads_word_file() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    writeln!(file, "cat,dog,cat").expect("write");
    writeln!(file, "bird").expect("write");

    let store = WordStore::load(file.path()).expect("load");
    assert_eq!(store.len(), 4);
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = WordStore::load(dir.path().join("words.txt")).expect_err("missing");
    assert!(matches!(err, WordsError::Read { .. }));
    assert!(err.to_string().contains("words.txt"));
}

// =============================================================================
// page
// =============================================================================

#[test]
fn page_inside_list_is_not_exhausted() {
    let store = five();
    let page = store.page(PageRequest::new(0, 2));
    assert_eq!(page.words, ["a", "b"]);
    assert!(!page.exhausted);
    assert_eq!(page.encode(), "a,b\n");
}

#[test]
fn page_reaching_end_carries_sentinel() {
    let store = five();
    let page = store.page(PageRequest::new(4, 2));
    assert_eq!(page.words, ["e"]);
    assert!(page.exhausted);
    assert_eq!(page.encode(), "e,EOF\n");
}

#[test]
fn page_at_end_is_sentinel_only() {
    let store = five();
    let page = store.page(PageRequest::new(5, 2));
    assert!(page.words.is_empty());
    assert_eq!(page.encode(), "EOF\n");
}

#[test]
fn page_beyond_end_is_sentinel_only() {
    let store = five();
    assert_eq!(store.page(PageRequest::new(99, 1)).encode(), "EOF\n");
}

#[test]
fn empty_store_answers_sentinel() {
    let store = WordStore::parse("").expect("parse");
    assert_eq!(store.page(PageRequest::new(0, 3)).encode(), "EOF\n");
}

#[test]
fn repeated_request_is_identical() {
    let store = five();
    let request = PageRequest::new(1, 3);
    assert_eq!(store.page(request), store.page(request));
}

#[test]
fn walking_pages_reproduces_list() {
    let store = WordStore::parse("q,w,e,r,t,y,u,i,o,p,a,s").expect("parse");
    for k in 1..=store.len() {
        let mut seen = Vec::new();
        let mut offset = 0;
        loop {
            let page = store.page(PageRequest::new(offset, k));
            seen.extend(page.words.iter().cloned());
            if page.exhausted {
                break;
            }
            offset += k;
        }
        assert_eq!(seen, &*store.words, "k={k}");
    }
}
