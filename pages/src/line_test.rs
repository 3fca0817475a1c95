use super::*;

use tokio::io::duplex;

#[tokio::test]
async fn reads_lines_split_across_writes() {
    let (mut tx, rx) = duplex(64);
    let mut reader = LineReader::new(rx, 1024);

    tx.write_all(b"a,b").await.expect("write");
    tx.write_all(b",c\nd").await.expect("write");
    tx.write_all(b",EOF\n").await.expect("write");
    drop(tx);

    let first = reader.read_line().await.expect("read").expect("line");
    assert_eq!(first, Line { text: "a,b,c".to_owned(), terminated: true });
    let second = reader.read_line().await.expect("read").expect("line");
    assert_eq!(second.text, "d,EOF");
    assert!(reader.read_line().await.expect("read").is_none());
}

#[tokio::test]
async fn reads_several_lines_from_one_write() {
    let (mut tx, rx) = duplex(64);
    let mut reader = LineReader::new(rx, 1024);

    tx.write_all(b"0,2\n2,2\n4,2\n").await.expect("write");
    drop(tx);

    let mut texts = Vec::new();
    while let Some(line) = reader.read_line().await.expect("read") {
        texts.push(line.text);
    }
    assert_eq!(texts, ["0,2", "2,2", "4,2"]);
}

#[tokio::test]
async fn closed_stream_yields_none() {
    let (tx, rx) = duplex(64);
    drop(tx);

    let mut reader = LineReader::new(rx, 1024);
    assert!(reader.read_line().await.expect("read").is_none());
}

#[tokio::test]
async fn partial_line_before_close_is_unterminated() {
    let (mut tx, rx) = duplex(64);
    tx.write_all(b"4,2").await.expect("write");
    drop(tx);

    let mut reader = LineReader::new(rx, 1024);
    let line = reader.read_line().await.expect("read").expect("line");
    assert_eq!(line, Line { text: "4,2".to_owned(), terminated: false });
    assert!(reader.read_line().await.expect("read").is_none());
}

#[tokio::test]
async fn line_at_limit_is_accepted() {
    let (mut tx, rx) = duplex(64);
    let mut reader = LineReader::new(rx, 8);

    tx.write_all(b"1234567\n").await.expect("write");
    drop(tx);

    let line = reader.read_line().await.expect("read").expect("line");
    assert_eq!(line.text, "1234567");
}

#[tokio::test]
async fn line_over_limit_is_rejected() {
    let (mut tx, rx) = duplex(64);
    let mut reader = LineReader::new(rx, 8);

    tx.write_all(b"123456789\n").await.expect("write");
    drop(tx);

    let err = reader.read_line().await.expect_err("too long");
    assert!(matches!(err, CodecError::LineTooLong { limit: 8 }));
}

#[tokio::test]
async fn invalid_utf8_is_rejected() {
    let (mut tx, rx) = duplex(64);
    tx.write_all(&[0xff, 0xfe, b'\n']).await.expect("write");
    drop(tx);

    let mut reader = LineReader::new(rx, 1024);
    let err = reader.read_line().await.expect_err("utf8");
    assert!(matches!(err, CodecError::InvalidUtf8));
}

#[tokio::test(start_paused = true)]
async fn silent_peer_times_out() {
    let (_tx, rx) = duplex(64);
    let mut reader = LineReader::new(rx, 1024).with_timeout(Some(Duration::from_secs(2)));

    let err = reader.read_line().await.expect_err("timeout");
    assert!(matches!(err, CodecError::Timeout(limit) if limit == Duration::from_secs(2)));
}

#[tokio::test]
async fn write_line_delivers_exact_bytes() {
    let (mut tx, rx) = duplex(64);
    write_line(&mut tx, "EOF\n").await.expect("write");
    drop(tx);

    let mut reader = LineReader::new(rx, 1024);
    let line = reader.read_line().await.expect("read").expect("line");
    assert_eq!(line, Line { text: "EOF".to_owned(), terminated: true });
}
