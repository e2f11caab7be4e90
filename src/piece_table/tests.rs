use crate::piece_table::PieceTable;

fn text(table: &PieceTable) -> String {
    String::from_utf8(table.to_bytes()).unwrap()
}

#[test]
fn test_empty_table() {
    let table = PieceTable::new();
    assert_eq!(table.len(), 0);
    assert!(table.is_empty());
    assert_eq!(text(&table), "");
    assert_eq!(table.get_line_count(), 0);
    assert_eq!(table.get_char_at(0), None);
    assert!(table.get_line(1).is_empty());
    assert_eq!(table.get_index_for_line(3), 0);
}

#[test]
fn test_initial_content() {
    let table = PieceTable::from("Hello, world!");
    assert_eq!(table.len(), 13);
    assert_eq!(text(&table), "Hello, world!");
    assert_eq!(table.pieces().len(), 1);
}

#[test]
fn test_line_endings_normalized() {
    let table = PieceTable::from("a\r\nb\rc");
    assert_eq!(text(&table), "a\nb\nc");
    assert_eq!(table.get_line_count(), 3);

    let mut table = PieceTable::new();
    table.insert(0, "x\r\ny");
    assert_eq!(text(&table), "x\ny");
}

#[test]
fn test_insertions() {
    let mut table = PieceTable::from("Hello world!");

    table.insert(0, "Awesome ");
    assert_eq!(table.len(), 20);
    assert_eq!(text(&table), "Awesome Hello world!");

    table.insert(8, "new ");
    assert_eq!(table.len(), 24);
    assert_eq!(text(&table), "Awesome new Hello world!");

    table.insert(24, " It's a beautiful day.");
    assert_eq!(table.len(), 46);
    assert_eq!(text(&table), "Awesome new Hello world! It's a beautiful day.");

    table.insert(8, "");
    assert_eq!(table.len(), 46);
    assert_eq!(text(&table), "Awesome new Hello world! It's a beautiful day.");
    table.check_invariants().unwrap();
}

#[test]
fn test_insert_past_end_appends() {
    let mut table = PieceTable::from("abc");
    table.insert(1000, "def");
    assert_eq!(text(&table), "abcdef");
}

#[test]
fn test_removals() {
    let mut table = PieceTable::from("Hello, beautiful world!");

    table.remove(0, 7);
    assert_eq!(text(&table), "beautiful world!");

    table.remove(0, 10);
    assert_eq!(text(&table), "world!");

    table.remove(5, 1);
    assert_eq!(text(&table), "world");

    table.remove(0, 5);
    assert_eq!(table.len(), 0);
    assert_eq!(text(&table), "");

    let mut table = PieceTable::from("No change");
    table.remove(3, 0);
    assert_eq!(text(&table), "No change");
}

#[test]
fn test_remove_out_of_range() {
    let mut table = PieceTable::from("abcdef");

    table.remove(7, 3);
    assert_eq!(text(&table), "abcdef");

    // clamped to the document end
    table.remove(4, 100);
    assert_eq!(text(&table), "abcd");

    table.remove(4, 1);
    assert_eq!(text(&table), "abcd");
}

#[test]
fn test_mixed_edits() {
    let mut table = PieceTable::from("This is a test.");
    table.remove(8, 1);
    table.insert(8, "the");
    assert_eq!(text(&table), "This is the test.");

    table.insert(table.len(), " Done");
    table.remove(0, 5);
    assert_eq!(text(&table), "is the test. Done");
    table.check_invariants().unwrap();
}

#[test]
fn test_insert_then_remove_restores() {
    let mut table = PieceTable::from("one\ntwo\nthree");
    let before = table.to_bytes();

    table.insert(5, "XX\nYY");
    table.remove(5, 5);

    assert_eq!(table.to_bytes(), before);
    assert_eq!(table.len(), before.len());
    assert_eq!(table.get_line_count(), 3);
}

#[test]
fn test_get_char_at() {
    let mut table = PieceTable::from("hello");
    table.insert(2, "XY");

    let expected = b"heXYllo";
    for (i, &b) in expected.iter().enumerate() {
        assert_eq!(table.get_char_at(i), Some(b));
    }
    assert_eq!(table.get_char_at(expected.len()), None);
}

#[test]
fn test_index_for_line() {
    let table = PieceTable::from("Line 1\nLine 2\nLine 3");
    assert_eq!(table.get_index_for_line(0), 0);
    assert_eq!(table.get_index_for_line(1), 0);
    assert_eq!(table.get_index_for_line(2), 7);
    assert_eq!(table.get_index_for_line(3), 14);
    assert_eq!(table.get_index_for_line(4), 20);
}

#[test]
fn test_index_for_line_across_pieces() {
    let mut table = PieceTable::from("aa\nbb");
    table.insert(5, "\ncc\ndd");
    table.insert(0, "zz");
    // "zzaa\nbb\ncc\ndd"
    assert_eq!(table.get_index_for_line(2), 5);
    assert_eq!(table.get_index_for_line(3), 8);
    assert_eq!(table.get_index_for_line(4), 11);
    assert_eq!(table.get_index_for_line(5), table.len());
}

#[test]
fn test_line_starts_at_piece_boundary() {
    let mut table = PieceTable::from("first\n");
    table.insert(6, "second");
    // the newline ending line 1 is the last byte of the first piece
    assert_eq!(table.get_index_for_line(2), 6);
    assert_eq!(table.get_line(2), b"second");
}

#[test]
fn test_line_count_policy() {
    assert_eq!(PieceTable::from("").get_line_count(), 0);
    assert_eq!(PieceTable::from("abc").get_line_count(), 1);
    assert_eq!(PieceTable::from("abc\n").get_line_count(), 1);
    assert_eq!(PieceTable::from("abc\ndef").get_line_count(), 2);
    assert_eq!(PieceTable::from("\n").get_line_count(), 1);
    assert_eq!(PieceTable::from("\n\n").get_line_count(), 2);
}

#[test]
fn test_get_line() {
    let table = PieceTable::from("line1\nline2\n");
    assert_eq!(table.get_line_count(), 2);
    assert_eq!(table.get_line(1), b"line1");
    assert_eq!(table.get_line(2), b"line2");
    assert!(table.get_line(0).is_empty());
    assert!(table.get_line(3).is_empty());
}

#[test]
fn test_get_line_spanning_pieces() {
    let mut table = PieceTable::from("start\nend");
    table.insert(3, "-mid-");
    table.insert(0, ">>");
    // ">>sta-mid-rt\nend"
    assert_eq!(table.get_line(1), b">>sta-mid-rt");
    assert_eq!(table.get_line(2), b"end");
}

#[test]
fn test_get_line_empty_lines() {
    let table = PieceTable::from("a\n\nb");
    assert_eq!(table.get_line_count(), 3);
    assert_eq!(table.get_line(1), b"a");
    assert!(table.get_line(2).is_empty());
    assert_eq!(table.get_line(3), b"b");
}

#[test]
fn test_get_line_length() {
    let table = PieceTable::from("abc\n\nhello\nxy");
    assert_eq!(table.get_line_length(1), 3);
    assert_eq!(table.get_line_length(2), 0);
    assert_eq!(table.get_line_length(3), 5);
    assert_eq!(table.get_line_length(4), 2);
    assert_eq!(table.get_line_length(0), 0);
    assert_eq!(table.get_line_length(5), 0);

    let table = PieceTable::from("abc\n");
    assert_eq!(table.get_line_length(1), 3);
}

#[test]
fn test_line_for_index() {
    let mut table = PieceTable::from("ab\ncd");
    table.insert(5, "\n");
    // "ab\ncd\n"
    assert_eq!(table.get_line_for_index(0), 1);
    assert_eq!(table.get_line_for_index(2), 1);
    assert_eq!(table.get_line_for_index(3), 2);
    assert_eq!(table.get_line_for_index(5), 2);
    assert_eq!(table.get_line_for_index(6), 3);
    assert_eq!(table.get_line_for_index(100), 3);

    assert_eq!(PieceTable::new().get_line_for_index(0), 1);
}

#[test]
fn test_clone_is_isolated() {
    let original = PieceTable::from("shared text");
    let mut copy = original.clone();

    copy.insert(0, "changed ");
    copy.remove(8, 6);

    assert_eq!(text(&original), "shared text");
    assert_eq!(text(&copy), "changed  text");
}

#[test]
fn test_take_leaves_empty_table() {
    let mut source = PieceTable::from("moved");
    let moved = std::mem::take(&mut source);

    assert_eq!(text(&moved), "moved");
    assert!(source.is_empty());
    assert_eq!(text(&source), "");
}

#[test]
fn test_clear() {
    let mut table = PieceTable::from("abc");
    table.insert(3, "def");
    table.clear();

    assert!(table.is_empty());
    assert_eq!(table.buffers().original_len(), 0);
    assert_eq!(table.buffers().add_len(), 0);

    table.insert(0, "again");
    assert_eq!(text(&table), "again");
}

#[test]
fn test_add_buffer_only_grows() {
    let mut table = PieceTable::from("abc");
    table.insert(1, "12");
    table.remove(0, 5);
    assert_eq!(table.buffers().add_len(), 2);
    table.insert(0, "z");
    assert_eq!(table.buffers().add_len(), 3);
}

#[test]
fn test_seeded_tables_match() {
    let edit = |table: &mut PieceTable| {
        for i in 0..50 {
            table.insert(i * 3 % (table.len() + 1), "ab\n");
        }
        table.remove(10, 20);
    };

    let mut a = PieceTable::with_seed(5);
    let mut b = PieceTable::with_seed(5);
    edit(&mut a);
    edit(&mut b);

    assert_eq!(a.pieces(), b.pieces());
    assert_eq!(a.to_bytes(), b.to_bytes());
}

#[test]
fn test_display() {
    let table = PieceTable::from("shown");
    assert_eq!(table.to_string(), "shown");
}

#[test]
fn test_invariants_catch_piece_past_buffer() {
    let mut table = PieceTable::from("abc");
    table.insert(3, "def");
    table.check_invariants().unwrap();

    table.buffers.clear();
    let err = table.check_invariants().unwrap_err();
    assert!(err.contains("reaches past"), "{err}");
}
