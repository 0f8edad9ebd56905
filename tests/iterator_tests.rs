use revlist::{CursorState, RevList, RevListError, Sequence};

#[test]
fn test_iterator_empty_list() {
    let list: RevList<i32> = RevList::new();

    let mut iter = list.iter();
    assert!(iter.next().is_none());
    assert_eq!(iter.size_hint(), (0, Some(0)));
}

#[test]
fn test_iterator_populated_list() {
    let list = RevList::from(vec!["hello", "world", "test"]);

    let mut iter = list.iter();
    assert_eq!(iter.next(), Some(Ok("hello")));
    assert_eq!(iter.next(), Some(Ok("world")));
    assert_eq!(iter.next(), Some(Ok("test")));
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next(), None);
}

#[test]
fn test_iterator_collects_into_result() {
    let list: RevList<i32> = (1..=4).collect();

    let collected: Result<Vec<_>, _> = list.iter().collect();
    assert_eq!(collected.unwrap(), vec![1, 2, 3, 4]);

    let mut total = 0;
    for item in &list {
        total += item.unwrap();
    }
    assert_eq!(total, 10);
}

#[test]
fn test_iterator_reports_change_once() {
    let list: RevList<i32> = (0..3).collect();

    let mut iter = list.iter();
    assert_eq!(iter.next(), Some(Ok(0)));
    list.remove_at(2).unwrap();

    assert!(matches!(
        iter.next(),
        Some(Err(RevListError::ConcurrentStructuralChange { .. }))
    ));
    assert_eq!(iter.next(), None);
}

#[test]
fn test_iterator_tolerates_set() {
    let list: RevList<i32> = (0..3).collect();

    let mut iter = list.iter();
    assert_eq!(iter.next(), Some(Ok(0)));
    list.set(1, 10).unwrap();
    assert_eq!(iter.next(), Some(Ok(10)));
    assert_eq!(iter.next(), Some(Ok(2)));
}

#[test]
fn test_cursor_forward_and_backward() {
    let list = RevList::from(vec!['a', 'b', 'c']);
    let mut cursor = list.cursor();

    assert!(!cursor.has_previous());
    assert_eq!(cursor.previous().unwrap(), None);
    assert_eq!(cursor.next().unwrap(), Some('a'));
    assert_eq!(cursor.next().unwrap(), Some('b'));
    assert_eq!(cursor.next_index(), 2);
    assert_eq!(cursor.previous_index(), Some(1));

    assert_eq!(cursor.previous().unwrap(), Some('b'));
    assert_eq!(cursor.previous().unwrap(), Some('a'));
    assert_eq!(cursor.previous_index(), None);
    assert!(cursor.has_next());
}

#[test]
fn test_cursor_at_index() {
    let list: RevList<i32> = (0..5).collect();

    let mut cursor = list.cursor_at(5).unwrap();
    assert!(!cursor.has_next());
    assert_eq!(cursor.previous().unwrap(), Some(4));

    let mut cursor = list.cursor_at(2).unwrap();
    assert_eq!(cursor.next().unwrap(), Some(2));

    assert!(matches!(
        list.cursor_at(6),
        Err(RevListError::IndexOutOfRange { index: 6, length: 5 })
    ));
}

#[test]
fn test_cursor_states() {
    let list: RevList<i32> = (0..2).collect();
    let mut cursor = list.cursor();

    assert_eq!(cursor.state(), CursorState::Fresh);
    cursor.next().unwrap();
    assert_eq!(cursor.state(), CursorState::Advancing);
    cursor.next().unwrap();
    assert_eq!(cursor.state(), CursorState::Exhausted);

    list.append(2).unwrap();
    assert!(cursor.next().is_err());
    assert_eq!(cursor.state(), CursorState::Invalidated);
}

#[test]
fn test_cursor_has_next_does_not_check_revision() {
    let list: RevList<i32> = (0..2).collect();
    let cursor = list.cursor();

    list.append(2).unwrap();
    assert!(cursor.has_next());
}

#[test]
fn test_cursor_fails_after_direct_insert() {
    let list: RevList<i32> = (0..3).collect();
    let mut cursor = list.cursor();
    cursor.next().unwrap();

    list.insert(0, 99).unwrap();

    assert_eq!(
        cursor.next(),
        Err(RevListError::ConcurrentStructuralChange {
            expected: 0,
            actual: 1
        })
    );
}

#[test]
fn test_cursor_failure_is_terminal() {
    let list: RevList<i32> = (0..3).collect();
    let mut cursor = list.cursor();

    list.append(3).unwrap();
    assert!(cursor.next().is_err());

    // Still failing even though nothing changed since
    assert!(cursor.next().is_err());
    assert!(cursor.previous().is_err());
    assert!(cursor.add(7).is_err());
    assert_eq!(list.len(), 4);
}

#[test]
fn test_cursor_remove_forward() {
    let list: RevList<i32> = (0..6).collect();
    let mut cursor = list.cursor();

    while let Some(value) = cursor.next().unwrap() {
        if value % 2 == 0 {
            assert_eq!(cursor.remove().unwrap(), value);
        }
    }

    assert_eq!(list.to_vec().unwrap(), vec![1, 3, 5]);
    assert_eq!(list.revision(), 3);
}

#[test]
fn test_cursor_remove_backward() {
    let list: RevList<i32> = (0..4).collect();
    let mut cursor = list.cursor_at(4).unwrap();

    assert_eq!(cursor.previous().unwrap(), Some(3));
    cursor.remove().unwrap();
    assert_eq!(cursor.next_index(), 3);
    assert_eq!(cursor.previous().unwrap(), Some(2));
    assert_eq!(list.to_vec().unwrap(), vec![0, 1, 2]);
}

#[test]
fn test_cursor_remove_requires_returned_element() {
    let list: RevList<i32> = (0..3).collect();
    let mut cursor = list.cursor();

    assert!(matches!(
        cursor.remove(),
        Err(RevListError::IllegalState { .. })
    ));

    cursor.next().unwrap();
    cursor.remove().unwrap();
    assert!(matches!(
        cursor.remove(),
        Err(RevListError::IllegalState { .. })
    ));
}

#[test]
fn test_cursor_set() {
    let list: RevList<i32> = (0..3).collect();
    let mut cursor = list.cursor();

    assert!(matches!(
        cursor.set(5),
        Err(RevListError::IllegalState { .. })
    ));

    cursor.next().unwrap();
    cursor.next().unwrap();
    assert_eq!(cursor.set(10).unwrap(), 1);
    // Setting twice in a row is allowed
    assert_eq!(cursor.set(11).unwrap(), 10);

    assert_eq!(cursor.next().unwrap(), Some(2));
    assert_eq!(list.to_vec().unwrap(), vec![0, 11, 2]);
    assert_eq!(list.revision(), 0);
}

#[test]
fn test_cursor_add() {
    let list = RevList::from(vec!['a', 'c']);
    let mut cursor = list.cursor();

    cursor.next().unwrap();
    cursor.add('b').unwrap();

    assert_eq!(cursor.next().unwrap(), Some('c'));
    assert_eq!(list.to_vec().unwrap(), vec!['a', 'b', 'c']);

    // add clears the last returned element
    cursor.add('d').unwrap();
    assert!(cursor.set('x').is_err());
    assert_eq!(cursor.previous().unwrap(), Some('d'));
}

#[test]
fn test_cursor_add_into_empty_list() {
    let list = RevList::new();
    let mut cursor = list.cursor();

    cursor.add(1).unwrap();
    cursor.add(2).unwrap();
    assert_eq!(cursor.next().unwrap(), None);
    assert_eq!(list.to_vec().unwrap(), vec![1, 2]);
}

#[test]
fn test_for_each_remaining() {
    let list: RevList<i32> = (0..5).collect();
    let mut cursor = list.cursor();
    cursor.next().unwrap();

    let mut seen = Vec::new();
    cursor.for_each_remaining(|x| seen.push(x)).unwrap();

    assert_eq!(seen, vec![1, 2, 3, 4]);
    assert_eq!(cursor.state(), CursorState::Exhausted);
}

#[test]
fn test_two_cursors_one_mutates() {
    let list: RevList<i32> = (0..4).collect();
    let mut writer = list.cursor();
    let mut reader = list.cursor();

    writer.next().unwrap();
    writer.remove().unwrap();

    // The writer is resynchronized, the reader is not
    assert_eq!(writer.next().unwrap(), Some(1));
    assert!(reader.next().is_err());
}
