use strata::data::BucketList;

#[test]
fn dequeue_returns_none_for_an_empty_list() {
    let mut lists = BucketList::new(1, 0);
    assert_eq!(lists.dequeue(0), None);
    assert!(lists.is_empty(0));
}

#[test]
fn dequeue_unlinks_and_returns_the_first_entry() {
    let mut lists = BucketList::new(1, 1);
    lists.enqueue(0, 0);
    assert_eq!(lists.list_of(0), Some(0));
    assert_eq!(lists.dequeue(0), Some(0));
    assert_eq!(lists.list_of(0), None);
    assert!(lists.is_empty(0));
}

#[test]
fn dequeue_returns_entries_in_fifo_order() {
    let mut lists = BucketList::new(1, 2);
    lists.enqueue(0, 0);
    lists.enqueue(0, 1);
    assert_eq!(lists.dequeue(0), Some(0));
    assert_eq!(lists.dequeue(0), Some(1));
    assert_eq!(lists.dequeue(0), None);
}

#[test]
fn re_enqueue_moves_an_entry_to_the_tail() {
    let mut lists = BucketList::new(1, 2);
    lists.enqueue(0, 0);
    lists.enqueue(0, 1);
    lists.enqueue(0, 0);
    assert_eq!(lists.iter(0).collect::<Vec<_>>(), vec![1, 0]);
    assert_eq!(lists.dequeue(0), Some(1));
    assert_eq!(lists.dequeue(0), Some(0));
}

#[test]
fn enqueue_on_another_list_moves_the_entry() {
    let mut lists = BucketList::new(2, 1);
    lists.enqueue(0, 0);
    lists.enqueue(1, 0);
    assert_eq!(lists.dequeue(0), None);
    assert_eq!(lists.dequeue(1), Some(0));
}

#[test]
fn enqueue_grows_the_item_pool() {
    let mut lists = BucketList::new(1, 0);
    lists.enqueue(0, 5);
    assert_eq!(lists.dequeue(0), Some(5));
}

#[test]
fn unlink_from_the_middle_keeps_neighbors_linked() {
    let mut lists = BucketList::new(1, 3);
    for item in 0..3 {
        lists.enqueue(0, item);
    }
    lists.unlink(1);
    assert_eq!(lists.iter(0).collect::<Vec<_>>(), vec![0, 2]);
}

#[test]
fn display_renders_entries_in_order() {
    let mut lists = BucketList::new(1, 2);
    lists.enqueue(0, 0);
    lists.enqueue(0, 1);
    let rendered = lists
        .display(0, |item| format!("{{\"entry\":{}}}", item + 1))
        .to_string();
    assert_eq!(rendered, "[{\"entry\":1}, {\"entry\":2}]");
}

#[test]
fn add_list_appends_an_empty_list() {
    let mut lists = BucketList::new(2, 1);
    let added = lists.add_list();
    assert_eq!(added, 2);
    assert_eq!(lists.list_count(), 3);
    assert!(lists.is_empty(added));
    lists.enqueue(added, 0);
    assert_eq!(lists.list_of(0), Some(added));
}
