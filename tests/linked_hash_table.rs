use linked_hashtable::{hash_code, LinkedHashTable, TableError, INITIAL_BUCKETS, MAX_CHAIN_LENGTH};

fn expansion_trigger() -> usize {
    (MAX_CHAIN_LENGTH * INITIAL_BUCKETS as f64) as usize + 1
}

#[test]
fn three_keys_enumerate_sorted() {
    let mut t = LinkedHashTable::new();
    t.insert("c", "3").unwrap();
    t.insert("a", "1").unwrap();
    t.insert("b", "2").unwrap();
    assert_eq!(t.key_count(), 3);
    assert_eq!(t.keys(), ["a", "b", "c"]);
    assert_eq!(t.values(), ["1", "2", "3"]);
}

#[test]
fn insert_then_search_round_trips() {
    let mut t = LinkedHashTable::new();
    t.insert("hello", "world").expect("insert ok");
    assert_eq!(t.search("hello"), Ok("world".to_string()));
    assert!(t.contains_key("hello"));
    assert_eq!(t.search("absent"), Err(TableError::NotFound));
}

#[test]
fn reinsert_overwrites_without_growing() {
    let mut t = LinkedHashTable::new();
    t.insert("k", "first").unwrap();
    t.insert("k", "second").unwrap();
    assert_eq!(t.key_count(), 1);
    assert_eq!(t.keys(), ["k"]);
    assert_eq!(t.values(), ["second"]);
}

#[test]
fn delete_removes_and_decrements() {
    let mut t = LinkedHashTable::new();
    t.insert("a", "1").unwrap();
    t.insert("b", "2").unwrap();
    assert_eq!(t.delete("a"), Ok(()));
    assert_eq!(t.key_count(), 1);
    assert_eq!(t.search("a"), Err(TableError::NotFound));
    assert_eq!(t.search("b"), Ok("2".to_string()));

    // Deleting again, or deleting something never inserted, is NotFound.
    assert_eq!(t.delete("a"), Err(TableError::NotFound));
    assert_eq!(t.delete("zzz"), Err(TableError::NotFound));
    assert_eq!(t.key_count(), 1);
}

#[test]
fn crossing_threshold_links_one_generation() {
    let mut t = LinkedHashTable::new();
    let n = expansion_trigger();
    for i in 0..n {
        t.insert(&format!("key{}", i), &format!("value{}", i)).unwrap();
    }
    assert_eq!(t.generation_count(), 2);
    let newest = t.generations().last().expect("has generations");
    assert_eq!(newest.bucket_count, 2 * INITIAL_BUCKETS);
    assert_eq!(t.bucket_count(), INITIAL_BUCKETS + 2 * INITIAL_BUCKETS);
    for i in 0..n {
        assert_eq!(t.search(&format!("key{}", i)), Ok(format!("value{}", i)));
    }
}

#[test]
fn keys_survive_many_expansions() {
    let mut t = LinkedHashTable::new();
    for i in 0..5_000 {
        t.insert(&format!("{:05}", i), &i.to_string()).unwrap();
    }
    assert!(t.generation_count() > 5);
    assert_eq!(t.key_count(), 5_000);

    for i in (0..5_000).step_by(2) {
        t.delete(&format!("{:05}", i)).unwrap();
    }
    assert_eq!(t.key_count(), 2_500);
    for i in 0..5_000 {
        let r = t.search(&format!("{:05}", i));
        if i % 2 == 0 {
            assert_eq!(r, Err(TableError::NotFound));
        } else {
            assert_eq!(r, Ok(i.to_string()));
        }
    }

    let keys = t.keys();
    assert_eq!(keys.len(), 2_500);
    assert!(keys.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(keys[0], "00001");
}

#[test]
fn reset_behaves_like_new() {
    let mut t = LinkedHashTable::new();
    for i in 0..100 {
        t.insert(&i.to_string(), "v").unwrap();
    }
    t.reset();
    assert_eq!(t.key_count(), 0);
    assert!(t.keys().is_empty());
    assert!(t.values().is_empty());
    assert_eq!(t.bucket_count(), LinkedHashTable::new().bucket_count());

    t.insert("x", "y").unwrap();
    assert_eq!(t.keys(), ["x"]);
    assert_eq!(t.key_count(), 1);
}

#[test]
fn colliding_keys_share_a_chain() {
    // Pick keys that land in the same first-generation bucket.
    let target = hash_code("seed") % INITIAL_BUCKETS as u64;
    let colliding: Vec<String> = (0..1_000)
        .map(|i| format!("c{}", i))
        .filter(|k| hash_code(k) % INITIAL_BUCKETS as u64 == target)
        .take(4)
        .collect();
    assert_eq!(colliding.len(), 4);

    let mut t = LinkedHashTable::new();
    for k in &colliding {
        t.insert(k, k).unwrap();
    }
    // Remove the middle of the chain; neighbours stay reachable.
    t.delete(&colliding[1]).unwrap();
    for (i, k) in colliding.iter().enumerate() {
        let r = t.search(k);
        if i == 1 {
            assert_eq!(r, Err(TableError::NotFound));
        } else {
            assert_eq!(r.as_deref(), Ok(k.as_str()));
        }
    }
}

#[test]
fn empty_key_and_value_are_storable() {
    let mut t = LinkedHashTable::new();
    t.insert("", "").unwrap();
    assert_eq!(t.search(""), Ok(String::new()));
    assert_eq!(t.keys(), [""]);
    t.delete("").unwrap();
    assert!(t.is_empty());
}

#[test]
fn invalid_arguments_do_not_mutate() {
    let mut t = LinkedHashTable::new();
    let err = t.insert("bad\0key", "v").unwrap_err();
    assert_eq!(err, TableError::InvalidArgument { what: "key" });
    assert_eq!(err.to_string(), "invalid argument: key contains a NUL byte");
    assert!(t.is_empty());
    assert_eq!(TableError::NotFound.to_string(), "key not found");
}

#[test]
fn returned_values_are_copies() {
    let mut t = LinkedHashTable::new();
    t.insert("k", "v").unwrap();
    let mut got = t.search("k").unwrap();
    got.push_str("-changed");
    assert_eq!(t.search("k").unwrap(), "v");

    let mut keys = t.keys();
    keys[0].push('!');
    assert_eq!(t.keys(), ["k"]);
}
