#![no_main]

use libfuzzer_sys::fuzz_target;
use skipindex::{Config, SkipList};
use std::collections::BTreeMap;

// Every chunk of three bytes is one operation, checked against a BTreeMap.
fuzz_target!(|data: &[u8]| {
    let Some((&seed, ops)) = data.split_first() else {
        return;
    };

    let config = Config::new()
        .max_level(1 + seed as usize % 16)
        .seed(seed as u64);
    let mut list = SkipList::with_config(config).unwrap();
    let mut model = BTreeMap::new();

    for op in ops.chunks_exact(3) {
        let (key, val) = (op[1], op[2]);

        match op[0] % 4 {
            0 | 1 => assert_eq!(list.insert(key, val), model.insert(key, val)),
            2 => assert_eq!(list.remove(&key), model.remove(&key)),
            _ => assert_eq!(list.pop_first(), model.pop_first()),
        }

        assert_eq!(list.len(), model.len());
    }

    for (key, val) in &model {
        assert_eq!(list.get(key), Some(val));
    }
    assert_eq!(list.first(), model.first_key_value());
    assert_eq!(list.last(), model.last_key_value());
});
