#![no_main]

use std::collections::HashSet;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use subnet_trie::{Error, Key, PrefixTrie, MAX_PREFIX_LEN};

#[derive(Arbitrary, Debug)]
enum TrieMethod {
    Add { key: u128, length: u8 },
    Remove { key: u128, length: u8 },
    Contains { key: u128, length: u8 },
    Match { addr: u128 },
}

// Keeps only the leading `length` bits, which is all the trie looks at.
fn canonical(key: u128, length: usize) -> u128 {
    if length == 0 {
        0
    } else {
        key & (u128::MAX << (128 - length))
    }
}

fuzz_target!(|methods: Vec<TrieMethod>| {
    let mut trie = PrefixTrie::new();
    let mut model = HashSet::<(u128, usize)>::new();

    for m in methods {
        match m {
            TrieMethod::Add { key, length } => {
                let length = length as usize;
                let result = trie.add(&Key::new(key.to_be_bytes()), length);
                if length > MAX_PREFIX_LEN {
                    assert!(matches!(result, Err(Error::InvalidLength(_))));
                } else {
                    assert!(result.is_ok());
                    model.insert((canonical(key, length), length));
                }
            }
            TrieMethod::Remove { key, length } => {
                let length = length as usize;
                let result = trie.remove(&Key::new(key.to_be_bytes()), length);
                if length > MAX_PREFIX_LEN {
                    assert!(matches!(result, Err(Error::InvalidLength(_))));
                } else if model.remove(&(canonical(key, length), length)) {
                    assert!(result.is_ok());
                } else {
                    assert!(matches!(result, Err(Error::NotContained)));
                }
            }
            TrieMethod::Contains { key, length } => {
                let length = length as usize;
                if let Ok(found) = trie.contains(&Key::new(key.to_be_bytes()), length) {
                    assert_eq!(found, model.contains(&(canonical(key, length), length)));
                }
            }
            TrieMethod::Match { addr } => {
                let expected = model
                    .iter()
                    .any(|(p, l)| *l > 0 && canonical(addr, *l) == *p);
                assert_eq!(trie.matches(&Key::new(addr.to_be_bytes())), expected);
            }
        }
        assert_eq!(trie.len(), model.len());
    }

    for (p, l) in model.iter() {
        assert!(trie.contains(&Key::new(p.to_be_bytes()), *l).unwrap());
    }
});
