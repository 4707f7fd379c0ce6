use super::*;

use crate::state_map::{BUCKET_BITS, BUCKET_COUNT, BUCKET_LEN};

#[derive(Clone, Debug)]
pub struct StateSet {
    raw: Vec<Option<Box<Bitset4096>>>,
    len: usize,
}

#[derive(Clone, Copy, Debug)]
struct Bitset4096([u64; BUCKET_LEN / 64]);

impl Default for Bitset4096 {
    fn default() -> Self {
        Self([0; BUCKET_LEN / 64])
    }
}

impl StateSet {
    pub fn empty() -> Self {
        Self {
            raw: (0..BUCKET_COUNT).map(|_| None).collect(),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn add(&mut self, state: State) -> DidAddendAlreadyExist {
        let bucket = self.raw[(state.0 >> BUCKET_BITS) as usize].get_or_insert_with(Default::default);

        let i1 = (state.0 as usize) & (BUCKET_LEN - 1);
        let word = &mut bucket.0[i1 / 64];
        let mask = 1u64 << (i1 % 64);

        let did_addend_already_exist = *word & mask != 0;
        if !did_addend_already_exist {
            self.len += 1;
        }

        *word |= mask;

        DidAddendAlreadyExist {
            did_addend_already_exist,
        }
    }

    pub fn contains(&self, state: State) -> bool {
        let Some(bucket) = self
            .raw
            .get((state.0 >> BUCKET_BITS) as usize)
            .and_then(Option::as_ref)
        else {
            return false;
        };

        let i1 = (state.0 as usize) & (BUCKET_LEN - 1);
        bucket.0[i1 / 64] & (1u64 << (i1 % 64)) != 0
    }

    /// Adds every state of `other`.
    pub fn union(mut self, other: &Self) -> Self {
        other.visit_in_key_order(|state| {
            self.add(state);
        });

        self
    }

    pub fn visit_in_key_order(&self, mut visitor: impl FnMut(State)) {
        for (i0, bucket) in self.raw.iter().enumerate() {
            let Some(bucket) = bucket else {
                continue;
            };
            let prefix = (i0 as u32) << BUCKET_BITS;
            self.visit_bucket(prefix, bucket, &mut visitor);
        }
    }

    fn visit_bucket(&self, prefix: u32, bucket: &Bitset4096, mut visitor: impl FnMut(State)) {
        for (word_index, &word) in bucket.0.iter().enumerate() {
            let mut remaining = word;
            while remaining != 0 {
                let bit = remaining.trailing_zeros();
                remaining &= remaining - 1;
                visitor(State(prefix | (word_index as u32 * 64 + bit)));
            }
        }
    }
}
