use super::*;

/// A map keyed by state, stored as lazily allocated buckets
/// over the packed key space.
///
/// The upper key bits select a bucket; the lower 12 bits (O's marks)
/// select a slot within it.
#[derive(Clone, Debug)]
pub struct StateMap<T> {
    raw: Vec<Option<Box<Bucket<T>>>>,
    len: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bucket<T>(pub [T; BUCKET_LEN]);

pub(crate) const BUCKET_BITS: u32 = 12;
pub(crate) const BUCKET_LEN: usize = 1 << BUCKET_BITS;
pub(crate) const BUCKET_COUNT: usize = 1 << (KEY_BITS - BUCKET_BITS);

#[derive(Clone, Copy, Debug)]
pub struct DidAddendAlreadyExist {
    pub did_addend_already_exist: bool,
}

/// A sentinel value marking an empty slot.
pub trait Null: Sized + PartialEq + Eq {
    fn null() -> Self;

    fn is_null(&self) -> bool {
        *self == Self::null()
    }
}

impl<T: Null + Copy> Null for Bucket<T> {
    fn null() -> Self {
        Self([Null::null(); BUCKET_LEN])
    }
}

impl<T: Eq> Null for Option<T> {
    fn null() -> Self {
        None
    }
}

impl<T: Null> Null for Box<T> {
    fn null() -> Self {
        Box::new(Null::null())
    }
}

impl<T: Copy + Null> StateMap<T> {
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

    /// `value` must not be null.
    pub fn add(&mut self, state: State, value: T) -> DidAddendAlreadyExist {
        debug_assert!(!value.is_null(), "cannot add a null value to a state map");

        let bucket = self.raw[(state.0 >> BUCKET_BITS) as usize].get_or_insert_with(Null::null);
        let item = &mut bucket.0[(state.0 as usize) & (BUCKET_LEN - 1)];

        let did_addend_already_exist = !item.is_null();
        if !did_addend_already_exist {
            self.len += 1;
        }

        *item = value;

        DidAddendAlreadyExist {
            did_addend_already_exist,
        }
    }

    /// Returns `T::null()` if `state` is absent.
    pub fn get(&self, state: State) -> T {
        let Some(bucket) = self
            .raw
            .get((state.0 >> BUCKET_BITS) as usize)
            .and_then(Option::as_ref)
        else {
            return Null::null();
        };

        bucket.0[(state.0 as usize) & (BUCKET_LEN - 1)]
    }
}
