use codec::{Decode, Encode};
use contract_env::{AccountId, Env, Hash, Key};

/// A cursor handing out consecutive storage keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPtr {
    key: Key,
}

impl KeyPtr {
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Returns the current key and moves the cursor `footprint` cells ahead.
    pub fn advance_by(&mut self, footprint: u64) -> Key {
        let current = self.key;
        self.key = self.key.add_u64(footprint);
        current
    }

    pub fn next_for<T: SpreadLayout>(&mut self) -> Key {
        self.advance_by(T::FOOTPRINT)
    }
}

impl From<Key> for KeyPtr {
    fn from(key: Key) -> Self {
        KeyPtr { key }
    }
}

/// Types that can be loaded from and stored to contract storage.
pub trait SpreadLayout: Sized {
    /// The number of consecutive keys this type occupies.
    const FOOTPRINT: u64;

    fn pull_spread(ptr: &mut KeyPtr, env: &Env) -> Self;

    fn push_spread(&self, ptr: &mut KeyPtr, env: &Env);

    fn clear_spread(&self, ptr: &mut KeyPtr, env: &Env);
}

/// Types stored SCALE encoded inside a single cell.
pub trait PackedLayout: Encode + Decode {}

/// Loads a packed value, a missing cell yields the default value.
///
/// # Panics
///
/// If the cell holds bytes that do not decode into `T`, which means the
/// storage layout of the contract has been corrupted.
pub fn pull_packed_root<T: PackedLayout + Default>(key: &Key, env: &Env) -> T {
    pull_packed_root_opt(key, env).unwrap_or_default()
}

/// # Panics
///
/// Same as [`pull_packed_root`].
pub fn pull_packed_root_opt<T: PackedLayout>(key: &Key, env: &Env) -> Option<T> {
    match env.get_contract_storage::<T>(key) {
        Ok(value) => value,
        Err(err) => panic!("storage layout is corrupted: {}", err),
    }
}

pub fn push_packed_root<T: PackedLayout>(value: &T, key: &Key, env: &Env) {
    env.set_contract_storage(key, value);
}

pub fn clear_packed_root(key: &Key, env: &Env) {
    env.clear_contract_storage(key);
}

macro_rules! impl_layout_for_packed {
    ($($ty:ty),* $(,)?) => {
        $(
            impl PackedLayout for $ty {}

            impl SpreadLayout for $ty {
                const FOOTPRINT: u64 = 1;

                fn pull_spread(ptr: &mut KeyPtr, env: &Env) -> Self {
                    pull_packed_root(&ptr.next_for::<Self>(), env)
                }

                fn push_spread(&self, ptr: &mut KeyPtr, env: &Env) {
                    push_packed_root(self, &ptr.next_for::<Self>(), env)
                }

                fn clear_spread(&self, ptr: &mut KeyPtr, env: &Env) {
                    clear_packed_root(&ptr.next_for::<Self>(), env)
                }
            }
        )*
    };
}

impl_layout_for_packed!(bool, u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, AccountId, Hash);

impl<T: PackedLayout> PackedLayout for Option<T> {}

impl<T: PackedLayout> SpreadLayout for Option<T> {
    const FOOTPRINT: u64 = 1;

    fn pull_spread(ptr: &mut KeyPtr, env: &Env) -> Self {
        pull_packed_root_opt::<Self>(&ptr.next_for::<Self>(), env).flatten()
    }

    fn push_spread(&self, ptr: &mut KeyPtr, env: &Env) {
        push_packed_root(self, &ptr.next_for::<Self>(), env)
    }

    fn clear_spread(&self, ptr: &mut KeyPtr, env: &Env) {
        clear_packed_root(&ptr.next_for::<Self>(), env)
    }
}

macro_rules! impl_layout_for_tuple {
    ($($name:ident),+) => {
        impl<$($name: PackedLayout),+> PackedLayout for ($($name,)+) {}

        impl<$($name: PackedLayout + Default),+> SpreadLayout for ($($name,)+) {
            const FOOTPRINT: u64 = 1;

            fn pull_spread(ptr: &mut KeyPtr, env: &Env) -> Self {
                pull_packed_root(&ptr.next_for::<Self>(), env)
            }

            fn push_spread(&self, ptr: &mut KeyPtr, env: &Env) {
                push_packed_root(self, &ptr.next_for::<Self>(), env)
            }

            fn clear_spread(&self, ptr: &mut KeyPtr, env: &Env) {
                clear_packed_root(&ptr.next_for::<Self>(), env)
            }
        }
    };
}

impl_layout_for_tuple!(A, B);
impl_layout_for_tuple!(A, B, C);
