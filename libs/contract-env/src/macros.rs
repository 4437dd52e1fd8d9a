macro_rules! gen_fixed_bytes {
    ($(#[$attr:meta])* $name:ident, $len:expr) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, codec::Encode, codec::Decode)]
        pub struct $name([u8; $len]);

        impl $name {
            pub const LENGTH: usize = $len;

            pub const fn new(bytes: [u8; $len]) -> Self {
                $name(bytes)
            }

            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            pub fn to_hex(&self) -> String {
                format!("0x{}", hex::encode(self.0))
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                $name(bytes)
            }
        }

        impl From<$name> for [u8; $len] {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.to_hex())
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl core::str::FromStr for $name {
            type Err = $crate::error::EnvError;

            fn from_str(input: &str) -> Result<Self, Self::Err> {
                let bytes = $crate::types::hex_to_bytes(input)?;
                let bytes: [u8; $len] = bytes.try_into().map_err(|bytes: Vec<u8>| {
                    $crate::error::EnvError::InvalidLength {
                        expected: $len,
                        actual: bytes.len(),
                    }
                })?;
                Ok($name(bytes))
            }
        }
    };
}
