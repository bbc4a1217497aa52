/// Declares a UUID-backed identifier newtype.
macro_rules! id {
    ($ident:ident) => {
        #[::nutype::nutype(derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Display,
            Deref,
            From,
            Serialize,
            Deserialize,
        ))]
        pub struct $ident(::uuid::Uuid);

        impl $ident {
            pub fn random() -> Self {
                Self::new(::uuid::Uuid::new_v4())
            }
        }
    };
}

pub(crate) use id;
