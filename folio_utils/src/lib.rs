/// Whitespace-insensitive emptiness, the notion of "missing" used for form
/// input.
pub trait Blank {
    fn is_blank(&self) -> bool;
}

impl<T: AsRef<str> + ?Sized> Blank for T {
    fn is_blank(&self) -> bool {
        self.as_ref().trim().is_empty()
    }
}

#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat) => {
        match ($expr) {
            $pat => (),
            val => ::core::panic!(
                "expected {:?} to match `{}`",
                val,
                ::core::stringify!($pat)
            ),
        }
    };
    ($expr:expr, $pat:pat if $pred:expr) => {{
        let val = $expr;
        match (&val) {
            $pat if $pred => (),
            _ => ::core::panic!(
                "expected {:?} to match `{} if {}`",
                val,
                ::core::stringify!($pat),
                ::core::stringify!($pred)
            ),
        }
    }};
}
