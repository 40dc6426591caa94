//! Macros for ergonomic state declaration.

/// Declare a fieldless enum usable as a machine state.
///
/// Derives the traits [`State`](crate::core::State) needs, implements it with
/// the variant name as the state name, and adds `all()` returning every
/// variant in declaration order.
///
/// # Example
///
/// ```
/// use transit::state_enum;
/// use transit::core::State;
///
/// state_enum! {
///     pub enum Light {
///         Red,
///         Yellow,
///         Green,
///     }
/// }
///
/// assert_eq!(Light::Yellow.name(), "Yellow");
/// assert_eq!(Light::all(), vec![Light::Red, Light::Yellow, Light::Green]);
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            #[allow(dead_code)]
            $vis fn all() -> ::std::vec::Vec<Self> {
                ::std::vec![$(Self::$variant),*]
            }
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
