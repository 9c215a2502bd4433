//! Declarative macros for reducing vocabulary boilerplate.
//!
//! Every closed vocabulary (domains, actions, severities) shares the same
//! member table, string conversion and lookup plumbing.

/// Generates a closed vocabulary enum together with its member table,
/// `Vocabulary`, `Default`, `Display` and `FromStr` impls.
///
/// Members are declared in order; the derived `Ord` follows that order.
///
/// # Usage
/// ```ignore
/// vocabulary! {
///     /// Docs.
///     pub enum Severity: "severity", default = Low {
///         Low => "low",
///         High => "high",
///     }
/// }
/// ```
macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        pub enum $name:ident : $kind:literal, default = $default:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every member, in declaration order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// Canonical lowercase spelling.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text, )+
                }
            }
        }

        impl $crate::grammar::Vocabulary for $name {
            const KIND: &'static str = $kind;

            fn members() -> &'static [Self] {
                Self::ALL
            }

            fn as_str(self) -> &'static str {
                $name::as_str(self)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::UnknownMember;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$name as $crate::grammar::Vocabulary>::lookup(s).ok_or_else(|| {
                    $crate::error::UnknownMember {
                        kind: $kind,
                        value: s.to_string(),
                    }
                })
            }
        }
    };
}
