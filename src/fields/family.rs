//! Typed views of concrete families
//!
//! A family (Transmission, Plex, Discord, ...) is a thin projection of its
//! group's generic view. Families are declared with [`family!`], which turns
//! one attribute table into the typed struct, its `Family` conversions and
//! its `Resource` implementation.
//!
//! ## Adding a family
//!
//! 1. Make sure every wire name it uses is in its group's registry
//!    (`ENVELOPE` or `FIELDS`) under the right shape.
//! 2. Declare it with `family!` next to the other families of the group.
//! 3. Add it to the group's `group_kind!` list and to the resource registry
//!    in `src/resources/mod.rs`.

use super::generic::{GenericView, Group, Location};
use super::value::FieldShape;

/// One attribute a family declares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declared {
    /// Host attribute name
    pub attribute: &'static str,
    /// Wire name
    pub wire: &'static str,
    pub location: Location,
    pub shape: FieldShape,
}

/// A concrete family of group `Self::Group`
pub trait Family: Sized + Default + Clone {
    type Group: Group;

    const IMPLEMENTATION: &'static str;
    const CONFIG_CONTRACT: &'static str;
    /// Category tag value (`listType`, `protocol`), if the group has one
    const CATEGORY: Option<&'static str>;
    /// Attributes beyond id, name and tags
    const DECLARED: &'static [Declared];

    /// Fresh generic view carrying this family's attributes and constants
    fn to_generic(&self) -> GenericView<Self::Group>;

    /// Copy back exactly the attributes this family declares
    fn from_generic(generic: &GenericView<Self::Group>) -> Self;

    /// Does a generic view belong to this family
    fn matches(generic: &GenericView<Self::Group>) -> bool {
        generic
            .implementation
            .as_known()
            .is_some_and(|i| i == Self::IMPLEMENTATION)
    }
}

/// Declare a family typed view
///
/// ```text
/// family! {
///     /// Transmission torrent client.
///     pub struct Transmission in DownloadClients {
///         resource: "download_client_transmission",
///         implementation: "Transmission",
///         config_contract: "TransmissionSettings",
///         category: Some("torrent"),
///         envelope {
///             enable: bool = "enable" .computed(),
///         }
///         fields {
///             host: String = "host" .required(),
///             password: String = "password" .sensitive(),
///         }
///     }
/// }
/// ```
///
/// Trailing `.method(args)` calls are applied to the attribute's
/// `AttributeBuilder`.
macro_rules! family {
    (
        $(#[$meta:meta])*
        pub struct $name:ident in $group:ty {
            resource: $resource:literal,
            implementation: $implementation:literal,
            config_contract: $contract:literal,
            category: $category:expr,
            envelope {
                $( $env:ident : $env_ty:ty = $env_wire:literal $( . $env_m:ident ( $($env_arg:expr),* ) )* ),* $(,)?
            }
            fields {
                $( $field:ident : $field_ty:ty = $field_wire:literal $( . $field_m:ident ( $($field_arg:expr),* ) )* ),* $(,)?
            }
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        pub struct $name {
            pub id: $crate::host::Attr<i64>,
            pub name: $crate::host::Attr<String>,
            pub tags: $crate::host::Attr<$crate::fields::IntSet>,
            $( pub $env: $crate::host::Attr<$env_ty>, )*
            $( pub $field: $crate::host::Attr<$field_ty>, )*
        }

        impl $crate::fields::Family for $name {
            type Group = $group;

            const IMPLEMENTATION: &'static str = $implementation;
            const CONFIG_CONTRACT: &'static str = $contract;
            const CATEGORY: Option<&'static str> = $category;
            const DECLARED: &'static [$crate::fields::Declared] = &[
                $(
                    $crate::fields::Declared {
                        attribute: stringify!($env),
                        wire: $env_wire,
                        location: $crate::fields::Location::Envelope,
                        shape: <$env_ty as $crate::fields::FieldType>::SHAPE,
                    },
                )*
                $(
                    $crate::fields::Declared {
                        attribute: stringify!($field),
                        wire: $field_wire,
                        location: $crate::fields::Location::Field,
                        shape: <$field_ty as $crate::fields::FieldType>::SHAPE,
                    },
                )*
            ];

            fn to_generic(&self) -> $crate::fields::GenericView<$group> {
                let mut generic = $crate::fields::GenericView::<$group>::new();
                generic.id = self.id.clone();
                generic.name = self.name.clone();
                generic.tags = self.tags.clone();
                $( generic.set($crate::fields::Location::Envelope, $env_wire, self.$env.clone()); )*
                $( generic.set($crate::fields::Location::Field, $field_wire, self.$field.clone()); )*
                generic.stamp(
                    <Self as $crate::fields::Family>::IMPLEMENTATION,
                    <Self as $crate::fields::Family>::CONFIG_CONTRACT,
                    <Self as $crate::fields::Family>::CATEGORY,
                );
                generic
            }

            fn from_generic(generic: &$crate::fields::GenericView<$group>) -> Self {
                Self {
                    id: generic.id.clone(),
                    name: generic.name.clone(),
                    tags: generic.tags.clone(),
                    $( $env: generic.get::<$env_ty>($crate::fields::Location::Envelope, $env_wire), )*
                    $( $field: generic.get::<$field_ty>($crate::fields::Location::Field, $field_wire), )*
                }
            }
        }

        impl $crate::resources::Resource for $name {
            const TYPE_NAME: &'static str = $resource;
            const PATH: &'static str = <$group as $crate::fields::Group>::PATH;

            fn schema() -> $crate::host::Schema {
                use $crate::host::AttributeBuilder;
                let builder = $crate::resources::family_schema_builder(
                    <Self as $crate::fields::Family>::IMPLEMENTATION,
                    <$group as $crate::fields::Group>::NAME,
                );
                builder
                    $(
                        .attribute(
                            AttributeBuilder::new(
                                stringify!($env),
                                <$env_ty as $crate::fields::FieldType>::SHAPE.attribute_type(),
                            )
                            $( .$env_m($($env_arg),*) )*
                            .build(),
                        )
                    )*
                    $(
                        .attribute(
                            AttributeBuilder::new(
                                stringify!($field),
                                <$field_ty as $crate::fields::FieldType>::SHAPE.attribute_type(),
                            )
                            $( .$field_m($($field_arg),*) )*
                            .build(),
                        )
                    )*
                    .build()
            }

            fn id(&self) -> &$crate::host::Attr<i64> {
                &self.id
            }

            fn with_id(id: i64) -> Self {
                Self {
                    id: $crate::host::Attr::Known(id),
                    ..Default::default()
                }
            }

            fn to_request(&self) -> Result<serde_json::Value, $crate::fields::ConversionError> {
                <Self as $crate::fields::Family>::to_generic(self).to_request()
            }

            fn from_response(
                value: serde_json::Value,
            ) -> Result<Self, $crate::fields::ConversionError> {
                $crate::fields::family_from_response::<Self>(value)
            }
        }
    };
}

pub(crate) use family;

/// Declare the tagged variant of a group, one case per family
macro_rules! group_kind {
    (
        $(#[$meta:meta])*
        pub enum $kind:ident in $group:ty {
            $( $family:ident ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub enum $kind {
            $( $family($family), )*
        }

        impl $kind {
            /// Implementation tags of every family in the group
            pub const IMPLEMENTATIONS: &'static [&'static str] = &[
                $( <$family as $crate::fields::Family>::IMPLEMENTATION, )*
            ];

            /// Project a generic view onto the family its implementation tag names
            pub fn from_generic(generic: &$crate::fields::GenericView<$group>) -> Option<Self> {
                $(
                    if <$family as $crate::fields::Family>::matches(generic) {
                        return Some($kind::$family(
                            <$family as $crate::fields::Family>::from_generic(generic),
                        ));
                    }
                )*
                None
            }

            pub fn to_generic(&self) -> $crate::fields::GenericView<$group> {
                match self {
                    $( $kind::$family(v) => <$family as $crate::fields::Family>::to_generic(v), )*
                }
            }

            /// Resource type name of the contained family
            pub fn type_name(&self) -> &'static str {
                match self {
                    $( $kind::$family(_) => <$family as $crate::resources::Resource>::TYPE_NAME, )*
                }
            }

            /// Host state of the contained family
            pub fn to_state(&self) -> Result<serde_json::Value, serde_json::Error> {
                match self {
                    $( $kind::$family(v) => serde_json::to_value(v), )*
                }
            }
        }

        impl $crate::resources::listing::GroupKind for $kind {
            type Group = $group;

            fn from_generic(generic: &$crate::fields::GenericView<$group>) -> Option<Self> {
                $kind::from_generic(generic)
            }

            fn type_name(&self) -> &'static str {
                $kind::type_name(self)
            }

            fn to_state(&self) -> Result<serde_json::Value, serde_json::Error> {
                $kind::to_state(self)
            }
        }
    };
}

pub(crate) use group_kind;

/// Shared `Resource::from_response` for families
pub fn family_from_response<F: Family>(
    value: serde_json::Value,
) -> Result<F, super::ConversionError> {
    let generic = GenericView::<F::Group>::from_response(value)?;
    if !F::matches(&generic) {
        tracing::warn!(
            "{} record {:?} has implementation {:?}, expected {}",
            <F::Group as Group>::NAME,
            generic.id.as_known(),
            generic.implementation.as_known(),
            F::IMPLEMENTATION
        );
    }
    Ok(F::from_generic(&generic))
}
