use std::collections::HashMap;

use servfor_di::DiBuilder;

use crate::{
    contracts::{ConnectionKey, DataService},
    errors::RegistrationError,
    registrar::add_keyed_data_service,
};

/// A fieldless enum whose members name connections
///
/// Use [`connection_enum!`](crate::connection_enum) to declare one.
pub trait ConnectionEnum: ConnectionKey + Copy {
    /// All members, in declaration order
    const MEMBERS: &'static [Self];
}

/// Declares a fieldless enum and implements [`ConnectionEnum`] for it
///
/// The enum derives `Debug, Clone, Copy, PartialEq, Eq, Hash`.
///
/// ```rust
/// use servfor_extensions::{connection_enum, ConnectionEnum};
///
/// connection_enum! {
///     pub enum Database {
///         Orders,
///         Billing,
///     }
/// }
///
/// assert_eq!(Database::MEMBERS, &[Database::Orders, Database::Billing]);
/// ```
#[macro_export]
macro_rules! connection_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$variant_meta:meta])* $variant:ident),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$variant_meta])* $variant),*
        }

        impl $crate::ConnectionEnum for $name {
            const MEMBERS: &'static [Self] = &[$($name::$variant),*];
        }
    };
}

/// Pairs the members of `K` with `connection_strings` by position
///
/// Stops at the shorter of the two, trailing members without a connection
/// string are left out.
pub fn zip_connections<K, I>(connection_strings: I) -> HashMap<K, String>
where
    K: ConnectionEnum,
    I: IntoIterator,
    I::Item: Into<String>,
{
    K::MEMBERS
        .iter()
        .copied()
        .zip(connection_strings.into_iter().map(Into::into))
        .collect()
}

/// Registers a [`KeyedResolver<K, S>`](crate::KeyedResolver) from connection strings
/// listed in the declaration order of `K`
///
/// Adds no validation of its own, the zipped map goes through
/// [`add_keyed_data_service`]. No connection strings at all therefore fail with
/// `OutOfRange("connectionStringsKeyNamed")`.
pub fn add_enum_data_service<'a, K, S, I>(
    services: Option<&'a mut DiBuilder>,
    connection_strings: I,
) -> Result<&'a mut DiBuilder, RegistrationError>
where
    K: ConnectionEnum,
    S: DataService,
    I: IntoIterator,
    I::Item: Into<String>,
{
    let connections = zip_connections::<K, _>(connection_strings);
    if connections.len() < K::MEMBERS.len() {
        tracing::debug!(
            "Only {} of {} members have a connection string",
            connections.len(),
            K::MEMBERS.len()
        );
    }

    add_keyed_data_service::<K, S>(services, Some(connections))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{testing::FakeService, KeyedResolver};

    connection_enum! {
        enum Pair {
            A,
            B,
        }
    }

    connection_enum! {
        /// Three connections
        enum Triple {
            A,
            B,
            C
        }
    }

    #[test]
    fn members_keep_declaration_order() {
        assert_eq!(Triple::MEMBERS, &[Triple::A, Triple::B, Triple::C]);
    }

    #[test]
    fn zip_pairs_by_position() {
        let connections = zip_connections::<Pair, _>(["csA", "csB"]);

        assert_eq!(connections.len(), 2);
        assert_eq!(connections[&Pair::A], "csA");
        assert_eq!(connections[&Pair::B], "csB");
    }

    #[test]
    fn zip_stops_at_shorter_sequence() {
        let fewer = zip_connections::<Triple, _>(vec!["csA".to_string(), "csB".to_string()]);
        assert_eq!(fewer.len(), 2);
        assert!(!fewer.contains_key(&Triple::C));

        let more = zip_connections::<Pair, _>(["csA", "csB", "csC"]);
        assert_eq!(more.len(), 2);
    }

    #[test]
    fn no_connection_strings_is_out_of_range() {
        let mut builder = DiBuilder::new();
        let err = add_enum_data_service::<Pair, FakeService, _>(
            Some(&mut builder),
            Vec::<String>::new(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            RegistrationError::OutOfRange("connectionStringsKeyNamed")
        ));
    }

    #[test]
    fn missing_services_fails_after_zipping() {
        let err = add_enum_data_service::<Pair, FakeService, _>(None, ["csA"]).unwrap_err();
        assert!(matches!(err, RegistrationError::NullArgument("services")));
    }

    #[test]
    fn registers_resolver_for_enum() {
        let mut builder = DiBuilder::new();
        add_enum_data_service::<Triple, FakeService, _>(Some(&mut builder), ["csA", "csB"])
            .unwrap();
        let container = builder.build();

        let resolver = container
            .resolve::<KeyedResolver<Triple, FakeService>>()
            .unwrap();
        assert_eq!(resolver.len(), 2);
        assert_eq!(resolver.resolve(&Triple::B).unwrap().connection_string(), "csB");
        assert!(matches!(
            resolver.resolve(&Triple::C),
            Err(RegistrationError::KeyNotFound(_))
        ));
    }
}
