use std::collections::HashMap;

use servfor_di::DiBuilder;

use crate::{
    contracts::{ConnectionKey, DataService},
    enum_binder::{self, ConnectionEnum},
    errors::RegistrationError,
    registrar,
};

/// Data service registration as methods on [DiBuilder]
///
/// Each method forwards to the function of the same name in
/// [`registrar`](crate::registrar) or [`enum_binder`](crate::enum_binder).
pub trait DataServiceBuilderExt {
    /// See [`registrar::add_data_service`]
    fn add_data_service<S: DataService>(
        &mut self,
        connection_string: &str,
    ) -> Result<&mut Self, RegistrationError>;

    /// See [`registrar::add_keyed_data_service`]
    fn add_keyed_data_service<K: ConnectionKey, S: DataService>(
        &mut self,
        connection_strings_key_named: HashMap<K, String>,
    ) -> Result<&mut Self, RegistrationError>;

    /// See [`registrar::add_named_data_service`]
    fn add_named_data_service<S: DataService>(
        &mut self,
        connection_strings_key_named: HashMap<String, String>,
    ) -> Result<&mut Self, RegistrationError>;

    /// See [`enum_binder::add_enum_data_service`]
    fn add_enum_data_service<K, S, I>(
        &mut self,
        connection_strings: I,
    ) -> Result<&mut Self, RegistrationError>
    where
        K: ConnectionEnum,
        S: DataService,
        I: IntoIterator,
        I::Item: Into<String>;
}

impl DataServiceBuilderExt for DiBuilder {
    fn add_data_service<S: DataService>(
        &mut self,
        connection_string: &str,
    ) -> Result<&mut Self, RegistrationError> {
        registrar::add_data_service::<S>(Some(self), Some(connection_string))
    }

    fn add_keyed_data_service<K: ConnectionKey, S: DataService>(
        &mut self,
        connection_strings_key_named: HashMap<K, String>,
    ) -> Result<&mut Self, RegistrationError> {
        registrar::add_keyed_data_service::<K, S>(Some(self), Some(connection_strings_key_named))
    }

    fn add_named_data_service<S: DataService>(
        &mut self,
        connection_strings_key_named: HashMap<String, String>,
    ) -> Result<&mut Self, RegistrationError> {
        registrar::add_named_data_service::<S>(Some(self), Some(connection_strings_key_named))
    }

    fn add_enum_data_service<K, S, I>(
        &mut self,
        connection_strings: I,
    ) -> Result<&mut Self, RegistrationError>
    where
        K: ConnectionEnum,
        S: DataService,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        enum_binder::add_enum_data_service::<K, S, I>(Some(self), connection_strings)
    }
}
