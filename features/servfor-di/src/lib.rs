//! Servfor DI is a small, synchronous dependency injection container.
//!
//! Services are registered on a [DiBuilder] with one of three lifetimes:
//!
//! 1. Instance - already constructed, shared as is
//! 2. Singleton - constructed by a factory on first require, then shared
//! 3. Transient - constructed by a factory on every resolve
//!
//! The builder is then turned into a [DiContainer], which is cheap to clone
//! and can be shared between threads.
//!
//! ```rust
//! use servfor_di::DiBuilder;
//!
//! struct Greeting(String);
//!
//! let mut builder = DiBuilder::new();
//! builder
//!     .add_instance(String::from("world"))
//!     .add_transient(|di| {
//!         let name = di.require::<String>()?;
//!         Ok::<_, servfor_di::RequireError>(Greeting(format!("hello {name}")))
//!     });
//!
//! let container = builder.build();
//! let greeting = container.resolve::<Greeting>().unwrap();
//! assert_eq!(greeting.0, "hello world");
//! ```

pub mod builder;
pub mod container;
pub mod errors;
pub mod factories;
pub mod resolver;
pub mod types;

pub use builder::DiBuilder;
pub use container::DiContainer;
pub use errors::RequireError;
pub use factories::InstanceFactory;
pub use resolver::Resolver;
pub use types::{DynError, Injectable, Lifetime, TypeInfo};
