#![feature(unsize)]

//! A binding-graph dependency injection container.
//!
//! Three stages, matching the usual DI flow: accumulate binding
//! declarations on a [`Partial`], [`Partial::seal`] it into an immutable,
//! validated [`Component`], then drive an [`Injector`] off that `Component`
//! to construct and memoize instances on demand.
//!
//! # Examples
//!
//! ## A simple dependency chain
//!
//! `Injector::get` walks the binding graph for you — as a caller you only
//! ever see the interface you asked for.
//!
//! ```
//! use std::sync::Arc;
//! use weft::{Buildable, Injector, Partial};
//!
//! trait Writer: Send + Sync {
//!     fn write(&self, msg: &str) -> String;
//! }
//!
//! #[derive(Buildable)]
//! struct StdoutWriter;
//!
//! impl Writer for StdoutWriter {
//!     fn write(&self, msg: &str) -> String {
//!         format!("stdout: {msg}")
//!     }
//! }
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! #[derive(Buildable)]
//! struct HelloGreeter {
//!     writer: Arc<dyn Writer>,
//! }
//!
//! impl Greeter for HelloGreeter {
//!     fn greet(&self) -> String {
//!         self.writer.write("hello")
//!     }
//! }
//!
//! let component = Partial::new()
//!     .add::<StdoutWriter>()
//!     .bind::<dyn Writer, StdoutWriter>()
//!     .add::<HelloGreeter>()
//!     .bind::<dyn Greeter, HelloGreeter>()
//!     .seal()
//!     .unwrap();
//!
//! let injector = Injector::new(component);
//! let greeter = injector.get::<dyn Greeter>().unwrap();
//! assert_eq!(greeter.greet(), "stdout: hello");
//!
//! // Requesting the same interface again returns the same instance.
//! let greeter2 = injector.get::<dyn Greeter>().unwrap();
//! assert!(Arc::ptr_eq(&greeter, &greeter2));
//! ```
//!
//! ## Multibindings
//!
//! Many implementations can contribute to one interface's set, retrieved
//! together rather than individually.
//!
//! ```
//! use std::sync::Arc;
//! use weft::{Injector, Partial, Signature, TypeInfo};
//!
//! trait Plugin: Send + Sync {
//!     fn name(&self) -> &'static str;
//! }
//!
//! struct PluginOne;
//! impl Plugin for PluginOne {
//!     fn name(&self) -> &'static str {
//!         "one"
//!     }
//! }
//!
//! struct PluginTwo;
//! impl Plugin for PluginTwo {
//!     fn name(&self) -> &'static str {
//!         "two"
//!     }
//! }
//!
//! let component = Partial::new()
//!     .add_multibinding::<dyn Plugin, PluginOne>(
//!         Signature::nullary(TypeInfo::of::<PluginOne>()),
//!         |_| Ok(PluginOne),
//!     )
//!     .add_multibinding::<dyn Plugin, PluginTwo>(
//!         Signature::nullary(TypeInfo::of::<PluginTwo>()),
//!         |_| Ok(PluginTwo),
//!     )
//!     .seal()
//!     .unwrap();
//!
//! let injector = Injector::new(component);
//! let plugins = injector.get_multibindings::<dyn Plugin>().unwrap();
//! let names: Vec<_> = plugins.iter().map(|p| p.name()).collect();
//! assert_eq!(names, vec!["one", "two"]);
//! ```
//!
//! ## Assisted factories
//!
//! A factory closes over its injected dependencies at resolution time and
//! accepts only the assisted arguments at call time.
//!
//! ```
//! use std::sync::Arc;
//! use weft::{Injector, ParamInfo, Partial, Signature, TypeInfo};
//!
//! struct Logger;
//!
//! struct Request {
//!     id: i32,
//!     #[allow(dead_code)]
//!     logger: Arc<Logger>,
//! }
//!
//! let component = Partial::new()
//!     .add_provider(Signature::nullary(TypeInfo::of::<Logger>()), |_| Ok(Logger))
//!     .add_factory(
//!         Signature::new(
//!             TypeInfo::of::<Request>(),
//!             vec![
//!                 ParamInfo::assisted(TypeInfo::of::<i32>()),
//!                 ParamInfo::injected(TypeInfo::of::<Logger>()),
//!             ],
//!         ),
//!         |injector, mut args| {
//!             let id = *args.remove(0).downcast::<i32>().unwrap();
//!             Ok(Request { id, logger: injector.get::<Logger>()? })
//!         },
//!     )
//!     .seal()
//!     .unwrap();
//!
//! let injector = Injector::new(component);
//! let factory = injector.get_factory::<Request>().unwrap();
//!
//! let first = factory.build1(42).unwrap();
//! let second = factory.build1(42).unwrap();
//! assert_eq!(first.id, 42);
//! assert!(!Arc::ptr_eq(&first, &second)); // fresh each call
//! assert!(Arc::ptr_eq(&first.logger, &second.logger)); // same injected Logger
//! ```

mod binding;
mod compiler;

mod type_id;
pub use type_id::{Annotated, TypeInfo};

mod signature;
pub use signature::{ParamInfo, ParamKind, Signature};

mod diagnostics;
pub use diagnostics::InjectionStack;

mod errors;
pub use errors::{
    AliasCycleError, AssistedArgMismatchError, CyclicDependencyError, DuplicateBindingError, FactoryProductRequestedError,
    InjectionError, MissingBindingError, RuntimeCycleError, SealError, UnregisteredTypeError,
};

mod component;
pub use component::Component;

mod partial;
pub use partial::{Buildable, Partial, PartialId};

mod injector;
pub use injector::Injector;

mod factory;
pub use factory::Factory;

pub use weft_macros::Buildable;

#[cfg(feature = "viz")]
pub mod utils;
