//! The page-object construction protocol.
//!
//! # Data Flow
//! ```text
//! handler calls render(component, props)
//!     → builder.rs (merge shared data, history flags)
//!     → resolver.rs (partial detection, filtering, materialization)
//!     → object.rs (assembled page object)
//!     → protocol JSON response | full HTML document (render/)
//! ```

pub mod builder;
pub mod object;
pub mod props;
pub mod resolver;

pub use builder::Inertia;
pub use object::PageObject;
pub use props::{
    always, defer, merge, optional, FactoryOutput, LazyKind, LazyProp, Prop, Props,
    DEFAULT_DEFER_GROUP,
};
pub use resolver::PropResolver;
