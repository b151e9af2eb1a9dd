//! Widget system: trait, deferred initialization, lifecycle.

pub mod deferred;
pub mod lifecycle;
pub mod traits;

pub use deferred::{ensure_init, Deferred, DeferredInit};
pub use lifecycle::{LifecycleEvent, LifecycleTracker};
pub use traits::{Widget, WidgetState};
