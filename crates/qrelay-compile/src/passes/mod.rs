//! Built-in compilation passes.

mod layout;
mod optimization;
mod routing;
mod verification;

pub use layout::ExplicitLayout;
pub use optimization::{CancelInversePairs, MergeRotations, OptimizationReport};
pub use routing::{BasicRouting, RoutingReport};
pub use verification::ConnectivityCheck;
