//! Application services
//!
//! One service per resource. Services are stateless: they validate input
//! where required, delegate to the repository, and log entry/exit around
//! every operation. Errors pass through unchanged.

pub mod cities;
pub mod states;

pub use cities::CityService;
pub use states::StateService;
