pub mod health;
pub mod index;
pub mod plots;

pub use health::{AppStartTime, HealthService, health_routes};
pub use index::{IndexService, MapView, index_routes};
pub use plots::{DetailsQuery, PlotsService, plot_routes};
