pub mod color;
pub mod cycle;
pub mod defaults;
pub mod keyframe;
pub mod loader;
pub mod table;
pub mod validator;

pub use color::ColorChannel;
pub use cycle::{Frame, WeatherCycle};
pub use defaults::ChannelSchema;
pub use keyframe::KeyframeVariable;
pub use loader::{build_table, load_table, reload_table, CurveDef, CycleDef, LoadError};
pub use table::TimeCycleTable;
pub use validator::ValidationError;
