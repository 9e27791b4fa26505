//! 地块数据服务
//!
//! - `structure_code`: 建筑结构编码的规范化与解码
//! - `loader`: CSV → GeoJSON FeatureCollection

pub mod loader;
pub mod structure_code;

pub use loader::{PlotRecord, PlotService, load_plots_from_path, parse_plots};
pub use structure_code::{DecodedLevels, LevelTag, StructureCode};
