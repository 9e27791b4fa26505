//! 地块 CSV → GeoJSON FeatureCollection
//!
//! CSV 无表头，每行至少 13 列，列顺序固定（见 [`PlotRecord`]）。
//! 任意一行解析失败即整体失败，不返回部分结果。

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use tracing::{debug, trace};

use super::structure_code::StructureCode;
use crate::errors::{PlotmapError, Result};

/// 每行最少列数
pub const MIN_FIELDS: usize = 13;

/// 技术属性列（索引 3..=12），按文件中的顺序
pub const TECHNICAL_FIELDS: [&str; 10] = [
    "technicalUsefulSurface",
    "technicalBuiltSurface",
    "technicalBuildingAccessFootpath",
    "technicalBuildingAccessAutomobiles",
    "technicalBuildingStructure",
    "technicalCommunalSpaces",
    "technicalExternalSpaces",
    "technicalBuildingPadding",
    "technicalMaxHeight",
    "technicalUtilities",
];

const FIRST_TECHNICAL_INDEX: usize = 3;
const STRUCTURE_INDEX: usize = 7;

/// CSV 中的一行地块数据
#[derive(Debug, Clone, PartialEq)]
pub struct PlotRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    /// 九个原样透传的技术属性（字段名, 值）
    pub technical: Vec<(&'static str, String)>,
    /// 原始结构编码（第 7 列）
    pub raw_structure: String,
}

impl PlotRecord {
    /// 从 CSV 记录解析，`row` 为 1-based 行号（用于错误信息）
    pub fn from_csv_record(record: &StringRecord, row: usize) -> Result<Self> {
        if record.len() < MIN_FIELDS {
            return Err(PlotmapError::csv_parse(format!(
                "row {}: expected at least {} fields, got {}",
                row,
                MIN_FIELDS,
                record.len()
            )));
        }

        let latitude = parse_coordinate(record, row, 0, "latitude")?;
        let longitude = parse_coordinate(record, row, 1, "longitude")?;
        let name = field(record, 2).to_string();

        let mut technical = Vec::with_capacity(TECHNICAL_FIELDS.len() - 1);
        let mut raw_structure = String::new();
        for (offset, key) in TECHNICAL_FIELDS.iter().enumerate() {
            let index = FIRST_TECHNICAL_INDEX + offset;
            let value = field(record, index).to_string();
            if index == STRUCTURE_INDEX {
                raw_structure = value;
            } else {
                technical.push((*key, value));
            }
        }

        Ok(Self {
            latitude,
            longitude,
            name,
            technical,
            raw_structure,
        })
    }

    /// 转换为 GeoJSON Feature，`id` 为 1-based 顺序号
    pub fn into_feature(self, id: u64) -> Feature {
        let structure = StructureCode::normalize(&self.raw_structure);
        let levels = structure.levels();

        let mut properties = JsonObject::new();
        properties.insert("id".to_string(), JsonValue::from(id));
        properties.insert("name".to_string(), JsonValue::from(self.name));
        for (key, value) in self.technical {
            properties.insert(key.to_string(), JsonValue::from(value));
        }
        properties.insert(
            "technicalBuildingStructure".to_string(),
            JsonValue::from(structure.into_inner()),
        );
        properties.insert("mansarda".to_string(), JsonValue::from(levels.mansarda));
        properties.insert("etaj".to_string(), JsonValue::from(levels.etaj));
        properties.insert("demisol".to_string(), JsonValue::from(levels.demisol));
        properties.insert("subsol".to_string(), JsonValue::from(levels.subsol));

        Feature {
            bbox: None,
            // GeoJSON 坐标顺序为 [经度, 纬度]
            geometry: Some(Geometry::new(Value::Point(vec![
                self.longitude,
                self.latitude,
            ]))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

#[inline]
fn field(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or_default()
}

fn parse_coordinate(record: &StringRecord, row: usize, index: usize, what: &str) -> Result<f64> {
    let raw = field(record, index);
    raw.trim().parse::<f64>().map_err(|e| {
        PlotmapError::csv_parse(format!(
            "row {}, column {}: invalid {} {:?}: {}",
            row,
            index + 1,
            what,
            raw,
            e
        ))
    })
}

/// 从任意 reader 解析地块数据
pub fn parse_plots<R: Read>(reader: R) -> Result<FeatureCollection> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut features = Vec::new();
    let mut record = StringRecord::new();
    let mut row = 0usize;

    while csv_reader.read_record(&mut record)? {
        row += 1;
        let plot = PlotRecord::from_csv_record(&record, row)?;
        trace!("Parsed plot row {}: {}", row, plot.name);
        features.push(plot.into_feature(row as u64));
    }

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

/// 读取 CSV 文件并解析
pub fn load_plots_from_path<P: AsRef<Path>>(path: P) -> Result<FeatureCollection> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        PlotmapError::file_operation(format!(
            "Failed to open plots file {}: {}",
            path.display(),
            e
        ))
    })?;

    let collection = parse_plots(BufReader::new(file))?;
    debug!(
        "Loaded {} plots from {}",
        collection.features.len(),
        path.display()
    );
    Ok(collection)
}

/// 地块加载服务
///
/// 每次请求重新读取文件，不做跨请求缓存。
#[derive(Debug, Clone)]
pub struct PlotService {
    csv_path: PathBuf,
}

impl PlotService {
    pub fn new<P: Into<PathBuf>>(csv_path: P) -> Self {
        Self {
            csv_path: csv_path.into(),
        }
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    /// 加载全部地块（在阻塞线程池中读取文件）
    pub async fn load_plots(&self) -> Result<FeatureCollection> {
        let path = self.csv_path.clone();
        tokio::task::spawn_blocking(move || load_plots_from_path(path))
            .await
            .map_err(|e| PlotmapError::file_operation(format!("Plot loading task failed: {}", e)))?
    }

    /// 文件是否存在且可读（用于健康检查）
    pub fn is_readable(&self) -> bool {
        File::open(&self.csv_path).is_ok()
    }
}
