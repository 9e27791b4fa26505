//! Places API 请求/响应类型
//!
//! 只反序列化用到的字段，其余字段忽略。

use serde::{Deserialize, Serialize};

/// API 返回的状态码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlacesStatus {
    Ok,
    ZeroResults,
    InvalidRequest,
    OverQueryLimit,
    RequestDenied,
    NotFound,
    UnknownError,
    #[serde(other)]
    Unrecognized,
}

impl PlacesStatus {
    pub fn is_ok(status: Option<Self>) -> bool {
        status == Some(PlacesStatus::Ok)
    }
}

/// 附近搜索请求
#[derive(Debug, Clone, PartialEq)]
pub struct NearbySearchRequest {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// 搜索半径，单位由 API 定义
    pub radius: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NearbySearchResponse {
    #[serde(default)]
    pub status: Option<PlacesStatus>,
    #[serde(default)]
    pub results: Vec<NearbyResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NearbyResult {
    #[serde(default)]
    pub place_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub photos: Vec<PlacePhoto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlacePhoto {
    pub photo_reference: String,
    #[serde(default)]
    pub html_attributions: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailsResponse {
    #[serde(default)]
    pub status: Option<PlacesStatus>,
    #[serde(default)]
    pub result: PlaceDetails,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub international_phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

/// 返回给地图页面的地块详情
///
/// 所有字段均可缺失，缺失字段不出现在 JSON 中。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_credit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nearby_response() {
        let json = r#"{
            "status": "OK",
            "results": [
                {"place_id": "abc", "name": "Plot A", "photos": [
                    {"photo_reference": "ref-1", "html_attributions": ["<a>Someone</a>"], "width": 800}
                ]},
                {"place_id": "def"}
            ],
            "html_attributions": []
        }"#;
        let resp: NearbySearchResponse = serde_json::from_str(json).unwrap();
        assert!(PlacesStatus::is_ok(resp.status));
        assert_eq!(resp.results.len(), 2);
        assert_eq!(resp.results[0].photos[0].photo_reference, "ref-1");
        assert!(resp.results[1].photos.is_empty());
    }

    #[test]
    fn test_unknown_status() {
        let resp: NearbySearchResponse =
            serde_json::from_str(r#"{"status": "SOMETHING_NEW", "results": []}"#).unwrap();
        assert_eq!(resp.status, Some(PlacesStatus::Unrecognized));
        assert!(!PlacesStatus::is_ok(resp.status));

        let resp: NearbySearchResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(!PlacesStatus::is_ok(resp.status));
    }

    #[test]
    fn test_property_detail_omits_missing_fields() {
        let detail = PropertyDetail {
            formatted_address: Some("Str. Lunga 1".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json, serde_json::json!({"formattedAddress": "Str. Lunga 1"}));
    }
}
