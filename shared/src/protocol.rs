use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for BaaS Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

/// A trait that defines the request-response relationship and metadata for a BaaS endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// The URL path, relative to the BaaS base URL.
    fn path(&self) -> String;
}

// =========================================================
// Auth
// =========================================================

/// Fetch the signed-in user (401 when there is no session)
#[derive(Debug, Serialize)]
pub struct CurrentUserRequest;

impl ApiRequest for CurrentUserRequest {
    type Response = crate::User;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/auth/me".to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct LogoutRequest;

impl ApiRequest for LogoutRequest {
    type Response = serde_json::Value;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/auth/logout".to_string()
    }
}

/// Hosted sign-in page; the browser is redirected here rather than calling it.
pub fn login_path(redirect_url: &str) -> String {
    format!("/auth/login?redirect_url={}", urlencoding::encode(redirect_url))
}

// =========================================================
// Database
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

/// `where` / `orderBy` of a list query
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "where", default)]
    pub filter: serde_json::Map<String, serde_json::Value>,
    /// 单个 `{ field: direction }` 条目
    #[serde(rename = "orderBy", default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub order_by: serde_json::Map<String, serde_json::Value>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter_eq(mut self, field: &str, value: impl Into<serde_json::Value>) -> Self {
        self.filter.insert(field.to_string(), value.into());
        self
    }

    pub fn order_by(mut self, field: &str, direction: SortDirection) -> Self {
        self.order_by.clear();
        self.order_by
            .insert(field.to_string(), direction.as_str().into());
        self
    }

    /// 当前排序字段与方向
    pub fn sort(&self) -> Option<(&str, SortDirection)> {
        let (field, direction) = self.order_by.iter().next()?;
        let direction = SortDirection::parse(direction.as_str()?)?;
        Some((field.as_str(), direction))
    }
}

#[derive(Debug, Serialize)]
pub struct ListRecordsRequest<'a> {
    #[serde(skip)]
    pub collection: &'a str,
    #[serde(flatten)]
    pub query: &'a ListQuery,
}

impl ApiRequest for ListRecordsRequest<'_> {
    type Response = Vec<serde_json::Value>;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/db/{}/list", self.collection)
    }
}

#[derive(Debug, Serialize)]
pub struct CreateRecordRequest<'a> {
    #[serde(skip)]
    pub collection: &'a str,
    #[serde(flatten)]
    pub record: &'a serde_json::Value,
}

impl ApiRequest for CreateRecordRequest<'_> {
    type Response = serde_json::Value;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/db/{}", self.collection)
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateRecordRequest<'a> {
    #[serde(skip)]
    pub collection: &'a str,
    #[serde(skip)]
    pub id: &'a str,
    #[serde(flatten)]
    pub patch: &'a serde_json::Value,
}

impl ApiRequest for UpdateRecordRequest<'_> {
    type Response = serde_json::Value;
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn path(&self) -> String {
        format!("/db/{}/{}", self.collection, urlencoding::encode(self.id))
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteRecordRequest<'a> {
    #[serde(skip)]
    pub collection: &'a str,
    #[serde(skip)]
    pub id: &'a str,
}

impl ApiRequest for DeleteRecordRequest<'_> {
    type Response = serde_json::Value;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/db/{}/{}", self.collection, urlencoding::encode(self.id))
    }
}

// =========================================================
// Storage
// =========================================================

pub const UPLOAD_PATH: &str = "/storage/upload";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UploadOptions {
    pub upsert: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedObject {
    #[serde(alias = "publicUrl")]
    pub public_url: String,
}

// =========================================================
// AI
// =========================================================

/// Prompt-to-image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateImageRequest {
    pub prompt: String,
    pub size: String,
    pub quality: String,
    pub n: u8,
}

impl ApiRequest for GenerateImageRequest {
    type Response = ImageResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/ai/images/generate".to_string()
    }
}

/// Image-to-image: keeps the subject of `images` while applying `prompt`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifyImageRequest {
    pub images: Vec<String>,
    pub prompt: String,
    pub size: String,
    pub quality: String,
    pub n: u8,
}

impl ApiRequest for ModifyImageRequest {
    type Response = ImageResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/ai/images/modify".to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageResponse {
    #[serde(default)]
    pub data: Vec<ImageData>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ImageResponse {
    /// 非空的图片 URL（保持顺序）
    pub fn urls(&self) -> Vec<String> {
        self.data
            .iter()
            .filter_map(|d| d.url.as_deref())
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_query_wire_shape() {
        let query = ListQuery::new()
            .filter_eq("user_id", "u1")
            .order_by("created_at", SortDirection::Desc);
        let req = ListRecordsRequest {
            collection: "generations",
            query: &query,
        };
        assert_eq!(req.path(), "/db/generations/list");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "where": { "user_id": "u1" }, "orderBy": { "created_at": "desc" } })
        );
        assert_eq!(query.sort(), Some(("created_at", SortDirection::Desc)));
    }

    #[test]
    fn test_list_query_without_order_omits_key() {
        let query = ListQuery::new().filter_eq("user_id", "u1");
        assert_eq!(query.sort(), None);
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({ "where": { "user_id": "u1" } })
        );
    }

    #[test]
    fn test_record_paths_escape_ids() {
        let patch = json!({ "is_favorite": 1 });
        let req = UpdateRecordRequest {
            collection: "generations",
            id: "a/b",
            patch: &patch,
        };
        assert_eq!(req.path(), "/db/generations/a%2Fb");
        assert_eq!(serde_json::to_value(&req).unwrap(), patch);
    }

    #[test]
    fn test_login_path_encodes_redirect() {
        assert_eq!(
            login_path("https://app.example/?x=1"),
            "/auth/login?redirect_url=https%3A%2F%2Fapp.example%2F%3Fx%3D1"
        );
    }

    #[test]
    fn test_image_response_urls_skip_blanks() {
        let res: ImageResponse = serde_json::from_value(json!({
            "data": [{ "url": "https://cdn/1.png" }, { "url": "" }, {}, { "url": " https://cdn/2.png " }]
        }))
        .unwrap();
        assert_eq!(res.urls(), vec!["https://cdn/1.png", "https://cdn/2.png"]);
    }

    #[test]
    fn test_uploaded_object_accepts_camel_case() {
        let obj: UploadedObject =
            serde_json::from_value(json!({ "publicUrl": "https://cdn/r.png" })).unwrap();
        assert_eq!(obj.public_url, "https://cdn/r.png");
    }
}
