//! 生成记录的持久化形态
//!
//! 后端历史数据同时存在 snake_case 与 camelCase 两种字段命名，
//! 列表字段有时是逗号拼接的字符串，收藏标记有时是 0/1 数字。
//! 这里统一在反序列化阶段吸收这些差异：写入一律使用 snake_case，
//! 读取时通过 `alias` 接受 camelCase。

use crate::{
    Background, BodyFeatures, FacialFeatures, FashionStyle, Gender, GenerationRecord, Timestamp,
};
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};

/// 数据库中的一行生成记录（读取用）
#[derive(Debug, Clone, Deserialize)]
pub struct StoredGeneration {
    pub id: String,
    #[serde(alias = "userId")]
    pub user_id: String,
    #[serde(
        default,
        alias = "referenceFiles",
        alias = "reference_images",
        alias = "referenceImages",
        deserialize_with = "url_list"
    )]
    pub reference_files: Vec<String>,
    pub gender: Gender,
    #[serde(default)]
    pub ethnicity: String,
    #[serde(alias = "fashionStyle")]
    pub fashion_style: FashionStyle,
    #[serde(default, alias = "facialFeatures", deserialize_with = "embedded_json")]
    pub facial_features: FacialFeatures,
    #[serde(default, alias = "bodyFeatures", deserialize_with = "embedded_json")]
    pub body_features: BodyFeatures,
    pub background: Background,
    #[serde(
        default,
        alias = "customBackground",
        alias = "custom_prompt",
        alias = "customPrompt",
        deserialize_with = "optional_text"
    )]
    pub custom_background: Option<String>,
    #[serde(default, alias = "generatedImages", deserialize_with = "url_list")]
    pub generated_images: Vec<String>,
    #[serde(default, alias = "isFavorite", deserialize_with = "truthy_flag")]
    pub is_favorite: bool,
    #[serde(default, alias = "createdAt", deserialize_with = "flexible_timestamp")]
    pub created_at: Option<Timestamp>,
}

impl StoredGeneration {
    /// 转换为规范化记录；缺失创建时间的行使用 `fallback_created_at`
    pub fn into_record(self, fallback_created_at: Timestamp) -> GenerationRecord {
        GenerationRecord {
            id: self.id,
            user_id: self.user_id,
            reference_urls: self.reference_files,
            gender: self.gender,
            ethnicity: self.ethnicity,
            fashion_style: self.fashion_style,
            facial_features: self.facial_features,
            body_features: self.body_features,
            background: self.background,
            custom_prompt: self.custom_background,
            generated_images: self.generated_images,
            is_favorite: self.is_favorite,
            created_at: self.created_at.unwrap_or(fallback_created_at),
        }
    }
}

/// 新建记录时写入数据库的载荷
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewGeneration {
    pub user_id: String,
    pub reference_files: String,
    pub gender: Gender,
    pub ethnicity: String,
    pub fashion_style: FashionStyle,
    pub facial_features: String,
    pub body_features: String,
    pub background: Background,
    pub custom_background: String,
    pub generated_images: String,
    pub is_favorite: u8,
    pub created_at: String,
}

impl NewGeneration {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: &str,
        reference_urls: &[String],
        gender: Gender,
        ethnicity: &str,
        fashion_style: &FashionStyle,
        facial_features: &FacialFeatures,
        body_features: &BodyFeatures,
        background: &Background,
        custom_prompt: &str,
        generated_images: &[String],
        created_at: Timestamp,
    ) -> serde_json::Result<Self> {
        Ok(Self {
            user_id: user_id.to_string(),
            reference_files: reference_urls.join(","),
            gender,
            ethnicity: ethnicity.to_string(),
            fashion_style: fashion_style.clone(),
            facial_features: serde_json::to_string(facial_features)?,
            body_features: serde_json::to_string(body_features)?,
            background: background.clone(),
            custom_background: custom_prompt.to_string(),
            generated_images: generated_images.join(","),
            is_favorite: 0,
            created_at: created_at.to_rfc3339(),
        })
    }
}

// =========================================================
// 宽松反序列化工具 (Lenient Deserializers)
// =========================================================

/// 逗号拼接的字符串或 JSON 数组，去掉空白项
fn url_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Joined(String),
        List(Vec<String>),
        Null(()),
    }

    let items = match Raw::deserialize(deserializer)? {
        Raw::Joined(s) => s.split(',').map(str::to_string).collect(),
        Raw::List(list) => list,
        Raw::Null(()) => Vec::new(),
    };
    Ok(items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

/// 以 JSON 字符串嵌入的对象，或直接是对象
fn embedded_json<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(T::default()),
        serde_json::Value::String(s) if s.trim().is_empty() => Ok(T::default()),
        serde_json::Value::String(s) => {
            serde_json::from_str(&s).map_err(serde::de::Error::custom)
        }
        other => serde_json::from_value(other).map_err(serde::de::Error::custom),
    }
}

/// 空字符串视为未填写
fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = Option::<String>::deserialize(deserializer)?;
    Ok(text.filter(|s| !s.trim().is_empty()))
}

/// 收藏标记：布尔值、数字 (>0 为真) 或数字字符串
fn truthy_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Number(f64),
        Text(String),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Bool(b) => b,
        Raw::Number(n) => n > 0.0,
        Raw::Text(s) => match s.trim() {
            "true" => true,
            other => other.parse::<f64>().map(|n| n > 0.0).unwrap_or(false),
        },
        Raw::Null(()) => false,
    })
}

/// 时间字符串或毫秒数字
fn flexible_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Millis(i64),
        Text(String),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Millis(ms) => Some(Timestamp::new(ms)),
        Raw::Text(s) => Timestamp::parse(&s),
        Raw::Null(()) => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snake_and_camel_rows_normalize_identically() {
        let snake = json!({
            "id": "g1",
            "user_id": "u1",
            "reference_files": "https://cdn/a.png, https://cdn/b.png",
            "gender": "female",
            "ethnicity": "Asian",
            "fashion_style": "Renaissance",
            "facial_features": "{\"eyeSize\":[70],\"noseShape\":[50],\"lipFullness\":[50],\"jawline\":[50],\"cheekbones\":[50]}",
            "body_features": "{\"height\":60,\"build\":50,\"musculature\":40}",
            "background": "Beach",
            "custom_background": "sunset",
            "generated_images": "https://cdn/1.png,https://cdn/2.png",
            "is_favorite": 1,
            "created_at": "2024-05-01 08:00:00"
        });
        let camel = json!({
            "id": "g1",
            "userId": "u1",
            "referenceImages": ["https://cdn/a.png", "https://cdn/b.png"],
            "gender": "female",
            "ethnicity": "Asian",
            "fashionStyle": "Renaissance",
            "facialFeatures": {"eyeSize": 70},
            "bodyFeatures": {"height": [60], "musculature": [40]},
            "background": "Beach",
            "customPrompt": "sunset",
            "generatedImages": ["https://cdn/1.png", "https://cdn/2.png"],
            "isFavorite": true,
            "createdAt": "2024-05-01T08:00:00Z"
        });

        let fallback = Timestamp::new(0);
        let a: StoredGeneration = serde_json::from_value(snake).unwrap();
        let b: StoredGeneration = serde_json::from_value(camel).unwrap();
        let a = a.into_record(fallback);
        let b = b.into_record(fallback);

        assert_eq!(a, b);
        assert_eq!(a.reference_urls.len(), 2);
        assert_eq!(a.facial_features.eye_size.get(), 70);
        assert_eq!(a.body_features.height.get(), 60);
        assert_eq!(a.fashion_style, FashionStyle::Renaissance);
        assert!(a.is_favorite);
    }

    #[test]
    fn test_favorite_flag_variants() {
        let cases = [
            (json!(0), false),
            (json!(1), true),
            (json!("0"), false),
            (json!("1"), true),
            (json!(false), false),
            (json!(true), true),
            (json!(null), false),
        ];
        for (flag, expected) in cases {
            let row = json!({
                "id": "g", "user_id": "u", "gender": "male",
                "fashion_style": "Casual", "background": "Studio",
                "is_favorite": flag
            });
            let stored: StoredGeneration = serde_json::from_value(row).unwrap();
            assert_eq!(stored.is_favorite, expected);
        }
    }

    #[test]
    fn test_missing_optional_fields_use_defaults() {
        let row = json!({
            "id": "g", "user_id": "u", "gender": "male",
            "fashion_style": "Casual", "background": "Studio",
            "custom_background": "   ",
            "facial_features": ""
        });
        let record = serde_json::from_value::<StoredGeneration>(row)
            .unwrap()
            .into_record(Timestamp::new(42));
        assert!(record.custom_prompt.is_none());
        assert!(record.generated_images.is_empty());
        assert_eq!(record.facial_features, FacialFeatures::default());
        assert_eq!(record.created_at, Timestamp::new(42));
    }

    #[test]
    fn test_new_generation_payload_shape() {
        let payload = NewGeneration::new(
            "u1",
            &["https://cdn/a.png".to_string(), "https://cdn/b.png".to_string()],
            Gender::Male,
            "Asian",
            &FashionStyle::Business,
            &FacialFeatures::default(),
            &BodyFeatures::default(),
            &Background::Urban,
            "",
            &["https://cdn/1.png".to_string()],
            Timestamp::new(1_714_550_400_000),
        )
        .unwrap();

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["reference_files"], "https://cdn/a.png,https://cdn/b.png");
        assert_eq!(value["fashion_style"], "Business");
        assert_eq!(value["gender"], "male");
        assert_eq!(value["is_favorite"], 0);
        assert_eq!(value["created_at"], "2024-05-01T08:00:00.000Z");
        assert_eq!(
            value["body_features"],
            "{\"height\":50,\"build\":50,\"musculature\":50}"
        );
    }
}
