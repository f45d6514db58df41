use serde::{Deserialize, Serialize};
use std::fmt;

pub mod date;
pub mod protocol;
pub mod record;

pub use date::Timestamp;
pub use record::{NewGeneration, StoredGeneration};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_PROJECT_ID: &str = "X-Project-Id";
pub const COLLECTION_GENERATIONS: &str = "generations";
pub const SLIDER_MIN: u8 = 0;
pub const SLIDER_MAX: u8 = 100;
pub const SLIDER_DEFAULT: u8 = 50;

/// 可选的族裔列表（向导第 3 步）
pub const ETHNICITIES: [&str; 8] = [
    "Caucasian",
    "African American",
    "Asian",
    "Hispanic/Latino",
    "Middle Eastern",
    "Native American",
    "Mixed Race",
    "Other",
];

// =========================================================
// 用户与会话 (User & Session)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "displayName", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl User {
    /// 欢迎语中使用的名字：优先显示名，否则取邮箱 @ 之前的部分
    pub fn greeting_name(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => self.email.split('@').next().unwrap_or_default(),
        }
    }
}

/// 认证状态快照
///
/// 由会话观察者持有，每次认证事件都会整体替换。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub user: Option<User>,
    #[serde(alias = "isLoading")]
    pub loading: bool,
}

impl SessionState {
    pub fn signed_in(user: User) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            user: None,
            loading: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 服装风格
///
/// 持久化为展示名称（如 `"Classical Art"`）；无法识别的值保留在 `Custom` 中，
/// 以免旧数据在读取时丢失。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FashionStyle {
    Casual,
    Business,
    Formal,
    Sporty,
    Bohemian,
    Gothic,
    Vintage,
    Artistic,
    ClassicalArt,
    Renaissance,
    FigureStudy,
    Custom(String),
}

impl FashionStyle {
    pub const CATALOG: [FashionStyle; 11] = [
        FashionStyle::Casual,
        FashionStyle::Business,
        FashionStyle::Formal,
        FashionStyle::Sporty,
        FashionStyle::Bohemian,
        FashionStyle::Gothic,
        FashionStyle::Vintage,
        FashionStyle::Artistic,
        FashionStyle::ClassicalArt,
        FashionStyle::Renaissance,
        FashionStyle::FigureStudy,
    ];

    pub fn label(&self) -> &str {
        match self {
            FashionStyle::Casual => "Casual",
            FashionStyle::Business => "Business",
            FashionStyle::Formal => "Formal",
            FashionStyle::Sporty => "Sporty",
            FashionStyle::Bohemian => "Bohemian",
            FashionStyle::Gothic => "Gothic",
            FashionStyle::Vintage => "Vintage",
            FashionStyle::Artistic => "Artistic",
            FashionStyle::ClassicalArt => "Classical Art",
            FashionStyle::Renaissance => "Renaissance",
            FashionStyle::FigureStudy => "Figure Study",
            FashionStyle::Custom(name) => name,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            FashionStyle::Casual => "👕",
            FashionStyle::Business => "👔",
            FashionStyle::Formal => "🤵",
            FashionStyle::Sporty => "🏃",
            FashionStyle::Bohemian => "🌸",
            FashionStyle::Gothic => "🖤",
            FashionStyle::Vintage => "📻",
            FashionStyle::ClassicalArt => "🏛️",
            FashionStyle::Artistic
            | FashionStyle::Renaissance
            | FashionStyle::FigureStudy
            | FashionStyle::Custom(_) => "🎨",
        }
    }

    /// 是否容易被内容安全系统拒绝（失败后需要改用保守提示词重试）
    pub fn is_safety_sensitive(&self) -> bool {
        matches!(self, FashionStyle::FigureStudy)
    }
}

impl From<String> for FashionStyle {
    fn from(value: String) -> Self {
        Self::CATALOG
            .into_iter()
            .find(|style| style.label().eq_ignore_ascii_case(value.trim()))
            .unwrap_or(FashionStyle::Custom(value))
    }
}

impl From<FashionStyle> for String {
    fn from(style: FashionStyle) -> Self {
        match style {
            FashionStyle::Custom(name) => name,
            other => other.label().to_string(),
        }
    }
}

impl fmt::Display for FashionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 场景背景，持久化方式同 `FashionStyle`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Background {
    Studio,
    Nature,
    Urban,
    Beach,
    Abstract,
    Minimal,
    Custom(String),
}

impl Background {
    pub const CATALOG: [Background; 6] = [
        Background::Studio,
        Background::Nature,
        Background::Urban,
        Background::Beach,
        Background::Abstract,
        Background::Minimal,
    ];

    pub fn label(&self) -> &str {
        match self {
            Background::Studio => "Studio",
            Background::Nature => "Nature",
            Background::Urban => "Urban",
            Background::Beach => "Beach",
            Background::Abstract => "Abstract",
            Background::Minimal => "Minimal",
            Background::Custom(name) => name,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Background::Studio => "🎬",
            Background::Nature => "🌲",
            Background::Urban => "🏙️",
            Background::Beach => "🏖️",
            Background::Abstract | Background::Custom(_) => "🎨",
            Background::Minimal => "⚪",
        }
    }
}

impl From<String> for Background {
    fn from(value: String) -> Self {
        Self::CATALOG
            .into_iter()
            .find(|bg| bg.label().eq_ignore_ascii_case(value.trim()))
            .unwrap_or(Background::Custom(value))
    }
}

impl From<Background> for String {
    fn from(bg: Background) -> Self {
        match bg {
            Background::Custom(name) => name,
            other => other.label().to_string(),
        }
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =========================================================
// 特征滑块 (Feature Sliders)
// =========================================================

/// 0..=100 的滑块取值，构造时自动截断
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SliderValue(u8);

impl SliderValue {
    pub fn new(value: u8) -> Self {
        Self(value.clamp(SLIDER_MIN, SLIDER_MAX))
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl Default for SliderValue {
    fn default() -> Self {
        Self(SLIDER_DEFAULT)
    }
}

impl<'de> Deserialize<'de> for SliderValue {
    /// 兼容旧数据：滑块值可能是数字，也可能是 `[50]` 这样的单元素数组
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            List(Vec<f64>),
        }

        let raw = match Raw::deserialize(deserializer)? {
            Raw::Number(n) => n,
            Raw::List(list) => list.first().copied().unwrap_or(SLIDER_DEFAULT as f64),
        };
        Ok(Self::new(raw.round().clamp(0.0, SLIDER_MAX as f64) as u8))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacialFeature {
    EyeSize,
    NoseShape,
    LipFullness,
    Jawline,
    Cheekbones,
}

impl FacialFeature {
    pub const ALL: [FacialFeature; 5] = [
        FacialFeature::EyeSize,
        FacialFeature::NoseShape,
        FacialFeature::LipFullness,
        FacialFeature::Jawline,
        FacialFeature::Cheekbones,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FacialFeature::EyeSize => "Eye Size",
            FacialFeature::NoseShape => "Nose Shape",
            FacialFeature::LipFullness => "Lip Fullness",
            FacialFeature::Jawline => "Jawline",
            FacialFeature::Cheekbones => "Cheekbones",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyFeature {
    Height,
    Build,
    Musculature,
}

impl BodyFeature {
    pub const ALL: [BodyFeature; 3] = [
        BodyFeature::Height,
        BodyFeature::Build,
        BodyFeature::Musculature,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BodyFeature::Height => "Height",
            BodyFeature::Build => "Build",
            BodyFeature::Musculature => "Musculature",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FacialFeatures {
    pub eye_size: SliderValue,
    pub nose_shape: SliderValue,
    pub lip_fullness: SliderValue,
    pub jawline: SliderValue,
    pub cheekbones: SliderValue,
}

impl FacialFeatures {
    pub fn get(&self, feature: FacialFeature) -> SliderValue {
        match feature {
            FacialFeature::EyeSize => self.eye_size,
            FacialFeature::NoseShape => self.nose_shape,
            FacialFeature::LipFullness => self.lip_fullness,
            FacialFeature::Jawline => self.jawline,
            FacialFeature::Cheekbones => self.cheekbones,
        }
    }

    pub fn set(&mut self, feature: FacialFeature, value: u8) {
        let value = SliderValue::new(value);
        match feature {
            FacialFeature::EyeSize => self.eye_size = value,
            FacialFeature::NoseShape => self.nose_shape = value,
            FacialFeature::LipFullness => self.lip_fullness = value,
            FacialFeature::Jawline => self.jawline = value,
            FacialFeature::Cheekbones => self.cheekbones = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BodyFeatures {
    pub height: SliderValue,
    pub build: SliderValue,
    pub musculature: SliderValue,
}

impl BodyFeatures {
    pub fn get(&self, feature: BodyFeature) -> SliderValue {
        match feature {
            BodyFeature::Height => self.height,
            BodyFeature::Build => self.build,
            BodyFeature::Musculature => self.musculature,
        }
    }

    pub fn set(&mut self, feature: BodyFeature, value: u8) {
        let value = SliderValue::new(value);
        match feature {
            BodyFeature::Height => self.height = value,
            BodyFeature::Build => self.build = value,
            BodyFeature::Musculature => self.musculature = value,
        }
    }
}

// =========================================================
// 生成记录 (Generation Record)
// =========================================================

/// 规范化后的生成记录
///
/// 只在仓储边界由 `StoredGeneration` 转换而来，内部代码不再关心字段命名风格。
/// 创建后 `generated_images` 不再变化，只有 `is_favorite` 会被切换。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub id: String,
    pub user_id: String,
    pub reference_urls: Vec<String>,
    pub gender: Gender,
    pub ethnicity: String,
    pub fashion_style: FashionStyle,
    pub facial_features: FacialFeatures,
    pub body_features: BodyFeatures,
    pub background: Background,
    pub custom_prompt: Option<String>,
    pub generated_images: Vec<String>,
    pub is_favorite: bool,
    pub created_at: Timestamp,
}

impl GenerationRecord {
    pub fn cover_image(&self) -> Option<&str> {
        self.generated_images.first().map(String::as_str)
    }

    /// 历史页下载使用的文件名，`index` 从 0 开始
    pub fn download_name(&self, index: usize) -> String {
        format!("model-{}-{}.png", self.id, index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fashion_style_parses_labels_case_insensitively() {
        assert_eq!(
            FashionStyle::from("classical art".to_string()),
            FashionStyle::ClassicalArt
        );
        assert_eq!(
            FashionStyle::from("Figure Study".to_string()),
            FashionStyle::FigureStudy
        );
        assert_eq!(
            FashionStyle::from("Cyberpunk".to_string()),
            FashionStyle::Custom("Cyberpunk".to_string())
        );
    }

    #[test]
    fn test_fashion_style_serializes_as_label() {
        let json = serde_json::to_string(&FashionStyle::ClassicalArt).unwrap();
        assert_eq!(json, "\"Classical Art\"");
        let back: FashionStyle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, FashionStyle::ClassicalArt);
    }

    #[test]
    fn test_only_figure_study_is_safety_sensitive() {
        let sensitive: Vec<_> = FashionStyle::CATALOG
            .into_iter()
            .filter(|s| s.is_safety_sensitive())
            .collect();
        assert_eq!(sensitive, vec![FashionStyle::FigureStudy]);
    }

    #[test]
    fn test_slider_value_clamps_and_defaults() {
        assert_eq!(SliderValue::new(250).get(), 100);
        assert_eq!(SliderValue::default().get(), 50);

        let mut face = FacialFeatures::default();
        face.set(FacialFeature::Jawline, 80);
        assert_eq!(face.get(FacialFeature::Jawline).get(), 80);
        assert_eq!(face.get(FacialFeature::EyeSize).get(), 50);
    }

    #[test]
    fn test_features_accept_array_and_number_sliders() {
        let face: FacialFeatures =
            serde_json::from_str(r#"{"eyeSize":[70],"noseShape":30,"jawline":[]}"#).unwrap();
        assert_eq!(face.eye_size.get(), 70);
        assert_eq!(face.nose_shape.get(), 30);
        assert_eq!(face.jawline.get(), 50);
        assert_eq!(face.cheekbones.get(), 50);
    }

    #[test]
    fn test_greeting_name_falls_back_to_email() {
        let mut user = User {
            id: "u1".into(),
            email: "ada@example.com".into(),
            display_name: None,
        };
        assert_eq!(user.greeting_name(), "ada");
        user.display_name = Some("Ada L.".into());
        assert_eq!(user.greeting_name(), "Ada L.");
    }

    #[test]
    fn test_session_state_accepts_is_loading_alias() {
        let state: SessionState =
            serde_json::from_str(r#"{"user":null,"isLoading":false}"#).unwrap();
        assert_eq!(state, SessionState::signed_out());
        assert!(SessionState::default().loading);
    }
}
