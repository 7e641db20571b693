//! Carousel configuration as the page supplies it.

use folio_core::Duration;
use serde::{Deserialize, Serialize};

use super::autoplay::DEFAULT_AUTOPLAY_DURATION;
use super::gesture::SwipeConfig;
use super::loop_window::{DEFAULT_SCROLL_COPIES, MIN_LOOP_COPIES};
use super::navigator::WrapPolicy;

/// An opaque renderable reference.
///
/// Deserializes from either a bare URL string or `{ "src", "caption" }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ItemRepr")]
pub struct Item {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl Item {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            caption: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ItemRepr {
    Src(String),
    Full {
        src: String,
        #[serde(default)]
        caption: Option<String>,
    },
}

impl From<ItemRepr> for Item {
    fn from(repr: ItemRepr) -> Self {
        match repr {
            ItemRepr::Src(src) => Item { src, caption: None },
            ItemRepr::Full { src, caption } => Item { src, caption },
        }
    }
}

/// How the current index is tracked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResolutionStrategy {
    /// Integer slot on a translated track.
    #[default]
    Index,
    /// Native scrolling, reconciled by measuring the settled strip.
    ScrollProximity,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CarouselConfig {
    pub items: Vec<Item>,
    pub visible_count: usize,
    #[serde(rename = "loop")]
    pub looped: bool,
    pub with_indicator: bool,
    pub initial_index: Option<usize>,
    /// Autoplay is off when absent.
    pub autoplay_ms: Option<u64>,
    pub resolution: ResolutionStrategy,
    pub swipe: SwipeConfig,
    /// Copies rendered by a looping scroll strip. Must be odd so a middle
    /// copy exists.
    pub copies: usize,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            visible_count: 1,
            looped: false,
            with_indicator: false,
            initial_index: None,
            autoplay_ms: None,
            resolution: ResolutionStrategy::Index,
            swipe: SwipeConfig::default(),
            copies: DEFAULT_SCROLL_COPIES,
        }
    }
}

impl CarouselConfig {
    pub fn new<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            items: items.into_iter().map(Item::new).collect(),
            ..Self::default()
        }
    }

    pub fn visible_count(mut self, visible_count: usize) -> Self {
        self.visible_count = visible_count;
        self
    }

    pub fn looped(mut self, looped: bool) -> Self {
        self.looped = looped;
        self
    }

    pub fn with_indicator(mut self, with_indicator: bool) -> Self {
        self.with_indicator = with_indicator;
        self
    }

    pub fn initial_index(mut self, index: usize) -> Self {
        self.initial_index = Some(index);
        self
    }

    pub fn autoplay(mut self, duration: Duration) -> Self {
        self.autoplay_ms = Some(duration.as_millis() as u64);
        self
    }

    pub fn resolution(mut self, resolution: ResolutionStrategy) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn swipe(mut self, swipe: SwipeConfig) -> Self {
        self.swipe = swipe;
        self
    }

    pub fn copies(mut self, copies: usize) -> Self {
        self.copies = copies;
        self
    }

    /// Parses and validates a JSON configuration object.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.visible_count == 0 {
            return Err(ConfigError::ZeroVisibleCount);
        }
        if let Some(index) = self.initial_index {
            if !self.items.is_empty() && index >= self.items.len() {
                return Err(ConfigError::InitialIndexOutOfRange {
                    index,
                    len: self.items.len(),
                });
            }
        }
        if self.autoplay_ms == Some(0) {
            return Err(ConfigError::ZeroAutoplayDuration);
        }
        if self.copies % 2 == 0 {
            return Err(ConfigError::EvenCopyCount {
                copies: self.copies,
            });
        }
        let scroll_loop = self.looped && self.resolution == ResolutionStrategy::ScrollProximity;
        if scroll_loop && self.items.len() > 1 && self.copies < MIN_LOOP_COPIES {
            return Err(ConfigError::TooFewLoopCopies {
                copies: self.copies,
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn start_index(&self) -> usize {
        self.initial_index.unwrap_or(0)
    }

    pub fn autoplay_enabled(&self) -> bool {
        self.autoplay_ms.is_some()
    }

    pub fn autoplay_duration(&self) -> Duration {
        self.autoplay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_AUTOPLAY_DURATION)
    }

    pub fn wrap_policy(&self) -> WrapPolicy {
        if self.looped {
            WrapPolicy::Looped
        } else {
            WrapPolicy::Clamped
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    ZeroVisibleCount,
    InitialIndexOutOfRange { index: usize, len: usize },
    ZeroAutoplayDuration,
    EvenCopyCount { copies: usize },
    TooFewLoopCopies { copies: usize },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(err) => write!(f, "invalid carousel config: {err}"),
            ConfigError::ZeroVisibleCount => write!(f, "visibleCount must be at least 1"),
            ConfigError::InitialIndexOutOfRange { index, len } => {
                write!(f, "initialIndex {index} out of range for {len} items")
            }
            ConfigError::ZeroAutoplayDuration => write!(f, "autoplayMs must be positive"),
            ConfigError::EvenCopyCount { copies } => {
                write!(f, "copies must be odd; got {copies}")
            }
            ConfigError::TooFewLoopCopies { copies } => {
                write!(f, "a looping scroll strip needs at least {MIN_LOOP_COPIES} copies; got {copies}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::gesture::SwipeTrigger;

    #[test]
    fn parses_page_config() {
        let config = CarouselConfig::from_json(
            r#"{
                "items": ["a.jpg", { "src": "b.jpg", "caption": "Bergen" }],
                "visibleCount": 1,
                "loop": true,
                "withIndicator": true,
                "initialIndex": 1,
                "autoplayMs": 4000
            }"#,
        )
        .expect("valid config");
        assert_eq!(config.items[0], Item::new("a.jpg"));
        assert_eq!(config.items[1], Item::new("b.jpg").with_caption("Bergen"));
        assert!(config.looped);
        assert_eq!(config.start_index(), 1);
        assert_eq!(config.autoplay_duration(), Duration::from_millis(4_000));
        assert_eq!(config.wrap_policy(), WrapPolicy::Looped);
    }

    #[test]
    fn missing_keys_take_defaults() {
        let config = CarouselConfig::from_json(r#"{ "items": [] }"#).expect("valid config");
        assert_eq!(config.visible_count, 1);
        assert!(!config.looped);
        assert!(!config.autoplay_enabled());
        assert_eq!(config.resolution, ResolutionStrategy::Index);
        assert_eq!(config.swipe.trigger, SwipeTrigger::OnMove);
        assert_eq!(config.copies, DEFAULT_SCROLL_COPIES);
    }

    #[test]
    fn parses_scroll_strategy_and_swipe() {
        let config = CarouselConfig::from_json(
            r#"{
                "items": ["a", "b"],
                "resolution": "scrollProximity",
                "swipe": { "trigger": "onRelease", "threshold": 40 }
            }"#,
        )
        .expect("valid config");
        assert_eq!(config.resolution, ResolutionStrategy::ScrollProximity);
        assert_eq!(config.swipe, SwipeConfig::on_release());
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            CarouselConfig::new(["a"]).visible_count(0).validate(),
            Err(ConfigError::ZeroVisibleCount)
        ));
        assert!(matches!(
            CarouselConfig::new(["a", "b"]).initial_index(2).validate(),
            Err(ConfigError::InitialIndexOutOfRange { index: 2, len: 2 })
        ));
        assert!(matches!(
            CarouselConfig::new(["a"]).copies(4).validate(),
            Err(ConfigError::EvenCopyCount { copies: 4 })
        ));
        let single_copy = CarouselConfig::new(["a", "b", "c"])
            .looped(true)
            .resolution(ResolutionStrategy::ScrollProximity)
            .copies(1);
        assert!(matches!(
            single_copy.validate(),
            Err(ConfigError::TooFewLoopCopies { copies: 1 })
        ));
        assert!(single_copy.clone().looped(false).validate().is_ok());
        assert!(single_copy.resolution(ResolutionStrategy::Index).validate().is_ok());
        assert!(matches!(
            CarouselConfig::from_json(r#"{ "items": [], "autoplayMs": 0 }"#),
            Err(ConfigError::ZeroAutoplayDuration)
        ));
    }

    #[test]
    fn parse_errors_keep_their_source() {
        let err = CarouselConfig::from_json("{ nope").expect_err("malformed json");
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("invalid carousel config"));
    }
}
