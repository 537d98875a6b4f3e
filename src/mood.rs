//! Mood Types
//!
//! The fixed six-value mood enumeration and its display tables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Emoji shown when a diary carries no mood at all
pub const NO_MOOD_EMOJI: &str = "🌸";

/// Emoji shown in list views for a mood string we don't recognise
pub const UNKNOWN_MOOD_EMOJI: &str = "📝";

/// Emotional tone a diary entry can be tagged with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Excited,
    Calm,
    Anxious,
    Grateful,
}

impl Mood {
    /// All moods in the order the form offers them
    pub const ALL: [Mood; 6] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Excited,
        Mood::Calm,
        Mood::Anxious,
        Mood::Grateful,
    ];

    /// Wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Excited => "excited",
            Mood::Calm => "calm",
            Mood::Anxious => "anxious",
            Mood::Grateful => "grateful",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Sad => "😢",
            Mood::Excited => "✨",
            Mood::Calm => "😌",
            Mood::Anxious => "😰",
            Mood::Grateful => "🙏",
        }
    }

    /// Japanese label shown next to the emoji
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "嬉しい",
            Mood::Sad => "悲しい",
            Mood::Excited => "ワクワク",
            Mood::Calm => "穏やか",
            Mood::Anxious => "不安",
            Mood::Grateful => "感謝",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown mood '{}', expected one of: happy, sad, excited, calm, anxious, grateful",
                    s
                )
            })
    }
}

/// Mood as stored on a diary coming back from the backend.
///
/// The backend stores mood as free text, so anything outside the six known
/// values is kept verbatim instead of failing the whole response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MoodTag {
    Known(Mood),
    Unknown(String),
}

impl MoodTag {
    pub fn known(&self) -> Option<Mood> {
        match self {
            MoodTag::Known(m) => Some(*m),
            MoodTag::Unknown(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            MoodTag::Known(m) => m.as_str(),
            MoodTag::Unknown(s) => s,
        }
    }
}

impl From<Mood> for MoodTag {
    fn from(mood: Mood) -> Self {
        MoodTag::Known(mood)
    }
}

/// Emoji for list views: known mood, unknown mood, or no mood
pub fn list_emoji(mood: Option<&MoodTag>) -> &'static str {
    match mood {
        Some(MoodTag::Known(m)) => m.emoji(),
        Some(MoodTag::Unknown(_)) => UNKNOWN_MOOD_EMOJI,
        None => NO_MOOD_EMOJI,
    }
}

/// Emoji for the admin views, which use the memo icon for any missing mood
pub fn admin_emoji(mood: Option<&MoodTag>) -> &'static str {
    match mood {
        Some(MoodTag::Known(m)) => m.emoji(),
        _ => UNKNOWN_MOOD_EMOJI,
    }
}

/// Emoji for the detail view, which always falls back to the flower
pub fn detail_emoji(mood: Option<&MoodTag>) -> &'static str {
    match mood {
        Some(MoodTag::Known(m)) => m.emoji(),
        _ => NO_MOOD_EMOJI,
    }
}

/// Label for the detail view; unknown moods are shown as-is
pub fn detail_label(mood: Option<&MoodTag>) -> String {
    match mood {
        Some(MoodTag::Known(m)) => m.label().to_string(),
        Some(MoodTag::Unknown(s)) => s.clone(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_moods_map_to_fixed_emoji_and_label() {
        let expected = [
            (Mood::Happy, "😊", "嬉しい"),
            (Mood::Sad, "😢", "悲しい"),
            (Mood::Excited, "✨", "ワクワク"),
            (Mood::Calm, "😌", "穏やか"),
            (Mood::Anxious, "😰", "不安"),
            (Mood::Grateful, "🙏", "感謝"),
        ];

        for (mood, emoji, label) in expected {
            let tag = MoodTag::from(mood);
            assert_eq!(list_emoji(Some(&tag)), emoji);
            assert_eq!(detail_emoji(Some(&tag)), emoji);
            assert_eq!(admin_emoji(Some(&tag)), emoji);
            assert_eq!(detail_label(Some(&tag)), label);
        }
    }

    #[test]
    fn test_fallback_emoji() {
        let unknown = MoodTag::Unknown("sleepy".to_string());

        assert_eq!(list_emoji(None), NO_MOOD_EMOJI);
        assert_eq!(list_emoji(Some(&unknown)), UNKNOWN_MOOD_EMOJI);
        assert_eq!(admin_emoji(None), UNKNOWN_MOOD_EMOJI);
        assert_eq!(detail_emoji(Some(&unknown)), NO_MOOD_EMOJI);
        assert_eq!(detail_label(Some(&unknown)), "sleepy");
        assert_eq!(detail_label(None), "");
    }

    #[test]
    fn test_mood_tag_deserialization() {
        let tag: MoodTag = serde_json::from_str(r#""calm""#).unwrap();
        assert_eq!(tag, MoodTag::Known(Mood::Calm));

        let tag: MoodTag = serde_json::from_str(r#""melancholy""#).unwrap();
        assert_eq!(tag, MoodTag::Unknown("melancholy".to_string()));
        assert_eq!(tag.known(), None);
        assert_eq!(tag.as_str(), "melancholy");
    }

    #[test]
    fn test_parse_mood() {
        assert_eq!("Happy".parse::<Mood>().unwrap(), Mood::Happy);
        assert_eq!(" grateful ".parse::<Mood>().unwrap(), Mood::Grateful);
        assert!("angry".parse::<Mood>().is_err());
    }
}
