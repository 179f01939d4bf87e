//! Diary entry, note and mood types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Overall mood label returned by the analysis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mood {
    Positive,
    Neutral,
    Negative,
    /// Missing or unrecognized label
    #[default]
    Unknown,
}

impl Mood {
    /// Parse a label case-insensitively; anything unrecognized is `Unknown`
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "positive" => Self::Positive,
            "neutral" => Self::Neutral,
            "negative" => Self::Negative,
            _ => Self::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
            Self::Unknown => "unknown",
        }
    }

    /// Chart value: positive 1, negative -1, everything else 0
    pub fn score(&self) -> i8 {
        match self {
            Self::Positive => 1,
            Self::Negative => -1,
            Self::Neutral | Self::Unknown => 0,
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Mood {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Mood {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label.as_deref().map(Mood::from_label).unwrap_or_default())
    }
}

/// Mood analysis as returned by the model in JSON mode
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoodAnalysis {
    #[serde(default)]
    pub mood: Mood,
    /// Between 0 and 1
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub emotions: Vec<String>,
}

impl MoodAnalysis {
    /// Confidence as a whole percentage, clamped to 0..=100
    pub fn confidence_percent(&self) -> u8 {
        if !self.confidence.is_finite() {
            return 0;
        }
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

/// A diary entry as stored by the diary service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryEntry {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    pub content: String,
    #[serde(with = "entry_date")]
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<MoodAnalysis>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl DiaryEntry {
    pub fn new(date: NaiveDate, content: impl Into<String>) -> Self {
        Self {
            id: None,
            title: String::new(),
            content: content.into(),
            date,
            image: None,
            analysis: None,
            created_at: None,
        }
    }

    /// Attach a stored analysis
    pub fn with_analysis(mut self, analysis: MoodAnalysis) -> Self {
        self.analysis = Some(analysis);
        self
    }

    /// Mood from the stored analysis, `Unknown` if there is none
    pub fn mood(&self) -> Mood {
        self.analysis
            .as_ref()
            .map(|analysis| analysis.mood)
            .unwrap_or_default()
    }
}

/// A note as stored by the notes service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    pub content: String,
}

impl Note {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            content: content.into(),
        }
    }
}

/// One point of the mood chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodPoint {
    pub date: NaiveDate,
    pub score: i8,
}

/// Entry dates are written as `YYYY-MM-DD` and read from either that or a
/// full RFC 3339 timestamp.
mod entry_date {
    use chrono::{DateTime, NaiveDate};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if let Ok(date) = NaiveDate::parse_from_str(&raw, FORMAT) {
            return Ok(date);
        }
        DateTime::parse_from_rfc3339(&raw)
            .map(|timestamp| timestamp.date_naive())
            .map_err(|_| D::Error::custom(format!("invalid entry date '{}'", raw)))
    }
}
