use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SoundType {
    Police,
    #[default]
    Alarm,
    Bell,
    Siren,
}

impl SoundType {
    pub const ALL: [SoundType; 4] = [
        SoundType::Police,
        SoundType::Alarm,
        SoundType::Bell,
        SoundType::Siren,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SoundType::Police => "police",
            SoundType::Alarm => "alarm",
            SoundType::Bell => "bell",
            SoundType::Siren => "siren",
        }
    }

    /// Label shown in the sound picker.
    pub fn label(self) -> &'static str {
        match self {
            SoundType::Police => "Police Siren",
            SoundType::Alarm => "Alarm",
            SoundType::Bell => "Bell",
            SoundType::Siren => "Siren",
        }
    }
}

impl fmt::Display for SoundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SoundType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "police" => Ok(SoundType::Police),
            "alarm" => Ok(SoundType::Alarm),
            "bell" => Ok(SoundType::Bell),
            "siren" => Ok(SoundType::Siren),
            other => Err(format!("unknown sound type: {other}")),
        }
    }
}

/// What the user supplies when creating an alert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAlert {
    pub coin_code: String,
    pub target_price: f64,
    pub is_above: bool,
    pub sound_type: SoundType,
}

impl NewAlert {
    /// Direction is fixed here: the alert fires above the target when the
    /// target sits above the price seen at creation time.
    pub fn from_current_price(
        coin_code: &str,
        target_price: f64,
        current_price: Option<f64>,
        sound_type: SoundType,
    ) -> Self {
        Self {
            coin_code: coin_code.to_string(),
            target_price,
            is_above: target_price > current_price.unwrap_or(0.0),
            sound_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub coin_code: String,
    pub target_price: f64,
    pub is_above: bool,
    pub created_at: DateTime<Utc>,

    // older records were written before sounds were selectable
    #[serde(default)]
    pub sound_type: SoundType,
}

impl Alert {
    pub fn is_hit(&self, price: f64) -> bool {
        if self.is_above {
            price >= self.target_price
        } else {
            price <= self.target_price
        }
    }

    pub fn direction_wording(&self) -> &'static str {
        if self.is_above { "risen above" } else { "fallen below" }
    }

    pub fn direction_label(&self) -> &'static str {
        if self.is_above { "Above" } else { "Below" }
    }
}
