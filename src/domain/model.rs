use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Region key selecting which model artifact serves a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Riyadh,
    Western,
    Southern,
    Eastern,
}

impl Region {
    pub const ALL: [Region; 4] = [
        Region::Riyadh,
        Region::Western,
        Region::Southern,
        Region::Eastern,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Region::Riyadh => "riyadh",
            Region::Western => "western",
            Region::Southern => "southern",
            Region::Eastern => "eastern",
        }
    }

    /// File name of this region's model artifact inside the artifacts directory.
    pub fn artifact_file(&self) -> &'static str {
        match self {
            Region::Riyadh => "Riyadh_KM.json",
            Region::Western => "Western_KM.json",
            Region::Southern => "Southern_KM.json",
            Region::Eastern => "Eastern_KM.json",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|region| region.key() == s)
            .ok_or_else(|| format!("unknown region '{}'", s))
    }
}

/// Request body for every `/predict/{region}` route.
///
/// Field names follow the wire format; unknown fields are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PredictionRequest {
    #[serde(rename = "Type_encoding")]
    pub type_encoding: i64,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Area_m2")]
    pub area_m2: f64,
}

/// A single value produced by a model.
///
/// Cluster labels serialize as JSON integers, regression outputs as floats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Output {
    Cluster(usize),
    Value(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResponse {
    pub prediction: Vec<Output>,
}
