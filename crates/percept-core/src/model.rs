//! Tagged survey records as they arrive from collaborators (forms, JSON imports).
//!
//! These are unvalidated; [`Survey::from_project`] is the boundary that checks
//! them and resolves names to indices.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::survey::Survey;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    /// Display name; unique within a project and used as the brand's key everywhere.
    pub name: String,
}

impl Brand {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Es,
}

impl Lang {
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }
}

impl std::str::FromStr for Lang {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "es" => Ok(Self::Es),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub id: String,
    #[serde(default)]
    pub label_en: String,
    #[serde(default)]
    pub label_es: String,
}

impl Attribute {
    pub fn new(
        id: impl Into<String>,
        label_en: impl Into<String>,
        label_es: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label_en: label_en.into(),
            label_es: label_es.into(),
        }
    }

    /// Display label in `lang`, falling back to the id when that label is blank.
    pub fn label(&self, lang: Lang) -> &str {
        let label = match lang {
            Lang::En => self.label_en.as_str(),
            Lang::Es => self.label_es.as_str(),
        };
        if label.trim().is_empty() {
            self.id.as_str()
        } else {
            label
        }
    }
}

/// One respondent's answers: `performance[brand][attribute_id]` and optional
/// `preference[brand]`, all on the 1–5 scale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub performance: IndexMap<String, IndexMap<String, f64>>,
    #[serde(default)]
    pub preference: IndexMap<String, f64>,
}

impl Response {
    pub fn rate(&mut self, brand: &str, attribute_id: &str, rating: f64) -> &mut Self {
        self.performance
            .entry(brand.to_string())
            .or_default()
            .insert(attribute_id.to_string(), rating);
        self
    }

    pub fn prefer(&mut self, brand: &str, rating: f64) -> &mut Self {
        self.preference.insert(brand.to_string(), rating);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub brands: Vec<Brand>,
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub responses: Vec<Response>,
    /// Name of the reference ("ideal") brand, matched case-insensitively.
    #[serde(default)]
    pub benchmark: Option<String>,
    #[serde(default)]
    pub lang: Lang,
}

impl Project {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::InvalidProjectJson {
            message: e.to_string(),
        })
    }

    /// Runs the same checks as [`Survey::from_project`] without keeping the result.
    pub fn validate(&self) -> Result<()> {
        Survey::from_project(self).map(|_| ())
    }

    pub fn brand_names(&self) -> impl Iterator<Item = &str> {
        self.brands.iter().map(|b| b.name.as_str())
    }
}
