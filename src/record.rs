use serde::Serialize;

/// Category printed under an exhibitor's stand in the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum ExhibitorType {
    #[default]
    #[serde(rename = "Espositore")]
    Exhibitor,
    #[serde(rename = "Co-espositore")]
    CoExhibitor,
    #[serde(rename = "Marchio")]
    Brand,
    #[serde(rename = "Azienda Rappresentata")]
    RepresentedCompany,
}

/// Keywords in detection priority order.
pub const TYPE_KEYWORDS: &[(&str, ExhibitorType)] = &[
    ("Co-espositore", ExhibitorType::CoExhibitor),
    ("Marchio", ExhibitorType::Brand),
    ("Azienda Rappresentata", ExhibitorType::RepresentedCompany),
];

impl ExhibitorType {
    /// Exact keyword line, as found under a stand marker.
    pub fn from_keyword(line: &str) -> Option<Self> {
        TYPE_KEYWORDS
            .iter()
            .find(|(kw, _)| *kw == line)
            .map(|(_, t)| *t)
    }

    /// Substring search over a whole element's text. "Marchio" anywhere in a
    /// description is enough to flip the type.
    pub fn detect(text: &str) -> Self {
        TYPE_KEYWORDS
            .iter()
            .find(|(kw, _)| text.contains(kw))
            .map(|(_, t)| *t)
            .unwrap_or_default()
    }

    pub fn label(self) -> &'static str {
        match self {
            ExhibitorType::Exhibitor => "Espositore",
            ExhibitorType::CoExhibitor => "Co-espositore",
            ExhibitorType::Brand => "Marchio",
            ExhibitorType::RepresentedCompany => "Azienda Rappresentata",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub address: String,
    pub phone: String,
    pub email: String,
    pub website: String,
}

impl Contact {
    pub fn is_empty(&self) -> bool {
        self.address.is_empty()
            && self.phone.is_empty()
            && self.email.is_empty()
            && self.website.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExhibitorRecord {
    pub name: String,
    pub pavilion: String,
    pub stand: String,
    #[serde(rename = "type")]
    pub kind: ExhibitorType,
    pub description: String,
    pub contact: Contact,
}

impl ExhibitorRecord {
    pub fn at(pavilion: impl Into<String>, stand: impl Into<String>) -> Self {
        Self {
            pavilion: pavilion.into(),
            stand: stand.into(),
            ..Default::default()
        }
    }

    pub fn is_identified(&self) -> bool {
        !self.name.is_empty() || !self.pavilion.is_empty()
    }

    pub fn key(&self) -> (&str, &str, &str) {
        (&self.name, &self.pavilion, &self.stand)
    }

    pub fn push_description(&mut self, line: &str) {
        if !self.description.is_empty() {
            self.description.push(' ');
        }
        self.description.push_str(line);
    }
}

/// One row of the listing + detail flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetailRecord {
    pub name: String,
    pub link: String,
    pub contact: Contact,
}

impl DetailRecord {
    pub fn link_only(link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            ..Default::default()
        }
    }
}
