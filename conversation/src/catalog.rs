//! The agency's destination catalog.

/// A bookable time-travel destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destination {
    pub name: &'static str,
    pub tagline: &'static str,
    /// Price in euros.
    pub price_eur: u32,
    pub duration_days: u8,
    pub highlights: &'static [&'static str],
}

impl Destination {
    /// Price formatted the way the agency prints it, e.g. `12,500€`.
    pub fn price_label(&self) -> String {
        let thousands = self.price_eur / 1000;
        let rest = self.price_eur % 1000;
        if thousands == 0 {
            format!("{}€", rest)
        } else {
            format!("{},{:03}€", thousands, rest)
        }
    }

    pub fn duration_label(&self) -> String {
        format!("{} jours", self.duration_days)
    }

    pub fn title(&self) -> String {
        format!("{} - {}", self.name, self.tagline)
    }
}

pub const PARIS_1889: Destination = Destination {
    name: "Paris 1889",
    tagline: "La Belle Époque",
    price_eur: 12_500,
    duration_days: 7,
    highlights: &[
        "Inauguration de la Tour Eiffel",
        "Exposition Universelle",
        "Cabarets de Montmartre",
        "Rencontres avec les artistes de l'époque",
    ],
};

pub const CRETACEOUS: Destination = Destination {
    name: "Crétacé -65M",
    tagline: "L'Ère des Dinosaures",
    price_eur: 25_000,
    duration_days: 5,
    highlights: &[
        "Observation des T-Rex et Tricératops",
        "Exploration des forêts préhistoriques",
        "Capsules ultra-sécurisées",
        "Expérience de la nature sauvage",
    ],
};

pub const FLORENCE_1504: Destination = Destination {
    name: "Florence 1504",
    tagline: "Renaissance Italienne",
    price_eur: 15_800,
    duration_days: 6,
    highlights: &[
        "Rencontre avec Michel-Ange",
        "Palais des Médicis",
        "Cathédrale de Florence",
        "Immersion dans l'art et la culture",
    ],
};

pub static DESTINATIONS: [Destination; 3] = [PARIS_1889, CRETACEOUS, FLORENCE_1504];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_label_uses_thousands_separator() {
        assert_eq!(PARIS_1889.price_label(), "12,500€");
        assert_eq!(CRETACEOUS.price_label(), "25,000€");
        assert_eq!(FLORENCE_1504.price_label(), "15,800€");
    }

    #[test]
    fn test_title_and_duration_labels() {
        assert_eq!(FLORENCE_1504.title(), "Florence 1504 - Renaissance Italienne");
        assert_eq!(CRETACEOUS.duration_label(), "5 jours");
    }
}
